//! # prlink CLI Library
//!
//! Command definitions, the resolution pipeline that ties the core and GitHub
//! crates together, and the sinks that receive the rendered snippet.

pub mod cli;
pub mod pipeline;
pub mod sink;

pub use pipeline::{Mode, Pipeline};
pub use sink::{FileCursorSink, StdoutSink, TextSink};
