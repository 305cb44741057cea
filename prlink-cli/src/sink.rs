//! # Insertion Sinks
//!
//! Where the rendered snippet ends up. An editor integration either captures
//! stdout or asks prlink to splice the text into the active file at the
//! cursor's byte offset.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use prlink_core::{PrLinkError, Result};
use tracing::{debug, info};

/// Receives the rendered text exactly once per successful invocation.
pub trait TextSink {
  fn insert(&mut self, text: &str) -> Result<()>;
}

/// Writes the text to stdout without a trailing newline.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TextSink for StdoutSink {
  fn insert(&mut self, text: &str) -> Result<()> {
    write_text(&mut io::stdout().lock(), "stdout", text)
  }
}

fn write_text(out: &mut dyn Write, target: &str, text: &str) -> Result<()> {
  out
    .write_all(text.as_bytes())
    .and_then(|()| out.flush())
    .map_err(|source| PrLinkError::SinkWrite {
      target: target.to_string(),
      source,
    })
}

/// Splices the text into a file at a byte offset.
#[derive(Debug, Clone)]
pub struct FileCursorSink {
  pub path: PathBuf,
  pub offset: usize,
}

impl FileCursorSink {
  pub fn new(path: impl Into<PathBuf>, offset: usize) -> Self {
    Self {
      path: path.into(),
      offset,
    }
  }
}

impl TextSink for FileCursorSink {
  fn insert(&mut self, text: &str) -> Result<()> {
    let mut content = fs::read_to_string(&self.path).map_err(|e| PrLinkError::file_access(&self.path, e))?;

    if self.offset > content.len() {
      return Err(PrLinkError::InvalidCursor(format!(
        "offset {} is past the end of {} ({} bytes)",
        self.offset,
        self.path.display(),
        content.len()
      )));
    }
    if !content.is_char_boundary(self.offset) {
      return Err(PrLinkError::InvalidCursor(format!(
        "offset {} splits a character in {}",
        self.offset,
        self.path.display()
      )));
    }

    content.insert_str(self.offset, text);
    fs::write(&self.path, content).map_err(|source| PrLinkError::SinkWrite {
      target: self.path.display().to_string(),
      source,
    })?;

    info!(path = %self.path.display(), offset = self.offset, "Inserted text into file");
    debug!(text, "Inserted text");
    Ok(())
  }
}
