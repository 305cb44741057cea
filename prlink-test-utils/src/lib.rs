//! Test utilities shared across the prlink workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary git repositories with remotes and upstreams ([`GitRepoTestGuard`])
//! - Temporary `.netrc` files ([`NetrcGuard`])
//! - HOME / config directory isolation for CLI tests ([`HomeEnvTestGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod git;
pub mod home;
pub mod netrc;

// Re-export commonly used items
pub use git::GitRepoTestGuard;
pub use home::HomeEnvTestGuard;
pub use netrc::NetrcGuard;
