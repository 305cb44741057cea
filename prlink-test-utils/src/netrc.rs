use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary home directory containing a `.netrc` file.
///
/// Unlike [`crate::HomeEnvTestGuard`] this does not touch the process
/// environment, so tests using it can run in parallel.
pub struct NetrcGuard {
  temp_dir: TempDir,
  netrc_path: PathBuf,
}

impl NetrcGuard {
  /// Create a new NetrcGuard with the given content
  pub fn new(content: &str) -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let netrc_path = temp_dir.path().join(".netrc");

    fs::write(&netrc_path, content).expect("Failed to write test .netrc");

    Self { temp_dir, netrc_path }
  }

  /// Get the path to the .netrc file
  pub fn netrc_path(&self) -> &Path {
    &self.netrc_path
  }

  /// Get the path to the temporary home directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Current content of the .netrc file
  pub fn content(&self) -> String {
    fs::read_to_string(&self.netrc_path).unwrap_or_default()
  }
}
