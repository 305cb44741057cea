//! HOME directory isolation for testing
//!
//! CLI tests spawn the `prlink` binary; they pass the variables returned by
//! [`HomeEnvTestGuard::envs`] to the child process instead of mutating the
//! test process environment.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary HOME plus a config directory inside it.
pub struct HomeEnvTestGuard {
  /// The temporary directory that will be used as HOME
  pub temp_dir: TempDir,
}

impl HomeEnvTestGuard {
  /// Create a new temporary HOME with an empty config directory.
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join(".config").join("prlink")).expect("Failed to create config directory");
    Self { temp_dir }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to a file in the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }

  /// The prlink config directory inside the temporary HOME.
  pub fn config_dir(&self) -> PathBuf {
    self.home_path(".config/prlink")
  }

  /// Write a `.netrc` into the temporary HOME.
  pub fn write_netrc(&self, content: &str) {
    fs::write(self.home_path(".netrc"), content).expect("Failed to write test .netrc");
  }

  /// Environment variables pointing a child process at this HOME.
  pub fn envs(&self) -> Vec<(&'static str, OsString)> {
    vec![
      ("HOME", self.home_dir().as_os_str().to_os_string()),
      ("PRLINK_CONFIG_DIR", self.config_dir().into_os_string()),
    ]
  }
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}
