//! Repository detection.
//!
//! Only the given directory is inspected. A file opened deep inside a
//! repository will not be recognised unless the caller passes the
//! repository root.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{PrLinkError, Result};

/// Name of the metadata directory inside a working tree.
pub const METADATA_DIR: &str = ".git";

/// Returns true iff `path/.git` exists.
pub fn is_repository<P: AsRef<Path>>(path: P) -> bool {
  let exists = path.as_ref().join(METADATA_DIR).exists();
  trace!(path = %path.as_ref().display(), exists, "Checked for git metadata directory");
  exists
}

/// Returns the metadata directory under `path`, or
/// [`PrLinkError::NotARepository`].
pub fn metadata_dir<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
  let path = path.as_ref();
  if is_repository(path) {
    Ok(path.join(METADATA_DIR))
  } else {
    Err(PrLinkError::NotARepository(path.to_path_buf()))
  }
}
