//! # Credential Management
//!
//! Storage and retrieval of the GitHub access token.
//!
//! The pipeline only sees the [`CredentialStore`] trait. The default backend is
//! the user's `.netrc` file; an in-memory store is used when the token comes
//! from the environment.

pub mod netrc;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

pub use netrc::NetrcCredentialStore;

/// Represents credentials for a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Key/value secret storage keyed by service name (e.g. `github.com`).
pub trait CredentialStore {
  /// Fetch the secret for `key`, if one is stored.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Store or replace the secret for `key`.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Remove the secret for `key`. Removing a missing key is not an error.
  fn delete(&self, key: &str) -> Result<()>;
}

/// Process-local store. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
  secrets: RefCell<HashMap<String, String>>,
}

impl MemoryCredentialStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// A store pre-populated with one secret.
  pub fn with_secret(key: &str, value: &str) -> Self {
    let store = Self::new();
    store.secrets.borrow_mut().insert(key.to_string(), value.to_string());
    store
  }
}

impl CredentialStore for MemoryCredentialStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    Ok(self.secrets.borrow().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.secrets.borrow_mut().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<()> {
    self.secrets.borrow_mut().remove(key);
    Ok(())
  }
}
