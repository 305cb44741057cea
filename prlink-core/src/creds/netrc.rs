//! Helpers for reading and writing credentials stored in `.netrc` files.
//!
//! The GitHub token lives in the `password` field of the `machine github.com`
//! entry, which keeps it compatible with git, curl and other tools reading
//! the same file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::creds::{CredentialStore, Credentials};
use crate::error::{PrLinkError, Result};

/// Login written for new entries. GitHub ignores it for token auth.
pub const DEFAULT_LOGIN: &str = "x-access-token";

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use prlink_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

fn store_error(context: &str, path: &Path, e: std::io::Error) -> PrLinkError {
  PrLinkError::CredentialStore(format!("{context} {}: {e}", path.display()))
}

/// Parses `.netrc` text and returns credentials for the requested machine.
///
/// Both the single-line (`machine host login user password pass`) and the
/// multi-line layouts are accepted. Entries without a `password` are ignored.
pub fn parse_netrc(content: &str, target_machine: &str) -> Option<Credentials> {
  let mut tokens = tokenize(content).into_iter().map(|(_, token)| token);
  let mut current_machine: Option<&str> = None;
  let mut found: Option<Credentials> = None;
  let mut username = String::new();
  let mut password = String::new();

  let mut finish = |machine: Option<&str>, username: &mut String, password: &mut String| {
    if machine == Some(target_machine) && !password.is_empty() && found.is_none() {
      found = Some(Credentials {
        username: std::mem::take(username),
        password: std::mem::take(password),
      });
    }
    username.clear();
    password.clear();
  };

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        finish(current_machine, &mut username, &mut password);
        current_machine = tokens.next();
      }
      "default" => {
        finish(current_machine, &mut username, &mut password);
        current_machine = None;
      }
      "login" => username = tokens.next().unwrap_or_default().to_string(),
      "password" => password = tokens.next().unwrap_or_default().to_string(),
      "account" => {
        tokens.next();
      }
      _ => {}
    }
  }
  finish(current_machine, &mut username, &mut password);

  found
}

/// Render an entry block in the multi-line layout.
fn format_entry(machine: &str, username: &str, password: &str) -> String {
  format!("machine {machine}\n  login {username}\n  password {password}\n")
}

/// Splits `.netrc` text into whitespace-separated tokens with their byte offsets.
fn tokenize(content: &str) -> Vec<(usize, &str)> {
  let mut tokens = Vec::new();
  let mut start = None;
  for (index, c) in content.char_indices() {
    match (c.is_whitespace(), start) {
      (true, Some(begin)) => {
        tokens.push((begin, &content[begin..index]));
        start = None;
      }
      (false, None) => start = Some(index),
      _ => {}
    }
  }
  if let Some(begin) = start {
    tokens.push((begin, &content[begin..]));
  }
  tokens
}

/// Returns `content` without the entries for `machine`, and whether one was found.
///
/// An entry spans from its `machine` token up to the next `machine` or
/// `default` token, whether the file uses one line per entry or one line per
/// field.
fn strip_entry(content: &str, machine: &str) -> (String, bool) {
  let tokens = tokenize(content);
  let mut cuts: Vec<(usize, usize)> = Vec::new();
  let mut open: Option<usize> = None;

  let mut index = 0;
  while index < tokens.len() {
    let (offset, token) = tokens[index];
    match token {
      "machine" | "default" => {
        if let Some(start) = open.take() {
          cuts.push((start, offset));
        }
        if token == "machine" {
          if tokens.get(index + 1).map(|(_, name)| *name) == Some(machine) {
            open = Some(offset);
          }
          index += 1;
        }
      }
      // Values are skipped so a password such as `machine` is not a keyword.
      "login" | "password" | "account" => index += 1,
      _ => {}
    }
    index += 1;
  }
  if let Some(start) = open {
    cuts.push((start, content.len()));
  }

  let mut kept = String::with_capacity(content.len());
  let mut last = 0;
  for (start, end) in &cuts {
    kept.push_str(&content[last..*start]);
    last = *end;
  }
  kept.push_str(&content[last..]);

  (kept, !cuts.is_empty())
}

/// `.netrc`-backed [`CredentialStore`]. Keys are machine names.
#[derive(Debug, Clone)]
pub struct NetrcCredentialStore {
  path: PathBuf,
}

impl NetrcCredentialStore {
  /// Store backed by `<home>/.netrc`.
  pub fn new(home: &Path) -> Self {
    Self {
      path: get_netrc_path(home),
    }
  }

  /// Store backed by the current user's `~/.netrc`.
  pub fn for_current_user() -> Result<Self> {
    let base_dirs =
      BaseDirs::new().ok_or_else(|| PrLinkError::CredentialStore("could not determine home directory".to_string()))?;
    Ok(Self::new(base_dirs.home_dir()))
  }

  /// Location of the backing file.
  pub fn path(&self) -> &Path {
    &self.path
  }

  fn read(&self) -> Result<Option<String>> {
    if !self.path.exists() {
      return Ok(None);
    }
    fs::read_to_string(&self.path)
      .map(Some)
      .map_err(|e| store_error("Failed to read", &self.path, e))
  }

  /// Full credentials for `machine`, including the login.
  pub fn credentials(&self, machine: &str) -> Result<Option<Credentials>> {
    Ok(self.read()?.and_then(|content| parse_netrc(&content, machine)))
  }

  fn write(&self, content: &str) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).map_err(|e| store_error("Failed to create", parent, e))?;
    }

    let mut file = fs::File::create(&self.path).map_err(|e| store_error("Failed to open", &self.path, e))?;
    file
      .write_all(content.as_bytes())
      .map_err(|e| store_error("Failed to write", &self.path, e))?;

    set_secure_permissions(&self.path)
  }
}

impl CredentialStore for NetrcCredentialStore {
  fn get(&self, key: &str) -> Result<Option<String>> {
    let creds = self.credentials(key)?;
    debug!(machine = key, found = creds.is_some(), "Looked up .netrc credentials");
    Ok(creds.map(|c| c.password))
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    let existing = self.read()?.unwrap_or_default();
    let username = parse_netrc(&existing, key)
      .map(|c| c.username)
      .filter(|username| !username.is_empty())
      .unwrap_or_else(|| DEFAULT_LOGIN.to_string());

    let (kept, replaced) = strip_entry(&existing, key);
    let mut content = kept.trim_end().to_string();
    if !content.is_empty() {
      content.push_str("\n\n");
    }
    content.push_str(&format_entry(key, &username, value));

    debug!(machine = key, replaced, "Writing .netrc entry");
    self.write(&content)
  }

  fn delete(&self, key: &str) -> Result<()> {
    let Some(existing) = self.read()? else {
      return Ok(());
    };

    let (content, removed) = strip_entry(&existing, key);
    if removed {
      debug!(machine = key, "Removing .netrc entry");
      let mut content = content.trim_end().to_string();
      if !content.is_empty() {
        content.push('\n');
      }
      self.write(&content)?;
    }
    Ok(())
  }
}

#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let permissions = fs::Permissions::from_mode(0o600);
  fs::set_permissions(path, permissions).map_err(|e| store_error("Failed to set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_secure_permissions(path: &Path) -> Result<()> {
  tracing::warn!(path = %path.display(), "Cannot restrict .netrc permissions on this platform");
  Ok(())
}

#[cfg(test)]
mod tests {
  use prlink_test_utils::NetrcGuard;

  use super::*;

  const SAMPLE: &str = "machine atlassian.net\n  login me@example.com\n  password jira-token\n\nmachine github.com\n  login octocat\n  password gh-token\n";

  #[test]
  fn test_parse_multi_line() {
    let creds = parse_netrc(SAMPLE, "github.com").unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "gh-token");

    let creds = parse_netrc(SAMPLE, "atlassian.net").unwrap();
    assert_eq!(creds.password, "jira-token");
  }

  #[test]
  fn test_parse_single_line_and_missing() {
    let content = "machine github.com login octocat password gh-token\ndefault login anon password anon\n";

    assert_eq!(parse_netrc(content, "github.com").unwrap().password, "gh-token");
    assert!(parse_netrc(content, "gitlab.com").is_none());
    assert!(parse_netrc("machine github.com login octocat\n", "github.com").is_none());
  }

  #[test]
  fn test_get_from_guarded_home() {
    let guard = NetrcGuard::new(SAMPLE);
    let store = NetrcCredentialStore::new(guard.home_dir());

    assert_eq!(store.path(), guard.netrc_path());
    assert_eq!(store.get("github.com").unwrap().as_deref(), Some("gh-token"));
    assert_eq!(store.get("example.com").unwrap(), None);
  }

  #[test]
  fn test_get_without_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let store = NetrcCredentialStore::new(temp_dir.path());

    assert_eq!(store.get("github.com").unwrap(), None);
    store.delete("github.com").unwrap();
    assert!(!store.path().exists());
  }

  #[test]
  fn test_set_replaces_entry_and_keeps_login() {
    let guard = NetrcGuard::new(SAMPLE);
    let store = NetrcCredentialStore::new(guard.home_dir());

    store.set("github.com", "rotated").unwrap();

    let creds = store.credentials("github.com").unwrap().unwrap();
    assert_eq!(creds.username, "octocat");
    assert_eq!(creds.password, "rotated");
    assert_eq!(store.get("atlassian.net").unwrap().as_deref(), Some("jira-token"));

    let content = fs::read_to_string(store.path()).unwrap();
    assert_eq!(content.matches("machine github.com").count(), 1);
  }

  #[test]
  fn test_set_creates_file_with_default_login() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let store = NetrcCredentialStore::new(temp_dir.path());

    store.set("github.com", "fresh-token").unwrap();

    let creds = store.credentials("github.com").unwrap().unwrap();
    assert_eq!(creds.username, DEFAULT_LOGIN);
    assert_eq!(creds.password, "fresh-token");

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      let mode = fs::metadata(store.path()).unwrap().permissions().mode();
      assert_eq!(mode & 0o777, 0o600);
    }
  }

  #[test]
  fn test_delete_removes_only_target_machine() {
    let guard = NetrcGuard::new(SAMPLE);
    let store = NetrcCredentialStore::new(guard.home_dir());

    store.delete("github.com").unwrap();

    assert_eq!(store.get("github.com").unwrap(), None);
    assert_eq!(store.get("atlassian.net").unwrap().as_deref(), Some("jira-token"));
  }

  const SINGLE_LINE_GITHUB_LAST: &str =
    "machine gitlab.com login c password keep machine github.com login a password old\n";
  const SINGLE_LINE_GITHUB_FIRST: &str =
    "machine github.com login a password old machine gitlab.com login c password keep\n";

  #[test]
  fn test_delete_single_line_entries() {
    for content in [SINGLE_LINE_GITHUB_LAST, SINGLE_LINE_GITHUB_FIRST] {
      let guard = NetrcGuard::new(content);
      let store = NetrcCredentialStore::new(guard.home_dir());

      store.delete("github.com").unwrap();

      assert_eq!(store.get("github.com").unwrap(), None, "{content:?}");
      assert_eq!(store.get("gitlab.com").unwrap().as_deref(), Some("keep"), "{content:?}");
    }
  }

  #[test]
  fn test_set_single_line_entries() {
    for content in [SINGLE_LINE_GITHUB_LAST, SINGLE_LINE_GITHUB_FIRST] {
      let guard = NetrcGuard::new(content);
      let store = NetrcCredentialStore::new(guard.home_dir());

      store.set("github.com", "new").unwrap();

      let creds = store.credentials("github.com").unwrap().unwrap();
      assert_eq!(creds.username, "a", "{content:?}");
      assert_eq!(creds.password, "new", "{content:?}");
      assert_eq!(store.get("gitlab.com").unwrap().as_deref(), Some("keep"), "{content:?}");

      let written = guard.content();
      assert_eq!(written.matches("github.com").count(), 1, "{written:?}");
    }
  }

  #[test]
  fn test_password_named_like_a_keyword() {
    let content = "machine github.com login a password machine\nmachine gitlab.com login c password keep\n";
    let guard = NetrcGuard::new(content);
    let store = NetrcCredentialStore::new(guard.home_dir());

    assert_eq!(store.get("github.com").unwrap().as_deref(), Some("machine"));
    store.delete("github.com").unwrap();
    assert_eq!(guard.content(), "machine gitlab.com login c password keep\n");
  }
}
