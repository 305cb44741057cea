//! # Git Config Parsing
//!
//! A small reader for the INI-like `.git/config` format. It understands
//! sections with optional quoted subsections, `key = value` pairs, comments
//! and quoted values. The deprecated `[section.subsection]` header is read as
//! `[section "subsection"]`. Include directives, line continuations and
//! multi-valued keys are not interpreted; the last value of a repeated key wins.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{PrLinkError, Result};
use crate::git::locator::metadata_dir;

/// Section key prefix identifying remotes, e.g. `remote "origin"`.
pub const REMOTE_PREFIX: &str = "remote ";

/// Section key prefix identifying branches, e.g. `branch "main"`.
pub const BRANCH_PREFIX: &str = "branch ";

/// One `[section]` or `[section "subsection"]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
  key: String,
  entries: Vec<(String, String)>,
}

impl ConfigSection {
  fn new(key: String) -> Self {
    Self {
      key,
      entries: Vec::new(),
    }
  }

  /// Normalised section key, e.g. `remote "origin"` or `core`.
  pub fn key(&self) -> &str {
    &self.key
  }

  /// Look up a field. Field names are case-insensitive.
  pub fn get(&self, field: &str) -> Option<&str> {
    let field = field.to_ascii_lowercase();
    self
      .entries
      .iter()
      .find(|(name, _)| *name == field)
      .map(|(_, value)| value.as_str())
  }

  fn set(&mut self, field: String, value: String) {
    match self.entries.iter_mut().find(|(name, _)| *name == field) {
      Some(entry) => entry.1 = value,
      None => self.entries.push((field, value)),
    }
  }
}

/// Parsed git config: section key → fields, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
  sections: Vec<ConfigSection>,
}

impl ConfigMap {
  /// Parse config text.
  pub fn parse(text: &str) -> Result<Self> {
    let mut map = ConfigMap::default();
    let mut current: Option<usize> = None;

    for (index, raw_line) in text.lines().enumerate() {
      let line_no = index + 1;
      let line = raw_line.trim();

      if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        continue;
      }

      if line.starts_with('[') {
        let (key, rest) = parse_section_header(line, line_no)?;
        trace!(line = line_no, section = %key, "Parsed config section header");
        let section_index = map.section_index_or_insert(key);
        current = Some(section_index);

        // Git accepts an entry on the same line as its header.
        if !(rest.is_empty() || rest.starts_with('#') || rest.starts_with(';')) {
          let (field, value) = parse_entry(rest, line_no)?;
          map.sections[section_index].set(field, value);
        }
        continue;
      }

      let Some(section_index) = current else {
        return Err(parse_error(line_no, "key/value pair outside of any section"));
      };

      let (field, value) = parse_entry(line, line_no)?;
      map.sections[section_index].set(field, value);
    }

    debug!(sections = map.sections.len(), "Parsed git config");
    Ok(map)
  }

  /// Look up a section by its normalised key.
  pub fn section(&self, key: &str) -> Option<&ConfigSection> {
    self.sections.iter().find(|section| section.key == key)
  }

  /// Look up `field` in section `key`.
  pub fn get(&self, key: &str, field: &str) -> Option<&str> {
    self.section(key).and_then(|section| section.get(field))
  }

  /// All sections in order of first appearance.
  pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
    self.sections.iter()
  }

  /// The `url` of a remote, given its full section key.
  pub fn remote_url(&self, remote_key: &str) -> Option<&str> {
    self.get(remote_key, "url")
  }

  fn section_index_or_insert(&mut self, key: String) -> usize {
    if let Some(index) = self.sections.iter().position(|section| section.key == key) {
      return index;
    }
    self.sections.push(ConfigSection::new(key));
    self.sections.len() - 1
  }
}

/// Read and parse `<repo_dir>/.git/config`.
pub fn parse_config<P: AsRef<Path>>(repo_dir: P) -> Result<ConfigMap> {
  let config_path = metadata_dir(repo_dir)?.join("config");
  let text = fs::read_to_string(&config_path).map_err(|e| PrLinkError::file_access(&config_path, e))?;
  ConfigMap::parse(&text)
}

/// Section keys of all remotes, in file order.
pub fn list_remotes(config: &ConfigMap) -> Vec<&str> {
  config
    .sections()
    .map(ConfigSection::key)
    .filter(|key| key.starts_with(REMOTE_PREFIX))
    .collect()
}

/// The remote name inside a remote section key: `remote "origin"` → `origin`.
pub fn remote_name(remote_key: &str) -> &str {
  remote_key
    .strip_prefix(REMOTE_PREFIX)
    .map(|rest| rest.trim_matches('"'))
    .unwrap_or(remote_key)
}

/// The `merge` ref configured for `branch`, if any.
pub fn resolve_branch_merge<'a>(config: &'a ConfigMap, branch: &str) -> Option<&'a str> {
  config.get(&branch_key(branch), "merge")
}

/// Section key for a branch name: `main` → `branch "main"`.
pub fn branch_key(branch: &str) -> String {
  format!("{BRANCH_PREFIX}\"{branch}\"")
}

fn parse_error(line: usize, message: impl Into<String>) -> PrLinkError {
  PrLinkError::ParseError {
    line,
    message: message.into(),
  }
}

/// Parses a `[section]` header and returns its normalised key together with
/// any text following the closing bracket on the same line.
fn parse_section_header(line: &str, line_no: usize) -> Result<(String, &str)> {
  let close = find_header_end(line).ok_or_else(|| parse_error(line_no, "unterminated section header"))?;
  let rest = line[close + 1..].trim_start();

  let inner = line[1..close].trim();
  let (name, subsection) = match inner.find(|c: char| c.is_whitespace() || c == '"') {
    Some(split) => (&inner[..split], Some(inner[split..].trim())),
    None => (inner, None),
  };

  if name.is_empty() {
    return Err(parse_error(line_no, "section header has no name"));
  }
  if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
    return Err(parse_error(line_no, format!("invalid section name '{name}'")));
  }
  let name = name.to_ascii_lowercase();

  let key = match subsection {
    // Deprecated `[branch.main]` form: the subsection follows the first dot.
    None => match name.split_once('.') {
      Some((section, sub)) if !section.is_empty() && !sub.is_empty() => format!("{section} \"{sub}\""),
      Some(_) => return Err(parse_error(line_no, format!("invalid section name '{name}'"))),
      None => name,
    },
    Some(quoted) => {
      let sub = quoted
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| quoted.len() >= 2)
        .ok_or_else(|| parse_error(line_no, "subsection name must be quoted"))?;
      let sub = unescape_subsection(sub, line_no)?;
      format!("{name} \"{sub}\"")
    }
  };

  Ok((key, rest))
}

/// Byte index of the `]` closing a header, skipping over a quoted subsection.
fn find_header_end(line: &str) -> Option<usize> {
  let mut in_quotes = false;
  let mut escaped = false;
  for (index, c) in line.char_indices().skip(1) {
    match c {
      _ if escaped => escaped = false,
      '\\' if in_quotes => escaped = true,
      '"' => in_quotes = !in_quotes,
      ']' if !in_quotes => return Some(index),
      _ => {}
    }
  }
  None
}

fn unescape_subsection(raw: &str, line_no: usize) -> Result<String> {
  let mut out = String::with_capacity(raw.len());
  let mut chars = raw.chars();
  while let Some(c) = chars.next() {
    match c {
      '\\' => match chars.next() {
        Some(escaped) => out.push(escaped),
        None => return Err(parse_error(line_no, "dangling escape in subsection name")),
      },
      '"' => return Err(parse_error(line_no, "unescaped quote in subsection name")),
      other => out.push(other),
    }
  }
  Ok(out)
}

fn parse_entry(line: &str, line_no: usize) -> Result<(String, String)> {
  let (raw_key, raw_value) = match line.split_once('=') {
    Some((key, value)) => (key.trim(), Some(value)),
    None => (line.split(['#', ';']).next().unwrap_or_default().trim(), None),
  };

  let valid_key = raw_key.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
    && raw_key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
  if !valid_key {
    return Err(parse_error(line_no, format!("invalid key '{raw_key}'")));
  }

  let value = match raw_value {
    Some(raw) => parse_value(raw, line_no)?,
    None => "true".to_string(),
  };

  Ok((raw_key.to_ascii_lowercase(), value))
}

fn parse_value(raw: &str, line_no: usize) -> Result<String> {
  let mut out = String::new();
  let mut in_quotes = false;
  // Length of `out` up to the last character that must not be trimmed.
  let mut keep = 0;
  let mut chars = raw.trim_start().chars();

  while let Some(c) = chars.next() {
    match c {
      '"' => {
        in_quotes = !in_quotes;
        keep = out.len();
      }
      '\\' => {
        let escaped = match chars.next() {
          Some('n') => '\n',
          Some('t') => '\t',
          Some('b') => '\u{8}',
          Some(other @ ('"' | '\\')) => other,
          Some(other) => return Err(parse_error(line_no, format!("invalid escape '\\{other}'"))),
          None => return Err(parse_error(line_no, "line continuations are not supported")),
        };
        out.push(escaped);
        keep = out.len();
      }
      '#' | ';' if !in_quotes => break,
      other => {
        out.push(other);
        if in_quotes || !other.is_whitespace() {
          keep = out.len();
        }
      }
    }
  }

  if in_quotes {
    return Err(parse_error(line_no, "unterminated quoted value"));
  }

  out.truncate(keep);
  Ok(out)
}

#[cfg(test)]
mod tests {
  use prlink_test_utils::GitRepoTestGuard;

  use super::*;

  const SAMPLE: &str = r#"[core]
	repositoryformatversion = 0
	bare = false
	logallrefupdates = true
[remote "origin"]
	url = git@github.com:acme/widgets.git
	fetch = +refs/heads/*:refs/remotes/origin/*
[branch "main"]
	remote = origin
	merge = refs/heads/main
[remote "upstream"]
	url = git@github.com:upstream/widgets.git
"#;

  #[test]
  fn test_parse_sections_in_order() {
    let config = ConfigMap::parse(SAMPLE).unwrap();
    let keys: Vec<&str> = config.sections().map(ConfigSection::key).collect();

    assert_eq!(keys, vec!["core", "remote \"origin\"", "branch \"main\"", "remote \"upstream\""]);
    assert_eq!(config.get("core", "bare"), Some("false"));
    assert_eq!(config.remote_url("remote \"origin\""), Some("git@github.com:acme/widgets.git"));
  }

  #[test]
  fn test_list_remotes_in_appearance_order() {
    let config = ConfigMap::parse(SAMPLE).unwrap();
    assert_eq!(list_remotes(&config), vec!["remote \"origin\"", "remote \"upstream\""]);
  }

  #[test]
  fn test_remote_name() {
    assert_eq!(remote_name("remote \"origin\""), "origin");
    assert_eq!(remote_name("core"), "core");
  }

  #[test]
  fn test_resolve_branch_merge() {
    let config = ConfigMap::parse(SAMPLE).unwrap();

    assert_eq!(resolve_branch_merge(&config, "main"), Some("refs/heads/main"));
    assert_eq!(resolve_branch_merge(&config, "feature"), None);
  }

  #[test]
  fn test_comments_quotes_and_case() {
    let text = r#"
# leading comment
; another comment
[Remote "Fork"]
    URL = "git@github.com:me/widgets.git" ; trailing comment
    pushurl = git@github.com:me/widgets.git # trailing
    mirror
    prune ; bare key with a comment
    note = "a ; b # c"
"#;
    let config = ConfigMap::parse(text).unwrap();
    let section = config.section("remote \"Fork\"").unwrap();

    assert_eq!(section.get("url"), Some("git@github.com:me/widgets.git"));
    assert_eq!(section.get("URL"), Some("git@github.com:me/widgets.git"));
    assert_eq!(section.get("pushurl"), Some("git@github.com:me/widgets.git"));
    assert_eq!(section.get("mirror"), Some("true"));
    assert_eq!(section.get("prune"), Some("true"));
    assert_eq!(section.get("note"), Some("a ; b # c"));
  }

  #[test]
  fn test_repeated_sections_merge_and_last_value_wins() {
    let text = "[remote \"origin\"]\nurl = first\n[core]\nbare = false\n[remote \"origin\"]\nurl = second\n";
    let config = ConfigMap::parse(text).unwrap();

    assert_eq!(list_remotes(&config), vec!["remote \"origin\""]);
    assert_eq!(config.remote_url("remote \"origin\""), Some("second"));
  }

  #[test]
  fn test_subsection_escapes() {
    let config = ConfigMap::parse("[branch \"odd\\\"name\"]\nmerge = refs/heads/x\n").unwrap();
    assert_eq!(resolve_branch_merge(&config, "odd\"name"), Some("refs/heads/x"));
  }

  #[test]
  fn test_entry_on_header_line() {
    let text = "[branch \"main\"] merge = refs/heads/main\n\tremote = origin\n[core] bare # comment\n";
    let config = ConfigMap::parse(text).unwrap();

    assert_eq!(resolve_branch_merge(&config, "main"), Some("refs/heads/main"));
    assert_eq!(config.get("branch \"main\"", "remote"), Some("origin"));
    assert_eq!(config.get("core", "bare"), Some("true"));
  }

  #[test]
  fn test_bracket_inside_subsection_name() {
    let config = ConfigMap::parse("[branch \"fix]1\"]\nmerge = refs/heads/fix]1\n").unwrap();
    assert_eq!(resolve_branch_merge(&config, "fix]1"), Some("refs/heads/fix]1"));
  }

  #[test]
  fn test_deprecated_dotted_subsection() {
    let config = ConfigMap::parse("[branch.Main]\nmerge = refs/heads/main\n[remote.origin]\nurl = git@github.com:acme/widgets.git\n").unwrap();

    assert_eq!(resolve_branch_merge(&config, "main"), Some("refs/heads/main"));
    assert_eq!(list_remotes(&config), vec!["remote \"origin\""]);
  }

  #[test]
  fn test_key_outside_section_is_rejected() {
    let error = ConfigMap::parse("url = git@github.com:acme/widgets.git\n").unwrap_err();
    assert!(matches!(error, PrLinkError::ParseError { line: 1, .. }));
  }

  #[test]
  fn test_malformed_headers_are_rejected() {
    for (text, line) in [
      ("[core]\nbare = false\n[remote \"origin\"\n", 3),
      ("[]\n", 1),
      ("[remote origin]\n", 1),
      ("[core] 1bad = x\n", 1),
      ("[.main]\n", 1),
    ] {
      match ConfigMap::parse(text) {
        Err(PrLinkError::ParseError { line: actual, .. }) => assert_eq!(actual, line, "{text:?}"),
        other => panic!("expected parse error for {text:?}, got {other:?}"),
      }
    }
  }

  #[test]
  fn test_malformed_values_are_rejected() {
    assert!(ConfigMap::parse("[core]\n1bad = x\n").is_err());
    assert!(ConfigMap::parse("[core]\nname = \"open\n").is_err());
    assert!(ConfigMap::parse("[core]\nname = trailing\\\n").is_err());
  }

  #[test]
  fn test_parse_config_from_repository() {
    let git_repo = GitRepoTestGuard::new();
    git_repo.add_remote("origin", "git@github.com:acme/widgets.git").unwrap();

    let config = parse_config(git_repo.path()).unwrap();
    assert_eq!(list_remotes(&config), vec!["remote \"origin\""]);
    assert_eq!(config.remote_url("remote \"origin\""), Some("git@github.com:acme/widgets.git"));
  }

  #[test]
  fn test_parse_config_missing_file() {
    let git_repo = GitRepoTestGuard::new();
    std::fs::remove_file(git_repo.path().join(".git").join("config")).unwrap();

    assert!(matches!(parse_config(git_repo.path()), Err(PrLinkError::FileAccess { .. })));
  }
}
