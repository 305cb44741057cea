//! # Template Rendering
//!
//! Formats the text inserted at the cursor.

use std::fmt;
use std::str::FromStr;

use crate::error::PrLinkError;
use crate::git::RemoteIdentity;

/// How the pull request reference is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
  /// `(#42)`
  Number,
  /// `([#42](https://github.com/owner/name/pull/42))`
  Link,
}

impl FromStr for RenderStyle {
  type Err = PrLinkError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "number" => Ok(RenderStyle::Number),
      "link" => Ok(RenderStyle::Link),
      _ => Err(PrLinkError::UnknownRenderStyle(s.to_string())),
    }
  }
}

impl fmt::Display for RenderStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RenderStyle::Number => f.write_str("number"),
      RenderStyle::Link => f.write_str("link"),
    }
  }
}

/// Fully resolved inputs to [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTarget {
  pub style: RenderStyle,
  pub pull_number: u64,
  pub owner: String,
  pub name: String,
}

impl RenderTarget {
  pub fn new(style: RenderStyle, pull_number: u64, remote: &RemoteIdentity) -> Self {
    Self {
      style,
      pull_number,
      owner: remote.owner.clone(),
      name: remote.name.clone(),
    }
  }
}

/// Render the snippet for `target`.
pub fn render(target: &RenderTarget) -> String {
  let n = target.pull_number;
  match target.style {
    RenderStyle::Number => format!("(#{n})"),
    RenderStyle::Link => format!(
      "([#{n}](https://github.com/{}/{}/pull/{n}))",
      target.owner, target.name
    ),
  }
}
