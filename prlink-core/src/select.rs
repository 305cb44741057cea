//! # Number Selection
//!
//! Turns query results into the single pull request number to render.

use tracing::{debug, info};

use crate::error::{PrLinkError, Result};
use crate::prompts::Prompter;
use crate::pulls::{LatestNumbers, PullCandidate};

/// Predict the number the next pull request will receive.
///
/// GitHub numbers discussions, issues and pull requests from one counter per
/// repository, so the next number is one past the largest of the three.
pub fn next_number(latest: &LatestNumbers) -> u64 {
  let current = [
    latest.discussion_number,
    latest.issue_number,
    latest.pull_request_number,
  ]
  .into_iter()
  .flatten()
  .max()
  .unwrap_or(0);

  debug!(?latest, current, "Computed latest repository number");
  current + 1
}

/// Pick the pull request for `branch` from the associated candidates.
///
/// A single candidate is returned without prompting. Several candidates are
/// handed to `prompter`; zero candidates is [`PrLinkError::NoMatchingPull`].
pub fn choose_pull(candidates: Vec<PullCandidate>, branch: &str, prompter: &dyn Prompter) -> Result<PullCandidate> {
  let mut candidates = candidates;
  match candidates.len() {
    0 => Err(PrLinkError::NoMatchingPull(branch.to_string())),
    1 => {
      let candidate = candidates.remove(0);
      info!(number = candidate.number, "Found a single associated pull request");
      Ok(candidate)
    }
    count => {
      let labels: Vec<String> = candidates.iter().map(PullCandidate::label).collect();
      let prompt = format!("{count} candidates, pick one");
      let index = prompter
        .select(&prompt, &labels)?
        .filter(|index| *index < count)
        .ok_or(PrLinkError::SelectionCancelled)?;
      Ok(candidates.swap_remove(index))
    }
  }
}
