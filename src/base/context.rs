//! The explicit event context for one run: which repository, which issue.

use std::{fmt, path::Path};

use anyhow::{Context as _, anyhow};
use serde_json::Value;

use super::types::Res;

/// Identifies the issue the triggering event is about.
///
/// Built once at process start and handed to everything that talks to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
}

/// Values supplied on the command line that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ContextOverrides {
    /// `owner/repo`.
    pub repository: Option<String>,
    pub issue_number: Option<u64>,
}

impl EventContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, issue_number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            issue_number,
        }
    }

    /// Resolve the context from overrides, then `GITHUB_REPOSITORY` and the payload at `GITHUB_EVENT_PATH`.
    pub fn resolve(overrides: &ContextOverrides) -> Res<Self> {
        let repository = match &overrides.repository {
            Some(repository) => repository.clone(),
            None => std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set and no repository was given")?,
        };
        let (owner, repo) = split_repository(&repository)?;

        let issue_number = match overrides.issue_number {
            Some(number) => number,
            None => {
                let path = std::env::var("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH is not set and no issue number was given")?;
                issue_number_from_file(Path::new(&path))?
            }
        };

        Ok(Self::new(owner, repo, issue_number))
    }
}

impl fmt::Display for EventContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.issue_number)
    }
}

fn split_repository(repository: &str) -> Res<(&str, &str)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => Ok((owner, repo)),
        _ => Err(anyhow!("Repository `{}` is not of the form `owner/repo`.", repository)),
    }
}

fn issue_number_from_file(path: &Path) -> Res<u64> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read event payload at {}", path.display()))?;
    let payload: Value = serde_json::from_str(&raw).with_context(|| format!("Event payload at {} is not valid JSON", path.display()))?;

    issue_number_from_payload(&payload).ok_or_else(|| anyhow!("Event payload at {} carries no issue number.", path.display()))
}

/// Find the issue number in an event payload: the issue, else the pull request, else the payload itself.
pub fn issue_number_from_payload(payload: &Value) -> Option<u64> {
    ["/issue/number", "/pull_request/number", "/number"]
        .iter()
        .find_map(|pointer| payload.pointer(pointer).and_then(Value::as_u64))
}
