use serde::Deserialize;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// The label applied to issues whose author has no other open issues.
pub const GOOD_FIRST_ISSUE: &str = "good first issue";

/// The issue events this hook reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Opened,
    Labeled,
}

impl EventKind {
    /// Map the `eventType` input to a kind; anything unrecognized yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "opened" => Some(Self::Opened),
            "labeled" => Some(Self::Labeled),
            _ => None,
        }
    }
}

/// The outcome of a single issue-tracker call.
///
/// Only an HTTP 200 counts as success; every other status is a soft failure the
/// caller decides how to skip. Transport errors are not represented here and
/// travel as `Err` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply<T> {
    Success(T),
    Failed { status: u16 },
}

impl<T> ApiReply<T> {
    /// Convert into an `Option`, discarding the failure status.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

/// The author of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueUser {
    pub login: String,
}

/// A label as returned by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueLabel {
    pub name: String,
}

/// A snapshot of an issue; fetched on demand and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub user: Option<IssueUser>,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
}

impl Issue {
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str()).filter(|login| !login.is_empty())
    }
}

/// Ordered, de-duplicated set of label names collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label; empty names and repeats are ignored.
    ///
    /// Returns whether the label was added.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();

        if name.is_empty() || self.names.contains(&name) {
            return false;
        }

        self.names.push(name);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}
