pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::{
    context::EventContext,
    types::{ApiReply, Issue, Res},
};

// Traits.

/// Generic issue-tracker trait that clients must implement.
///
/// Every call reports non-200 responses as `ApiReply::Failed` so the caller can
/// skip the step; only transport or decoding problems come back as `Err`.
#[async_trait]
pub trait GenericIssueTracker: Send + Sync + 'static {
    /// Fetch the issue named by the context.
    async fn get_issue(&self, context: &EventContext) -> Res<ApiReply<Issue>>;

    /// List the open issues in the context's repository created by `creator`.
    async fn list_issues_by_creator(&self, context: &EventContext, creator: &str) -> Res<ApiReply<Vec<Issue>>>;

    /// List the names of the labels currently on the issue.
    async fn list_labels_on_issue(&self, context: &EventContext) -> Res<ApiReply<Vec<String>>>;

    /// Add all of `labels` to the issue in one call.
    async fn add_labels(&self, context: &EventContext, labels: &[String]) -> Res<ApiReply<()>>;

    /// Remove the label called `name` from the issue.
    async fn remove_label(&self, context: &EventContext, name: &str) -> Res<ApiReply<()>>;
}

// Structs.

/// Issue-tracker client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IssueTracker {
    inner: Arc<dyn GenericIssueTracker>,
}

impl Deref for IssueTracker {
    type Target = dyn GenericIssueTracker;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl IssueTracker {
    pub fn new(inner: Arc<dyn GenericIssueTracker>) -> Self {
        Self { inner }
    }
}
