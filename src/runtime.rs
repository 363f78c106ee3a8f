//! Runtime services and shared state for one issue-labeler run.

use tracing::instrument;

use crate::{
    base::{config::Config, context::EventContext, types::Res},
    service::tracker::IssueTracker,
};

/// Runtime service context for a single run.
///
/// This struct holds the configuration, the event context and the tracker client.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The issue this run acts on.
    pub context: EventContext,
    /// The issue-tracker client instance.
    pub tracker: IssueTracker,
}

impl Runtime {
    /// Create a new runtime instance backed by GitHub.
    #[instrument(skip_all, fields(issue = %context))]
    pub fn new(config: Config, context: EventContext) -> Res<Self> {
        let tracker = IssueTracker::github(&config)?;

        Ok(Self { config, context, tracker })
    }
}
