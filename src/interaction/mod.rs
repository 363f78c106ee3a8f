//! Event handling for the issue-labeler.
//!
//! This module provides the two behaviors the hook can run:
//! - Labeling a newly opened issue
//! - Clearing the triage label once an issue is labeled
//!
//! plus the good-first-issue eligibility check the first one relies on.

pub mod good_first_issue;
pub mod labeled;
pub mod opened;

use tracing::instrument;

use crate::{
    base::types::{EventKind, Void},
    runtime::Runtime,
};

/// Run the behavior that belongs to `kind`.
#[instrument(skip(runtime), fields(issue = %runtime.context))]
pub async fn dispatch(runtime: &Runtime, kind: EventKind) -> Void {
    match kind {
        EventKind::Opened => opened::handle_opened(runtime).await,
        EventKind::Labeled => labeled::handle_labeled(runtime).await,
    }
}
