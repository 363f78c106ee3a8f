use chrono::Local;
use tracing::{debug, info, instrument};

use crate::{
    base::types::{ApiReply, GOOD_FIRST_ISSUE, LabelSet, Void},
    runtime::Runtime,
};

use super::good_first_issue::is_good_first_issue;

/// Label a newly opened issue.
///
/// After the configured delay, adds `good first issue` for eligible authors and
/// the default label when the issue carries no labels yet, all in one call.
#[instrument(skip_all, fields(issue = %runtime.context))]
pub async fn handle_opened(runtime: &Runtime) -> Void {
    let delay = runtime.config.label_delay();

    debug!("Waiting {:?} before labeling (now {}).", delay, Local::now().format("%H:%M:%S"));
    tokio::time::sleep(delay).await;
    debug!("Done waiting (now {}).", Local::now().format("%H:%M:%S"));

    let mut labels = LabelSet::new();

    if is_good_first_issue(runtime).await? {
        labels.push(GOOD_FIRST_ISSUE);
    }

    match runtime.tracker.list_labels_on_issue(&runtime.context).await? {
        ApiReply::Success(existing) if existing.is_empty() => {
            labels.push(runtime.config.label_name.as_str());
        }
        ApiReply::Success(existing) => {
            debug!("Issue {} already has {} label(s).", runtime.context.issue_number, existing.len());
        }
        ApiReply::Failed { status } => {
            debug!("Could not read the labels on issue {} ({}); not adding the default label.", runtime.context.issue_number, status);
        }
    }

    if labels.is_empty() {
        info!("Nothing to label.");
        return Ok(());
    }

    match runtime.tracker.add_labels(&runtime.context, labels.as_slice()).await? {
        ApiReply::Success(()) => info!("Labels {:?} added successfully.", labels.as_slice()),
        ApiReply::Failed { status } => debug!("Failed to add labels {:?} ({}).", labels.as_slice(), status),
    }

    Ok(())
}
