use tracing::{debug, info, instrument};

use crate::{
    base::types::{ApiReply, Void},
    runtime::Runtime,
};

/// Remove the configured label once the issue has been labeled.
///
/// Nothing is removed if the current labels cannot be read.
#[instrument(skip_all, fields(issue = %runtime.context))]
pub async fn handle_labeled(runtime: &Runtime) -> Void {
    let label = runtime.config.label_name.as_str();

    let labels = match runtime.tracker.list_labels_on_issue(&runtime.context).await? {
        ApiReply::Success(labels) => labels,
        ApiReply::Failed { status } => {
            debug!("Could not read the labels on issue {} ({}); leaving them alone.", runtime.context.issue_number, status);
            return Ok(());
        }
    };

    if !labels.iter().any(|name| name == label) {
        debug!("Issue {} does not carry `{}`.", runtime.context.issue_number, label);
        return Ok(());
    }

    match runtime.tracker.remove_label(&runtime.context, label).await? {
        ApiReply::Success(()) => info!("Label `{}` removed successfully.", label),
        ApiReply::Failed { status } => debug!("Failed to remove label `{}` ({}).", label, status),
    }

    Ok(())
}
