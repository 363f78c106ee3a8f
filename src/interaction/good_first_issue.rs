use tracing::{debug, instrument};

use crate::{
    base::types::{ApiReply, Res},
    runtime::Runtime,
};

/// Decide whether the issue's author should get the good-first-issue label.
///
/// The author qualifies when they have no open issues in the repository other
/// than this one. The current issue is left out of the count so the answer does
/// not depend on whether the tracker has indexed it yet. Any soft failure along
/// the way means "not eligible".
#[instrument(skip_all, fields(issue = %runtime.context))]
pub async fn is_good_first_issue(runtime: &Runtime) -> Res<bool> {
    debug!("The value of goodFirstIssue is {}.", runtime.config.good_first_issue);

    if !runtime.config.good_first_issue_enabled() {
        return Ok(false);
    }

    let context = &runtime.context;

    let issue = match runtime.tracker.get_issue(context).await? {
        ApiReply::Success(issue) => issue,
        ApiReply::Failed { status } => {
            debug!("Failed to get issue {} ({}).", context.issue_number, status);
            return Ok(false);
        }
    };

    let Some(creator) = issue.author() else {
        debug!("Issue {} has no known creator.", context.issue_number);
        return Ok(false);
    };
    debug!("The issue creator is {}.", creator);

    let issues = match runtime.tracker.list_issues_by_creator(context, creator).await? {
        ApiReply::Success(issues) => issues,
        ApiReply::Failed { status } => {
            debug!("Failed to list issues for repo ({}).", status);
            return Ok(false);
        }
    };

    let others = issues.iter().filter(|issue| issue.number != context.issue_number).count();
    debug!("{} has {} other open issue(s).", creator, others);

    Ok(others == 0)
}
