//! Library root for `issue-labeler`.
//!
//! Issue-labeler is a one-shot hook run for GitHub issue events. It:
//! - Waits a configurable delay after an issue is opened, then tags it
//!   `good first issue` when the author has no other open issues
//! - Applies a default label to issues that arrive without one
//! - Removes that label again once the issue is labeled
//!
//! Each run reads its configuration, acts on a single issue, and exits. The
//! issue tracker sits behind a trait so the behaviors can be exercised without
//! the network.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{
    config::Config,
    context::{ContextOverrides, EventContext},
    types::{EventKind, Void},
};
use tracing::{debug, info};

/// Public async entry for the binary crate.
///
/// Selects the behavior for the configured event type and runs it:
/// - Unknown event types return without touching the tracker
/// - Resolves the event context for the issue
/// - Creates the runtime with the GitHub client and dispatches
pub async fn start(config: Config, overrides: ContextOverrides) -> Void {
    debug!("Event type: {}", config.event_type);
    debug!("The label name is {}.", config.label_name);
    debug!("The number of secondsUtilLabel is {}.", config.seconds_until_label);

    let Some(kind) = EventKind::parse(&config.event_type) else {
        info!("Ignoring event type `{}`.", config.event_type);
        return Ok(());
    };

    let context = EventContext::resolve(&overrides)?;
    info!("Handling {:?} for {} ...", kind, context);

    let runtime = runtime::Runtime::new(config, context)?;

    interaction::dispatch(&runtime, kind).await
}
