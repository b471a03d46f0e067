//! Top-level selection flows.
//!
//! Each flow wires the engine components to the host-side collaborators
//! (catalog, model host, notifier) and yields exactly one `FlowOutcome`.
//! Recoverable failures (`FlowError`) are absorbed here into notifications;
//! user cancellation stays silent; anything else is a programmer error and
//! propagates to the caller's boundary.

pub mod favorites;
pub mod model_switch;

use anyhow::Result;
use switchboard_core::error::{FlowError, FlowOutcome};
use switchboard_core::host::Notifier;

/// Maps a flow failure to a notification, re-raising non-flow errors.
pub(crate) fn absorb(err: anyhow::Error, notifier: &mut dyn Notifier) -> Result<FlowOutcome> {
    match err.downcast::<FlowError>() {
        Ok(flow_err) => {
            tracing::warn!(error = %flow_err, "selection flow failed");
            notifier.notify(flow_err.severity(), &flow_err.to_string());
            Ok(FlowOutcome::Failed)
        }
        Err(other) => Err(other),
    }
}
