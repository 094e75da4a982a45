//! Session-level commands: Enter, Cancel, Redisplay.

use super::{DispatchResult, Exit};
use core_state::{EditError, SessionState, ValidationPolicy};
use tracing::info;

/// Accept the line, or reject it when an allow-list is configured and the
/// trimmed content is not on it. Rejection keeps the session running with an
/// empty buffer and a message on the status line.
pub(crate) fn handle_enter(
    state: &mut SessionState<'_>,
    policy: Option<&ValidationPolicy>,
) -> DispatchResult {
    let Some(policy) = policy else {
        return DispatchResult::exit(Exit::Accept);
    };
    let response = state.buffer().to_string_lossy();
    if policy.allows(&response) {
        return DispatchResult::exit(Exit::Accept);
    }
    info!(target: "actions.dispatch", response_len = response.len(), allowed = policy.allowed().len(), "response_rejected");
    state.set_ephemeral_status(policy.rejection_message(&response));
    state.reset_after_rejection();
    DispatchResult {
        dirty: true,
        status: true,
        alert: Some(EditError::ValidationRejected),
        ..DispatchResult::default()
    }
}

pub(crate) fn handle_cancel() -> DispatchResult {
    DispatchResult::exit(Exit::Cancel)
}

pub(crate) fn handle_redisplay() -> DispatchResult {
    DispatchResult::full()
}
