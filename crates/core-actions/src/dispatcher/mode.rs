//! Insert/replace toggle. No buffer effect; only the mode indicator changes.

use super::DispatchResult;
use core_state::SessionState;

pub(crate) fn handle_toggle(state: &mut SessionState<'_>) -> DispatchResult {
    let mode = state.toggle_mode();
    tracing::debug!(target: "actions.dispatch", mode = mode.label(), "mode_toggle");
    DispatchResult::status()
}
