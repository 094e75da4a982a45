//! Content mutation keys.
//!
//! Printable, Backspace and QuoteNext apply the first-keystroke rule before
//! anything else: an untouched default is wiped so typing replaces it. Forward
//! delete never does; it edits the default in place.

use super::{DispatchResult, PendingState};
use core_state::SessionState;

pub(crate) fn handle_printable(ch: u8, state: &mut SessionState<'_>) -> DispatchResult {
    let cleared = state.clear_default_if_untouched();
    type_at_cursor(ch, state, cleared)
}

/// Quoted bytes are always inserted, even in replace mode. The default was
/// already cleared when QuoteNext was dispatched.
pub(crate) fn handle_literal(ch: u8, state: &mut SessionState<'_>) -> DispatchResult {
    match state.insert_char(ch) {
        Ok(()) => DispatchResult::dirty(),
        Err(reason) => DispatchResult::alert(reason),
    }
}

fn type_at_cursor(ch: u8, state: &mut SessionState<'_>, cleared: bool) -> DispatchResult {
    match state.type_char(ch) {
        Ok(()) => DispatchResult::dirty(),
        Err(reason) => {
            let mut r = DispatchResult::alert(reason);
            r.dirty = cleared;
            r
        }
    }
}

pub(crate) fn handle_backspace(state: &mut SessionState<'_>) -> DispatchResult {
    let cleared = state.clear_default_if_untouched();
    match state.backspace() {
        Ok(deleted) => {
            if deleted || cleared {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        Err(reason) => DispatchResult::alert(reason),
    }
}

pub(crate) fn handle_delete(state: &mut SessionState<'_>) -> DispatchResult {
    match state.delete_forward() {
        Ok(()) => DispatchResult::dirty(),
        Err(reason) => DispatchResult::alert(reason),
    }
}

pub(crate) fn handle_quote_next(state: &mut SessionState<'_>) -> DispatchResult {
    let cleared = state.clear_default_if_untouched();
    DispatchResult {
        dirty: cleared,
        pending: PendingState::AwaitingLiteral,
        ..DispatchResult::default()
    }
}

pub(crate) fn handle_clear_line(state: &mut SessionState<'_>) -> DispatchResult {
    state.clear_line();
    DispatchResult::dirty()
}

pub(crate) fn handle_restore_default(state: &mut SessionState<'_>) -> DispatchResult {
    state.restore_default();
    DispatchResult::dirty()
}
