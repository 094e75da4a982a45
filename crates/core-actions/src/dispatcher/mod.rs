//! Dispatcher applying one `KeyEvent` to the session state.
//!
//! Decomposed by concern:
//! * `edit`    - content mutation (printable, backspace, delete, literal, clear, restore)
//! * `motion`  - cursor movement
//! * `mode`    - insert/replace toggle
//! * `command` - enter (with validation), cancel, redisplay
//!
//! Dispatch is synchronous and performs exactly one transition per event.
//! Nothing here touches the terminal: the returned `DispatchResult` tells the
//! session driver what to repaint and whether to alert.

use core_events::{EditorFeatures, KeyEvent};
use core_state::{EditError, SessionState, ValidationPolicy};
use tracing::{debug, trace};

mod command;
mod edit;
mod mode;
mod motion;

/// Session exit requested by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Accept,
    Cancel,
}

/// Whether the next raw byte must be taken literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingState {
    #[default]
    Idle,
    AwaitingLiteral,
}

/// Result of dispatching a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Content changed; input line must be repainted.
    pub dirty: bool,
    /// Only the cursor moved.
    pub cursor_only: bool,
    /// Status line content changed (mode indicator or message).
    pub status: bool,
    /// Repaint everything (Redisplay).
    pub full: bool,
    /// Rejected operation to surface as an alert.
    pub alert: Option<EditError>,
    pub pending: PendingState,
    pub exit: Option<Exit>,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn cursor_only() -> Self {
        Self {
            cursor_only: true,
            ..Self::default()
        }
    }
    pub fn status() -> Self {
        Self {
            status: true,
            ..Self::default()
        }
    }
    pub fn full() -> Self {
        Self {
            full: true,
            ..Self::default()
        }
    }
    pub fn alert(reason: EditError) -> Self {
        Self {
            alert: Some(reason),
            ..Self::default()
        }
    }
    pub fn exit(exit: Exit) -> Self {
        Self {
            exit: Some(exit),
            ..Self::default()
        }
    }

    /// Fold another result into this one (flags OR together, later alert/exit win).
    pub fn absorb(&mut self, other: DispatchResult) {
        self.dirty |= other.dirty;
        self.cursor_only |= other.cursor_only;
        self.status |= other.status;
        self.full |= other.full;
        if other.alert.is_some() {
            self.alert = other.alert;
        }
        if other.pending != PendingState::Idle {
            self.pending = other.pending;
        }
        if other.exit.is_some() {
            self.exit = other.exit;
        }
    }
}

/// Apply `key` to `state`. `policy` is consulted only on Enter.
pub fn dispatch(
    key: KeyEvent,
    state: &mut SessionState<'_>,
    policy: Option<&ValidationPolicy>,
) -> DispatchResult {
    let mut result = DispatchResult::clean();
    // A pending validation message lasts until the next key.
    if state.clear_ephemeral_status() {
        result.status = true;
    }

    let features = state.features();
    let step = if !key_enabled(key, features) {
        DispatchResult::alert(EditError::UnrecognizedKey)
    } else {
        match key {
            KeyEvent::Printable(ch) => edit::handle_printable(ch, state),
            KeyEvent::Backspace => edit::handle_backspace(state),
            KeyEvent::Delete => edit::handle_delete(state),
            KeyEvent::QuoteNext => edit::handle_quote_next(state),
            KeyEvent::ClearLine => edit::handle_clear_line(state),
            KeyEvent::RestoreDefault => edit::handle_restore_default(state),
            KeyEvent::Left | KeyEvent::Right | KeyEvent::Home | KeyEvent::End => {
                motion::handle_motion(key, state)
            }
            KeyEvent::ToggleInsertMode => mode::handle_toggle(state),
            KeyEvent::Enter => command::handle_enter(state, policy),
            KeyEvent::Cancel => command::handle_cancel(),
            KeyEvent::Redisplay => command::handle_redisplay(),
            KeyEvent::Escape | KeyEvent::Unknown => {
                DispatchResult::alert(EditError::UnrecognizedKey)
            }
        }
    };
    result.absorb(step);

    trace!(target: "actions.dispatch", op = key.name(), cursor = state.cursor(), len = state.buffer().len(), has_typed = state.has_typed(), "dispatch");
    if let Some(reason) = result.alert {
        debug!(target: "actions.dispatch", op = key.name(), %reason, "alert");
    }
    result
}

/// Apply a literally quoted byte (the key after QuoteNext).
pub fn dispatch_literal(byte: u8, state: &mut SessionState<'_>) -> DispatchResult {
    let result = edit::handle_literal(byte, state);
    trace!(target: "actions.dispatch", op = "literal", cursor = state.cursor(), len = state.buffer().len(), "dispatch");
    if let Some(reason) = result.alert {
        debug!(target: "actions.dispatch", op = "literal", %reason, "alert");
    }
    result
}

fn key_enabled(key: KeyEvent, features: EditorFeatures) -> bool {
    if key.needs_cursor_motion() {
        return features.contains(EditorFeatures::CURSOR_MOTION);
    }
    if matches!(key, KeyEvent::Backspace) {
        return features.contains(EditorFeatures::EDITING);
    }
    true
}
