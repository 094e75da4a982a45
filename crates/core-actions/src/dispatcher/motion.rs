//! Cursor motion keys. Motion never edits, but it does end the untouched-default
//! phase so a later printable key inserts instead of wiping.

use super::DispatchResult;
use core_events::KeyEvent;
use core_state::SessionState;

pub(crate) fn handle_motion(key: KeyEvent, state: &mut SessionState<'_>) -> DispatchResult {
    let moved = match key {
        KeyEvent::Left => state.move_left(),
        KeyEvent::Right => state.move_right(),
        KeyEvent::Home => state.move_home(),
        KeyEvent::End => state.move_end(),
        _ => false,
    };
    if moved {
        DispatchResult::cursor_only()
    } else {
        DispatchResult::clean()
    }
}
