//! Edit session state: cursor, insert/replace mode, "has typed" status and the
//! restore-default snapshot, plus the cursor-relative editing operations built
//! on top of the `LineBuffer` primitives.
//!
//! Default value handling:
//! - While `has_typed` is false the buffer still shows the untouched default.
//! - The first printable key, Backspace, QuoteNext or cursor motion ends that
//!   phase. Content keys clear the buffer first; motion keys only flip the flag
//!   so a later printable key no longer wipes the content.
//! - RestoreDefault (and a rejected response) re-arms the rule.
//!
//! Every operation keeps `0 <= cursor <= buffer.len()`. Rejected operations
//! return an `EditError` and leave buffer and cursor untouched; deciding whether
//! to alert is the dispatcher's job.

use core_events::EditorFeatures;
use core_text::{BufferError, LineBuffer, MIN_CAPACITY};
use thiserror::Error;
use tracing::{debug, trace};

mod snapshot;
mod validation;

pub use snapshot::DefaultSnapshot;
pub use validation::ValidationPolicy;

/// Editing failure taxonomy. Only `BufferTooSmall` ever leaves a session; the
/// rest are absorbed as alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("buffer capacity {capacity} is below the minimum of {min}", min = MIN_CAPACITY)]
    BufferTooSmall { capacity: usize },
    #[error("buffer full")]
    BufferFull,
    #[error("position out of range")]
    PositionOutOfRange,
    #[error("unrecognized key")]
    UnrecognizedKey,
    #[error("response rejected")]
    ValidationRejected,
}

impl From<BufferError> for EditError {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::BufferFull { .. } => EditError::BufferFull,
            BufferError::PositionOutOfRange { .. } => EditError::PositionOutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Replace,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Insert => "INS",
            Mode::Replace => "REP",
        }
    }
}

/// Mutable state of one editing session. Borrows the caller's buffer for the
/// session's lifetime; nothing else may touch it meanwhile.
#[derive(Debug)]
pub struct SessionState<'b> {
    buffer: &'b mut LineBuffer,
    snapshot: DefaultSnapshot,
    cursor: usize,
    has_typed: bool,
    mode: Mode,
    features: EditorFeatures,
    /// Transient status text (validation message); replaced by the helper bar on the next key.
    ephemeral_status: Option<String>,
}

impl<'b> SessionState<'b> {
    /// Start a session over `buffer`. Refuses buffers that cannot hold one
    /// content byte. Without `DEFAULT_VALUE` any pre-loaded content is dropped.
    pub fn begin(buffer: &'b mut LineBuffer, features: EditorFeatures) -> Result<Self, EditError> {
        if !buffer.is_usable() {
            debug!(target: "state.session", capacity = buffer.capacity(), "refused_buffer_too_small");
            return Err(EditError::BufferTooSmall {
                capacity: buffer.capacity(),
            });
        }
        let default_support = features.contains(EditorFeatures::DEFAULT_VALUE);
        if !default_support {
            buffer.clear();
        }
        let snapshot = DefaultSnapshot::capture(buffer);
        let cursor = buffer.len();
        debug!(target: "state.session", capacity = buffer.capacity(), default_len = cursor, ?features, "begin");
        Ok(Self {
            buffer,
            snapshot,
            cursor,
            has_typed: !default_support,
            mode: Mode::Insert,
            features,
            ephemeral_status: None,
        })
    }

    pub fn buffer(&self) -> &LineBuffer {
        self.buffer
    }

    pub fn content(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_typed(&self) -> bool {
        self.has_typed
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn features(&self) -> EditorFeatures {
        self.features
    }

    pub fn ephemeral_status(&self) -> Option<&str> {
        self.ephemeral_status.as_deref()
    }

    pub fn set_ephemeral_status(&mut self, text: impl Into<String>) {
        self.ephemeral_status = Some(text.into());
    }

    /// Drop the transient status message; returns whether one was showing.
    pub fn clear_ephemeral_status(&mut self) -> bool {
        self.ephemeral_status.take().is_some()
    }

    /// First-keystroke rule: wipe the untouched default. Returns true when it fired.
    pub fn clear_default_if_untouched(&mut self) -> bool {
        if self.has_typed {
            return false;
        }
        self.buffer.clear();
        self.cursor = 0;
        self.has_typed = true;
        trace!(target: "state.session", "default_cleared");
        true
    }

    /// Type `ch` at the cursor honoring insert/replace mode, then advance.
    pub fn type_char(&mut self, ch: u8) -> Result<(), EditError> {
        match self.mode {
            Mode::Insert => self.buffer.insert_at(self.cursor, ch)?,
            Mode::Replace => self.buffer.overwrite_at(self.cursor, ch)?,
        }
        self.cursor += 1;
        Ok(())
    }

    /// Insert `ch` at the cursor regardless of mode, then advance. Used for
    /// quoted bytes.
    pub fn insert_char(&mut self, ch: u8) -> Result<(), EditError> {
        self.buffer.insert_at(self.cursor, ch)?;
        self.cursor += 1;
        Ok(())
    }

    /// Delete the byte left of the cursor. `Ok(false)` when already at column 0.
    pub fn backspace(&mut self) -> Result<bool, EditError> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.buffer.delete_at(self.cursor - 1)?;
        self.cursor -= 1;
        Ok(true)
    }

    /// Delete the byte under the cursor; cursor stays put.
    pub fn delete_forward(&mut self) -> Result<(), EditError> {
        if self.cursor >= self.buffer.len() {
            return Err(EditError::PositionOutOfRange);
        }
        self.buffer.delete_at(self.cursor)?;
        Ok(())
    }

    pub fn move_left(&mut self) -> bool {
        self.has_typed = true;
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_right(&mut self) -> bool {
        self.has_typed = true;
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn move_home(&mut self) -> bool {
        self.has_typed = true;
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        self.has_typed = true;
        let end = self.buffer.len();
        let moved = self.cursor != end;
        self.cursor = end;
        moved
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Insert => Mode::Replace,
            Mode::Replace => Mode::Insert,
        };
        self.mode
    }

    pub fn clear_line(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.has_typed = true;
    }

    /// Put the session-start content back and re-arm the default-clear rule.
    pub fn restore_default(&mut self) {
        self.cursor = self.snapshot.restore_into(self.buffer);
        self.has_typed = false;
    }

    /// Reset after a rejected response: empty buffer, cursor home, rule re-armed.
    pub fn reset_after_rejection(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.has_typed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> EditorFeatures {
        EditorFeatures::all()
    }

    #[test]
    fn begin_refuses_tiny_buffers() {
        let mut one = LineBuffer::with_capacity(1);
        assert_eq!(
            SessionState::begin(&mut one, full()).unwrap_err(),
            EditError::BufferTooSmall { capacity: 1 }
        );
        let mut two = LineBuffer::with_capacity(2);
        assert!(SessionState::begin(&mut two, full()).is_ok());
    }

    #[test]
    fn begin_places_cursor_after_default() {
        let mut buf = LineBuffer::with_content(80, b"default text");
        let st = SessionState::begin(&mut buf, full()).unwrap();
        assert_eq!(st.cursor(), 12);
        assert!(!st.has_typed());
        assert_eq!(st.mode(), Mode::Insert);
    }

    #[test]
    fn begin_without_default_support_drops_preload() {
        let mut buf = LineBuffer::with_content(80, b"ignored");
        let mut st = SessionState::begin(&mut buf, EditorFeatures::EDITING).unwrap();
        assert_eq!(st.cursor(), 0);
        assert!(st.has_typed());
        assert!(st.content().is_empty());
        st.restore_default();
        assert!(st.content().is_empty());
    }

    #[test]
    fn default_clear_fires_once() {
        let mut buf = LineBuffer::with_content(80, b"abc");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        assert!(st.clear_default_if_untouched());
        assert!(st.content().is_empty());
        st.type_char(b'x').unwrap();
        assert!(!st.clear_default_if_untouched());
        assert_eq!(st.content(), b"x");
    }

    #[test]
    fn motion_marks_typed_without_editing() {
        let mut buf = LineBuffer::with_content(80, b"abc");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        assert!(st.move_left());
        assert!(st.has_typed());
        assert_eq!(st.content(), b"abc");
        assert_eq!(st.cursor(), 2);
    }

    #[test]
    fn motion_clamps_to_bounds() {
        let mut buf = LineBuffer::with_content(80, b"ab");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        assert!(!st.move_right());
        assert!(st.move_home());
        assert!(!st.move_left());
        assert_eq!(st.cursor(), 0);
        assert!(st.move_end());
        assert_eq!(st.cursor(), 2);
    }

    #[test]
    fn replace_mode_overwrites_then_appends() {
        let mut buf = LineBuffer::with_content(80, b"abc");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.move_home();
        assert_eq!(st.toggle_mode(), Mode::Replace);
        st.type_char(b'x').unwrap();
        assert_eq!(st.content(), b"xbc");
        assert_eq!(st.cursor(), 1);
        st.move_end();
        st.type_char(b'd').unwrap();
        assert_eq!(st.content(), b"xbcd");
    }

    #[test]
    fn rejected_type_leaves_cursor() {
        let mut buf = LineBuffer::with_content(3, b"ab");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.move_end();
        assert_eq!(st.type_char(b'c'), Err(EditError::BufferFull));
        assert_eq!(st.cursor(), 2);
        st.toggle_mode();
        assert_eq!(st.type_char(b'c'), Err(EditError::BufferFull));
        assert_eq!(st.cursor(), 2);
        assert_eq!(st.content(), b"ab");
    }

    #[test]
    fn insert_char_ignores_replace_mode() {
        let mut buf = LineBuffer::with_content(4, b"ab");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.move_home();
        st.toggle_mode();
        st.insert_char(b'x').unwrap();
        assert_eq!(st.content(), b"xab");
        assert_eq!(st.cursor(), 1);
        assert_eq!(st.insert_char(b'y'), Err(EditError::BufferFull));
        assert_eq!(st.content(), b"xab");
        assert_eq!(st.cursor(), 1);
    }

    #[test]
    fn reset_after_rejection_rearms_clear_rule() {
        let mut buf = LineBuffer::with_content(16, b"dflt");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.move_home();
        assert!(st.has_typed());
        st.reset_after_rejection();
        assert!(!st.has_typed());
        assert!(st.content().is_empty());
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn backspace_at_start_is_quiet() {
        let mut buf = LineBuffer::with_capacity(8);
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        assert_eq!(st.backspace(), Ok(false));
        st.type_char(b'a').unwrap();
        assert_eq!(st.backspace(), Ok(true));
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn delete_forward_at_end_is_rejected() {
        let mut buf = LineBuffer::with_content(8, b"ab");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        assert_eq!(st.delete_forward(), Err(EditError::PositionOutOfRange));
        st.move_home();
        st.delete_forward().unwrap();
        assert_eq!(st.content(), b"b");
        assert_eq!(st.cursor(), 0);
    }

    #[test]
    fn restore_default_rearms_clear_rule() {
        let mut buf = LineBuffer::with_content(80, b"dflt");
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.clear_line();
        assert!(st.has_typed());
        st.restore_default();
        assert_eq!(st.content(), b"dflt");
        assert_eq!(st.cursor(), 4);
        assert!(!st.has_typed());
    }

    #[test]
    fn ephemeral_status_is_taken_once() {
        let mut buf = LineBuffer::with_capacity(8);
        let mut st = SessionState::begin(&mut buf, full()).unwrap();
        st.set_ephemeral_status("oops");
        assert_eq!(st.ephemeral_status(), Some("oops"));
        assert!(st.clear_ephemeral_status());
        assert!(!st.clear_ephemeral_status());
    }
}
