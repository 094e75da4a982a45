//! Core key event types shared by the key decoder and the edit dispatcher.
//!
//! Every keystroke the editor reacts to is expressed as one `KeyEvent`
//! variant. The decoder is the only producer; the dispatcher the only
//! consumer. Numeric key codes live in [`raw`] and nowhere else.

use std::fmt;

// -------------------------------------------------------------------------------------------------
// Raw byte values
// -------------------------------------------------------------------------------------------------
/// Raw byte values emitted by a terminal in raw mode.
pub mod raw {
    /// Ctrl-G.
    pub const CANCEL: u8 = 7;
    /// Ctrl-L.
    pub const REDISPLAY: u8 = 12;
    /// Carriage return.
    pub const ENTER: u8 = 13;
    /// Ctrl-P.
    pub const QUOTE_NEXT: u8 = 16;
    /// Ctrl-R.
    pub const RESTORE_DEFAULT: u8 = 18;
    /// Ctrl-U.
    pub const CLEAR_LINE: u8 = 21;
    /// Ctrl-Z.
    pub const TOGGLE_INSERT: u8 = 26;
    pub const ESC: u8 = 27;
    /// DEL, sent by most terminals for the Backspace key.
    pub const BACKSPACE: u8 = 127;
    /// Second byte of a control sequence introducer (`ESC [`).
    pub const CSI: u8 = b'[';
    /// Trailer of the numbered `ESC [ n ~` sequences.
    pub const TILDE: u8 = b'~';
    /// Audible alert.
    pub const BEL: u8 = 7;

    /// Bytes accepted as printable content: ASCII space through tilde, plus
    /// the high half from 0xA0 except the soft hyphen 0xAD. UTF-8 lead bytes
    /// all fall in the high half.
    pub const fn is_printable(byte: u8) -> bool {
        matches!(byte, 0x20..=0x7e | 0xa0..=0xac | 0xae..=0xff)
    }

    /// Continuation bytes expected after a UTF-8 lead byte, 0 for anything else.
    pub const fn utf8_continuations(lead: u8) -> u8 {
        match lead {
            0xc2..=0xdf => 1,
            0xe0..=0xef => 2,
            0xf0..=0xf4 => 3,
            _ => 0,
        }
    }

    /// UTF-8 continuation byte.
    pub const fn is_continuation(byte: u8) -> bool {
        matches!(byte, 0x80..=0xbf)
    }
}

/// Logical key events (closed set).
///
/// `Printable` carries the byte as typed. `Escape` is a lone or unrecognized
/// `ESC x` pair; `Unknown` covers everything else the decoder cannot
/// classify, including malformed `ESC [` sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Printable(u8),
    Enter,
    Backspace,
    /// Forward delete (`ESC [ 3 ~`).
    Delete,
    Left,
    Right,
    Home,
    End,
    Cancel,
    Redisplay,
    QuoteNext,
    RestoreDefault,
    ClearLine,
    ToggleInsertMode,
    Escape,
    Unknown,
}

impl KeyEvent {
    /// Stable discriminant name for logging. Never includes the payload byte so
    /// typed content cannot leak into logs.
    pub const fn name(&self) -> &'static str {
        match self {
            KeyEvent::Printable(_) => "printable",
            KeyEvent::Enter => "enter",
            KeyEvent::Backspace => "backspace",
            KeyEvent::Delete => "delete",
            KeyEvent::Left => "left",
            KeyEvent::Right => "right",
            KeyEvent::Home => "home",
            KeyEvent::End => "end",
            KeyEvent::Cancel => "cancel",
            KeyEvent::Redisplay => "redisplay",
            KeyEvent::QuoteNext => "quote_next",
            KeyEvent::RestoreDefault => "restore_default",
            KeyEvent::ClearLine => "clear_line",
            KeyEvent::ToggleInsertMode => "toggle_insert_mode",
            KeyEvent::Escape => "escape",
            KeyEvent::Unknown => "unknown",
        }
    }

    /// Keys that only exist once cursor motion and the command set are enabled.
    pub const fn needs_cursor_motion(&self) -> bool {
        matches!(
            self,
            KeyEvent::Left
                | KeyEvent::Right
                | KeyEvent::Home
                | KeyEvent::End
                | KeyEvent::Delete
                | KeyEvent::Cancel
                | KeyEvent::Redisplay
                | KeyEvent::QuoteNext
                | KeyEvent::RestoreDefault
                | KeyEvent::ClearLine
                | KeyEvent::ToggleInsertMode
        )
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -------------------------------------------------------------------------------------------------
// Feature flags
// -------------------------------------------------------------------------------------------------
bitflags::bitflags! {
    /// Behavior switches of the single parameterized edit machine.
    ///
    /// * `EDITING`: Backspace removes the character before the cursor.
    /// * `CURSOR_MOTION`: arrow/Home/End motion, forward delete and the control
    ///   command set (cancel, redisplay, quote, clear, restore, insert toggle).
    /// * `DEFAULT_VALUE`: pre-loaded buffer content is shown and kept until the
    ///   first qualifying keystroke.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EditorFeatures: u8 {
        const EDITING       = 0b0000_0001;
        const CURSOR_MOTION = 0b0000_0010;
        const DEFAULT_VALUE = 0b0000_0100;
    }
}

impl Default for EditorFeatures {
    fn default() -> Self {
        Self::all()
    }
}

/// Preset feature combinations selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Printable characters and Enter only.
    Append,
    /// Adds Backspace.
    Backspace,
    /// Adds default value handling.
    Default,
    /// Full editing: motion, insert/replace, quote, clear, restore, cancel.
    #[default]
    Full,
    /// Full editing plus response validation against an allow-list.
    Validated,
}

impl Variant {
    /// Map a 1-based version number onto a preset. Versions 4 and 5 share the
    /// full editing preset.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Variant::Append),
            2 => Some(Variant::Backspace),
            3 => Some(Variant::Default),
            4 | 5 => Some(Variant::Full),
            6 => Some(Variant::Validated),
            _ => None,
        }
    }

    pub fn features(self) -> EditorFeatures {
        match self {
            Variant::Append => EditorFeatures::empty(),
            Variant::Backspace => EditorFeatures::EDITING,
            Variant::Default => EditorFeatures::EDITING | EditorFeatures::DEFAULT_VALUE,
            Variant::Full | Variant::Validated => EditorFeatures::all(),
        }
    }

    /// Whether the preset enforces an allow-list on Enter.
    pub fn validates(self) -> bool {
        matches!(self, Variant::Validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display_uses_name_only() {
        assert_eq!(KeyEvent::Printable(b'x').to_string(), "printable");
        assert_eq!(format!("{}", KeyEvent::ToggleInsertMode), "toggle_insert_mode");
    }

    #[test]
    fn printable_range_covers_ascii_graphic_and_high_half() {
        assert!(raw::is_printable(b' '));
        assert!(raw::is_printable(b'~'));
        assert!(raw::is_printable(b'a'));
        assert!(raw::is_printable(0xa0));
        assert!(raw::is_printable(0xe9));
        assert!(raw::is_printable(0xff));
        assert!(!raw::is_printable(raw::BACKSPACE));
        assert!(!raw::is_printable(raw::ESC));
        assert!(!raw::is_printable(0));
        assert!(!raw::is_printable(0x80));
        assert!(!raw::is_printable(0x9f));
        assert!(!raw::is_printable(0xad));
    }

    #[test]
    fn utf8_lead_bytes_announce_continuations() {
        assert_eq!(raw::utf8_continuations(b'a'), 0);
        assert_eq!(raw::utf8_continuations(0xc3), 1);
        assert_eq!(raw::utf8_continuations(0xe5), 2);
        assert_eq!(raw::utf8_continuations(0xf0), 3);
        assert_eq!(raw::utf8_continuations(0xa9), 0);
        assert!(raw::is_continuation(0x80));
        assert!(!raw::is_continuation(0xc0));
    }

    #[test]
    fn motion_keys_need_cursor_motion() {
        for key in [KeyEvent::Left, KeyEvent::Right, KeyEvent::Home, KeyEvent::End] {
            assert!(key.needs_cursor_motion());
        }
        assert!(!KeyEvent::Backspace.needs_cursor_motion());
        assert!(!KeyEvent::Enter.needs_cursor_motion());
        assert!(!KeyEvent::Printable(b'a').needs_cursor_motion());
    }

    #[test]
    fn variant_presets_grow_monotonically() {
        let v1 = Variant::from_number(1).unwrap().features();
        let v2 = Variant::from_number(2).unwrap().features();
        let v3 = Variant::from_number(3).unwrap().features();
        let v5 = Variant::from_number(5).unwrap().features();
        assert!(v1.is_empty());
        assert!(v2.contains(v1));
        assert!(v3.contains(v2) && v3.contains(EditorFeatures::DEFAULT_VALUE));
        assert_eq!(v5, EditorFeatures::all());
        assert_eq!(Variant::from_number(4), Variant::from_number(5));
        assert!(Variant::from_number(6).unwrap().validates());
        assert!(!Variant::Full.validates());
        assert_eq!(Variant::from_number(0), None);
        assert_eq!(Variant::from_number(7), None);
    }
}
