//! Byte stream to `KeyEvent` decoding.
//!
//! Sequences decoded after `ESC [`:
//!
//! | bytes        | event  | note                |
//! |--------------|--------|---------------------|
//! | `A`          | Home   | up arrow alias      |
//! | `B`          | End    | down arrow alias    |
//! | `C`          | Right  |                     |
//! | `D`          | Left   |                     |
//! | `H` / `F`    | Home / End |                 |
//! | `1~` / `7~`  | Home   | vt / rxvt           |
//! | `4~` / `8~`  | End    | vt / rxvt           |
//! | `3~`         | Delete | forward delete      |
//!
//! `ESC` followed by anything but `[` yields `Escape`; the second byte is
//! consumed, not pushed back. Any other byte after `ESC [` (or a numbered
//! sequence whose trailer is not `~`) yields `Unknown`.
//!
//! Printable bytes include the high half from 0xA0 (except 0xAD). After a
//! UTF-8 lead byte the announced continuation bytes (0x80..=0xBF) are printable
//! too, so multibyte characters arrive as consecutive `Printable` events.

use crate::KeySource;
use core_events::{KeyEvent, raw};
use tracing::trace;

#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
    continuations: u8,
}

impl<S: KeySource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            continuations: 0,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Block until one complete key has been read and return its event.
    pub fn next_key(&mut self) -> anyhow::Result<KeyEvent> {
        let byte = self.source.next_byte()?;
        let key = if self.continuations > 0 && raw::is_continuation(byte) {
            self.continuations -= 1;
            KeyEvent::Printable(byte)
        } else if byte == raw::ESC {
            self.continuations = 0;
            self.decode_escape()?
        } else {
            self.continuations = raw::utf8_continuations(byte);
            classify(byte)
        };
        trace!(target: "input.decode", key = key.name(), "key");
        Ok(key)
    }

    /// Read one byte without any classification (literal quoting).
    pub fn next_raw(&mut self) -> anyhow::Result<u8> {
        let byte = self.source.next_byte()?;
        trace!(target: "input.decode", "raw_byte");
        Ok(byte)
    }

    fn decode_escape(&mut self) -> anyhow::Result<KeyEvent> {
        if self.source.next_byte()? != raw::CSI {
            return Ok(KeyEvent::Escape);
        }
        let key = match self.source.next_byte()? {
            b'A' | b'H' => KeyEvent::Home,
            b'B' | b'F' => KeyEvent::End,
            b'C' => KeyEvent::Right,
            b'D' => KeyEvent::Left,
            b'1' | b'7' => self.expect_tilde(KeyEvent::Home)?,
            b'4' | b'8' => self.expect_tilde(KeyEvent::End)?,
            b'3' => self.expect_tilde(KeyEvent::Delete)?,
            _ => {
                trace!(target: "input.decode", "csi_unrecognized");
                KeyEvent::Unknown
            }
        };
        Ok(key)
    }

    fn expect_tilde(&mut self, key: KeyEvent) -> anyhow::Result<KeyEvent> {
        if self.source.next_byte()? == raw::TILDE {
            Ok(key)
        } else {
            trace!(target: "input.decode", expected = key.name(), "csi_missing_tilde");
            Ok(KeyEvent::Unknown)
        }
    }
}

/// Classify a single byte that does not start an escape sequence.
pub(crate) fn classify(byte: u8) -> KeyEvent {
    match byte {
        raw::ENTER => KeyEvent::Enter,
        raw::BACKSPACE => KeyEvent::Backspace,
        raw::CANCEL => KeyEvent::Cancel,
        raw::REDISPLAY => KeyEvent::Redisplay,
        raw::QUOTE_NEXT => KeyEvent::QuoteNext,
        raw::RESTORE_DEFAULT => KeyEvent::RestoreDefault,
        raw::CLEAR_LINE => KeyEvent::ClearLine,
        raw::TOGGLE_INSERT => KeyEvent::ToggleInsertMode,
        raw::ESC => KeyEvent::Escape,
        b if raw::is_printable(b) => KeyEvent::Printable(b),
        _ => KeyEvent::Unknown,
    }
}
