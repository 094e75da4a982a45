//! Display mapping for content bytes.
//!
//! Content is byte oriented and may hold literally quoted control bytes or
//! partial UTF-8 sequences, so it is never written to the terminal verbatim.
//! Bytes are grouped into display units:
//!
//! | unit                         | shown as     | columns          |
//! |------------------------------|--------------|------------------|
//! | valid UTF-8, not a control   | itself       | its cell width   |
//! | `0x00..0x20`                 | `^@`..`^_`   | 2                |
//! | `0x7f`                       | `^?`         | 2                |
//! | other control or invalid byte| `\xNN` each  | 4 per byte       |
//!
//! The cursor column is derived from the same units so the drawn cursor can
//! never drift from the logical cursor. A cursor inside a multibyte
//! character sits at that character's first column.

use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text placed between the prompt and the content.
pub const PROMPT_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Text(char),
    Caret(u8),
    Hex(u8),
}

impl Unit {
    fn width(self) -> usize {
        match self {
            Unit::Text(c) => c.width().unwrap_or(0),
            Unit::Caret(_) => 2,
            Unit::Hex(_) => 4,
        }
    }

    fn push(self, out: &mut String) {
        match self {
            Unit::Text(c) => out.push(c),
            Unit::Caret(0x7f) => out.push_str("^?"),
            Unit::Caret(b) => {
                out.push('^');
                out.push(char::from(b + 0x40));
            }
            Unit::Hex(b) => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
}

fn byte_unit(byte: u8) -> Unit {
    match byte {
        0x00..=0x1f | 0x7f => Unit::Caret(byte),
        _ => Unit::Hex(byte),
    }
}

/// Split `bytes` into display units paired with the number of bytes each covers.
fn units(bytes: &[u8]) -> Vec<(usize, Unit)> {
    let mut out = Vec::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c.is_ascii_control() {
                out.push((1, Unit::Caret(c as u8)));
            } else if c.is_control() {
                let mut buf = [0u8; 4];
                out.extend(c.encode_utf8(&mut buf).bytes().map(|b| (1, Unit::Hex(b))));
            } else {
                out.push((c.len_utf8(), Unit::Text(c)));
            }
        }
        out.extend(chunk.invalid().iter().map(|&b| (1, byte_unit(b))));
    }
    out
}

/// Columns occupied by a run of content bytes.
pub fn display_width(bytes: &[u8]) -> usize {
    units(bytes).into_iter().map(|(_, u)| u.width()).sum()
}

/// Terminal-safe text for `bytes`.
pub fn render_content(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for (_, unit) in units(bytes) {
        unit.push(&mut out);
    }
    out
}

/// Zero-based terminal column of the cursor sitting before `content[cursor]`.
pub fn cursor_column(prompt: &str, content: &[u8], cursor: usize) -> usize {
    let mut offset = 0;
    let mut cols = 0;
    for (len, unit) in units(content) {
        offset += len;
        if offset > cursor {
            break;
        }
        cols += unit.width();
    }
    prompt.width() + PROMPT_SEPARATOR.width() + cols
}
