//! Rendering and feedback for the line editor.
//!
//! The edit session only ever talks to the two traits defined here:
//! [`RenderSink`] for drawing and [`Alert`] for the audible cue. The crossterm
//! backed implementations live in [`terminal`]; tests substitute recorders.
//!
//! Screen layout (when a status line is in use):
//!
//! ```text
//! [INS] ← → Home End | BS Del | ...     <- status line
//! Prompt: content_                      <- input line (cursor lives here)
//! ```
//!
//! Exposed components:
//! - `display`: caret-notation rendering of content bytes and cursor column math.
//! - `status`: helper bar composition (segments, then string).
//! - `writer`: batched terminal commands flushed once per redraw.
//! - `terminal`: `TerminalRenderer` and `TerminalBell`.

use anyhow::Result;

pub mod display;
pub mod status;
pub mod terminal;
pub mod writer;

pub use display::{PROMPT_SEPARATOR, cursor_column, display_width, render_content};
pub use status::{StatusContext, StatusSegment, build_status, compose_status, format_status};
pub use terminal::{TerminalBell, TerminalRenderer};

/// Drawing surface for one edit session. Never mutates editor state.
pub trait RenderSink {
    /// Repaint the input line as `"<prompt>: <content>"`.
    fn redraw_line(&mut self, prompt: &str, content: &[u8]) -> Result<()>;
    /// Place the terminal cursor at display column `col` of the input line.
    fn set_cursor_column(&mut self, col: usize) -> Result<()>;
    /// Repaint the status line with `text`.
    fn redraw_status_line(&mut self, text: &str) -> Result<()>;
    /// Leave the input line once the session is over.
    fn finish(&mut self) -> Result<()>;
}

/// Fire-and-forget user alert for rejected operations.
pub trait Alert {
    fn signal(&mut self);
}

impl<R: RenderSink + ?Sized> RenderSink for &mut R {
    fn redraw_line(&mut self, prompt: &str, content: &[u8]) -> Result<()> {
        (**self).redraw_line(prompt, content)
    }
    fn set_cursor_column(&mut self, col: usize) -> Result<()> {
        (**self).set_cursor_column(col)
    }
    fn redraw_status_line(&mut self, text: &str) -> Result<()> {
        (**self).redraw_status_line(text)
    }
    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<A: Alert + ?Sized> Alert for &mut A {
    fn signal(&mut self) {
        (**self).signal()
    }
}
