//! Crossterm implementations of `RenderSink` and `Alert`.

use crate::display::{PROMPT_SEPARATOR, render_content};
use crate::writer::Writer;
use crate::{Alert, RenderSink};
use anyhow::Result;
use std::io::{self, Stdout, Write};
use tracing::{debug, trace};

/// Inline renderer: the input line is the terminal's current line and the
/// status line, once drawn, is the line directly above it.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Whether the line above the input line has been claimed for status text.
    status_reserved: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status_reserved: false,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn redraw_line(&mut self, prompt: &str, content: &[u8]) -> Result<()> {
        let mut w = Writer::new();
        w.move_to_column(0);
        w.clear_line();
        w.print(format!("{prompt}{PROMPT_SEPARATOR}"));
        w.print(render_content(content));
        trace!(target: "render", content_len = content.len(), "redraw_line");
        w.flush_to(&mut self.out)
    }

    fn set_cursor_column(&mut self, col: usize) -> Result<()> {
        let mut w = Writer::new();
        w.move_to_column(col);
        w.flush_to(&mut self.out)
    }

    fn redraw_status_line(&mut self, text: &str) -> Result<()> {
        let mut w = Writer::new();
        if self.status_reserved {
            w.move_up(1);
            w.move_to_column(0);
            w.clear_line();
            w.print(text);
            w.move_down(1);
        } else {
            // First status draw claims the current line and pushes input below it.
            w.move_to_column(0);
            w.clear_line();
            w.print(text);
            w.new_line();
            self.status_reserved = true;
        }
        trace!(target: "render", text_len = text.len(), "redraw_status_line");
        w.flush_to(&mut self.out)
    }

    fn finish(&mut self) -> Result<()> {
        let mut w = Writer::new();
        w.new_line();
        w.flush_to(&mut self.out)
    }
}

/// Audible alert (BEL). A disabled bell swallows signals silently.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
    signals: u64,
}

impl TerminalBell<Stdout> {
    pub fn stdout(enabled: bool) -> Self {
        Self::new(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            signals: 0,
        }
    }

    /// Number of alerts raised so far, counting silenced ones.
    pub fn signals(&self) -> u64 {
        self.signals
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Alert for TerminalBell<W> {
    fn signal(&mut self) {
        self.signals += 1;
        if !self.enabled {
            return;
        }
        let mut w = Writer::new();
        w.bell();
        if let Err(err) = w.flush_to(&mut self.out) {
            debug!(target: "render", ?err, "bell_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn redraw_line_prints_prompt_and_escaped_content() {
        let mut r = TerminalRenderer::new(Vec::new());
        r.redraw_line("Name", &[b'a', 1]).unwrap();
        let out = text(r.output());
        assert!(out.contains("\x1b[2K"));
        assert!(out.ends_with("Name: a^A"));
    }

    #[test]
    fn cursor_column_is_one_based_on_the_wire() {
        let mut r = TerminalRenderer::new(Vec::new());
        r.set_cursor_column(7).unwrap();
        assert_eq!(text(r.output()), "\x1b[8G");
    }

    #[test]
    fn first_status_draw_reserves_line_then_moves_up() {
        let mut r = TerminalRenderer::new(Vec::new());
        r.redraw_status_line("[INS]").unwrap();
        let first = text(r.output());
        assert!(first.ends_with("[INS]\r\n"));
        assert!(!first.contains("\x1b[1A"));

        let mut r2 = TerminalRenderer::new(Vec::new());
        r2.redraw_status_line("[INS]").unwrap();
        r2.redraw_status_line("[REP]").unwrap();
        let both = text(r2.output());
        let second = &both[first.len()..];
        assert!(second.starts_with("\x1b[1A"));
        assert!(second.contains("[REP]"));
        assert!(second.ends_with("\x1b[1B"));
    }

    #[test]
    fn bell_writes_bel_unless_disabled() {
        let mut on = TerminalBell::new(Vec::new(), true);
        on.signal();
        assert_eq!(on.output().as_slice(), b"\x07");
        assert_eq!(on.signals(), 1);

        let mut off = TerminalBell::new(Vec::new(), false);
        off.signal();
        off.signal();
        assert!(off.output().is_empty());
        assert_eq!(off.signals(), 2);
    }
}
