//! Batched terminal command writer.
//!
//! Commands are queued in order and flushed in one go so a redraw never
//! leaves a half-painted line on screen. Columns are zero based; rows are
//! always relative to the current line since the editor draws inline rather
//! than on an alternate screen.

use anyhow::Result;
use crossterm::{
    cursor::{MoveDown, MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveToColumn(u16),
    MoveUp(u16),
    MoveDown(u16),
    /// Clears the whole current line; cursor column unchanged.
    ClearLine,
    Print(String),
    /// Carriage return + line feed (raw mode performs no output translation).
    NewLine,
    Bell,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to_column(&mut self, col: usize) {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        self.cmds.push(Command::MoveToColumn(col));
    }
    pub fn move_up(&mut self, rows: u16) {
        self.cmds.push(Command::MoveUp(rows));
    }
    pub fn move_down(&mut self, rows: u16) {
        self.cmds.push(Command::MoveDown(rows));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn new_line(&mut self) {
        self.cmds.push(Command::NewLine);
    }
    pub fn bell(&mut self) {
        self.cmds.push(Command::Bell);
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveToColumn(col) => queue!(out, MoveToColumn(col))?,
                Command::MoveUp(n) => queue!(out, MoveUp(n))?,
                Command::MoveDown(n) => queue!(out, MoveDown(n))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::NewLine => queue!(out, Print("\r\n"))?,
                Command::Bell => queue!(out, Print(char::from(core_events::raw::BEL)))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
