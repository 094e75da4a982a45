//! Terminal capability probing.
//!
//! Detection runs once at startup. Raw mode only makes sense when stdin is an
//! interactive terminal; with piped input the editor reads bytes as they come
//! and the alert is pointless when stdout is not a terminal.

use crossterm::tty::IsTty;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        Self {
            stdin_is_tty: io::stdin().is_tty(),
            stdout_is_tty: io::stdout().is_tty(),
        }
    }

    /// Whether raw mode should be entered for an edit session.
    pub fn wants_raw_mode(&self) -> bool {
        self.stdin_is_tty
    }

    /// Whether an audible alert can reach the user.
    pub fn can_alert(&self) -> bool {
        self.stdout_is_tty
    }
}
