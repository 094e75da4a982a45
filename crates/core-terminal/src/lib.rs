//! Terminal backend: raw mode enter/leave with an RAII guard.
//!
//! The editor draws inline on the current terminal line, so unlike a
//! full-screen application it never switches to the alternate screen or
//! hides the cursor. Raw mode (no echo, no line buffering, no signal keys)
//! is all it needs.

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn is_entered(&self) -> bool;
}

pub struct CrosstermBackend {
    entered: bool,
}

/// RAII guard ensuring terminal state restoration even if caller early-returns or panics.
pub struct TerminalGuard<'a, B: TerminalBackend = CrosstermBackend> {
    backend: &'a mut B,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

/// Enter raw mode on `backend` and return a guard that leaves it on drop.
pub fn enter_guard<B: TerminalBackend>(backend: &mut B) -> Result<TerminalGuard<'_, B>> {
    backend.enter()?;
    Ok(TerminalGuard { backend })
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            self.entered = true;
            debug!(target: "runtime", "raw_mode_enabled");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            disable_raw_mode()?;
            self.entered = false;
            debug!(target: "runtime", "raw_mode_disabled");
        }
        Ok(())
    }

    fn is_entered(&self) -> bool {
        self.entered
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

impl<B: TerminalBackend> TerminalGuard<'_, B> {
    pub fn backend(&self) -> &B {
        self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<'_, B> {
    fn drop(&mut self) {
        if let Err(err) = self.backend.leave() {
            debug!(target: "runtime", ?err, "raw_mode_restore_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBackend {
        entered: bool,
        enters: usize,
        leaves: usize,
    }

    impl TerminalBackend for FakeBackend {
        fn enter(&mut self) -> Result<()> {
            self.entered = true;
            self.enters += 1;
            Ok(())
        }
        fn leave(&mut self) -> Result<()> {
            if self.entered {
                self.leaves += 1;
            }
            self.entered = false;
            Ok(())
        }
        fn is_entered(&self) -> bool {
            self.entered
        }
    }

    #[test]
    fn guard_leaves_on_drop() {
        let mut backend = FakeBackend::default();
        {
            let guard = enter_guard(&mut backend).unwrap();
            assert!(guard.backend().is_entered());
        }
        assert!(!backend.is_entered());
        assert_eq!((backend.enters, backend.leaves), (1, 1));
    }

    #[test]
    fn guard_leaves_on_early_return() {
        fn fails(backend: &mut FakeBackend) -> Result<()> {
            let _guard = enter_guard(backend)?;
            anyhow::bail!("session failed")
        }
        let mut backend = FakeBackend::default();
        assert!(fails(&mut backend).is_err());
        assert!(!backend.is_entered());
        assert_eq!(backend.leaves, 1);
    }

    #[test]
    fn crossterm_backend_starts_cooked() {
        let backend = CrosstermBackend::new();
        assert!(!backend.is_entered());
    }
}
