//! Status (helper) line composition.
//!
//! Two stages, so callers can inspect or rearrange pieces before formatting:
//! 1. `compose_status` produces ordered `StatusSegment`s.
//! 2. `format_status` renders them: `[MODE] hint | hint | ...`.
//!
//! The helper bar only exists when the command key set is enabled; without it
//! there is nothing to advertise and `compose_status` returns no segments.

use core_events::EditorFeatures;
use core_state::Mode;

/// Inputs needed to build the status line.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext {
    pub mode: Mode,
    pub features: EditorFeatures,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment {
    /// Insert/replace indicator ("INS" / "REP").
    Mode(&'static str),
    /// One key binding hint.
    Hint(&'static str),
}

const HINTS: [&str; 7] = [
    "← → Home End",
    "BS Del",
    "Ctrl-U clear",
    "Ctrl-R default",
    "Ctrl-P quote",
    "Ctrl-G cancel",
    "Ctrl-L redisplay",
];

pub fn compose_status(ctx: &StatusContext) -> Vec<StatusSegment> {
    if !ctx.features.contains(EditorFeatures::CURSOR_MOTION) {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(HINTS.len() + 1);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.extend(HINTS.iter().copied().map(StatusSegment::Hint));
    out
}

pub fn format_status(segments: &[StatusSegment]) -> String {
    let mut s = String::with_capacity(112);
    let mut first_hint = true;
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                s.push('[');
                s.push_str(m);
                s.push(']');
            }
            StatusSegment::Hint(h) => {
                s.push_str(if first_hint { " " } else { " | " });
                s.push_str(h);
                first_hint = false;
            }
        }
    }
    s
}

/// Status text for `ctx`, or `None` when no status line is shown.
pub fn build_status(ctx: &StatusContext) -> Option<String> {
    let segments = compose_status(ctx);
    if segments.is_empty() {
        None
    } else {
        Some(format_status(&segments))
    }
}
