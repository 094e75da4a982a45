//! Line editing session: key dispatch and the `edit_line` driver.
//!
//! One session reads keys from a [`KeySource`], applies each to the
//! [`SessionState`] through [`dispatcher::dispatch`], and repaints through a
//! [`RenderSink`]. Rejected operations never end the session; they raise the
//! [`Alert`] and the loop continues.

pub mod dispatcher;
mod session;

pub use core_state::EditError;
pub use dispatcher::{DispatchResult, Exit, PendingState, dispatch, dispatch_literal};
pub use session::LineEditor;

use core_events::EditorFeatures;
use core_input::KeySource;
use core_render::{Alert, RenderSink};
use core_state::{SessionState, ValidationPolicy};
use core_text::LineBuffer;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Enter accepted the line; carries the buffer bytes exactly (untrimmed,
    /// possibly not UTF-8 when bytes were quoted in).
    Accepted(Vec<u8>),
    /// Cancel key.
    Cancelled,
    /// The session never started. Only `EditError::BufferTooSmall` is carried here.
    Refused(EditError),
}

/// Per-session configuration of the parameterized editor.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub prompt: String,
    pub features: EditorFeatures,
    pub policy: Option<ValidationPolicy>,
}

impl SessionConfig {
    pub fn new(prompt: impl Into<String>, features: EditorFeatures) -> Self {
        Self {
            prompt: prompt.into(),
            features,
            policy: None,
        }
    }

    pub fn with_policy(mut self, policy: Option<ValidationPolicy>) -> Self {
        self.policy = policy;
        self
    }
}

/// Run one editing session over `buffer`.
///
/// On `Accepted` the buffer holds the accepted content; on `Cancelled` it
/// holds whatever was on screen. I/O failures of the source or sink abort the
/// session with `Err`.
pub fn edit_line<S, R, A>(
    config: &SessionConfig,
    buffer: &mut LineBuffer,
    source: S,
    render: R,
    alert: A,
) -> anyhow::Result<SessionOutcome>
where
    S: KeySource,
    R: RenderSink,
    A: Alert,
{
    let state = match SessionState::begin(buffer, config.features) {
        Ok(state) => state,
        Err(reason) => {
            tracing::info!(target: "actions.session", %reason, "refused");
            return Ok(SessionOutcome::Refused(reason));
        }
    };
    LineEditor::new(config, state, source, render, alert).run()
}
