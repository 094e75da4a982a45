//! Session driver: read key, dispatch, alert, repaint; repeat until exit.

use crate::dispatcher::{self, DispatchResult, Exit, PendingState};
use crate::{SessionConfig, SessionOutcome};
use anyhow::Result;
use core_input::{KeyDecoder, KeySource};
use core_render::{Alert, RenderSink, StatusContext, build_status, cursor_column};
use core_state::SessionState;
use tracing::{debug, info, trace};

pub struct LineEditor<'c, 'b, S, R, A> {
    config: &'c SessionConfig,
    state: SessionState<'b>,
    decoder: KeyDecoder<S>,
    render: R,
    alert: A,
    pending: PendingState,
    /// Set once anything has been drawn on the status line.
    status_shown: bool,
    keys: u64,
}

impl<'c, 'b, S, R, A> LineEditor<'c, 'b, S, R, A>
where
    S: KeySource,
    R: RenderSink,
    A: Alert,
{
    pub fn new(
        config: &'c SessionConfig,
        state: SessionState<'b>,
        source: S,
        render: R,
        alert: A,
    ) -> Self {
        Self {
            config,
            state,
            decoder: KeyDecoder::new(source),
            render,
            alert,
            pending: PendingState::Idle,
            status_shown: false,
            keys: 0,
        }
    }

    pub fn run(mut self) -> Result<SessionOutcome> {
        debug!(target: "actions.session", features = ?self.config.features, validating = self.config.policy.is_some(), "session_start");
        self.paint_status()?;
        self.paint_line()?;

        loop {
            let result = self.step()?;
            if let Some(exit) = result.exit {
                self.render.finish()?;
                let outcome = match exit {
                    Exit::Accept => SessionOutcome::Accepted(self.state.content().to_vec()),
                    Exit::Cancel => SessionOutcome::Cancelled,
                };
                info!(target: "actions.session", keys = self.keys, len = self.state.buffer().len(), accepted = matches!(outcome, SessionOutcome::Accepted(_)), "session_end");
                return Ok(outcome);
            }
            self.repaint(&result)?;
        }
    }

    /// Read and apply exactly one key (or one literal byte after QuoteNext).
    fn step(&mut self) -> Result<DispatchResult> {
        let result = match self.pending {
            PendingState::AwaitingLiteral => {
                let byte = self.decoder.next_raw()?;
                dispatcher::dispatch_literal(byte, &mut self.state)
            }
            PendingState::Idle => {
                let key = self.decoder.next_key()?;
                dispatcher::dispatch(key, &mut self.state, self.config.policy.as_ref())
            }
        };
        self.keys += 1;
        self.pending = result.pending;
        if result.alert.is_some() {
            self.alert.signal();
        }
        Ok(result)
    }

    fn repaint(&mut self, result: &DispatchResult) -> Result<()> {
        if result.status || result.full {
            self.paint_status()?;
        }
        if result.dirty || result.status || result.full {
            self.paint_line()
        } else if result.cursor_only {
            self.place_cursor()
        } else {
            Ok(())
        }
    }

    /// Ephemeral message first, then the helper bar. Once something has been
    /// shown the line is kept, blanked if there is nothing left to say.
    fn paint_status(&mut self) -> Result<()> {
        let text = match self.state.ephemeral_status() {
            Some(msg) => Some(msg.to_owned()),
            None => build_status(&StatusContext {
                mode: self.state.mode(),
                features: self.state.features(),
            }),
        };
        match text {
            Some(text) => {
                self.render.redraw_status_line(&text)?;
                self.status_shown = true;
            }
            None if self.status_shown => self.render.redraw_status_line("")?,
            None => {}
        }
        trace!(target: "actions.session", "status_painted");
        Ok(())
    }

    fn paint_line(&mut self) -> Result<()> {
        self.render
            .redraw_line(&self.config.prompt, self.state.content())?;
        self.place_cursor()
    }

    fn place_cursor(&mut self) -> Result<()> {
        let col = cursor_column(&self.config.prompt, self.state.content(), self.state.cursor());
        self.render.set_cursor_column(col)
    }
}
