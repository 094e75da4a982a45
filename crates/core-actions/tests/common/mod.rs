#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_actions::{SessionConfig, SessionOutcome, edit_line};
use core_events::EditorFeatures;
use core_input::ScriptedKeySource;
use core_render::{Alert, RenderSink, render_content};
use core_state::ValidationPolicy;
use core_text::LineBuffer;

pub const PROMPT: &str = "Name";

/// One call observed on the render sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Line(String),
    Cursor(usize),
    Status(String),
    Finish,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<Frame>,
}

impl RecordingRenderer {
    pub fn last_line(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Line(l) => Some(l.as_str()),
            _ => None,
        })
    }

    pub fn last_cursor(&self) -> Option<usize> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Cursor(c) => Some(*c),
            _ => None,
        })
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for RecordingRenderer {
    fn redraw_line(&mut self, prompt: &str, content: &[u8]) -> anyhow::Result<()> {
        self.frames
            .push(Frame::Line(format!("{prompt}: {}", render_content(content))));
        Ok(())
    }
    fn set_cursor_column(&mut self, col: usize) -> anyhow::Result<()> {
        self.frames.push(Frame::Cursor(col));
        Ok(())
    }
    fn redraw_status_line(&mut self, text: &str) -> anyhow::Result<()> {
        self.frames.push(Frame::Status(text.to_owned()));
        Ok(())
    }
    fn finish(&mut self) -> anyhow::Result<()> {
        self.frames.push(Frame::Finish);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CountingAlert {
    pub count: usize,
}

impl Alert for CountingAlert {
    fn signal(&mut self) {
        self.count += 1;
    }
}

/// Result of a scripted session.
#[derive(Debug)]
pub struct Run {
    pub outcome: SessionOutcome,
    pub buffer: LineBuffer,
    pub render: RecordingRenderer,
    pub alerts: usize,
}

pub fn run_with(
    buffer: LineBuffer,
    features: EditorFeatures,
    policy: Option<ValidationPolicy>,
    keys: &[u8],
) -> Run {
    let mut buffer = buffer;
    let mut render = RecordingRenderer::default();
    let mut alert = CountingAlert::default();
    let config = SessionConfig::new(PROMPT, features).with_policy(policy);
    let outcome = edit_line(
        &config,
        &mut buffer,
        ScriptedKeySource::new(keys),
        &mut render,
        &mut alert,
    )
    .expect("scripted session ends with Enter or Cancel");
    Run {
        outcome,
        buffer,
        render,
        alerts: alert.count,
    }
}

/// Full-featured session on an empty 80-slot buffer.
pub fn run(keys: &[u8]) -> Run {
    run_with(LineBuffer::with_capacity(80), EditorFeatures::all(), None, keys)
}

pub fn run_default(default: &str, keys: &[u8]) -> Run {
    run_with(
        LineBuffer::with_content(80, default.as_bytes()),
        EditorFeatures::all(),
        None,
        keys,
    )
}

pub fn accepted(s: &str) -> SessionOutcome {
    SessionOutcome::Accepted(s.as_bytes().to_vec())
}

pub const LEFT: &[u8] = b"\x1b[D";
pub const RIGHT: &[u8] = b"\x1b[C";
pub const HOME: &[u8] = b"\x1b[H";
pub const END: &[u8] = b"\x1b[F";
pub const DELETE: &[u8] = b"\x1b[3~";

/// Concatenate key byte chunks into one script.
pub fn keys(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
