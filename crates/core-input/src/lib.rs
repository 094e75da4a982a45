//! Raw key acquisition and escape-sequence decoding.
//!
//! A [`KeySource`] yields one raw byte per call, blocking until it is
//! available. [`KeyDecoder`] turns that byte stream into [`KeyEvent`]s,
//! folding the `ESC [ ...` sequences terminals send for arrow, Home, End and
//! Delete keys into single events.

mod decoder;
mod source;

pub use decoder::KeyDecoder;
pub use source::{ReaderKeySource, ScriptedKeySource, StdinKeySource};

use thiserror::Error;

pub use core_events::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// The byte source reached end of input.
    #[error("key source closed")]
    Closed,
}

/// Blocking provider of raw key bytes (no echo, no line buffering).
pub trait KeySource {
    fn next_byte(&mut self) -> anyhow::Result<u8>;
}

impl<S: KeySource + ?Sized> KeySource for &mut S {
    fn next_byte(&mut self) -> anyhow::Result<u8> {
        (**self).next_byte()
    }
}

impl<S: KeySource + ?Sized> KeySource for Box<S> {
    fn next_byte(&mut self) -> anyhow::Result<u8> {
        (**self).next_byte()
    }
}
