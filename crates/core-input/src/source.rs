use crate::{InputError, KeySource};
use std::collections::VecDeque;
use std::io::{self, Read};
use tracing::debug;

/// Reads raw bytes one at a time from any `Read` implementation.
///
/// The terminal must already be in raw mode when reading from stdin; this
/// type performs no terminal configuration of its own.
#[derive(Debug)]
pub struct ReaderKeySource<R> {
    reader: R,
}

/// Byte source over the process's standard input.
pub type StdinKeySource = ReaderKeySource<io::Stdin>;

impl ReaderKeySource<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> ReaderKeySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> KeySource for ReaderKeySource<R> {
    fn next_byte(&mut self) -> anyhow::Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    debug!(target: "input.decode", "source_eof");
                    return Err(InputError::Closed.into());
                }
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Replays a fixed byte script; reports [`InputError::Closed`] once drained.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeySource {
    bytes: VecDeque<u8>,
}

impl ScriptedKeySource {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
        }
    }

    pub fn push(&mut self, bytes: impl AsRef<[u8]>) {
        self.bytes.extend(bytes.as_ref());
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn next_byte(&mut self) -> anyhow::Result<u8> {
        self.bytes.pop_front().ok_or_else(|| InputError::Closed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_source_yields_bytes_then_closed() {
        let mut src = ReaderKeySource::new(&b"ab"[..]);
        assert_eq!(src.next_byte().unwrap(), b'a');
        assert_eq!(src.next_byte().unwrap(), b'b');
        let err = src.next_byte().unwrap_err();
        assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::Closed));
    }

    #[test]
    fn scripted_source_tracks_remaining() {
        let mut src = ScriptedKeySource::new("xy");
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.next_byte().unwrap(), b'x');
        src.push([13u8]);
        assert_eq!(src.remaining(), 2);
        assert_eq!(src.next_byte().unwrap(), b'y');
        assert_eq!(src.next_byte().unwrap(), 13);
        assert!(src.next_byte().is_err());
    }
}
