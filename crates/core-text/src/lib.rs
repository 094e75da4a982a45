//! Fixed-capacity single-line byte buffer.
//!
//! The buffer models a classic `capacity`-slot character array whose final slot
//! is reserved for a terminator. Instead of storing the terminator we keep the
//! logical length explicitly (the backing `Vec` length) and refuse any write that
//! would push it to `capacity` or beyond. All positions are byte offsets into
//! the logical content; the editor is single-byte oriented.
//!
//! Invariants:
//! * `len() <= max_len()` where `max_len() == capacity - 1`.
//! * Primitives reject out-of-range positions with an error and leave the
//!   buffer untouched; they never clamp or wrap.

use thiserror::Error;
use tracing::{trace, warn};

/// Smallest capacity that still leaves room for one content byte plus the
/// reserved terminator slot.
pub const MIN_CAPACITY: usize = 2;

/// Capacity used when the environment does not specify one.
pub const DEFAULT_CAPACITY: usize = 80;

/// Rejected buffer mutation. The buffer is unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("buffer full (capacity {capacity})")]
    BufferFull { capacity: usize },
    #[error("position {pos} out of range for length {len}")]
    PositionOutOfRange { pos: usize, len: usize },
}

#[derive(Clone, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// Empty buffer with `capacity` slots (terminator slot included). Capacities
    /// below [`MIN_CAPACITY`] are accepted here; sessions refuse them at entry.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity.saturating_sub(1)),
            capacity,
        }
    }

    /// Buffer pre-populated with `content`, truncated to what fits.
    pub fn with_content(capacity: usize, content: &[u8]) -> Self {
        let mut buf = Self::with_capacity(capacity);
        buf.load(content);
        buf
    }

    /// Replace the contents wholesale, truncating to `max_len()`. Returns the
    /// number of bytes kept.
    pub fn load(&mut self, content: &[u8]) -> usize {
        let keep = content.len().min(self.max_len());
        if keep < content.len() {
            warn!(target: "state.buffer", capacity = self.capacity, offered = content.len(), kept = keep, "content_truncated");
        }
        self.bytes.clear();
        self.bytes.extend_from_slice(&content[..keep]);
        keep
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest logical length the buffer can hold.
    pub fn max_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    /// Logical length (the classic `clen`).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.max_len()
    }

    /// True when the capacity can hold at least one content byte.
    pub fn is_usable(&self) -> bool {
        self.capacity >= MIN_CAPACITY
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content as text; bytes that are not valid UTF-8 become U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Insert `ch` at `pos`, shifting `[pos, len)` one slot right.
    pub fn insert_at(&mut self, pos: usize, ch: u8) -> Result<(), BufferError> {
        self.check_pos(pos)?;
        if self.is_full() {
            return Err(BufferError::BufferFull {
                capacity: self.capacity,
            });
        }
        self.bytes.insert(pos, ch);
        trace!(target: "state.buffer", op = "insert", pos, len = self.bytes.len(), "mutate");
        Ok(())
    }

    /// Remove and return the byte at `pos`, shifting `[pos + 1, len)` one slot left.
    pub fn delete_at(&mut self, pos: usize) -> Result<u8, BufferError> {
        if pos >= self.bytes.len() {
            return Err(BufferError::PositionOutOfRange {
                pos,
                len: self.bytes.len(),
            });
        }
        let removed = self.bytes.remove(pos);
        trace!(target: "state.buffer", op = "delete", pos, len = self.bytes.len(), "mutate");
        Ok(removed)
    }

    /// Replace the byte at `pos`. Writing at `pos == len` appends.
    pub fn overwrite_at(&mut self, pos: usize, ch: u8) -> Result<(), BufferError> {
        self.check_pos(pos)?;
        if pos >= self.max_len() {
            return Err(BufferError::BufferFull {
                capacity: self.capacity,
            });
        }
        if pos == self.bytes.len() {
            self.bytes.push(ch);
        } else {
            self.bytes[pos] = ch;
        }
        trace!(target: "state.buffer", op = "overwrite", pos, len = self.bytes.len(), "mutate");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    fn check_pos(&self, pos: usize) -> Result<(), BufferError> {
        if pos > self.bytes.len() {
            Err(BufferError::PositionOutOfRange {
                pos,
                len: self.bytes.len(),
            })
        } else {
            Ok(())
        }
    }
}

// Content is deliberately left out of Debug output so buffers can be logged with `?`.
impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("len", &self.bytes.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
