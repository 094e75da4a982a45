use core_text::LineBuffer;
use tracing::trace;

/// Immutable copy of the buffer contents taken when a session starts.
///
/// Restoring is idempotent: the snapshot is never mutated, so restoring twice
/// yields the same content as restoring once.
#[derive(Clone, PartialEq, Eq)]
pub struct DefaultSnapshot {
    bytes: Vec<u8>,
}

impl DefaultSnapshot {
    pub fn capture(buffer: &LineBuffer) -> Self {
        trace!(target: "state.snapshot", len = buffer.len(), "capture");
        Self {
            bytes: buffer.as_bytes().to_vec(),
        }
    }

    /// Copy the snapshot back into `buffer`, returning the restored length.
    pub fn restore_into(&self, buffer: &mut LineBuffer) -> usize {
        let len = buffer.load(&self.bytes);
        trace!(target: "state.snapshot", len, "restore");
        len
    }
}

impl std::fmt::Debug for DefaultSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultSnapshot")
            .field("len", &self.bytes.len())
            .finish()
    }
}
