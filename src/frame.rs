//! The frame — the unit of data exchanged between a node and its host.
//!
//! Payloads are opaque to the transport: the contract moves bytes, the
//! node decides what they mean. The payload is shared and immutable, so
//! forwarding a frame to several output ports never copies it.

use std::sync::Arc;
use std::time::Duration;

/// One discrete unit of streamed data.
///
/// A frame's position within its port's queue is its implicit sequence
/// position; frames carry no explicit sequence number.
#[derive(Clone)]
pub struct Frame {
    /// Acquisition time, relative to the start of the run.
    pub timestamp: Duration,
    payload: Arc<[u8]>,
}

impl Frame {
    /// Create a frame from any owned byte buffer.
    pub fn new(timestamp: Duration, payload: impl Into<Arc<[u8]>>) -> Self {
        Self {
            timestamp,
            payload: payload.into(),
        }
    }

    /// The frame's payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("timestamp", &self.timestamp)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
