//! CountingSinkNode — stream terminator that counts what it swallows.
//!
//! Useful as the downstream end of a test graph and as a cheap
//! throughput probe: it accepts frames on every input and records counts
//! and the latest timestamp, producing nothing.

use crate::error::Result;
use crate::frame::Frame;
use crate::node::StreamNode;
use crate::port::OutputPorts;
use std::collections::BTreeMap;
use std::time::Duration;

/// Input-only node counting received frames per port.
#[derive(Default)]
pub struct CountingSinkNode {
    per_port: BTreeMap<String, u64>,
    total: u64,
    last_timestamp: Option<Duration>,
}

impl CountingSinkNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total frames received across all inputs.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Frames received on one port.
    pub fn count(&self, port: &str) -> u64 {
        self.per_port.get(port).copied().unwrap_or(0)
    }

    /// Timestamp of the most recently received frame.
    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last_timestamp
    }
}

impl StreamNode for CountingSinkNode {
    fn name(&self) -> &str {
        "CountingSink"
    }

    fn on_frame(&mut self, input: &str, frame: Frame, _outputs: &mut OutputPorts) -> Result<()> {
        *self.per_port.entry(input.to_string()).or_insert(0) += 1;
        self.total += 1;
        self.last_timestamp = Some(frame.timestamp);
        Ok(())
    }
}
