//! Ports: named, directional endpoints for frame transfer.
//!
//! Ports are the only surface through which a node touches the host's
//! transport. Input ports give a non-blocking queue view over frames the
//! host has delivered; output ports forward frames to the host
//! immediately. Neither side blocks — the one blocking point of a run is
//! the wait gate.

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::metadata::{MetadataTable, MetadataValue};
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// Result of a non-blocking input-port read.
///
/// `Empty` means nothing is buffered *at this instant*. It is not
/// end-of-stream and not an error; run termination is signalled through
/// the wait gate, never through the queue.
#[derive(Debug)]
pub enum NextFrame {
    Ready(Frame),
    Empty,
}

impl NextFrame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, NextFrame::Empty)
    }

    pub fn into_option(self) -> Option<Frame> {
        match self {
            NextFrame::Ready(frame) => Some(frame),
            NextFrame::Empty => None,
        }
    }
}

/// A node's view of one input stream: a bounded FIFO queue fed by the host.
pub struct InputPort {
    name: String,
    queue: Receiver<Frame>,
    meta: Arc<MetadataTable>,
}

impl InputPort {
    pub(crate) fn new(name: String, queue: Receiver<Frame>, meta: Arc<MetadataTable>) -> Self {
        Self { name, queue, meta }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pop the next buffered frame, without blocking.
    ///
    /// Frames come out in the order the host enqueued them. A
    /// disconnected host feed also reads as `Empty`: the queue never
    /// signals termination, the gate does.
    pub fn next(&self) -> NextFrame {
        match self.queue.try_recv() {
            Ok(frame) => NextFrame::Ready(frame),
            Err(_) => NextFrame::Empty,
        }
    }

    /// Read view of this port's negotiated metadata.
    pub fn metadata(&self) -> &MetadataTable {
        &self.meta
    }
}

impl fmt::Debug for InputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputPort")
            .field("name", &self.name)
            .field("buffered", &self.queue.len())
            .finish()
    }
}

/// A node's handle on one output stream. Frames submitted here are
/// forwarded to the host immediately; downstream delivery is the host's
/// responsibility.
pub struct OutputPort {
    name: String,
    sink: Sender<Frame>,
    meta: Arc<MetadataTable>,
}

impl OutputPort {
    pub(crate) fn new(name: String, sink: Sender<Frame>, meta: Arc<MetadataTable>) -> Self {
        Self { name, sink, meta }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hand a frame to the host, without blocking.
    ///
    /// Fails with [`Error::Backpressure`] when the host sink is closed or
    /// over capacity. The frame is lost for this submit; the contract
    /// defines no retry — whether to drop it or abort the run is the
    /// node's decision.
    pub fn submit(&self, frame: Frame) -> Result<()> {
        self.sink.try_send(frame).map_err(|_| Error::Backpressure {
            port: self.name.clone(),
        })
    }

    /// Set a scalar metadata value. Valid only while the run is in Setup.
    pub fn set_metadata_value(&self, key: &str, value: impl Into<MetadataValue>) -> Result<()> {
        self.meta.insert(key, value.into())
    }

    /// Set a two-dimensional size value (width, height). The slice must
    /// hold exactly two entries.
    pub fn set_metadata_value_size(&self, key: &str, dims: &[u32]) -> Result<()> {
        match dims {
            [width, height] => self.meta.insert(
                key,
                MetadataValue::Size {
                    width: *width,
                    height: *height,
                },
            ),
            _ => Err(Error::InvalidMetadata {
                key: key.to_string(),
                message: format!("dimension list needs exactly two entries, got {}", dims.len()),
            }),
        }
    }

    /// Read view of this port's metadata.
    pub fn metadata(&self) -> &MetadataTable {
        &self.meta
    }
}

impl fmt::Debug for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputPort")
            .field("name", &self.name)
            .finish()
    }
}

/// The output ports of a run, addressable by name.
///
/// Kept separate from [`NodePorts`] so the drain loop can hand node logic
/// mutable access to outputs while it iterates the inputs.
pub struct OutputPorts {
    ports: Vec<OutputPort>,
}

impl OutputPorts {
    pub(crate) fn new(ports: Vec<OutputPort>) -> Self {
        Self { ports }
    }

    /// Look up an output port by name.
    pub fn get(&self, name: &str) -> Result<&OutputPort> {
        self.ports
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::PortNotFound {
                name: name.to_string(),
                direction: PortDirection::Output,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputPort> {
        self.ports.iter()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

/// All ports a node run was composed with.
///
/// This is the capability object handed to node logic at setup — there is
/// no global port registry, so multiple independent node instances can
/// coexist in one process.
pub struct NodePorts {
    pub(crate) inputs: Vec<InputPort>,
    pub(crate) outputs: OutputPorts,
}

impl NodePorts {
    pub(crate) fn new(inputs: Vec<InputPort>, outputs: Vec<OutputPort>) -> Self {
        Self {
            inputs,
            outputs: OutputPorts::new(outputs),
        }
    }

    /// Look up an input port by name.
    pub fn input(&self, name: &str) -> Result<&InputPort> {
        self.inputs
            .iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| Error::PortNotFound {
                name: name.to_string(),
                direction: PortDirection::Input,
            })
    }

    /// Look up an output port by name.
    pub fn output(&self, name: &str) -> Result<&OutputPort> {
        self.outputs.get(name)
    }

    /// Input ports in drain order (declaration order, stable for the run).
    pub fn inputs(&self) -> impl Iterator<Item = &InputPort> {
        self.inputs.iter()
    }

    /// Freeze metadata on every port. Happens when the run leaves Setup.
    pub(crate) fn seal_metadata(&self) {
        for port in &self.inputs {
            port.metadata().seal();
        }
        for port in self.outputs.iter() {
            port.metadata().seal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    fn input_port(name: &str, cap: usize) -> (Sender<Frame>, InputPort) {
        let (tx, rx) = bounded(cap);
        let meta = Arc::new(MetadataTable::new(name));
        (tx, InputPort::new(name.to_string(), rx, meta))
    }

    fn output_port(name: &str, cap: usize) -> (OutputPort, Receiver<Frame>) {
        let (tx, rx) = bounded(cap);
        let meta = Arc::new(MetadataTable::new(name));
        (OutputPort::new(name.to_string(), tx, meta), rx)
    }

    #[test]
    fn test_next_returns_empty_without_data() {
        let (_tx, port) = input_port("in", 4);
        assert!(port.next().is_empty());
    }

    #[test]
    fn test_next_drains_fifo_then_empty() {
        let (tx, port) = input_port("in", 8);
        for i in 0..3u8 {
            tx.send(Frame::new(Duration::from_millis(i as u64), vec![i]))
                .unwrap();
        }

        for i in 0..3u8 {
            match port.next() {
                NextFrame::Ready(frame) => assert_eq!(frame.payload(), &[i]),
                NextFrame::Empty => panic!("expected frame {}", i),
            }
        }
        assert!(port.next().is_empty());
    }

    #[test]
    fn test_next_on_disconnected_feed_is_empty() {
        let (tx, port) = input_port("in", 4);
        drop(tx);
        // Disconnect reads as Empty, not as an error or panic.
        assert!(port.next().is_empty());
    }

    #[test]
    fn test_submit_to_closed_sink_is_backpressure() {
        let (port, rx) = output_port("out", 4);
        drop(rx);
        let err = port.submit(Frame::new(Duration::ZERO, vec![1])).unwrap_err();
        assert!(matches!(err, Error::Backpressure { .. }));
    }

    #[test]
    fn test_submit_to_full_sink_is_backpressure() {
        let (port, _rx) = output_port("out", 1);
        port.submit(Frame::new(Duration::ZERO, vec![1])).unwrap();
        let err = port.submit(Frame::new(Duration::ZERO, vec![2])).unwrap_err();
        assert!(matches!(err, Error::Backpressure { port } if port == "out"));
    }

    #[test]
    fn test_metadata_size_requires_two_entries() {
        let (port, _rx) = output_port("out", 1);
        let err = port
            .set_metadata_value_size("size", &[800, 600, 3])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMetadata { .. }));

        port.set_metadata_value_size("size", &[800, 600]).unwrap();
        assert_eq!(
            port.metadata().get("size"),
            Some(MetadataValue::Size {
                width: 800,
                height: 600
            })
        );
    }

    #[test]
    fn test_port_lookup_by_name() {
        let (_tx, input) = input_port("video-in", 4);
        let (output, _rx) = output_port("video-out", 4);
        let ports = NodePorts::new(vec![input], vec![output]);

        assert!(ports.input("video-in").is_ok());
        assert!(ports.output("video-out").is_ok());

        let err = ports.input("nope").unwrap_err();
        assert!(matches!(
            err,
            Error::PortNotFound {
                direction: PortDirection::Input,
                ..
            }
        ));
        let err = ports.output("video-in").unwrap_err();
        assert!(matches!(
            err,
            Error::PortNotFound {
                direction: PortDirection::Output,
                ..
            }
        ));
    }
}
