//! In-process host side of the contract.
//!
//! The real acquisition host lives in its own process and owns transport,
//! scheduling and storage. This module plays that role for embedding and
//! testing: it holds the far end of every port queue, the cancellation
//! signal, and read access to negotiated metadata.
//!
//! `NodeBuilder` composes a run: each declared input becomes a bounded
//! queue with an [`InputFeeder`] on the host side, each declared output a
//! bounded queue with an [`OutputTap`].

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::gate::{GateSignal, WaitGate};
use crate::metadata::{MetadataTable, MetadataValue};
use crate::node::StreamNode;
use crate::port::{InputPort, NodePorts, OutputPort, PortDirection};
use crate::run::NodeRun;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default per-port queue depth, matching the 256-slot stream queues of
/// typical acquisition hosts.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Host-side writer for one input port: enqueue a frame, ring the gate.
#[derive(Debug)]
pub struct InputFeeder {
    name: String,
    queue: Sender<Frame>,
    signal: GateSignal,
}

impl InputFeeder {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue a frame and wake the node's wait gate.
    ///
    /// Fails with [`Error::QueueFull`] when the node has fallen behind by
    /// a whole queue depth; what to do then (drop, pace, abort) is host
    /// policy.
    pub fn push(&self, frame: Frame) -> Result<()> {
        self.queue.try_send(frame).map_err(|_| Error::QueueFull {
            port: self.name.clone(),
        })?;
        self.signal.notify();
        Ok(())
    }
}

/// Host-side reader for one output port.
pub struct OutputTap {
    name: String,
    queue: Option<Receiver<Frame>>,
    meta: Arc<MetadataTable>,
}

impl OutputTap {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pop one forwarded frame, if any.
    pub fn try_next(&self) -> Option<Frame> {
        self.queue.as_ref().and_then(|q| q.try_recv().ok())
    }

    /// Pop everything currently forwarded.
    pub fn drain(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(frame) = self.try_next() {
            frames.push(frame);
        }
        frames
    }

    /// Drop the receiving side. Subsequent node submits on this port fail
    /// with [`Error::Backpressure`] — this is how tests simulate a dead
    /// downstream sink.
    pub fn close(&mut self) {
        self.queue = None;
        tracing::debug!("host closed output tap '{}'", self.name);
    }

    /// Snapshot of the metadata the node negotiated on this port.
    pub fn metadata(&self) -> BTreeMap<String, MetadataValue> {
        self.meta.snapshot()
    }

    /// Whether the run has started streaming and metadata is frozen.
    pub fn metadata_sealed(&self) -> bool {
        self.meta.is_sealed()
    }
}

/// The host's handle on one composed node run.
pub struct HostHandle {
    feeders: Vec<InputFeeder>,
    taps: Vec<OutputTap>,
    signal: GateSignal,
}

impl HostHandle {
    /// Writer for the named input port.
    pub fn feeder(&self, name: &str) -> Result<&InputFeeder> {
        self.feeders
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::PortNotFound {
                name: name.to_string(),
                direction: PortDirection::Input,
            })
    }

    /// Reader for the named output port.
    pub fn tap(&self, name: &str) -> Result<&OutputTap> {
        self.taps
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::PortNotFound {
                name: name.to_string(),
                direction: PortDirection::Output,
            })
    }

    /// Mutable reader access, needed to `close()` a tap.
    pub fn tap_mut(&mut self, name: &str) -> Result<&mut OutputTap> {
        self.taps
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::PortNotFound {
                name: name.to_string(),
                direction: PortDirection::Output,
            })
    }

    /// Latch cancellation. The node observes it at its next wait; already
    /// queued frames are still drained first.
    pub fn cancel(&self) {
        self.signal.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }
}

/// Builder composing a node run and its host handle.
///
/// Port declaration order is the node's drain order, stable for the
/// whole run.
pub struct NodeBuilder {
    inputs: Vec<(String, usize)>,
    outputs: Vec<(String, usize)>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Declare an input port with the default queue capacity.
    pub fn input(self, name: &str) -> Self {
        self.input_with_capacity(name, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn input_with_capacity(mut self, name: &str, capacity: usize) -> Self {
        self.inputs.push((name.to_string(), capacity));
        self
    }

    /// Declare an output port with the default queue capacity.
    pub fn output(self, name: &str) -> Self {
        self.output_with_capacity(name, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn output_with_capacity(mut self, name: &str, capacity: usize) -> Self {
        self.outputs.push((name.to_string(), capacity));
        self
    }

    /// Declare all ports from a [`RunConfig`].
    pub fn from_config(config: &RunConfig) -> Self {
        let mut builder = Self::new();
        for spec in &config.inputs {
            builder = builder.input_with_capacity(&spec.name, spec.capacity);
        }
        for spec in &config.outputs {
            builder = builder.output_with_capacity(&spec.name, spec.capacity);
        }
        builder
    }

    /// Wire up the queues and the gate, producing the node run and the
    /// host's side of every port.
    pub fn build<N: StreamNode>(self, node: N) -> (NodeRun<N>, HostHandle) {
        let (gate, signal) = WaitGate::new();

        let mut input_ports = Vec::with_capacity(self.inputs.len());
        let mut feeders = Vec::with_capacity(self.inputs.len());
        for (name, capacity) in self.inputs {
            let (tx, rx) = bounded(capacity);
            let meta = Arc::new(MetadataTable::new(name.clone()));
            input_ports.push(InputPort::new(name.clone(), rx, meta));
            feeders.push(InputFeeder {
                name,
                queue: tx,
                signal: signal.clone(),
            });
        }

        let mut output_ports = Vec::with_capacity(self.outputs.len());
        let mut taps = Vec::with_capacity(self.outputs.len());
        for (name, capacity) in self.outputs {
            let (tx, rx) = bounded(capacity);
            let meta = Arc::new(MetadataTable::new(name.clone()));
            output_ports.push(OutputPort::new(name.clone(), tx, Arc::clone(&meta)));
            taps.push(OutputTap {
                name,
                queue: Some(rx),
                meta,
            });
        }

        tracing::debug!(
            "composed node '{}' with {} input(s), {} output(s)",
            node.name(),
            input_ports.len(),
            output_ports.len()
        );

        let run = NodeRun::new(node, NodePorts::new(input_ports, output_ports), gate);
        let handle = HostHandle {
            feeders,
            taps,
            signal,
        };
        (run, handle)
    }
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
