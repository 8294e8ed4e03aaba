//! Node run lifecycle — the state machine driving {wait gate → drain loop}.
//!
//! One `NodeRun` spans a whole execution from Setup through Terminated:
//!
//! ```text
//! Setup ──► Running ──► (Cancelling) ──► Terminated
//! ```
//!
//! Each `step()` blocks on the wait gate, then drains every input port
//! until momentarily empty. Draining everything that is buffered bounds
//! per-frame latency to one scheduling quantum.

use crate::error::Result;
use crate::gate::{WaitGate, WaitResult};
use crate::node::StreamNode;
use crate::port::{NextFrame, NodePorts};

/// Lifecycle state of a node run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Ports resolved, metadata being written. No frame has flowed yet.
    Setup,
    /// Steady state: repeated {wait → drain} iterations.
    Running,
    /// Cancellation observed; finalizing in-flight output.
    Cancelling,
    /// Terminal. No further port operations are valid.
    Terminated,
}

/// Continuation signal returned by [`NodeRun::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Invoke `step()` again when convenient.
    Continue,
    /// The run is over; the body must not be invoked again.
    Stop,
}

/// One execution of a processing node, from Setup through Terminated.
///
/// Built by [`NodeBuilder`](crate::host::NodeBuilder), which also hands
/// the host its side of every queue.
pub struct NodeRun<N: StreamNode> {
    node: N,
    ports: NodePorts,
    gate: WaitGate,
    state: RunState,
    frames_in: u64,
}

impl<N: StreamNode> NodeRun<N> {
    pub(crate) fn new(node: N, ports: NodePorts, gate: WaitGate) -> Self {
        Self {
            node,
            ports,
            gate,
            state: RunState::Setup,
            frames_in: 0,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Total frames drained so far in this run.
    pub fn frames_in(&self) -> u64 {
        self.frames_in
    }

    /// Borrow the node logic, e.g. to read counters after the run.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Resolve ports and negotiate metadata. Must be called once, before
    /// the first `step()`. A failure terminates the run before Running is
    /// ever entered.
    pub fn setup(&mut self) -> Result<()> {
        debug_assert_eq!(self.state, RunState::Setup, "setup() called twice");
        if let Err(e) = self.node.on_start(&mut self.ports) {
            tracing::warn!("node '{}' setup failed: {}", self.node.name(), e);
            self.state = RunState::Terminated;
            return Err(e);
        }
        Ok(())
    }

    /// One loop iteration: block on the wait gate, then drain.
    ///
    /// Returns `Stop` once the run has terminated; calling `step()` again
    /// afterwards is a no-op that returns `Stop` without touching ports.
    pub fn step(&mut self) -> Result<StepOutcome> {
        match self.state {
            RunState::Terminated | RunState::Cancelling => return Ok(StepOutcome::Stop),
            RunState::Setup => {
                // First invocation: metadata freezes the moment streaming
                // can begin.
                self.ports.seal_metadata();
                self.state = RunState::Running;
                tracing::debug!("node '{}' entering Running", self.node.name());
            }
            RunState::Running => {}
        }

        match self.gate.await_new_input() {
            WaitResult::Cancelled => {
                self.state = RunState::Cancelling;
                self.node.on_stop(&mut self.ports.outputs);
                self.state = RunState::Terminated;
                tracing::info!(
                    "node '{}' run cancelled after {} frames",
                    self.node.name(),
                    self.frames_in
                );
                Ok(StepOutcome::Stop)
            }
            WaitResult::NewDataAvailable => {
                self.drain()?;
                Ok(StepOutcome::Continue)
            }
        }
    }

    /// Host entry point: step until the node signals `Stop`.
    ///
    /// The body is never re-invoked after a `Stop`, and an escalated
    /// per-frame error ends the run with that error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if let StepOutcome::Stop = self.step()? {
                return Ok(());
            }
        }
    }

    /// Empty every input port in declaration order. Each port is polled
    /// until momentarily `Empty`; cross-port interleaving by arrival time
    /// is deliberately not attempted.
    fn drain(&mut self) -> Result<()> {
        let NodePorts { inputs, outputs } = &mut self.ports;
        for input in inputs.iter() {
            loop {
                match input.next() {
                    NextFrame::Ready(frame) => {
                        self.frames_in += 1;
                        if let Err(e) = self.node.on_frame(input.name(), frame, outputs) {
                            tracing::warn!(
                                "node '{}' escalated error on port '{}': {}",
                                self.node.name(),
                                input.name(),
                                e
                            );
                            self.state = RunState::Terminated;
                            return Err(e);
                        }
                    }
                    NextFrame::Empty => break,
                }
            }
        }
        Ok(())
    }
}
