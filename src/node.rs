//! Node logic hooks.
//!
//! A `StreamNode` holds the domain logic of a processing node; the run
//! machinery in [`run`](crate::run) owns the lifecycle and calls these
//! hooks at the right points. Nodes never see the wait gate directly.

use crate::error::Result;
use crate::frame::Frame;
use crate::port::{NodePorts, OutputPorts};

/// Trait for node logic driven by a [`NodeRun`](crate::run::NodeRun).
pub trait StreamNode: Send {
    /// Human-readable name of this node, used in logs.
    fn name(&self) -> &str;

    /// Called once while the run is still in Setup. Resolve ports and
    /// write output metadata here; an error aborts the run before any
    /// frame flows.
    fn on_start(&mut self, _ports: &mut NodePorts) -> Result<()> {
        Ok(())
    }

    /// Called for every drained frame. `input` names the port the frame
    /// arrived on.
    ///
    /// Per-frame failures are node-local policy: handling a
    /// [`Backpressure`](crate::error::Error::Backpressure) from a
    /// `submit` call and returning `Ok` keeps the run alive, while
    /// returning `Err` escalates to the host and terminates the run.
    fn on_frame(&mut self, input: &str, frame: Frame, outputs: &mut OutputPorts) -> Result<()>;

    /// Called once when cancellation has been observed, before the run
    /// terminates. Finalize in-flight output here. The host sink may
    /// already be gone, so submit failures must be tolerated.
    fn on_stop(&mut self, _outputs: &mut OutputPorts) {}
}
