//! PassThroughNode — forwards frames from one input to one output.
//!
//! The simplest useful node: it declares optional stream metadata during
//! setup, then moves every incoming frame downstream. Backpressure on the
//! output is treated as a per-frame loss — the frame is dropped, counted,
//! and draining continues.

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::node::StreamNode;
use crate::port::{NodePorts, OutputPorts};

/// Forwarding node with optional metadata declaration.
pub struct PassThroughNode {
    input: String,
    output: String,
    framerate: Option<i64>,
    frame_size: Option<(u32, u32)>,
    forwarded: u64,
    dropped: u64,
}

impl PassThroughNode {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            framerate: None,
            frame_size: None,
            forwarded: 0,
            dropped: 0,
        }
    }

    /// Declare the stream's frame rate to the host.
    pub fn with_framerate(mut self, fps: i64) -> Self {
        self.framerate = Some(fps);
        self
    }

    /// Declare the stream's frame dimensions to the host.
    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some((width, height));
        self
    }

    /// Frames forwarded downstream so far.
    pub fn forwarded(&self) -> u64 {
        self.forwarded
    }

    /// Frames lost to output backpressure so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl StreamNode for PassThroughNode {
    fn name(&self) -> &str {
        "PassThrough"
    }

    fn on_start(&mut self, ports: &mut NodePorts) -> Result<()> {
        // Fail fast if either declared port is missing.
        ports.input(&self.input)?;
        let out = ports.output(&self.output)?;

        if let Some(fps) = self.framerate {
            out.set_metadata_value("framerate", fps)?;
        }
        if let Some((width, height)) = self.frame_size {
            out.set_metadata_value_size("size", &[width, height])?;
        }
        Ok(())
    }

    fn on_frame(&mut self, input: &str, frame: Frame, outputs: &mut OutputPorts) -> Result<()> {
        if input != self.input {
            return Ok(());
        }
        match outputs.get(&self.output)?.submit(frame) {
            Ok(()) => self.forwarded += 1,
            Err(Error::Backpressure { port }) => {
                self.dropped += 1;
                tracing::warn!("dropped frame: backpressure on '{}'", port);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn on_stop(&mut self, _outputs: &mut OutputPorts) {
        tracing::debug!(
            "pass-through done: {} forwarded, {} dropped",
            self.forwarded,
            self.dropped
        );
    }
}
