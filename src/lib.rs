//! # framelink: port-based streaming for processing nodes
//!
//! A reusable implementation of the node-side streaming contract of a
//! data-acquisition host: named, directional ports carrying discrete
//! frames; a blocking wait gate with latched cooperative cancellation;
//! a drain loop; and an explicit run lifecycle.
//!
//! ## Architecture
//!
//! ```text
//!  host thread(s)                     node control thread
//!  ─────────────                      ───────────────────
//!  InputFeeder ──► [bounded queue] ──► InputPort.next()
//!                    │ notify                 ▲
//!                    ▼                        │ drain loop
//!             WaitGate ◄──────── await_new_input()
//!                    ▲
//!  OutputTap  ◄── [bounded queue] ◄── OutputPort.submit()
//! ```
//!
//! - **Ports** are the only surface between node and host. Input reads
//!   and output submits never block; the wait gate is the one blocking
//!   point of a run.
//! - **Cancellation** is cooperative and latched: once the gate returns
//!   [`WaitResult::Cancelled`], it always will.
//! - **Node logic** implements [`StreamNode`]; [`NodeRun`] owns the
//!   lifecycle (`Setup → Running → Cancelling → Terminated`) and the
//!   drain policy.
//! - **The host side** ([`NodeBuilder`], [`HostHandle`]) is an in-process
//!   stand-in for a real acquisition host, sufficient for embedding and
//!   tests.
//!
//! ## Example
//!
//! ```ignore
//! use framelink::{Frame, NodeBuilder, PassThroughNode};
//! use std::time::Duration;
//!
//! let node = PassThroughNode::new("video-in", "video-out")
//!     .with_framerate(200)
//!     .with_frame_size(800, 600);
//!
//! let (mut run, host) = NodeBuilder::new()
//!     .input("video-in")
//!     .output("video-out")
//!     .build(node);
//!
//! run.setup()?;
//! let worker = std::thread::spawn(move || run.run());
//!
//! host.feeder("video-in")?
//!     .push(Frame::new(Duration::ZERO, vec![0u8; 64]))?;
//! // ... feed frames, read host.tap("video-out") ...
//! host.cancel();
//! worker.join().unwrap()?;
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod gate;
pub mod host;
pub mod metadata;
pub mod node;
pub mod nodes;
pub mod port;
pub mod run;

// Re-export commonly used types
pub use config::{PortSpec, RunConfig};
pub use error::{Error, Result};
pub use frame::Frame;
pub use gate::{GateSignal, WaitGate, WaitResult};
pub use host::{HostHandle, InputFeeder, NodeBuilder, OutputTap, DEFAULT_QUEUE_CAPACITY};
pub use metadata::{MetadataTable, MetadataValue};
pub use node::StreamNode;
pub use nodes::{CountingSinkNode, PassThroughNode};
pub use port::{InputPort, NextFrame, NodePorts, OutputPort, OutputPorts, PortDirection};
pub use run::{NodeRun, RunState, StepOutcome};
