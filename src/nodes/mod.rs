//! Built-in node implementations.
//!
//! These cover the common endpoints of a stream: forwarding frames
//! unchanged and terminating a stream while counting it. Anything fancier
//! is expected to implement [`StreamNode`](crate::node::StreamNode)
//! directly.

mod counting_sink;
mod passthrough;

pub use counting_sink::CountingSinkNode;
pub use passthrough::PassThroughNode;
