//! Error handling for framelink.
//!
//! This module defines the crate error type and a Result alias used
//! throughout the node-host contract. Cancellation is deliberately not
//! represented here: it is a control signal ([`WaitResult::Cancelled`]),
//! not a failure.
//!
//! [`WaitResult::Cancelled`]: crate::gate::WaitResult::Cancelled

use crate::port::PortDirection;
use thiserror::Error;

/// Main error type for framelink operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No port with this name and direction was configured for the run.
    /// Fatal at setup: the node cannot function without its declared ports.
    #[error("No {direction} port named '{name}' configured for this run")]
    PortNotFound {
        name: String,
        direction: PortDirection,
    },

    /// Metadata write attempted after the run left Setup. Logic error.
    #[error("Metadata on port '{port}' is sealed; cannot set '{key}' after streaming started")]
    MetadataSealed { port: String, key: String },

    /// Malformed metadata value (e.g. a size list without exactly two entries).
    #[error("Invalid metadata value for '{key}': {message}")]
    InvalidMetadata { key: String, message: String },

    /// The output sink is closed or over capacity. Recoverable per frame;
    /// the node decides whether to drop the frame or abort the run.
    #[error("Backpressure on output port '{port}'")]
    Backpressure { port: String },

    /// Host-side feed overflow: the input queue for this port is full.
    #[error("Input queue for port '{port}' is full")]
    QueueFull { port: String },

    /// Node-specific setup failure.
    #[error("Setup error: {0}")]
    Setup(String),

    /// Errors related to run configuration loading/parsing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for framelink operations.
pub type Result<T> = std::result::Result<T, Error>;
