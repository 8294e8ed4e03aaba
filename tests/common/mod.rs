//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use framelink::Frame;
use std::sync::Once;
use std::time::Duration;

static TRACING: Once = Once::new();

/// Initialize tracing output for a test binary (respects RUST_LOG).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A frame whose payload and timestamp encode its sequence tag.
pub fn tagged_frame(tag: u8) -> Frame {
    Frame::new(Duration::from_millis(tag as u64), vec![tag])
}

/// `n` tagged frames in sequence order.
pub fn tagged_frames(n: u8) -> Vec<Frame> {
    (0..n).map(tagged_frame).collect()
}

/// Extract the sequence tags from drained frames.
pub fn tags(frames: &[Frame]) -> Vec<u8> {
    frames.iter().map(|f| f.payload()[0]).collect()
}
