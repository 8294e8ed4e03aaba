//! Property test: frames enqueued between two gate releases drain in
//! exactly their submission order, then the port reads Empty.

mod common;

use framelink::{CountingSinkNode, Frame, NodeBuilder, OutputPorts, Result, StreamNode};
use proptest::prelude::*;
use std::time::Duration;

/// Sink that records every payload it receives, in order.
#[derive(Default)]
struct RecordingSink {
    payloads: Vec<Vec<u8>>,
}

impl StreamNode for RecordingSink {
    fn name(&self) -> &str {
        "RecordingSink"
    }

    fn on_frame(&mut self, _input: &str, frame: Frame, _outputs: &mut OutputPorts) -> Result<()> {
        self.payloads.push(frame.payload().to_vec());
        Ok(())
    }
}

proptest! {
    #[test]
    fn drained_sequence_matches_fed_sequence(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..64)
    ) {
        let (mut run, host) = NodeBuilder::new()
            .input_with_capacity("in", 64)
            .build(RecordingSink::default());
        run.setup().unwrap();

        let feeder = host.feeder("in").unwrap();
        for payload in &payloads {
            feeder
                .push(Frame::new(Duration::ZERO, payload.clone()))
                .unwrap();
        }

        if !payloads.is_empty() {
            run.step().unwrap();
        }

        prop_assert_eq!(&run.node().payloads, &payloads);
    }

    #[test]
    fn repeated_releases_never_duplicate_or_reorder(
        batches in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..16), 1..8)
    ) {
        let (mut run, host) = NodeBuilder::new()
            .input_with_capacity("in", 256)
            .build(CountingSinkNode::new());
        run.setup().unwrap();

        let mut fed = 0u64;
        for batch in &batches {
            let feeder = host.feeder("in").unwrap();
            for &tag in batch {
                feeder.push(Frame::new(Duration::ZERO, vec![tag])).unwrap();
                fed += 1;
            }
            // One release per batch drains everything buffered so far.
            run.step().unwrap();
            prop_assert_eq!(run.frames_in(), fed);
        }

        prop_assert_eq!(run.node().total(), fed);
    }
}
