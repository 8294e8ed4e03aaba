//! Benchmarks for the port feed/drain hot path
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use framelink::{Frame, NodeBuilder, OutputPorts, PassThroughNode, Result, StreamNode};
use std::time::Duration;

/// Sink that discards frames as fast as possible.
struct NullSink;

impl StreamNode for NullSink {
    fn name(&self) -> &str {
        "NullSink"
    }

    fn on_frame(&mut self, _input: &str, frame: Frame, _outputs: &mut OutputPorts) -> Result<()> {
        black_box(frame.len());
        Ok(())
    }
}

fn bench_feed_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_drain");

    for &frame_bytes in &[64usize, 4096, 65536] {
        group.throughput(Throughput::Bytes(frame_bytes as u64 * 128));
        group.bench_with_input(
            BenchmarkId::from_parameter(frame_bytes),
            &frame_bytes,
            |b, &frame_bytes| {
                let (mut run, host) = NodeBuilder::new()
                    .input_with_capacity("in", 256)
                    .build(NullSink);
                run.setup().unwrap();
                let payload = vec![0u8; frame_bytes];

                b.iter(|| {
                    let feeder = host.feeder("in").unwrap();
                    for _ in 0..128 {
                        feeder
                            .push(Frame::new(Duration::ZERO, payload.clone()))
                            .unwrap();
                    }
                    run.step().unwrap();
                });
            },
        );
    }
    group.finish();
}

fn bench_passthrough_forward(c: &mut Criterion) {
    c.bench_function("passthrough_forward_128", |b| {
        let (mut run, host) = NodeBuilder::new()
            .input_with_capacity("in", 256)
            .output_with_capacity("out", 256)
            .build(PassThroughNode::new("in", "out"));
        run.setup().unwrap();
        let payload = vec![0u8; 1024];

        b.iter(|| {
            let feeder = host.feeder("in").unwrap();
            for _ in 0..128 {
                feeder
                    .push(Frame::new(Duration::ZERO, payload.clone()))
                    .unwrap();
            }
            run.step().unwrap();
            black_box(host.tap("out").unwrap().drain().len());
        });
    });
}

criterion_group!(benches, bench_feed_drain, bench_passthrough_forward);
criterion_main!(benches);
