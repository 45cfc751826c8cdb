//! Contended channel benchmark suite.
//!
//! Benchmarks a single frame channel shared by concurrent senders:
//! - Sender counts: 1, 4, 16
//! - Payload sizes: below and above the large-message threshold
//! - Receive path with interleaved PINGs
//!
//! Run with: cargo bench --bench contention
//! Results saved to: target/criterion/

use std::sync::Arc;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use futures_util::future::join_all;
use tokio::runtime::Runtime;
use ws_channel::{Frame, FrameChannel, MemoryTransport};

// ============================================================================
// Benchmark Parameters
// ============================================================================

const SENDER_COUNTS: &[usize] = &[1, 4, 16];
const PAYLOAD_SIZES: &[usize] = &[64, 4096];
const FRAMES_PER_SENDER: usize = 64;
const THRESHOLD: usize = 1024;

// ============================================================================
// Benchmark: Contended Sends
// ============================================================================

fn bench_contended_send(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("contended_send");
    group.measurement_time(Duration::from_secs(10));

    for &senders in SENDER_COUNTS {
        for &size in PAYLOAD_SIZES {
            let id = format!("{senders}s_{size}b");
            group.bench_with_input(
                BenchmarkId::new("send", &id),
                &(senders, size),
                |b, &(senders, size)| {
                    b.to_async(&rt).iter(|| run_senders(senders, size));
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: Receive With Keep-Alive
// ============================================================================

fn bench_receive_with_pings(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("receive_keepalive");

    for &ping_every in &[0usize, 4, 1] {
        group.bench_with_input(
            BenchmarkId::new("receive", ping_every),
            &ping_every,
            |b, &ping_every| {
                b.to_async(&rt).iter(|| run_receiver(ping_every));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn run_senders(senders: usize, size: usize) {
    let (local, peer) = MemoryTransport::pair();
    let channel = Arc::new(
        FrameChannel::builder(local)
            .large_message_threshold(THRESHOLD)
            .build()
            .unwrap(),
    );

    let tasks: Vec<_> = (0..senders)
        .map(|id| {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move {
                let payload = vec![id as u8; size];
                for _ in 0..FRAMES_PER_SENDER {
                    channel.send_binary(&payload).await.unwrap();
                }
            })
        })
        .collect();

    for result in join_all(tasks).await {
        result.unwrap();
    }

    while peer.try_next_frame().is_some() {}
}

async fn run_receiver(ping_every: usize) {
    let (local, peer) = MemoryTransport::pair();
    let channel = FrameChannel::new(local);

    for i in 0..FRAMES_PER_SENDER {
        if ping_every > 0 && i % ping_every == 0 {
            peer.send(Frame::ping("keepalive")).await.unwrap();
        }
        peer.send(Frame::binary(vec![0u8; 256])).await.unwrap();
    }

    let mut buf = vec![0u8; 1024];
    for _ in 0..FRAMES_PER_SENDER {
        channel.receive_frame(&mut buf).await.unwrap();
    }
}

// ============================================================================
// Criterion Setup
// ============================================================================

criterion_group!(benches, bench_contended_send, bench_receive_with_pings);
criterion_main!(benches);
