//! Keep-alive and large-message walkthrough over an in-memory link.
//!
//! Demonstrates:
//! - A peer PING answered transparently while the caller waits for data
//! - A large payload preceded by its size announcement
//! - Several tasks sending on one channel concurrently
//!
//! Usage:
//!   cargo run --example keepalive
//!   cargo run --example keepalive -- --debug

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use ws_channel::protocol::abbreviated_frame_dump;
use ws_channel::{Frame, FrameChannel, MemoryTransport, OpCode, Result, SizeAnnouncement};

// ============================================================================
// Constants
// ============================================================================

const THRESHOLD: usize = 1024;
const WAIT: Duration = Duration::from_secs(1);

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let debug = std::env::args().any(|a| a == "--debug");
    init_logging(debug);

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let (local, peer) = MemoryTransport::pair();
    let channel = Arc::new(
        FrameChannel::builder(local)
            .poll_timeout(Duration::from_millis(250))
            .large_message_threshold(THRESHOLD)
            .build()?,
    );

    // Keep-alive: the PING never reaches the caller.
    peer.send(Frame::ping("hi")).await?;
    peer.send(Frame::text("hello from peer")).await?;

    let mut buf = vec![0u8; 4 * THRESHOLD];
    let frame = channel.receive_frame(&mut buf).await?;
    info!(
        frame = %abbreviated_frame_dump(&buf[..frame.len], frame.flags),
        "Caller received"
    );

    if let Some(pong) = peer.next_frame(WAIT).await? {
        info!(frame = ?pong, "Peer received keep-alive reply");
    }

    // Large message: announcement then payload.
    channel.send_binary(&vec![0xAB; 2000]).await?;

    while let Some(frame) = peer.next_frame(Duration::from_millis(50)).await? {
        if let Some(announcement) = SizeAnnouncement::parse(&frame.payload) {
            info!(size = announcement.size(), "Peer received size announcement");
        } else {
            info!(frame = ?frame, "Peer received payload");
        }
    }

    // Concurrent senders share the channel.
    let tasks: Vec<_> = (0..4u8)
        .map(|id| {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move { channel.send_binary(&vec![id; THRESHOLD + 1]).await })
        })
        .collect();

    for task in tasks {
        task.await
            .map_err(|e| ws_channel::Error::transport(e.to_string()))??;
    }

    let mut announced = 0;
    while let Some(frame) = peer.next_frame(Duration::from_millis(50)).await? {
        if frame.flags.is(OpCode::Text) {
            announced += 1;
        }
    }
    info!(announced, stats = ?channel.stats(), "Concurrent sends complete");

    Ok(())
}

// ============================================================================
// Logging
// ============================================================================

fn init_logging(debug: bool) {
    let filter = if debug {
        "ws_channel=trace,keepalive=info"
    } else {
        "keepalive=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
