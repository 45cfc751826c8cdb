//! Frame channel module.
//!
//! This module provides the thread-safe wrapper callers use instead of the
//! raw transport.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FrameChannel`] | Locked send/receive over one transport |
//! | [`ChannelBuilder`] | Fluent configuration builder |
//! | [`ChannelOptions`] | Poll timeout, threshold, delay |
//! | [`KeepAlive`] | PING/PONG classification |
//! | [`LargeMessageChunker`] | Size announcement policy |
//! | [`ChannelStats`] | Traffic counters |
//!
//! # Example
//!
//! ```ignore
//! use ws_channel::{FrameChannel, MemoryTransport, Result};
//!
//! # async fn example() -> Result<()> {
//! let (local, peer) = MemoryTransport::pair();
//! let channel = FrameChannel::builder(local)
//!     .large_message_threshold(1024)
//!     .build()?;
//!
//! channel.send_text(b"hello").await?;
//!
//! let mut buf = vec![0u8; 64 * 1024];
//! let frame = channel.receive_frame(&mut buf).await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for channel configuration.
pub mod builder;

/// Large-message announcement policy.
pub mod chunker;

/// Core channel implementation.
pub mod core;

/// PING/PONG handling.
pub mod keepalive;

/// Channel tunables.
pub mod options;

/// Traffic counters.
pub mod stats;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ChannelBuilder;
pub use chunker::LargeMessageChunker;
pub use self::core::FrameChannel;
pub use keepalive::KeepAlive;
pub use options::{ChannelOptions, DelayOptions};
pub use stats::ChannelStats;
