//! ws-channel - Thread-safe framing layer for WebSocket-style transports.
//!
//! This library wraps a single message-oriented connection so that many
//! concurrent tasks can send and receive frames on it safely.
//!
//! # Architecture
//!
//! A [`FrameChannel`] owns one [`Transport`] and layers three behaviours on
//! top of it:
//!
//! - **Synchronized access**: independent read and write locks; one receive
//!   and one send may run at the same time, never two of the same kind
//! - **Keep-alive**: inbound PINGs are answered with a matching PONG and
//!   inbound PONGs are dropped, invisibly to callers
//! - **Large-message announcements**: payloads at or above a threshold are
//!   preceded by a `nextmessage: size=<N>` TEXT frame, sent back-to-back
//!   with the payload under the write lock
//!
//! # Quick Start
//!
//! ```no_run
//! use ws_channel::{FrameChannel, MemoryTransport, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (local, _peer) = MemoryTransport::pair();
//!
//!     let channel = FrameChannel::builder(local)
//!         .large_message_threshold(1024)
//!         .build()?;
//!
//!     // Announced as "nextmessage: size=2000", then sent as one frame
//!     channel.send_binary(&[0u8; 2000]).await?;
//!
//!     let mut buf = vec![0u8; 4096];
//!     let frame = channel.receive_frame(&mut buf).await?;
//!     println!("{} bytes, {}", frame.len, frame.flags);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`channel`] | [`FrameChannel`], builder, options, keep-alive, chunker |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`protocol`] | Frame flags, frames, size announcement |
//! | [`transport`] | [`Transport`] trait and [`MemoryTransport`] |

// ============================================================================
// Modules
// ============================================================================

/// Synchronized frame channel.
///
/// - [`FrameChannel`] - Locked send/receive with keep-alive and announcements
/// - [`ChannelBuilder`] - Fluent configuration
/// - [`ChannelOptions`] - Tunables
pub mod channel;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Frame-level protocol types.
pub mod protocol;

/// Raw frame transports.
///
/// Implement [`Transport`] to put a channel on top of a real connection.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Channel types
pub use channel::{
    ChannelBuilder, ChannelOptions, ChannelStats, DelayOptions, FrameChannel, KeepAlive,
    LargeMessageChunker,
};

// Error types
pub use error::{Error, Result};

// Protocol types
pub use protocol::{Frame, FrameFlags, OpCode, ReceivedFrame, SizeAnnouncement};

// Transport types
pub use transport::{MemoryTransport, Transport};
