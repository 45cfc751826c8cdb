//! Raw frame transport.
//!
//! A transport is an already-established, message-oriented connection
//! (typically a WebSocket) that moves whole frames. The frame channel owns
//! exactly one transport and serializes access to it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   send_frame    ┌──────────────┐   send_raw      ┌──────────┐
//! │   callers    │────────────────►│ FrameChannel │────────────────►│          │
//! │ (many tasks) │◄────────────────│  read lock   │◄────────────────│Transport │
//! └──────────────┘  receive_frame  │  write lock  │ poll/receive_raw│          │
//!                                  └──────────────┘                 └──────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `memory` | In-process duplex transport with fault injection |

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{FrameFlags, ReceivedFrame};

// ============================================================================
// Submodules
// ============================================================================

/// In-process duplex transport.
pub mod memory;

// ============================================================================
// Re-exports
// ============================================================================

pub use memory::MemoryTransport;

// ============================================================================
// Transport
// ============================================================================

/// Connection handle consumed by the frame channel.
///
/// Implementations take `&self` so that a reader and a writer can use the
/// connection at the same time, in the same way `&TcpStream` implements both
/// `Read` and `Write`. They do not need to serialize concurrent receives or
/// concurrent sends among themselves; the channel guarantees at most one of
/// each is in flight.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Waits up to `timeout` for the connection to become readable.
    ///
    /// Returns `Ok(true)` when a frame is pending or the connection was
    /// closed (so the following receive observes the close), and `Ok(false)`
    /// when the timeout elapsed with nothing to read.
    async fn poll_readable(&self, timeout: Duration) -> Result<bool>;

    /// Reads one frame into `buf`.
    ///
    /// Returns `Ok(None)` if no complete frame was available even though the
    /// connection polled readable.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`](crate::Error::ConnectionClosed) once the
    ///   connection is closed
    /// - [`Error::BufferTooSmall`](crate::Error::BufferTooSmall) if the frame
    ///   does not fit in `buf`
    async fn receive_raw(&self, buf: &mut [u8]) -> Result<Option<ReceivedFrame>>;

    /// Sends `buf` as a single frame with the given flags.
    ///
    /// Returns the number of payload bytes actually written, which may be
    /// less than `buf.len()`.
    async fn send_raw(&self, buf: &[u8], flags: FrameFlags) -> Result<usize>;
}
