//! Error types for the frame channel.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use ws_channel::{Error, Result};
//!
//! async fn forward(channel: &FrameChannel<MemoryTransport>, data: &[u8]) -> Result<()> {
//!     let sent = channel.send_binary(data).await?;
//!     if sent != data.len() {
//!         // partial writes are reported through the count, not an error
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::ConnectionClosed`], [`Error::Transport`], [`Error::NotReady`] |
//! | Framing | [`Error::AnnouncementFailed`], [`Error::KeepAliveReplyFailed`], [`Error::InvalidAnnouncement`], [`Error::BufferTooSmall`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when channel options are invalid or cannot be parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// The underlying transport has been closed.
    ///
    /// Returned by every operation once either side closed the connection.
    #[error("Connection closed")]
    ConnectionClosed,

    /// Transport-specific failure.
    ///
    /// Returned when a [`Transport`](crate::transport::Transport) reports an
    /// error that has no dedicated variant.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// No frame became readable within the configured polling attempts.
    ///
    /// Only returned when an idle-poll limit is configured.
    #[error("No frame available after {attempts} poll attempts")]
    NotReady {
        /// Consecutive empty polls before giving up.
        attempts: u32,
    },

    // ========================================================================
    // Framing Errors
    // ========================================================================
    /// The size announcement preceding a large payload was not fully sent.
    ///
    /// The payload itself is never attempted.
    #[error("Size announcement incomplete: expected {expected} bytes, sent {sent}")]
    AnnouncementFailed {
        /// Length of the announcement text.
        expected: usize,
        /// Bytes the transport reported as sent.
        sent: usize,
    },

    /// The automatic PONG reply to an inbound PING was not fully sent.
    #[error("Keep-alive reply incomplete: expected {expected} bytes, sent {sent}")]
    KeepAliveReplyFailed {
        /// Length of the PING payload being echoed.
        expected: usize,
        /// Bytes the transport reported as sent.
        sent: usize,
    },

    /// Text is not a well-formed `nextmessage: size=<N>` announcement.
    #[error("Invalid size announcement: {message}")]
    InvalidAnnouncement {
        /// Description of the parse failure.
        message: String,
    },

    /// Receive buffer cannot hold the next inbound frame.
    #[error("Receive buffer too small: frame needs {needed} bytes, capacity {capacity}")]
    BufferTooSmall {
        /// Payload length of the pending frame.
        needed: usize,
        /// Capacity of the caller's buffer.
        capacity: usize,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a not-ready error.
    #[inline]
    pub fn not_ready(attempts: u32) -> Self {
        Self::NotReady { attempts }
    }

    /// Creates an announcement failure error.
    #[inline]
    pub fn announcement_failed(expected: usize, sent: usize) -> Self {
        Self::AnnouncementFailed { expected, sent }
    }

    /// Creates a keep-alive reply failure error.
    #[inline]
    pub fn keep_alive_reply_failed(expected: usize, sent: usize) -> Self {
        Self::KeepAliveReplyFailed { expected, sent }
    }

    /// Creates an invalid announcement error.
    #[inline]
    pub fn invalid_announcement(message: impl Into<String>) -> Self {
        Self::InvalidAnnouncement {
            message: message.into(),
        }
    }

    /// Creates a buffer too small error.
    #[inline]
    pub fn buffer_too_small(needed: usize, capacity: usize) -> Self {
        Self::BufferTooSmall { needed, capacity }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::ConnectionClosed | Self::Transport { .. } | Self::Io(_)
        )
    }

    /// Returns `true` if the automatic PONG reply failed.
    #[inline]
    #[must_use]
    pub fn is_keep_alive_failure(&self) -> bool {
        matches!(self, Self::KeepAliveReplyFailed { .. })
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry with the same channel.
    /// A failed announcement is not: the peer already holds a truncated
    /// preamble.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotReady { .. } | Self::BufferTooSmall { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
