//! Builder pattern for channel configuration.
//!
//! Provides a fluent API for configuring and creating [`FrameChannel`]
//! instances.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use ws_channel::{FrameChannel, MemoryTransport};
//!
//! let (local, _peer) = MemoryTransport::pair();
//! let channel = FrameChannel::builder(local)
//!     .poll_timeout(Duration::from_millis(500))
//!     .large_message_threshold(1024)
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::num::NonZeroU32;
use std::time::Duration;

use crate::error::Result;
use crate::transport::Transport;

use super::core::FrameChannel;
use super::options::{ChannelOptions, DelayOptions};

// ============================================================================
// ChannelBuilder
// ============================================================================

/// Builder for configuring a [`FrameChannel`].
///
/// Use [`FrameChannel::builder()`] to create a new builder.
#[derive(Debug)]
pub struct ChannelBuilder<T: Transport> {
    /// Transport the channel will own.
    transport: T,
    /// Options accumulated so far.
    options: ChannelOptions,
}

// ============================================================================
// ChannelBuilder Implementation
// ============================================================================

impl<T: Transport> ChannelBuilder<T> {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            options: ChannelOptions::default(),
        }
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ChannelOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the wait per readability poll.
    #[inline]
    #[must_use]
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_poll_timeout(timeout);
        self
    }

    /// Sets the payload size at or above which a size announcement is sent.
    #[inline]
    #[must_use]
    pub fn large_message_threshold(mut self, threshold: usize) -> Self {
        self.options = self.options.with_large_message_threshold(threshold);
        self
    }

    /// Gives up a receive after `attempts` consecutive empty polls.
    #[inline]
    #[must_use]
    pub fn max_idle_polls(mut self, attempts: NonZeroU32) -> Self {
        self.options = self.options.with_max_idle_polls(attempts);
        self
    }

    /// Sets the artificial per-call delay.
    #[inline]
    #[must_use]
    pub fn delay(mut self, delay: DelayOptions) -> Self {
        self.options = self.options.with_delay(delay);
        self
    }

    /// Builds the channel with validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the poll timeout or
    /// threshold is zero.
    pub fn build(self) -> Result<FrameChannel<T>> {
        FrameChannel::with_options(self.transport, self.options)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;
    use crate::transport::MemoryTransport;

    #[test]
    fn test_build_with_defaults() {
        let (local, _peer) = MemoryTransport::pair();
        let channel = ChannelBuilder::new(local).build().expect("build");
        assert_eq!(channel.options(), &ChannelOptions::default());
    }

    #[test]
    fn test_builder_chain() {
        let (local, _peer) = MemoryTransport::pair();
        let channel = FrameChannel::builder(local)
            .poll_timeout(Duration::from_millis(100))
            .large_message_threshold(2048)
            .max_idle_polls(NonZeroU32::new(4).expect("non-zero"))
            .delay(DelayOptions::new(1, 2))
            .build()
            .expect("build");

        let options = channel.options();
        assert_eq!(options.poll_timeout(), Duration::from_millis(100));
        assert_eq!(options.large_message_threshold, 2048);
        assert_eq!(options.max_idle_polls.map(NonZeroU32::get), Some(4));
        assert_eq!(options.delay, DelayOptions::new(1, 2));
    }

    #[test]
    fn test_options_replaced() {
        let (local, _peer) = MemoryTransport::pair();
        let options = ChannelOptions::new().with_large_message_threshold(10);
        let channel = FrameChannel::builder(local)
            .options(options.clone())
            .build()
            .expect("build");
        assert_eq!(channel.options(), &options);
    }

    #[test]
    fn test_build_rejects_zero_threshold() {
        let (local, _peer) = MemoryTransport::pair();
        let result = FrameChannel::builder(local).large_message_threshold(0).build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_build_rejects_zero_poll_timeout() {
        let (local, _peer) = MemoryTransport::pair();
        let result = FrameChannel::builder(local)
            .poll_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
