//! Channel tunables.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use ws_channel::ChannelOptions;
//!
//! let options = ChannelOptions::new()
//!     .with_poll_timeout(Duration::from_millis(500))
//!     .with_large_message_threshold(1024);
//!
//! options.validate()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::num::NonZeroU32;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default wait per readability poll.
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 5000;

/// Default payload size at or above which a size announcement is sent.
pub const DEFAULT_LARGE_MESSAGE_THRESHOLD: usize = 64 * 1024;

/// Environment variable holding the artificial base delay in milliseconds.
pub const DELAY_ENV: &str = "WS_CHANNEL_DELAY_MS";

/// Environment variable holding the artificial jitter in milliseconds.
pub const JITTER_ENV: &str = "WS_CHANNEL_JITTER_MS";

// ============================================================================
// DelayOptions
// ============================================================================

/// Artificial per-call delay for fault-injection testing.
///
/// Every send and receive sleeps for `base_ms` plus a random amount below
/// `jitter_ms` before touching the transport. Both default to zero, which
/// disables the delay entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelayOptions {
    /// Fixed delay in milliseconds.
    pub base_ms: u64,
    /// Upper bound (exclusive) of the random extra delay in milliseconds.
    pub jitter_ms: u64,
}

impl DelayOptions {
    /// Creates delay options.
    #[inline]
    #[must_use]
    pub const fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }

    /// Reads delay options from [`DELAY_ENV`] and [`JITTER_ENV`].
    ///
    /// Unset variables count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set but not a number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads delay options through an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse = |key: &str| -> Result<u64> {
            match lookup(key) {
                None => Ok(0),
                Some(value) => value.trim().parse().map_err(|e| {
                    Error::config(format!("{key} must be a number of milliseconds: {e}"))
                }),
            }
        };

        Ok(Self {
            base_ms: parse(DELAY_ENV)?,
            jitter_ms: parse(JITTER_ENV)?,
        })
    }

    /// Returns `true` if no delay is configured.
    #[inline]
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.base_ms == 0 && self.jitter_ms == 0
    }

    /// Draws the delay for one call.
    #[must_use]
    pub fn sample(&self) -> Duration {
        let jitter = if self.jitter_ms > 0 {
            rand::rng().random_range(0..self.jitter_ms)
        } else {
            0
        };

        Duration::from_millis(self.base_ms.saturating_add(jitter))
    }
}

// ============================================================================
// ChannelOptions
// ============================================================================

/// Frame channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelOptions {
    /// Wait per readability poll, in milliseconds.
    pub poll_timeout_ms: u64,

    /// Payload size at or above which a size announcement precedes the frame.
    pub large_message_threshold: usize,

    /// Consecutive empty polls after which a receive gives up.
    ///
    /// `None` waits indefinitely.
    pub max_idle_polls: Option<NonZeroU32>,

    /// Artificial delay applied to every send and receive.
    pub delay: DelayOptions,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl ChannelOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            large_message_threshold: DEFAULT_LARGE_MESSAGE_THRESHOLD,
            max_idle_polls: None,
            delay: DelayOptions::new(0, 0),
        }
    }

    /// Parses options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the document is malformed
    /// - [`Error::Config`] if the values fail validation
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChannelOptions {
    /// Sets the wait per readability poll.
    #[inline]
    #[must_use]
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the large-message threshold in bytes.
    #[inline]
    #[must_use]
    pub fn with_large_message_threshold(mut self, threshold: usize) -> Self {
        self.large_message_threshold = threshold;
        self
    }

    /// Limits receives to `attempts` consecutive empty polls.
    #[inline]
    #[must_use]
    pub fn with_max_idle_polls(mut self, attempts: NonZeroU32) -> Self {
        self.max_idle_polls = Some(attempts);
        self
    }

    /// Sets the artificial delay.
    #[inline]
    #[must_use]
    pub fn with_delay(mut self, delay: DelayOptions) -> Self {
        self.delay = delay;
        self
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl ChannelOptions {
    /// Returns the wait per readability poll.
    #[inline]
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the poll timeout or threshold is zero.
    pub fn validate(&self) -> Result<()> {
        if self.poll_timeout_ms == 0 {
            return Err(Error::config("Poll timeout must be greater than zero"));
        }
        if self.large_message_threshold == 0 {
            return Err(Error::config(
                "Large message threshold must be greater than zero",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default() {
        let options = ChannelOptions::new();
        assert_eq!(options.poll_timeout(), Duration::from_secs(5));
        assert_eq!(options.large_message_threshold, 64 * 1024);
        assert!(options.max_idle_polls.is_none());
        assert!(options.delay.is_disabled());
        assert_eq!(options, ChannelOptions::default());
    }

    #[test]
    fn test_builder_chain() {
        let options = ChannelOptions::new()
            .with_poll_timeout(Duration::from_millis(250))
            .with_large_message_threshold(1024)
            .with_max_idle_polls(NonZeroU32::new(3).expect("non-zero"))
            .with_delay(DelayOptions::new(5, 10));

        assert_eq!(options.poll_timeout_ms, 250);
        assert_eq!(options.large_message_threshold, 1024);
        assert_eq!(options.max_idle_polls.map(NonZeroU32::get), Some(3));
        assert_eq!(options.delay, DelayOptions::new(5, 10));
    }

    #[test]
    fn test_validate_zero_poll_timeout() {
        let options = ChannelOptions::new().with_poll_timeout(Duration::ZERO);
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_validate_zero_threshold() {
        let options = ChannelOptions::new().with_large_message_threshold(0);
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            ChannelOptions::from_json(r#"{"largeMessageThreshold": 1024, "delay": {"baseMs": 7}}"#)
                .expect("valid options");

        assert_eq!(options.large_message_threshold, 1024);
        assert_eq!(options.poll_timeout_ms, DEFAULT_POLL_TIMEOUT_MS);
        assert_eq!(options.delay, DelayOptions::new(7, 0));
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            ChannelOptions::from_json(r#"{"pollTimeoutMs": 0}"#),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            ChannelOptions::from_json("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_delay_from_lookup() {
        let delay = DelayOptions::from_lookup(|key| match key {
            DELAY_ENV => Some("20".to_string()),
            JITTER_ENV => Some(" 5 ".to_string()),
            _ => None,
        })
        .expect("valid delay");

        assert_eq!(delay, DelayOptions::new(20, 5));
    }

    #[test]
    fn test_delay_from_lookup_unset_is_disabled() {
        let delay = DelayOptions::from_lookup(|_| None).expect("valid delay");
        assert!(delay.is_disabled());
    }

    #[test]
    fn test_delay_from_lookup_invalid() {
        let result = DelayOptions::from_lookup(|key| (key == DELAY_ENV).then(|| "soon".to_string()));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_delay_sample_within_bounds() {
        let delay = DelayOptions::new(10, 5);
        for _ in 0..100 {
            let sampled = delay.sample();
            assert!(sampled >= Duration::from_millis(10));
            assert!(sampled < Duration::from_millis(15));
        }
    }

    #[test]
    fn test_delay_sample_without_jitter() {
        assert_eq!(DelayOptions::new(3, 0).sample(), Duration::from_millis(3));
        assert_eq!(DelayOptions::default().sample(), Duration::ZERO);
    }
}
