//! Size announcement preceding large payloads.
//!
//! Before a payload at or above the large-message threshold is sent, the
//! sender emits a TEXT frame of the form:
//!
//! ```text
//! nextmessage: size=<N>
//! ```
//!
//! where `<N>` is the decimal byte length of the payload frame that follows
//! immediately on the same connection.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::{self, FromStr};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Literal prefix of every size announcement.
pub const ANNOUNCEMENT_PREFIX: &str = "nextmessage: size=";

// ============================================================================
// SizeAnnouncement
// ============================================================================

/// Announcement of the byte length of the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeAnnouncement {
    size: usize,
}

impl SizeAnnouncement {
    /// Creates an announcement for a payload of `size` bytes.
    #[inline]
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Returns the announced payload size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Recognizes an announcement in a received TEXT payload.
    ///
    /// Returns `None` if the payload is anything other than the exact
    /// announcement text.
    #[must_use]
    pub fn parse(payload: &[u8]) -> Option<Self> {
        str::from_utf8(payload).ok()?.parse().ok()
    }
}

impl fmt::Display for SizeAnnouncement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ANNOUNCEMENT_PREFIX}{}", self.size)
    }
}

impl FromStr for SizeAnnouncement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix(ANNOUNCEMENT_PREFIX)
            .ok_or_else(|| Error::invalid_announcement(format!("not a size announcement: {s:?}")))?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_announcement(format!("invalid announced size: {digits:?}")));
        }

        let size = digits
            .parse()
            .map_err(|e| Error::invalid_announcement(format!("invalid announced size {digits:?}: {e}")))?;

        Ok(Self { size })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_display_format() {
        assert_eq!(
            SizeAnnouncement::new(2000).to_string(),
            "nextmessage: size=2000"
        );
    }

    #[test]
    fn test_parse_valid() {
        let parsed = SizeAnnouncement::parse(b"nextmessage: size=1024");
        assert_eq!(parsed, Some(SizeAnnouncement::new(1024)));
    }

    #[test]
    fn test_parse_rejects_other_text() {
        assert!(SizeAnnouncement::parse(b"hello").is_none());
        assert!(SizeAnnouncement::parse(b"nextmessage: size=").is_none());
        assert!(SizeAnnouncement::parse(b"nextmessage: size=12 ").is_none());
        assert!(SizeAnnouncement::parse(b"nextmessage: size=+12").is_none());
        assert!(SizeAnnouncement::parse(&[0xff, 0xfe]).is_none());
    }

    #[test]
    fn test_from_str_errors_are_framing_errors() {
        for text in ["hello", "nextmessage: size=", "nextmessage: size=99999999999999999999999"] {
            let err = text.parse::<SizeAnnouncement>().unwrap_err();
            assert!(matches!(err, Error::InvalidAnnouncement { .. }), "{text}");
            assert!(!err.is_connection_error());
        }
    }

    proptest! {
        #[test]
        fn prop_announcement_text_is_recognized(size in 0usize..=usize::MAX) {
            let text = SizeAnnouncement::new(size).to_string();
            prop_assert!(text.starts_with(ANNOUNCEMENT_PREFIX));
            prop_assert_eq!(SizeAnnouncement::parse(text.as_bytes()).map(|a| a.size()), Some(size));
        }
    }
}
