//! Large-message size announcements on the send path.

// ============================================================================
// Imports
// ============================================================================

use crate::protocol::SizeAnnouncement;

// ============================================================================
// LargeMessageChunker
// ============================================================================

/// Decides whether an outbound payload needs a size announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargeMessageChunker {
    threshold: usize,
}

impl LargeMessageChunker {
    /// Creates a chunker announcing payloads of at least `threshold` bytes.
    #[inline]
    #[must_use]
    pub const fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Returns the announcement to send before a payload of `len` bytes.
    #[inline]
    #[must_use]
    pub const fn announcement_for(&self, len: usize) -> Option<SizeAnnouncement> {
        if len >= self.threshold {
            Some(SizeAnnouncement::new(len))
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
