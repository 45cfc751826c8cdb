//! Per-channel traffic counters.

// ============================================================================
// Imports
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// ChannelStats
// ============================================================================

/// Snapshot of a channel's traffic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Application frames handed to the transport.
    pub frames_sent: u64,
    /// Frames delivered to callers.
    pub frames_delivered: u64,
    /// Size announcements sent ahead of large payloads.
    pub announcements_sent: u64,
    /// PINGs answered with a PONG.
    pub pings_answered: u64,
    /// Inbound PONGs discarded.
    pub pongs_absorbed: u64,
    /// Sends the transport completed only partially.
    pub partial_writes: u64,
}

// ============================================================================
// StatsCounters
// ============================================================================

/// Lock-free counters behind [`ChannelStats`].
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    frames_sent: AtomicU64,
    frames_delivered: AtomicU64,
    announcements_sent: AtomicU64,
    pings_answered: AtomicU64,
    pongs_absorbed: AtomicU64,
    partial_writes: AtomicU64,
}

impl StatsCounters {
    #[inline]
    pub(crate) fn frame_sent(&self) {
        self.frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn frame_delivered(&self) {
        self.frames_delivered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn announcement_sent(&self) {
        self.announcements_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn ping_answered(&self) {
        self.pings_answered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn pong_absorbed(&self) {
        self.pongs_absorbed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn partial_write(&self) {
        self.partial_writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters.
    pub(crate) fn snapshot(&self) -> ChannelStats {
        ChannelStats {
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            frames_delivered: self.frames_delivered.load(Ordering::Relaxed),
            announcements_sent: self.announcements_sent.load(Ordering::Relaxed),
            pings_answered: self.pings_answered.load(Ordering::Relaxed),
            pongs_absorbed: self.pongs_absorbed.load(Ordering::Relaxed),
            partial_writes: self.partial_writes.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let counters = StatsCounters::default();
        counters.frame_sent();
        counters.frame_sent();
        counters.announcement_sent();
        counters.ping_answered();
        counters.pong_absorbed();
        counters.partial_write();
        counters.frame_delivered();

        assert_eq!(
            counters.snapshot(),
            ChannelStats {
                frames_sent: 2,
                frames_delivered: 1,
                announcements_sent: 1,
                pings_answered: 1,
                pongs_absorbed: 1,
                partial_writes: 1,
            }
        );
    }
}
