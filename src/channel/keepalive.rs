//! Keep-alive handling for inbound frames.
//!
//! Every frame read by the channel is classified once:
//!
//! | Inbound opcode | Action | Effect |
//! |----------------|--------|--------|
//! | PING | [`KeepAlive::Reply`] | Echo payload as FIN+PONG, keep polling |
//! | PONG | [`KeepAlive::Absorb`] | Drop silently, keep polling |
//! | anything else | [`KeepAlive::Deliver`] | Return to the caller |
//!
//! The channel never originates PINGs itself, so inbound PONGs are only
//! unsolicited answers and carry no information for callers.

// ============================================================================
// Imports
// ============================================================================

use crate::protocol::{FrameFlags, OpCode};

// ============================================================================
// KeepAlive
// ============================================================================

/// What to do with a frame after it has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepAlive {
    /// Answer with a PONG carrying the same payload, then poll again.
    Reply,
    /// Discard the frame, then poll again.
    Absorb,
    /// Hand the frame to the caller.
    Deliver,
}

impl KeepAlive {
    /// Flags of the automatic PING reply.
    pub const REPLY_FLAGS: FrameFlags = FrameFlags::PONG;

    /// Classifies a frame by its opcode.
    #[inline]
    #[must_use]
    pub const fn classify(flags: FrameFlags) -> Self {
        if flags.is(OpCode::Ping) {
            Self::Reply
        } else if flags.is(OpCode::Pong) {
            Self::Absorb
        } else {
            Self::Deliver
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
    fn test_ping_replies() {
        assert_eq!(KeepAlive::classify(FrameFlags::PING), KeepAlive::Reply);
        assert_eq!(
            KeepAlive::classify(FrameFlags::new(OpCode::Ping, false)),
            KeepAlive::Reply
        );
    }

    #[test]
    fn test_pong_absorbed() {
        assert_eq!(KeepAlive::classify(FrameFlags::PONG), KeepAlive::Absorb);
    }

    #[test]
    fn test_everything_else_delivered() {
        for flags in [
            FrameFlags::TEXT,
            FrameFlags::BINARY,
            FrameFlags::CLOSE,
            FrameFlags::new(OpCode::Continuation, false),
            FrameFlags::from_bits(0x83),
        ] {
            assert_eq!(KeepAlive::classify(flags), KeepAlive::Deliver, "{flags}");
        }
    }

    #[test]
    fn test_reply_flags_are_final_pong() {
        assert!(KeepAlive::REPLY_FLAGS.is_final());
        assert!(KeepAlive::REPLY_FLAGS.is(OpCode::Pong));
    }
}
