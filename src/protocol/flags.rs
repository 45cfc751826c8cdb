//! Frame opcode and flag bit layout.
//!
//! Flags use the same single-byte layout as the first byte of a WebSocket
//! frame header: the high bit marks the final fragment and the low nibble
//! carries the opcode.
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! ┌───┬───┬───┬───┬───────────────┐
//! │FIN│RSV│RSV│RSV│    opcode     │
//! └───┴───┴───┴───┴───────────────┘
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

// ============================================================================
// OpCode
// ============================================================================

/// Semantic tag of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Continuation of a fragmented message.
    Continuation = 0x0,
    /// UTF-8 text payload.
    Text = 0x1,
    /// Binary payload.
    Binary = 0x2,
    /// Connection close.
    Close = 0x8,
    /// Liveness probe.
    Ping = 0x9,
    /// Liveness probe answer.
    Pong = 0xA,
}

impl OpCode {
    /// Parses an opcode from the low nibble of a flags byte.
    ///
    /// Returns `None` for reserved opcodes.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & FrameFlags::OP_BITMASK {
            0x0 => Some(Self::Continuation),
            0x1 => Some(Self::Text),
            0x2 => Some(Self::Binary),
            0x8 => Some(Self::Close),
            0x9 => Some(Self::Ping),
            0xA => Some(Self::Pong),
            _ => None,
        }
    }

    /// Returns the opcode name as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Continuation => "CONT",
            Self::Text => "TEXT",
            Self::Binary => "BINARY",
            Self::Close => "CLOSE",
            Self::Ping => "PING",
            Self::Pong => "PONG",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FrameFlags
// ============================================================================

/// Opcode plus FIN bit of a single frame.
///
/// The common combinations are available as constants; they all carry the
/// FIN bit since this layer never fragments on its own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameFlags(u8);

impl FrameFlags {
    /// Final fragment bit.
    pub const FIN: u8 = 0x80;

    /// Mask selecting the opcode nibble.
    pub const OP_BITMASK: u8 = 0x0F;

    /// Final TEXT frame. Default flags for sending.
    pub const TEXT: Self = Self(Self::FIN | OpCode::Text as u8);

    /// Final BINARY frame.
    pub const BINARY: Self = Self(Self::FIN | OpCode::Binary as u8);

    /// Final CLOSE frame.
    pub const CLOSE: Self = Self(Self::FIN | OpCode::Close as u8);

    /// Final PING frame.
    pub const PING: Self = Self(Self::FIN | OpCode::Ping as u8);

    /// Final PONG frame.
    pub const PONG: Self = Self(Self::FIN | OpCode::Pong as u8);

    /// Creates flags from an opcode and the final-fragment marker.
    #[inline]
    #[must_use]
    pub const fn new(opcode: OpCode, fin: bool) -> Self {
        if fin {
            Self(Self::FIN | opcode as u8)
        } else {
            Self(opcode as u8)
        }
    }

    /// Wraps a raw flags byte as reported by a transport.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Returns the raw flags byte.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns the opcode, or `None` if it is reserved.
    #[inline]
    #[must_use]
    pub const fn opcode(self) -> Option<OpCode> {
        OpCode::from_bits(self.0)
    }

    /// Returns `true` if the opcode nibble equals `opcode`.
    #[inline]
    #[must_use]
    pub const fn is(self, opcode: OpCode) -> bool {
        self.0 & Self::OP_BITMASK == opcode as u8
    }

    /// Returns `true` if the FIN bit is set.
    #[inline]
    #[must_use]
    pub const fn is_final(self) -> bool {
        self.0 & Self::FIN != 0
    }
}

impl Default for FrameFlags {
    fn default() -> Self {
        Self::TEXT
    }
}

impl From<OpCode> for FrameFlags {
    fn from(opcode: OpCode) -> Self {
        Self::new(opcode, true)
    }
}

impl BitOr<OpCode> for u8 {
    type Output = FrameFlags;

    fn bitor(self, opcode: OpCode) -> FrameFlags {
        FrameFlags(self | opcode as u8)
    }
}

impl fmt::Display for FrameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final() {
            f.write_str("FIN ")?;
        }
        match self.opcode() {
            Some(opcode) => write!(f, "{opcode}"),
            None => write!(f, "OP({:#x})", self.0 & Self::OP_BITMASK),
        }
    }
}

impl fmt::Debug for FrameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameFlags({self} = {:#04x})", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_final_text() {
        let flags = FrameFlags::default();
        assert_eq!(flags, FrameFlags::TEXT);
        assert!(flags.is_final());
        assert_eq!(flags.opcode(), Some(OpCode::Text));
    }

    #[test]
    fn test_bit_layout() {
        assert_eq!(FrameFlags::TEXT.bits(), 0x81);
        assert_eq!(FrameFlags::BINARY.bits(), 0x82);
        assert_eq!(FrameFlags::CLOSE.bits(), 0x88);
        assert_eq!(FrameFlags::PING.bits(), 0x89);
        assert_eq!(FrameFlags::PONG.bits(), 0x8A);
    }

    #[test]
    fn test_fin_or_opcode() {
        assert_eq!(FrameFlags::FIN | OpCode::Pong, FrameFlags::PONG);
    }

    #[test]
    fn test_non_final_continuation() {
        let flags = FrameFlags::new(OpCode::Continuation, false);
        assert!(!flags.is_final());
        assert!(flags.is(OpCode::Continuation));
        assert_eq!(flags.to_string(), "CONT");
    }

    #[test]
    fn test_reserved_opcode() {
        let flags = FrameFlags::from_bits(0x83);
        assert_eq!(flags.opcode(), None);
        assert_eq!(flags.to_string(), "FIN OP(0x3)");
    }

    #[test]
    fn test_is_ignores_fin_bit() {
        assert!(FrameFlags::from_bits(0x09).is(OpCode::Ping));
        assert!(FrameFlags::PING.is(OpCode::Ping));
        assert!(!FrameFlags::PONG.is(OpCode::Ping));
    }

    #[test]
    fn test_display() {
        assert_eq!(FrameFlags::PING.to_string(), "FIN PING");
        assert_eq!(FrameFlags::BINARY.to_string(), "FIN BINARY");
    }
}
