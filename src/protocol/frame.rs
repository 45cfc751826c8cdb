//! Frame values passed across send and receive calls.

// ============================================================================
// Imports
// ============================================================================

use std::str;

use super::{FrameFlags, OpCode};

// ============================================================================
// ReceivedFrame
// ============================================================================

/// Length and flags of a frame read into a caller-supplied buffer.
///
/// The payload itself lives in the first [`len`](Self::len) bytes of the
/// buffer passed to the receive call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedFrame {
    /// Number of payload bytes written into the buffer.
    pub len: usize,
    /// Opcode and FIN bit of the frame.
    pub flags: FrameFlags,
}

impl ReceivedFrame {
    /// Creates a new received frame descriptor.
    #[inline]
    #[must_use]
    pub const fn new(len: usize, flags: FrameFlags) -> Self {
        Self { len, flags }
    }

    /// Returns the opcode of the frame.
    #[inline]
    #[must_use]
    pub const fn opcode(&self) -> Option<OpCode> {
        self.flags.opcode()
    }
}

// ============================================================================
// Frame
// ============================================================================

/// An owned frame: flags plus payload.
///
/// Used by transports that queue frames and by peers inspecting traffic.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Opcode and FIN bit.
    pub flags: FrameFlags,
    /// Payload bytes.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Creates a frame from flags and payload.
    #[inline]
    #[must_use]
    pub fn new(flags: FrameFlags, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            flags,
            payload: payload.into(),
        }
    }

    /// Creates a final TEXT frame.
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(FrameFlags::TEXT, text.into().into_bytes())
    }

    /// Creates a final BINARY frame.
    #[inline]
    #[must_use]
    pub fn binary(data: impl Into<Vec<u8>>) -> Self {
        Self::new(FrameFlags::BINARY, data)
    }

    /// Creates a final PING frame.
    #[inline]
    #[must_use]
    pub fn ping(data: impl Into<Vec<u8>>) -> Self {
        Self::new(FrameFlags::PING, data)
    }

    /// Creates a final PONG frame.
    #[inline]
    #[must_use]
    pub fn pong(data: impl Into<Vec<u8>>) -> Self {
        Self::new(FrameFlags::PONG, data)
    }

    /// Returns the opcode of the frame.
    #[inline]
    #[must_use]
    pub const fn opcode(&self) -> Option<OpCode> {
        self.flags.opcode()
    }

    /// Returns the payload length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Returns `true` if the payload is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Returns the payload as text if it is valid UTF-8.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        str::from_utf8(&self.payload).ok()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame({})",
            super::dump::abbreviated_frame_dump(&self.payload, self.flags)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
