//! Abbreviated frame renderings for log output.
//!
//! Payloads can be arbitrarily large, so log lines only carry the first line
//! of text payloads (capped in length) or a short hex prefix of binary ones.

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Write;
use std::str;

use super::{FrameFlags, OpCode};

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of characters of a text payload kept in log output.
const MAX_TEXT_CHARS: usize = 120;

/// Maximum number of bytes of a binary payload rendered as hex.
const MAX_HEX_BYTES: usize = 16;

// ============================================================================
// Functions
// ============================================================================

/// Returns the first line of a message, truncated for logging.
///
/// Non-UTF-8 payloads are rendered as a hex prefix instead.
#[must_use]
pub fn abbreviated_message(payload: &[u8]) -> String {
    let Ok(text) = str::from_utf8(payload) else {
        return hex_prefix(payload);
    };

    let first_line = text.split('\n').next().unwrap_or_default();
    let mut out: String = first_line.chars().take(MAX_TEXT_CHARS).collect();

    if out.len() < text.len() {
        out.push_str("...");
    }

    out
}

/// Returns a one-line summary of a frame: size, flags and abbreviated payload.
#[must_use]
pub fn abbreviated_frame_dump(payload: &[u8], flags: FrameFlags) -> String {
    let body = if flags.is(OpCode::Binary) {
        hex_prefix(payload)
    } else {
        abbreviated_message(payload)
    };

    format!("#{} bytes, {flags}: {body}", payload.len())
}

/// Renders up to [`MAX_HEX_BYTES`] bytes as space-separated hex.
fn hex_prefix(payload: &[u8]) -> String {
    let mut out = String::with_capacity(MAX_HEX_BYTES * 3 + 3);

    for (i, byte) in payload.iter().take(MAX_HEX_BYTES).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }

    if payload.len() > MAX_HEX_BYTES {
        out.push_str(" ...");
    }

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_unchanged() {
        assert_eq!(abbreviated_message(b"status: ok"), "status: ok");
    }

    #[test]
    fn test_multiline_message_keeps_first_line() {
        assert_eq!(abbreviated_message(b"header\nbody"), "header...");
    }

    #[test]
    fn test_long_message_truncated() {
        let text = "x".repeat(500);
        let out = abbreviated_message(text.as_bytes());
        assert_eq!(out.len(), MAX_TEXT_CHARS + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_binary_message_as_hex() {
        assert_eq!(abbreviated_message(&[0xff, 0x00, 0x10]), "ff 00 10");
    }

    #[test]
    fn test_frame_dump_text() {
        let dump = abbreviated_frame_dump(b"hi", FrameFlags::PING);
        assert_eq!(dump, "#2 bytes, FIN PING: hi");
    }

    #[test]
    fn test_frame_dump_binary_truncated() {
        let dump = abbreviated_frame_dump(&[0xab; 20], FrameFlags::BINARY);
        assert!(dump.starts_with("#20 bytes, FIN BINARY: ab ab"));
        assert!(dump.ends_with(" ..."));
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(abbreviated_frame_dump(&[], FrameFlags::PONG), "#0 bytes, FIN PONG: ");
    }
}
