//! Frame-level protocol types.
//!
//! This module defines the values exchanged with a transport and the
//! conventions layered on top of plain frames.
//!
//! # Protocol Overview
//!
//! | Frame | Direction | Purpose |
//! |-------|-----------|---------|
//! | TEXT / BINARY | Both | Application payload |
//! | TEXT `nextmessage: size=N` | Outbound | Announces a large payload |
//! | PING | Inbound | Liveness probe, answered automatically |
//! | PONG | Both | Probe answer, absorbed on receive |
//! | CLOSE | Both | Passed through to the caller |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `announcement` | Large-message size announcement |
//! | `dump` | Abbreviated renderings for logs |
//! | `flags` | Opcode and FIN bit layout |
//! | `frame` | Owned and received frame values |

// ============================================================================
// Submodules
// ============================================================================

/// Large-message size announcement.
pub mod announcement;

/// Abbreviated frame renderings for log output.
pub mod dump;

/// Opcode and flag bit layout.
pub mod flags;

/// Frame values.
pub mod frame;

// ============================================================================
// Re-exports
// ============================================================================

pub use announcement::{ANNOUNCEMENT_PREFIX, SizeAnnouncement};
pub use dump::{abbreviated_frame_dump, abbreviated_message};
pub use flags::{FrameFlags, OpCode};
pub use frame::{Frame, ReceivedFrame};
