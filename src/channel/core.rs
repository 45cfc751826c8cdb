//! Synchronized frame channel.
//!
//! [`FrameChannel`] owns a [`Transport`] and is the only way to reach it.
//! Two independent locks guard the connection:
//!
//! - the **read lock** is held for exactly one raw receive
//! - the **write lock** is held for one raw send, or for an announcement
//!   and its payload together
//!
//! A receive waiting for data never blocks a send, and vice versa. No lock
//! is held while polling for readability.
//!
//! Work that must reach the wire even if the calling future is dropped is
//! parked on the channel: the payload of an announced large message sits in
//! the write lock's slot until written, and PONG replies wait in a queue
//! until a later receive drains it.
//!
//! # Receive Loop
//!
//! ```text
//! poll ──readable──► lock(read) ─► receive_raw ─► unlock ─► classify
//!  ▲                                                          │
//!  ├──────────────── Reply: lock(write) ─► send PONG ◄────────┤
//!  ├──────────────── Absorb ◄─────────────────────────────────┤
//!  └──────────────── No Data                     Deliver ─────┴─► caller
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::protocol::{FrameFlags, ReceivedFrame, abbreviated_frame_dump, abbreviated_message};
use crate::transport::Transport;

use super::builder::ChannelBuilder;
use super::chunker::LargeMessageChunker;
use super::keepalive::KeepAlive;
use super::options::ChannelOptions;
use super::stats::{ChannelStats, StatsCounters};

// ============================================================================
// FrameChannel
// ============================================================================

/// Thread-safe frame channel over a single transport.
///
/// Share it across tasks with an `Arc`; every method takes `&self`.
///
/// # Thread Safety
///
/// - At most one receive and one send reach the transport at any instant.
/// - A size announcement and its payload are never separated by another
///   sender's frame.
/// - Inbound PINGs are answered and PONGs dropped inside
///   [`receive_frame`](Self::receive_frame), whichever caller reads them.
///
/// # Example
///
/// ```ignore
/// let (local, peer) = MemoryTransport::pair();
/// let channel = FrameChannel::builder(local)
///     .large_message_threshold(1024)
///     .build()?;
///
/// channel.send_binary(&[0u8; 2000]).await?;
/// // peer sees "nextmessage: size=2000" followed by the 2000 byte frame
/// ```
#[derive(Debug)]
pub struct FrameChannel<T: Transport> {
    /// Owned connection handle.
    transport: T,
    /// Serializes raw receives.
    read_lock: Mutex<()>,
    /// Serializes raw sends; holds a payload whose announcement is already sent.
    write_lock: Mutex<Option<AnnouncedPayload>>,
    /// PING payloads read but not yet answered.
    pending_pongs: parking_lot::Mutex<VecDeque<Vec<u8>>>,
    /// Announcement policy for large payloads.
    chunker: LargeMessageChunker,
    /// Channel configuration.
    options: ChannelOptions,
    /// Traffic counters.
    stats: StatsCounters,
}

// ============================================================================
// FrameChannel - Constructor
// ============================================================================

impl<T: Transport> FrameChannel<T> {
    /// Creates a channel with default options.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::from_parts(transport, ChannelOptions::default())
    }

    /// Creates a channel with the given options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the options fail validation.
    pub fn with_options(transport: T, options: ChannelOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_parts(transport, options))
    }

    /// Returns a builder for configuring a channel around `transport`.
    #[inline]
    #[must_use]
    pub fn builder(transport: T) -> ChannelBuilder<T> {
        ChannelBuilder::new(transport)
    }

    fn from_parts(transport: T, options: ChannelOptions) -> Self {
        debug!(
            poll_timeout_ms = options.poll_timeout_ms,
            large_message_threshold = options.large_message_threshold,
            "Frame channel created"
        );

        Self {
            transport,
            read_lock: Mutex::new(()),
            write_lock: Mutex::new(None),
            pending_pongs: parking_lot::Mutex::new(VecDeque::new()),
            chunker: LargeMessageChunker::new(options.large_message_threshold),
            options,
            stats: StatsCounters::default(),
        }
    }
}

// ============================================================================
// FrameChannel - Public API
// ============================================================================

impl<T: Transport> FrameChannel<T> {
    /// Receives the next application frame into `buf`.
    ///
    /// PING frames are answered with a PONG and PONG frames are dropped;
    /// neither is returned. The payload of the returned frame occupies
    /// `buf[..frame.len]`.
    ///
    /// Without an idle-poll limit this waits until a frame arrives or the
    /// transport closes.
    ///
    /// # Errors
    ///
    /// - [`Error::KeepAliveReplyFailed`] if the PONG reply was incomplete
    /// - [`Error::NotReady`] if the idle-poll limit was reached
    /// - [`Error::ConnectionClosed`] or other transport errors
    ///
    /// # Cancel Safety
    ///
    /// A PING read before the future is dropped is still answered: its PONG
    /// stays queued and the next call sends it before polling. An
    /// application frame is never lost, since nothing is awaited between
    /// reading it and returning it.
    pub async fn receive_frame(&self, buf: &mut [u8]) -> Result<ReceivedFrame> {
        self.inject_delay().await;

        if !self.pending_pongs.lock().is_empty() {
            self.answer_pings().await?;
        }

        let poll_timeout = self.options.poll_timeout();
        let mut idle_polls: u32 = 0;

        loop {
            if !self.transport.poll_readable(poll_timeout).await? {
                idle_polls = idle_polls.saturating_add(1);
                trace!(idle_polls, "Not ready for read");

                if let Some(limit) = self.options.max_idle_polls
                    && idle_polls >= limit.get()
                {
                    return Err(Error::not_ready(idle_polls));
                }
                continue;
            }
            idle_polls = 0;

            let received = {
                let _read = self.read_lock.lock().await;
                self.transport.receive_raw(buf).await?
            };

            let Some(frame) = received else {
                trace!("Got nothing");
                continue;
            };

            let payload = buf.get(..frame.len).ok_or_else(|| {
                Error::transport(format!(
                    "transport reported {} bytes for a {} byte buffer",
                    frame.len,
                    buf.len()
                ))
            })?;
            trace!(frame = %abbreviated_frame_dump(payload, frame.flags), "Got frame");

            match KeepAlive::classify(frame.flags) {
                KeepAlive::Reply => {
                    self.pending_pongs.lock().push_back(payload.to_vec());
                    self.answer_pings().await?;
                }
                KeepAlive::Absorb => {
                    self.stats.pong_absorbed();
                }
                KeepAlive::Deliver => {
                    self.stats.frame_delivered();
                    return Ok(frame);
                }
            }
        }
    }

    /// Sends `buf` as one frame with the given flags.
    ///
    /// Payloads at or above the large-message threshold are preceded by a
    /// `nextmessage: size=<N>` TEXT frame. Returns the payload bytes the
    /// transport reported as written; a short count is logged but not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`Error::AnnouncementFailed`] if the size announcement was
    ///   incomplete (the payload is not sent)
    /// - [`Error::ConnectionClosed`] or other transport errors
    ///
    /// # Cancel Safety
    ///
    /// Once the announcement is written, a copy of the payload is kept under
    /// the write lock until the payload write completes. If the future is
    /// dropped in between, the next writer on this channel (a send or a PONG
    /// reply) writes that payload first, so the announcement is always
    /// followed by its own payload. A payload write dropped while in flight
    /// is repeated the same way; whether the transport already emitted part
    /// of it is up to the transport.
    pub async fn send_frame(&self, buf: &[u8], flags: FrameFlags) -> Result<usize> {
        self.inject_delay().await;

        let mut write = self.write_lock.lock().await;
        self.finish_interrupted_send(&mut write).await?;

        if let Some(announcement) = self.chunker.announcement_for(buf.len()) {
            let text = announcement.to_string();
            let sent = self
                .transport
                .send_raw(text.as_bytes(), FrameFlags::TEXT)
                .await?;

            if sent != text.len() {
                warn!(expected = text.len(), sent, "Failed to send long message preamble");
                return Err(Error::announcement_failed(text.len(), sent));
            }

            self.stats.announcement_sent();
            trace!(preamble = %text, "Sent long message preamble");

            *write = Some(AnnouncedPayload {
                payload: buf.to_vec(),
                flags,
            });
        }

        let result = self.transport.send_raw(buf, flags).await;
        *write = None;
        drop(write);

        let sent = result?;
        self.record_payload(buf, sent);
        Ok(sent)
    }

    /// Sends `buf` as a final TEXT frame.
    ///
    /// See [`send_frame`](Self::send_frame).
    #[inline]
    pub async fn send_text(&self, buf: &[u8]) -> Result<usize> {
        self.send_frame(buf, FrameFlags::TEXT).await
    }

    /// Sends `buf` as a final BINARY frame.
    ///
    /// See [`send_frame`](Self::send_frame).
    #[inline]
    pub async fn send_binary(&self, buf: &[u8]) -> Result<usize> {
        self.send_frame(buf, FrameFlags::BINARY).await
    }

    /// Returns the channel options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ChannelOptions {
        &self.options
    }

    /// Returns a snapshot of the traffic counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ChannelStats {
        self.stats.snapshot()
    }
}

// ============================================================================
// FrameChannel - Internals
// ============================================================================

impl<T: Transport> FrameChannel<T> {
    /// Echoes every queued PING payload back as a final PONG.
    async fn answer_pings(&self) -> Result<()> {
        let mut write = self.write_lock.lock().await;
        self.finish_interrupted_send(&mut write).await?;

        loop {
            let Some(payload) = self.pending_pongs.lock().pop_front() else {
                return Ok(());
            };

            let sent = self
                .transport
                .send_raw(&payload, KeepAlive::REPLY_FLAGS)
                .await?;

            if sent != payload.len() {
                warn!(expected = payload.len(), sent, "Sending Pong failed");
                return Err(Error::keep_alive_reply_failed(payload.len(), sent));
            }

            self.stats.ping_answered();
            trace!(len = payload.len(), "Answered ping");
        }
    }

    /// Writes the payload left behind by a dropped [`send_frame`](Self::send_frame).
    ///
    /// Must be called with the write lock held, before any other frame.
    async fn finish_interrupted_send(&self, slot: &mut Option<AnnouncedPayload>) -> Result<()> {
        let Some(pending) = slot.as_ref() else {
            return Ok(());
        };

        debug!(
            len = pending.payload.len(),
            flags = %pending.flags,
            "Completing interrupted large message"
        );

        let result = self.transport.send_raw(&pending.payload, pending.flags).await;

        if let Some(pending) = slot.take() {
            self.record_payload(&pending.payload, result?);
        }
        Ok(())
    }

    /// Counts a written payload and reports a short write.
    fn record_payload(&self, buf: &[u8], sent: usize) {
        self.stats.frame_sent();

        if sent == buf.len() {
            trace!(frame = %abbreviated_message(buf), "Sent frame");
        } else {
            self.stats.partial_write();
            error!(
                expected = buf.len(),
                sent,
                message = %abbreviated_message(buf),
                "Sent incomplete message"
            );
        }
    }

    /// Sleeps for the configured artificial delay, if any.
    async fn inject_delay(&self) {
        if self.options.delay.is_disabled() {
            return;
        }

        let delay = self.options.delay.sample();
        trace!(delay_ms = delay.as_millis() as u64, "Injecting artificial delay");
        tokio::time::sleep(delay).await;
    }
}

// ============================================================================
// AnnouncedPayload
// ============================================================================

/// Payload whose size announcement has already been written.
#[derive(Debug)]
struct AnnouncedPayload {
    payload: Vec<u8>,
    flags: FrameFlags,
}

// ============================================================================
// Tests
// ============================================================================
