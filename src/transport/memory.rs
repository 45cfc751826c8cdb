//! In-process duplex frame transport.
//!
//! [`MemoryTransport::pair`] returns two connected endpoints. Frames sent on
//! one endpoint are queued for the other, preserving order. Either endpoint
//! can close the link, after which both sides observe
//! [`Error::ConnectionClosed`] once their pending frames are drained.
//!
//! The transport also supports scripted faults so that error paths of the
//! frame channel can be exercised deterministically:
//!
//! - [`MemoryTransport::inject_short_write`] truncates the next send
//! - [`MemoryTransport::inject_no_data`] makes the next poll report readable
//!   while the following receive yields nothing
//!
//! # Example
//!
//! ```ignore
//! let (local, peer) = MemoryTransport::pair();
//! peer.send(Frame::ping("hi")).await?;
//! let mut buf = [0u8; 16];
//! let frame = local.receive_raw(&mut buf).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::protocol::{Frame, FrameFlags, ReceivedFrame};

use super::Transport;

// ============================================================================
// Types
// ============================================================================

/// One direction of the link.
#[derive(Debug, Default)]
struct Queue {
    /// Frames waiting to be received.
    frames: Mutex<VecDeque<Frame>>,
    /// Wakes pollers when a frame arrives or the link closes.
    notify: Notify,
}

/// State shared by both endpoints.
#[derive(Debug, Default)]
struct Link {
    /// Queues indexed by receiving side.
    queues: [Queue; 2],
    /// Set once either side closes.
    closed: AtomicBool,
}

/// Scripted faults for one endpoint.
#[derive(Debug, Default)]
struct Faults {
    /// Byte limits applied to the next sends, in order.
    short_writes: VecDeque<usize>,
    /// Number of upcoming receives that yield no data.
    no_data_reads: usize,
}

// ============================================================================
// MemoryTransport
// ============================================================================

/// One endpoint of an in-process duplex frame link.
#[derive(Debug)]
pub struct MemoryTransport {
    /// Link shared with the other endpoint.
    link: Arc<Link>,
    /// Index of this endpoint's inbound queue.
    side: usize,
    /// Faults pending on this endpoint.
    faults: Mutex<Faults>,
}

// ============================================================================
// MemoryTransport - Constructor
// ============================================================================

impl MemoryTransport {
    /// Creates two connected endpoints.
    #[must_use]
    pub fn pair() -> (Self, Self) {
        let link = Arc::new(Link::default());

        let left = Self {
            link: Arc::clone(&link),
            side: 0,
            faults: Mutex::new(Faults::default()),
        };
        let right = Self {
            link,
            side: 1,
            faults: Mutex::new(Faults::default()),
        };

        (left, right)
    }
}

// ============================================================================
// MemoryTransport - Public API
// ============================================================================

impl MemoryTransport {
    /// Sends an owned frame, returning the bytes written.
    ///
    /// Convenience for peers driving the link directly.
    pub async fn send(&self, frame: Frame) -> Result<usize> {
        self.send_raw(&frame.payload, frame.flags).await
    }

    /// Waits up to `wait` for the next inbound frame.
    ///
    /// Returns `Ok(None)` if nothing arrived in time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] if the link is closed and drained.
    pub async fn next_frame(&self, wait: Duration) -> Result<Option<Frame>> {
        if !self.poll_readable(wait).await? {
            return Ok(None);
        }

        match self.inbound().frames.lock().pop_front() {
            Some(frame) => Ok(Some(frame)),
            None if self.is_closed() => Err(Error::ConnectionClosed),
            None => Ok(None),
        }
    }

    /// Removes and returns the next inbound frame without waiting.
    #[must_use]
    pub fn try_next_frame(&self) -> Option<Frame> {
        self.inbound().frames.lock().pop_front()
    }

    /// Returns the number of inbound frames not yet received.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inbound().frames.lock().len()
    }

    /// Closes the link for both endpoints and wakes any waiting pollers.
    pub fn close(&self) {
        if !self.link.closed.swap(true, Ordering::AcqRel) {
            debug!(side = self.side, "Memory transport closed");
        }

        for queue in &self.link.queues {
            queue.notify.notify_waiters();
        }
    }

    /// Returns `true` once either endpoint closed the link.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.link.closed.load(Ordering::Acquire)
    }

    /// Truncates the next send on this endpoint to at most `limit` bytes.
    ///
    /// The truncated frame is still delivered and the short count returned.
    /// Multiple injections apply to successive sends.
    pub fn inject_short_write(&self, limit: usize) {
        self.faults.lock().short_writes.push_back(limit);
    }

    /// Makes the next poll report readable and the next receive yield nothing.
    pub fn inject_no_data(&self) {
        self.faults.lock().no_data_reads += 1;
    }
}

// ============================================================================
// MemoryTransport - Internals
// ============================================================================

impl MemoryTransport {
    /// Queue this endpoint receives from.
    #[inline]
    fn inbound(&self) -> &Queue {
        &self.link.queues[self.side]
    }

    /// Queue the other endpoint receives from.
    #[inline]
    fn outbound(&self) -> &Queue {
        &self.link.queues[1 - self.side]
    }

    /// Returns `true` if a receive would not block.
    fn is_readable(&self) -> bool {
        self.is_closed()
            || self.faults.lock().no_data_reads > 0
            || !self.inbound().frames.lock().is_empty()
    }
}

// ============================================================================
// Transport Implementation
// ============================================================================

#[async_trait]
impl Transport for MemoryTransport {
    async fn poll_readable(&self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;

        loop {
            let notified = self.inbound().notify.notified();
            tokio::pin!(notified);

            // Register before checking so a concurrent push cannot be missed.
            notified.as_mut().enable();

            if self.is_readable() {
                return Ok(true);
            }

            if timeout_at(deadline, notified).await.is_err() {
                return Ok(self.is_readable());
            }
        }
    }

    async fn receive_raw(&self, buf: &mut [u8]) -> Result<Option<ReceivedFrame>> {
        {
            let mut faults = self.faults.lock();
            if faults.no_data_reads > 0 {
                faults.no_data_reads -= 1;
                return Ok(None);
            }
        }

        let mut frames = self.inbound().frames.lock();

        let Some(frame) = frames.front() else {
            if self.is_closed() {
                return Err(Error::ConnectionClosed);
            }
            return Ok(None);
        };

        if frame.len() > buf.len() {
            return Err(Error::buffer_too_small(frame.len(), buf.len()));
        }

        let Some(frame) = frames.pop_front() else {
            return Ok(None);
        };
        drop(frames);

        buf[..frame.len()].copy_from_slice(&frame.payload);
        Ok(Some(ReceivedFrame::new(frame.len(), frame.flags)))
    }

    async fn send_raw(&self, buf: &[u8], flags: FrameFlags) -> Result<usize> {
        // Give other tasks a chance to run between frames.
        tokio::task::yield_now().await;

        if self.is_closed() {
            return Err(Error::ConnectionClosed);
        }

        let limit = self.faults.lock().short_writes.pop_front();
        let written = limit.map_or(buf.len(), |limit| limit.min(buf.len()));

        if written < buf.len() {
            trace!(requested = buf.len(), written, "Injected short write");
        }

        let outbound = self.outbound();
        outbound
            .frames
            .lock()
            .push_back(Frame::new(flags, &buf[..written]));
        outbound.notify.notify_waiters();

        Ok(written)
    }
}

// ============================================================================
// Tests
// ============================================================================
