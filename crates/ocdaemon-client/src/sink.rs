//! Frame delivery.
//!
//! `FrameSink` is the single seam between the message dispatchers and the
//! wire: dispatchers build a payload and make one virtual call. The direct
//! implementation frames and writes within the send budget; the delegated
//! implementation hands the type byte and payload to a co-resident native
//! extension and trusts it to deliver them.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use bytes::Bytes;
use ocdaemon_types::MessageType;
use ocdaemon_wire::frame::{encode_frame, FrameHead};
use ocdaemon_wire::FloatWidth;

use crate::transport::Transport;

/// Capability to deliver one message to the daemon.
pub trait FrameSink: Send {
    /// Deliver a message, best effort. Returns whether the whole message
    /// was handed off.
    fn submit(&mut self, msg_type: MessageType, payload: Bytes) -> bool;
}

/// A co-resident native extension that takes over frame delivery.
///
/// The extension receives the raw type byte and payload; framing, sequence
/// numbers, and transport writes are its responsibility.
pub trait ExtensionDelegate: Send {
    fn deliver(&mut self, msg_type: u8, payload: Bytes) -> bool;
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Process-local thread id, assigned on first use per thread, starting at 1.
pub(crate) fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

/// Wall-clock time as seconds with fractional microseconds.
pub(crate) fn wall_clock_now() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) * 1e-6
}

// ---------------------------------------------------------------------------
// DirectSink
// ---------------------------------------------------------------------------

/// Frames messages and writes them to the transport under a deadline.
pub struct DirectSink {
    transport: Box<dyn Transport>,
    seq: u64,
    pid: u64,
    float_width: FloatWidth,
    thread_ids: bool,
    budget: Duration,
}

impl DirectSink {
    pub fn new(transport: Box<dyn Transport>, budget: Duration) -> Self {
        Self {
            transport,
            seq: 0,
            pid: u64::from(std::process::id()),
            float_width: FloatWidth::probe(),
            thread_ids: true,
            budget,
        }
    }

    /// Report 0 as the thread id on every frame, for hosts without a
    /// thread concept.
    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.thread_ids = enabled;
        self
    }

    pub fn float_width(&self) -> FloatWidth {
        self.float_width
    }

    /// Write the whole frame before the deadline, or fail.
    ///
    /// One non-blocking write of the remaining tail per iteration; a
    /// would-block result re-checks the clock and retries. A zero-length
    /// write or any other error fails the send. On deadline expiry the
    /// bytes already delivered stay on the wire; the receiver resyncs on
    /// the next frame's leading zeros.
    fn write_deadline(&mut self, frame: &[u8]) -> bool {
        let deadline = Instant::now() + self.budget;
        let mut rest = frame;
        while !rest.is_empty() {
            if Instant::now() >= deadline {
                tracing::warn!(
                    remaining = rest.len(),
                    total = frame.len(),
                    "send deadline exceeded"
                );
                return false;
            }
            match self.transport.try_write(rest) {
                Ok(0) => return false,
                Ok(n) => rest = &rest[n..],
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::Interrupted =>
                {
                    std::thread::yield_now();
                }
                Err(e) => {
                    tracing::warn!(error = %e, "daemon write failed");
                    return false;
                }
            }
        }
        true
    }
}

impl FrameSink for DirectSink {
    fn submit(&mut self, msg_type: MessageType, payload: Bytes) -> bool {
        self.seq += 1;
        let head = FrameHead {
            msg_type: msg_type.into(),
            seq: self.seq,
            pid: self.pid,
            thread_id: if self.thread_ids {
                current_thread_id()
            } else {
                0
            },
            start_time: wall_clock_now(),
            float_width: self.float_width,
        };
        let frame = encode_frame(&head, &payload);
        let ok = self.write_deadline(&frame);
        if ok {
            tracing::debug!(msg_type = ?msg_type, seq = head.seq, len = frame.len(), "frame sent");
        }
        ok
    }
}

impl std::fmt::Debug for DirectSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectSink")
            .field("seq", &self.seq)
            .field("pid", &self.pid)
            .field("float_width", &self.float_width)
            .field("budget", &self.budget)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// DelegateSink
// ---------------------------------------------------------------------------

/// Hands messages to a native extension instead of writing frames itself.
/// No transport is opened while this sink is in use.
pub struct DelegateSink {
    delegate: Box<dyn ExtensionDelegate>,
}

impl DelegateSink {
    pub fn new(delegate: Box<dyn ExtensionDelegate>) -> Self {
        Self { delegate }
    }
}

impl FrameSink for DelegateSink {
    fn submit(&mut self, msg_type: MessageType, payload: Bytes) -> bool {
        self.delegate.deliver(msg_type.into(), payload)
    }
}
