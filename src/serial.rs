//! Hand-off between the serial receive interrupt and the polling loop.
//!
//! The interrupt side assembles bytes into frames (see [`crate::parser`])
//! and publishes each complete frame into a small SPSC queue. The polling
//! side pulls at most one frame per cycle, and that is always the newest
//! one: older unconsumed frames are discarded and counted as overruns. A
//! frame is only ever visible to the consumer once all 10 bytes are in, so
//! the validator never sees a half written buffer.
//!
//! Arming is tracked as a session number (0 while disarmed) so the receiver
//! can tell a fresh arming apart and restart framing from the first byte.
//!
//! Only plain loads and stores are used on the shared atomics: thumbv6m has
//! no read-modify-write instructions. Each counter has a single writer.

use core::sync::atomic::{AtomicU32, Ordering};

use heapless::spsc::{Consumer, Producer, Queue};

use crate::config::ESC_SENSOR_BAUDRATE;
use crate::error::Error;
use crate::frame::RawFrame;
use crate::parser::FrameReceiver;

// heapless queues hold N - 1 elements. At 115200 baud a frame takes just
// under 1 ms, so three frames cover a few missed poll cycles.
const FRAME_SLOTS: usize = 4;
const DISARMED: u32 = 0;

/// Settings requested when opening the telemetry port. The port is always
/// receive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortOptions {
    pub baud_rate: u32,
    pub inverted: bool,
}

impl Default for PortOptions {
    fn default() -> Self {
        PortOptions {
            baud_rate: ESC_SENSOR_BAUDRATE,
            inverted: false,
        }
    }
}

/// An open serial port delivering bytes to a [`FrameReceiver`].
pub trait SerialPort {
    /// Stop receiving and release the port.
    fn close(&mut self);
}

/// Finds and opens the port assigned to ESC telemetry.
pub trait PortOpener {
    type Port: SerialPort;

    /// Returns [`Error::NoPortConfigured`] when no port is assigned and
    /// [`Error::PortUnavailable`] when it cannot be opened.
    fn open(&mut self, options: PortOptions) -> Result<Self::Port, Error>;
}

/// Storage shared by the receive interrupt and the polling side.
///
/// Lives in a `static` (or an RTIC local) and is split once at startup.
pub struct FrameLink {
    queue: Queue<RawFrame, FRAME_SLOTS>,
    session: AtomicU32,
    // Frames the receiver could not enqueue. Written by the sink only.
    dropped: AtomicU32,
}

impl FrameLink {
    pub const fn new() -> Self {
        FrameLink {
            queue: Queue::new(),
            session: AtomicU32::new(DISARMED),
            dropped: AtomicU32::new(0),
        }
    }

    /// Split into the interrupt half and the polling half.
    pub fn split(&mut self) -> (FrameReceiver<'_>, FrameSource<'_>) {
        let (producer, consumer) = self.queue.split();
        let session = &self.session;
        let dropped = &self.dropped;
        (
            FrameReceiver::new(FrameSink {
                producer,
                session,
                dropped,
            }),
            FrameSource {
                consumer,
                session,
                last_session: DISARMED,
                dropped,
                superseded: 0,
            },
        )
    }
}

impl Default for FrameLink {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half, owned by the [`FrameReceiver`].
pub struct FrameSink<'a> {
    producer: Producer<'a, RawFrame, FRAME_SLOTS>,
    session: &'a AtomicU32,
    dropped: &'a AtomicU32,
}

impl<'a> FrameSink<'a> {
    /// Current arming session, `None` while disarmed.
    pub fn session(&self) -> Option<u32> {
        match self.session.load(Ordering::Acquire) {
            DISARMED => None,
            session => Some(session),
        }
    }

    /// Publish a complete frame. Returns false if it had to be dropped.
    pub fn publish(&mut self, frame: RawFrame) -> bool {
        match self.producer.enqueue(frame) {
            Ok(()) => true,
            Err(_) => {
                let dropped = self.dropped.load(Ordering::Relaxed);
                self.dropped.store(dropped.wrapping_add(1), Ordering::Relaxed);
                false
            }
        }
    }
}

/// Consumer half, owned by the polling state machine.
pub struct FrameSource<'a> {
    consumer: Consumer<'a, RawFrame, FRAME_SLOTS>,
    session: &'a AtomicU32,
    last_session: u32,
    dropped: &'a AtomicU32,
    superseded: u32,
}

impl<'a> FrameSource<'a> {
    /// Start accepting bytes. Until then the receiver discards everything,
    /// which covers the version chatter ESCs emit while booting.
    pub fn arm(&mut self) {
        self.last_session = self.last_session.wrapping_add(1).max(1);
        self.session.store(self.last_session, Ordering::Release);
    }

    /// Stop accepting bytes and throw away anything not yet consumed.
    pub fn disarm(&mut self) {
        self.session.store(DISARMED, Ordering::Release);
        while self.consumer.dequeue().is_some() {}
    }

    pub fn is_armed(&self) -> bool {
        self.session.load(Ordering::Acquire) != DISARMED
    }

    /// Take the newest completed frame, if any. Each frame is returned
    /// once; older frames still queued are discarded.
    pub fn take(&mut self) -> Option<RawFrame> {
        let mut newest = self.consumer.dequeue()?;
        while let Some(frame) = self.consumer.dequeue() {
            self.superseded = self.superseded.wrapping_add(1);
            newest = frame;
        }
        Some(newest)
    }

    /// Discard every unconsumed frame, counting each as an overrun.
    pub fn clear(&mut self) {
        while self.consumer.dequeue().is_some() {
            self.superseded = self.superseded.wrapping_add(1);
        }
    }

    /// Frames lost without being validated: replaced by a newer frame,
    /// cleared, or arriving with the queue full.
    pub fn overruns(&self) -> u32 {
        self.superseded.wrapping_add(self.dropped.load(Ordering::Relaxed))
    }
}
