use crate::frame::{RawFrame, FRAME_LEN};
use crate::serial::FrameSink;

/// Byte-at-a-time frame assembler, driven from the UART receive interrupt.
///
/// KISS frames carry no sync marker, so framing relies purely on the fixed
/// length: every tenth byte after arming closes a frame. Bytes arriving
/// before the link is armed are dropped.
pub struct FrameReceiver<'a> {
    sink: FrameSink<'a>,
    buf: [u8; FRAME_LEN],
    cursor: usize,
    session: Option<u32>,
}

impl<'a> FrameReceiver<'a> {
    pub(crate) fn new(sink: FrameSink<'a>) -> Self {
        FrameReceiver {
            sink,
            buf: [0; FRAME_LEN],
            cursor: 0,
            session: None,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.sink.session().is_some()
    }

    /// Bytes of the frame currently being assembled.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns true when this byte completed a frame, whether or not the
    /// frame could be handed over.
    pub fn push_byte(&mut self, b: u8) -> bool {
        let session = self.sink.session();
        if session != self.session {
            // Armed, disarmed or re-armed since the last byte
            self.session = session;
            self.reset();
        }
        if session.is_none() {
            return false;
        }

        self.buf[self.cursor] = b;
        if self.cursor == FRAME_LEN - 1 {
            self.reset();
            self.sink.publish(RawFrame::new(self.buf));
            true
        } else {
            self.cursor += 1;
            false
        }
    }
}
