use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

pub const MAX_SUPPORTED_MOTORS: usize = 8;

/// The motor output driver, as seen by the telemetry poller.
///
/// Both calls may come from a different priority than the output driver
/// itself, hence `&self`.
pub trait MotorOutput {
    /// Ask the ESC on `motor` to send one telemetry frame. Fire and forget:
    /// the driver sets the telemetry bit on the next command it sends.
    fn request_telemetry(&self, motor: u8);

    /// Number of motors currently driven.
    fn motor_count(&self) -> u8;
}

/// Telemetry request flags handed to the output driver.
///
/// The poller sets a flag; the DShot driver clears it with
/// [`take_request`](Self::take_request) when it embeds the request bit in
/// the next frame for that motor.
pub struct TelemetryRequests {
    pending: [AtomicBool; MAX_SUPPORTED_MOTORS],
    motor_count: AtomicU8,
}

#[allow(clippy::declare_interior_mutable_const)]
const NO_REQUEST: AtomicBool = AtomicBool::new(false);

impl TelemetryRequests {
    pub const fn new(motor_count: u8) -> Self {
        TelemetryRequests {
            pending: [NO_REQUEST; MAX_SUPPORTED_MOTORS],
            motor_count: AtomicU8::new(motor_count),
        }
    }

    pub fn set_motor_count(&self, count: u8) {
        self.motor_count.store(count, Ordering::Relaxed);
    }

    /// Clear and return the request flag for `motor`.
    ///
    /// Load then store rather than `swap`, which thumbv6m lacks. A request
    /// landing between the two merges into the one being taken, same as
    /// requesting twice before the driver gets to it.
    pub fn take_request(&self, motor: u8) -> bool {
        match self.pending.get(usize::from(motor)) {
            Some(flag) if flag.load(Ordering::Acquire) => {
                flag.store(false, Ordering::Release);
                true
            }
            _ => false,
        }
    }

    pub fn is_requested(&self, motor: u8) -> bool {
        self.pending
            .get(usize::from(motor))
            .map_or(false, |flag| flag.load(Ordering::Acquire))
    }
}

impl MotorOutput for TelemetryRequests {
    fn request_telemetry(&self, motor: u8) {
        if let Some(flag) = self.pending.get(usize::from(motor)) {
            flag.store(true, Ordering::Release);
        }
    }

    fn motor_count(&self) -> u8 {
        self.motor_count.load(Ordering::Relaxed)
    }
}
