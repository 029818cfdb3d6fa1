use snafu::prelude::*;

/// Errors reported by the ESC telemetry subsystem.
///
/// Nothing in the polling path fails hard: a bad frame is dropped and a
/// silent link ends in stale readings. These only surface from `init` and
/// from explicit frame decoding.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("No serial port is assigned to ESC telemetry"))]
    NoPortConfigured,
    #[snafu(display("ESC telemetry port could not be opened at {baud_rate} baud"))]
    PortUnavailable { baud_rate: u32 },
    #[snafu(display("Frame CRC mismatch: expected {expected:#04x}, got {actual:#04x}"))]
    CrcMismatch { expected: u8, actual: u8 },
}
