//! KISS ESC telemetry frame.
//!
//! One transmission is 10 bytes at 115200 baud:
//!
//! | Byte | Content             |
//! |------|---------------------|
//! | 0    | Temperature (°C)    |
//! | 1-2  | Voltage, 0.01V      |
//! | 3-4  | Current, 0.01A      |
//! | 5-6  | Consumption, mAh    |
//! | 7-8  | Electrical RPM      |
//! | 9    | CRC8 over bytes 0-8 |
//!
//! Multi-byte fields are big-endian.

use snafu::ensure;

use crate::crc::crc8;
use crate::error::{CrcMismatchSnafu, Error};

pub const FRAME_LEN: usize = 10;
const PAYLOAD_LEN: usize = FRAME_LEN - 1;

/// Latest telemetry of one ESC, or the combination of several.
///
/// When `stale` is set the other fields carry no information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub stale: bool,
    pub temperature: u8,
    pub voltage: u16,
    pub current: u32,
    pub consumption: u32,
    pub rpm: u16,
}

impl SensorReading {
    pub const STALE: Self = SensorReading {
        stale: true,
        temperature: 0,
        voltage: 0,
        current: 0,
        consumption: 0,
        rpm: 0,
    };
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::STALE
    }
}

/// Outcome of checking the link for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing usable yet: no frame, or a frame that failed its CRC.
    Pending,
    /// A valid frame was decoded and stored.
    Complete,
}

/// One complete, not yet validated telemetry frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame(pub [u8; FRAME_LEN]);

fn read_u16(bytes: &[u8]) -> u16 {
    (u16::from(bytes[0]) << 8) | u16::from(bytes[1])
}

impl RawFrame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }

    /// Build a frame around a payload, appending its CRC.
    pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[..PAYLOAD_LEN].copy_from_slice(&payload);
        bytes[PAYLOAD_LEN] = crc8(&payload);
        RawFrame(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// CRC carried in the last byte.
    pub fn received_crc(&self) -> u8 {
        self.0[PAYLOAD_LEN]
    }

    pub fn computed_crc(&self) -> u8 {
        crc8(&self.0[..PAYLOAD_LEN])
    }

    /// Check the CRC and decode the fields into a fresh reading.
    pub fn decode(&self) -> Result<SensorReading, Error> {
        let expected = self.computed_crc();
        let actual = self.received_crc();
        ensure!(expected == actual, CrcMismatchSnafu { expected, actual });

        let b = &self.0;
        Ok(SensorReading {
            stale: false,
            temperature: b[0],
            voltage: read_u16(&b[1..3]),
            current: u32::from(read_u16(&b[3..5])),
            consumption: u32::from(read_u16(&b[5..7])),
            rpm: read_u16(&b[7..9]),
        })
    }
}
