//! KISS ESC telemetry over a shared serial line.
//!
//! Each ESC on the vehicle can send back a 10 byte frame with temperature,
//! voltage, current, consumption and rpm when asked to via its motor output.
//! All ESCs share one receive pin, so they are polled one at a time:
//!
//! * [`FrameReceiver`] runs in the UART interrupt and assembles frames.
//! * [`FrameLink`] hands complete frames to the polling side.
//! * [`EscSensor`] requests frames motor by motor, validates them, handles
//!   timeouts and keeps the latest [`SensorReading`] of every motor.
//!
//! ```
//! use escsensor::{
//!     EscSensor, EscSensorConfig, Error, FrameLink, PortOpener, PortOptions, ReadingSource,
//!     SerialPort, TelemetryRequests,
//! };
//!
//! struct Uart;
//! impl SerialPort for Uart {
//!     fn close(&mut self) {}
//! }
//!
//! struct Board;
//! impl PortOpener for Board {
//!     type Port = Uart;
//!     fn open(&mut self, _options: PortOptions) -> Result<Uart, Error> {
//!         Ok(Uart)
//!     }
//! }
//!
//! let mut link = FrameLink::new();
//! let (mut receiver, source) = link.split();
//! let motors = TelemetryRequests::new(4);
//! let mut sensor = EscSensor::new(source, &motors, EscSensorConfig::default());
//! sensor.init(&mut Board, 0).unwrap();
//!
//! // Scheduler: sensor.process(now_us) every millisecond.
//! // UART interrupt: receiver.push_byte(byte) for every byte received.
//! sensor.process(5_000_000);
//! receiver.push_byte(0);
//! assert!(sensor.is_active());
//! assert!(sensor.get_reading(ReadingSource::Combined).stale);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod crc;
pub mod debug;
pub mod error;
pub mod frame;
pub mod motor;
pub mod parser;
pub mod sensor;
pub mod serial;
pub mod store;

pub use config::EscSensorConfig;
pub use crc::crc8;
pub use debug::DebugSnapshot;
pub use error::Error;
pub use frame::{RawFrame, SensorReading, FRAME_LEN};
pub use motor::{MotorOutput, TelemetryRequests, MAX_SUPPORTED_MOTORS};
pub use parser::FrameReceiver;
pub use sensor::{EscSensor, PollState};
pub use serial::{FrameLink, FrameSource, PortOpener, PortOptions, SerialPort};
pub use store::{ReadingSource, ESC_SENSOR_COMBINED};
