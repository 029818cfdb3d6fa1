/// KISS ESCs transmit at a fixed rate.
pub const ESC_SENSOR_BAUDRATE: u32 = 115_200;
// Let the ESCs finish booting before asking them for anything
pub const ESC_BOOT_TIME_MS: u64 = 5_000;
// A frame takes ~900us on the wire
pub const ESC_REQUEST_TIMEOUT_MS: u64 = 100;
// One request plus three retries
pub const ESC_MAX_ATTEMPTS: u8 = 4;
pub const ESC_LINK_TIMEOUT_MS: u64 = 10_000;

/// Timing parameters of the polling state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscSensorConfig {
    /// Grace period after start during which no telemetry is requested.
    pub boot_time_ms: u64,
    /// How long to wait for a response before retrying the same motor.
    pub request_timeout_ms: u64,
    /// Requests sent to one motor before it is marked stale and skipped.
    pub max_attempts: u8,
    /// Silence on the whole link after which the subsystem shuts down.
    pub link_timeout_ms: u64,
    pub baud_rate: u32,
}

impl EscSensorConfig {
    pub const DEFAULT: Self = EscSensorConfig {
        boot_time_ms: ESC_BOOT_TIME_MS,
        request_timeout_ms: ESC_REQUEST_TIMEOUT_MS,
        max_attempts: ESC_MAX_ATTEMPTS,
        link_timeout_ms: ESC_LINK_TIMEOUT_MS,
        baud_rate: ESC_SENSOR_BAUDRATE,
    };
}

impl Default for EscSensorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
