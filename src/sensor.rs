//! Round-robin ESC telemetry poller.
//!
//! All motors share one receive line, so only one ESC may be asked to talk
//! at a time. The poller requests a frame from one motor, waits for it
//! (retrying on timeout), stores it and moves on to the next motor.
//!
//! If no ESC has answered for the link timeout the whole subsystem shuts
//! down: the port is closed and every reading goes stale, which downstream
//! consumers (battery monitoring, OSD) read as "no ESC sensor". Only an
//! explicit [`EscSensor::init`] brings it back.

use log::{debug, error, info, warn};

use crate::config::EscSensorConfig;
use crate::debug::DebugSnapshot;
use crate::error::Error;
use crate::frame::{FrameStatus, SensorReading};
use crate::motor::{MotorOutput, MAX_SUPPORTED_MOTORS};
use crate::serial::{FrameSource, PortOpener, PortOptions, SerialPort};
use crate::store::{ReadingSource, SensorStore};

/// Where the poller is in its request/response cycle.
///
/// `triggered_at` is the time in ms the current request window opened;
/// the response timeout runs from there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Waiting for the ESCs to boot.
    Wait,
    /// About to request telemetry from the selected motor.
    Ready { triggered_at: u64 },
    /// Request sent, waiting for the frame.
    Pending { triggered_at: u64 },
}

pub struct EscSensor<'a, P, M> {
    config: EscSensorConfig,
    link: FrameSource<'a>,
    motors: &'a M,
    // Some while enabled
    port: Option<P>,
    store: SensorStore,
    state: PollState,
    motor: u8,
    attempts: u8,
    timeouts: u32,
    started_at_ms: u64,
    last_response_ms: u64,
    last_temperature: u8,
    last_rpm: u16,
}

impl<'a, P, M> EscSensor<'a, P, M>
where
    P: SerialPort,
    M: MotorOutput,
{
    /// Create an inactive poller. Call [`init`](Self::init) to open the port.
    pub fn new(link: FrameSource<'a>, motors: &'a M, config: EscSensorConfig) -> Self {
        EscSensor {
            config,
            link,
            motors,
            port: None,
            store: SensorStore::new(),
            state: PollState::Wait,
            motor: 0,
            attempts: 0,
            timeouts: 0,
            started_at_ms: 0,
            last_response_ms: 0,
            last_temperature: 0,
            last_rpm: 0,
        }
    }

    /// Open the telemetry port and start over from the boot wait.
    ///
    /// Also used to bring the subsystem back after it shut itself down.
    /// On failure the subsystem stays inactive with all readings stale.
    pub fn init<O>(&mut self, opener: &mut O, now_us: u64) -> Result<(), Error>
    where
        O: PortOpener<Port = P>,
    {
        self.release();

        self.state = PollState::Wait;
        self.motor = 0;
        self.attempts = 0;
        self.timeouts = 0;
        self.last_temperature = 0;
        self.last_rpm = 0;
        self.started_at_ms = now_us / 1000;
        self.last_response_ms = self.started_at_ms;

        let options = PortOptions {
            baud_rate: self.config.baud_rate,
            ..PortOptions::default()
        };
        let port = opener.open(options).map_err(|e| {
            warn!("ESC telemetry unavailable: {}", e);
            e
        })?;
        self.port = Some(port);
        info!("ESC telemetry port open at {} baud", options.baud_rate);
        Ok(())
    }

    /// Tear the subsystem down. Safe to call in any state.
    pub fn shutdown(&mut self) {
        if self.is_active() {
            info!("ESC telemetry disabled");
        }
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut port) = self.port.take() {
            port.close();
        }
        self.link.disarm();
        self.store.reset();
    }

    pub fn is_active(&self) -> bool {
        self.port.is_some()
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    /// Latest reading of one motor, or the combined reading.
    pub fn get_reading(&self, source: ReadingSource) -> SensorReading {
        self.store.get(source, self.motor_count())
    }

    pub fn debug(&self) -> DebugSnapshot {
        DebugSnapshot {
            motor_index: self.motor,
            timeouts: self.timeouts,
            temperature: self.last_temperature,
            rpm: self.last_rpm,
            overruns: self.link.overruns(),
        }
    }

    fn motor_count(&self) -> u8 {
        self.motors.motor_count().min(MAX_SUPPORTED_MOTORS as u8)
    }

    /// Advance the state machine. Call every few milliseconds with a
    /// monotonic timestamp in microseconds.
    pub fn process(&mut self, now_us: u64) {
        if !self.is_active() {
            return;
        }
        let now = now_us / 1000;

        match self.state {
            PollState::Wait => {
                if now.saturating_sub(self.started_at_ms) < self.config.boot_time_ms {
                    return;
                }
                self.start_polling(now);
            }
            PollState::Ready { triggered_at } => self.request(triggered_at),
            PollState::Pending { triggered_at } => self.check_response(now, triggered_at),
        }

        if now.saturating_sub(self.last_response_ms) >= self.config.link_timeout_ms {
            error!(
                "No ESC telemetry for {} ms, disabling",
                now.saturating_sub(self.last_response_ms)
            );
            self.shutdown();
        }
    }

    fn start_polling(&mut self, now: u64) {
        info!("ESC telemetry polling {} motors", self.motor_count());
        self.link.arm();
        self.motor = 0;
        self.attempts = 0;
        self.state = PollState::Ready { triggered_at: now };
        self.last_response_ms = now;
    }

    fn request(&mut self, triggered_at: u64) {
        let count = self.motor_count();
        if count == 0 {
            return;
        }
        if self.motor >= count {
            // Motor count shrank under us
            self.motor = 0;
        }
        // Anything already received cannot be the answer to this request
        self.link.clear();
        self.motors.request_telemetry(self.motor);
        self.state = PollState::Pending { triggered_at };
    }

    fn check_response(&mut self, now: u64, triggered_at: u64) {
        // A frame that made it in answers the polled motor, even if it
        // completed after the window closed
        if self.frame_status() == FrameStatus::Complete {
            self.select_next_motor(now);
            self.last_response_ms = now;
            return;
        }

        if now > triggered_at + self.config.request_timeout_ms {
            self.attempts = self.attempts.saturating_add(1);
            self.timeouts = self.timeouts.wrapping_add(1);
            self.state = PollState::Ready { triggered_at: now };

            if self.attempts >= self.config.max_attempts {
                warn!("ESC {} not responding, skipping", self.motor);
                self.store.mark_stale(self.motor);
                self.select_next_motor(now);
            } else {
                debug!("ESC {} timeout, attempt {}", self.motor, self.attempts);
            }
        }
    }

    fn frame_status(&mut self) -> FrameStatus {
        let frame = match self.link.take() {
            Some(frame) => frame,
            None => return FrameStatus::Pending,
        };

        match frame.decode() {
            Ok(reading) => {
                self.store.update(self.motor, reading);
                self.last_temperature = reading.temperature;
                self.last_rpm = reading.rpm;
                FrameStatus::Complete
            }
            Err(e) => {
                debug!("ESC {}: {}", self.motor, e);
                FrameStatus::Pending
            }
        }
    }

    fn select_next_motor(&mut self, now: u64) {
        let count = self.motor_count().max(1);
        self.motor = (self.motor + 1) % count;
        self.attempts = 0;
        self.state = PollState::Ready { triggered_at: now };
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::frame::RawFrame;
    use crate::motor::TelemetryRequests;
    use crate::parser::FrameReceiver;
    use crate::serial::FrameLink;
    use crate::store::ReadingSource::{Combined, Motor};

    const MS: u64 = 1000;

    struct MockPort {
        closed: Rc<Cell<bool>>,
    }

    impl SerialPort for MockPort {
        fn close(&mut self) {
            self.closed.set(true);
        }
    }

    #[derive(Default)]
    struct MockOpener {
        missing: bool,
        opened: u32,
        closed: Rc<Cell<bool>>,
        last_options: Option<PortOptions>,
    }

    impl PortOpener for MockOpener {
        type Port = MockPort;

        fn open(&mut self, options: PortOptions) -> Result<MockPort, Error> {
            self.last_options = Some(options);
            if self.missing {
                return Err(Error::NoPortConfigured);
            }
            self.opened += 1;
            self.closed.set(false);
            Ok(MockPort {
                closed: self.closed.clone(),
            })
        }
    }

    fn feed(rx: &mut FrameReceiver<'_>, frame: RawFrame) {
        for &b in frame.as_bytes().iter() {
            rx.push_byte(b);
        }
    }

    fn telemetry(temperature: u8, rpm: u16) -> RawFrame {
        let [rpm_hi, rpm_lo] = rpm.to_be_bytes();
        RawFrame::from_payload([temperature, 0x06, 0x40, 0x00, 0x32, 0x00, 0x10, rpm_hi, rpm_lo])
    }

    #[test]
    fn init_opens_port_at_telemetry_baud() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        assert!(!sensor.is_active());

        sensor.init(&mut opener, 0).unwrap();
        assert!(sensor.is_active());
        let options = opener.last_options.unwrap();
        assert_eq!(options.baud_rate, 115_200);
        assert!(!options.inverted);
        assert_eq!(sensor.state(), PollState::Wait);
    }

    #[test]
    fn init_without_port_stays_inactive() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener {
            missing: true,
            ..MockOpener::default()
        };
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());

        assert_eq!(sensor.init(&mut opener, 0), Err(Error::NoPortConfigured));
        assert!(!sensor.is_active());
        sensor.process(6_000 * MS);
        assert!(!requests.is_requested(0));
        assert!(sensor.get_reading(Motor(0)).stale);
    }

    #[test]
    fn no_request_during_boot_grace() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        for t in 0..5_000 {
            sensor.process(t * MS);
            sensor.process(t * MS + 500);
            for motor in 0..4 {
                assert!(!requests.is_requested(motor), "request at {} ms", t);
            }
        }
        assert_eq!(sensor.state(), PollState::Wait);

        sensor.process(5_000 * MS);
        assert_eq!(sensor.state(), PollState::Ready { triggered_at: 5_000 });
        sensor.process(5_001 * MS);
        assert!(requests.take_request(0));
        assert_eq!(sensor.state(), PollState::Pending { triggered_at: 5_000 });
    }

    #[test]
    fn boot_grace_counts_from_init() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 20_000 * MS).unwrap();

        sensor.process(24_999 * MS);
        assert_eq!(sensor.state(), PollState::Wait);
        sensor.process(25_000 * MS);
        assert_eq!(sensor.state(), PollState::Ready { triggered_at: 25_000 });
    }

    #[test]
    fn boot_chatter_is_discarded() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(1_000 * MS);
        feed(&mut rx, telemetry(99, 1));
        assert!(!rx.is_armed());

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        sensor.process(5_002 * MS);
        assert!(sensor.get_reading(Motor(0)).stale);
        assert_eq!(sensor.state(), PollState::Pending { triggered_at: 5_000 });
    }

    #[test]
    fn valid_frame_updates_polled_motor_and_advances() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        assert!(requests.take_request(0));
        feed(&mut rx, telemetry(42, 7000));
        sensor.process(5_003 * MS);

        let reading = sensor.get_reading(Motor(0));
        assert!(!reading.stale);
        assert_eq!(reading.temperature, 42);
        assert_eq!(reading.voltage, 1600);
        assert_eq!(reading.current, 50);
        assert_eq!(reading.consumption, 16);
        assert_eq!(reading.rpm, 7000);
        assert!(sensor.get_reading(Motor(1)).stale);

        assert_eq!(sensor.state(), PollState::Ready { triggered_at: 5_003 });
        let debug = sensor.debug();
        assert_eq!(debug.motor_index, 1);
        assert_eq!(debug.temperature, 42);
        assert_eq!(debug.rpm, 7000);
    }

    #[test]
    fn corrupted_frame_is_dropped() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(4);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        let mut bytes = *telemetry(42, 7000).as_bytes();
        bytes[4] ^= 0x10;
        feed(&mut rx, RawFrame::new(bytes));
        sensor.process(5_002 * MS);

        assert!(sensor.get_reading(Motor(0)).stale);
        assert_eq!(sensor.state(), PollState::Pending { triggered_at: 5_000 });
        assert_eq!(sensor.debug().timeouts, 0);
        assert_eq!(sensor.debug().motor_index, 0);
    }

    #[test]
    fn silent_motor_gets_four_requests_then_skipped() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(2);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        // Give motor 0 a reading first so we can watch it go stale
        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        assert!(requests.take_request(0));
        feed(&mut rx, telemetry(30, 100));
        sensor.process(5_002 * MS);
        assert!(!sensor.get_reading(Motor(0)).stale);

        let mut t = 5_003;
        let mut motor0_requests = 0;
        let mut motor1_requests = 0;
        while motor0_requests == 0 {
            sensor.process(t * MS);
            if requests.take_request(1) {
                motor1_requests += 1;
            }
            if requests.take_request(0) {
                motor0_requests += 1;
            }
            t += 1;
        }
        assert_eq!(motor1_requests, 4);
        assert_eq!(sensor.debug().timeouts, 4);
        assert!(sensor.get_reading(Motor(1)).stale);
        assert!(!sensor.get_reading(Motor(0)).stale);
    }

    fn pending_since(sensor: &EscSensor<'_, MockPort, TelemetryRequests>) -> u64 {
        match sensor.state() {
            PollState::Pending { triggered_at } => triggered_at,
            state => panic!("expected Pending, got {:?}", state),
        }
    }

    #[test]
    fn frame_completing_on_last_attempt_goes_to_polled_motor() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(2);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        // Three timeouts on motor 0, then its fourth request goes out
        let mut t = 5_000;
        while sensor.debug().timeouts < 3 {
            sensor.process(t * MS);
            requests.take_request(0);
            t += 1;
        }
        sensor.process(t * MS);
        assert!(requests.take_request(0));
        let triggered_at = pending_since(&sensor);

        // ESC 0 answers just as the last window runs out
        feed(&mut rx, telemetry(77, 300));
        sensor.process((triggered_at + 101) * MS);

        let reading = sensor.get_reading(Motor(0));
        assert!(!reading.stale);
        assert_eq!(reading.temperature, 77);
        assert!(sensor.get_reading(Motor(1)).stale);
        assert_eq!(sensor.debug().timeouts, 3);
        assert_eq!(sensor.debug().motor_index, 1);

        // Motor 1's own window sees nothing of ESC 0
        sensor.process((triggered_at + 102) * MS);
        assert!(requests.take_request(1));
        sensor.process((triggered_at + 103) * MS);
        assert!(sensor.get_reading(Motor(1)).stale);
    }

    #[test]
    fn frame_arriving_with_timeout_is_not_requested_again() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(2);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        assert!(requests.take_request(0));
        feed(&mut rx, telemetry(55, 900));
        sensor.process(5_101 * MS);

        assert_eq!(sensor.get_reading(Motor(0)).temperature, 55);
        assert_eq!(sensor.state(), PollState::Ready { triggered_at: 5_101 });
        assert_eq!(sensor.debug().timeouts, 0);
        assert_eq!(sensor.debug().motor_index, 1);

        sensor.process(5_102 * MS);
        assert!(!requests.take_request(0));
        assert!(requests.take_request(1));
    }

    #[test]
    fn stray_frame_before_request_is_not_credited() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(2);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        feed(&mut rx, telemetry(30, 100));
        sensor.process(5_002 * MS);
        assert_eq!(sensor.debug().motor_index, 1);

        // ESC 0 talks again while motor 1 is about to be asked
        feed(&mut rx, telemetry(10, 100));
        sensor.process(5_003 * MS);
        assert!(requests.take_request(1));
        feed(&mut rx, telemetry(99, 4000));
        sensor.process(5_004 * MS);

        let reading = sensor.get_reading(Motor(1));
        assert_eq!(reading.temperature, 99);
        assert_eq!(reading.rpm, 4000);
        assert_eq!(sensor.get_reading(Motor(0)).temperature, 30);
        assert_eq!(sensor.debug().overruns, 1);
    }

    #[test]
    fn newest_frame_wins_within_a_window() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        feed(&mut rx, telemetry(10, 100));
        feed(&mut rx, telemetry(99, 4000));
        sensor.process(5_002 * MS);

        assert_eq!(sensor.get_reading(Motor(0)).temperature, 99);
        assert_eq!(sensor.debug().overruns, 1);
        assert_eq!(sensor.debug().temperature, 99);
    }

    #[test]
    fn reinit_clears_debug_values() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        feed(&mut rx, telemetry(61, 2500));
        sensor.process(5_002 * MS);
        assert_eq!(sensor.debug().temperature, 61);

        sensor.shutdown();
        sensor.init(&mut opener, 6_000 * MS).unwrap();
        let debug = sensor.debug();
        assert_eq!(debug.temperature, 0);
        assert_eq!(debug.rpm, 0);
        assert_eq!(debug.timeouts, 0);
        assert_eq!(debug.motor_index, 0);
    }

    #[test]
    fn timeout_is_strictly_after_window() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        sensor.process(5_100 * MS);
        assert_eq!(sensor.state(), PollState::Pending { triggered_at: 5_000 });
        sensor.process(5_101 * MS);
        assert_eq!(sensor.state(), PollState::Ready { triggered_at: 5_101 });
        assert_eq!(sensor.debug().timeouts, 1);
        assert_eq!(sensor.debug().motor_index, 0);
    }

    #[test]
    fn watchdog_disables_after_link_silence() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(2);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        sensor.process(5_000 * MS);
        sensor.process(5_001 * MS);
        feed(&mut rx, telemetry(30, 100));
        sensor.process(5_002 * MS);
        assert!(!sensor.get_reading(Motor(0)).stale);

        for t in 5_003..15_002 {
            sensor.process(t * MS);
            assert!(sensor.is_active(), "disabled early at {} ms", t);
        }
        sensor.process(15_002 * MS);
        assert!(!sensor.is_active());
        assert!(opener.closed.get());
        assert!(!rx.is_armed());
        assert!(sensor.get_reading(Motor(0)).stale);
        assert!(sensor.get_reading(Motor(1)).stale);
        assert!(sensor.get_reading(Combined).stale);

        // Stays down
        sensor.process(20_000 * MS);
        assert!(!sensor.is_active());
    }

    #[test]
    fn shutdown_is_safe_in_every_state() {
        let mut link = FrameLink::new();
        let (_rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());

        sensor.shutdown();
        assert!(!sensor.is_active());

        for steps in 0..4 {
            sensor.init(&mut opener, 0).unwrap();
            for i in 0..steps {
                sensor.process((5_000 + i) * MS);
            }
            sensor.shutdown();
            assert!(!sensor.is_active());
            assert!(opener.closed.get());
            sensor.shutdown();
        }
    }

    #[test]
    fn reinit_after_watchdog_restarts_polling() {
        let mut link = FrameLink::new();
        let (mut rx, source) = link.split();
        let requests = TelemetryRequests::new(1);
        let mut opener = MockOpener::default();
        let mut sensor = EscSensor::new(source, &requests, EscSensorConfig::default());
        sensor.init(&mut opener, 0).unwrap();

        let mut t = 0;
        while sensor.is_active() {
            sensor.process(t * MS);
            requests.take_request(0);
            t += 1;
        }
        assert_eq!(t, 15_001);

        sensor.init(&mut opener, t * MS).unwrap();
        assert_eq!(opener.opened, 2);
        assert!(sensor.is_active());
        assert_eq!(sensor.debug().timeouts, 0);

        sensor.process((t + 5_000) * MS);
        sensor.process((t + 5_001) * MS);
        assert!(requests.take_request(0));
        feed(&mut rx, telemetry(50, 1234));
        sensor.process((t + 5_002) * MS);
        assert_eq!(sensor.get_reading(Motor(0)).rpm, 1234);
    }
}
