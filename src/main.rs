#![no_std]
#![no_main]

// pick a panicking behavior
use panic_semihosting as _;
// use panic_abort as _; // requires nightly
// use panic_itm as _; // logs messages over ITM; requires ITM support

use escsensor::TelemetryRequests;

mod logger;

/// Telemetry request flags, shared with the DShot output driver.
pub static MOTORS: TelemetryRequests = TelemetryRequests::new(4);

#[rtic::app(device = stm32f0xx_hal::pac, peripherals = true, dispatchers = [USART2])]
mod app {
    use systick_monotonic::*;

    use stm32f0xx_hal as hal;
    use stm32f0xx_hal::pac as pac;
    use hal::prelude::*;
    use hal::gpio;
    use hal::serial::Serial;
    use cortex_m::interrupt;
    use log::{info, LevelFilter};

    use escsensor::{
        EscSensor, EscSensorConfig, Error, FrameLink, FrameReceiver, PortOpener, PortOptions,
        ReadingSource, SerialPort, TelemetryRequests,
    };

    // Scheduler period for the telemetry state machine
    const POLL_PERIOD_MS: u64 = 1;
    const REPORT_PERIOD_MS: u64 = 1000;

    type TelemetrySerial = Serial<
        pac::USART1,
        gpio::gpiob::PB6<gpio::Alternate<gpio::AF0>>,
        gpio::gpiob::PB7<gpio::Alternate<gpio::AF0>>,
    >;

    /// USART1 receiving ESC telemetry. The receive interrupt owns the
    /// `Serial`; closing only masks reception at the register level.
    pub struct Usart1Port;

    impl SerialPort for Usart1Port {
        fn close(&mut self) {
            let usart1 = unsafe { pac::Peripherals::steal().USART1 };
            usart1.cr1.modify(|_, w| w.rxneie().clear_bit().re().clear_bit());
        }
    }

    /// Hands out USART1 the first time, re-enables reception afterwards.
    struct Usart1Opener<'r> {
        rcc: &'r mut hal::rcc::Rcc,
        parts: Option<(
            pac::USART1,
            gpio::gpiob::PB6<gpio::Alternate<gpio::AF0>>,
            gpio::gpiob::PB7<gpio::Alternate<gpio::AF0>>,
        )>,
        serial: Option<TelemetrySerial>,
    }

    impl PortOpener for Usart1Opener<'_> {
        type Port = Usart1Port;

        fn open(&mut self, options: PortOptions) -> Result<Usart1Port, Error> {
            match self.parts.take() {
                Some((usart, tx, rx)) => {
                    let mut serial = Serial::usart1(usart, (tx, rx), options.baud_rate.bps(), self.rcc);
                    serial.listen(hal::serial::Event::Rxne);
                    self.serial = Some(serial);
                }
                None => {
                    let usart1 = unsafe { pac::Peripherals::steal().USART1 };
                    usart1.cr1.modify(|_, w| w.re().set_bit().rxneie().set_bit());
                }
            }
            Ok(Usart1Port)
        }
    }

    #[monotonic(binds = SysTick, default = true, priority = 1)]
    type MyMono = Systick<1000>; // 1 kHz / 1 ms granularity

    // Resources shared between tasks
    #[shared]
    struct Shared {
        sensor: EscSensor<'static, Usart1Port, TelemetryRequests>,
    }

    // Local resources to specific tasks (cannot be shared)
    #[local]
    struct Local {
        receiver: FrameReceiver<'static>,
        serial: TelemetrySerial,
    }

    #[init(local = [link: FrameLink = FrameLink::new()])]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        crate::logger::init(LevelFilter::Info);

        let mut flash = cx.device.FLASH;
        let mut rcc = cx.device.RCC.configure().sysclk(48.mhz()).pclk(48.mhz()).freeze(&mut flash);
        let mono = Systick::new(cx.core.SYST, rcc.clocks.sysclk().0);
        let gpiob = cx.device.GPIOB.split(&mut rcc);

        // Create a fake critical section to lie to into_alternate_afx calls.
        let fake_cs = unsafe { interrupt::CriticalSection::new() };
        // The ESC signal wires are tied together onto RX. TX is unused.
        let tx = gpiob.pb6.into_alternate_af0(&fake_cs);
        let rx = gpiob.pb7.into_alternate_af0(&fake_cs);

        let (receiver, source) = cx.local.link.split();
        let mut sensor = EscSensor::new(source, &crate::MOTORS, EscSensorConfig::default());

        let mut opener = Usart1Opener {
            rcc: &mut rcc,
            parts: Some((cx.device.USART1, tx, rx)),
            serial: None,
        };
        sensor.init(&mut opener, 0).unwrap();
        let serial = opener.serial.take().unwrap();

        poll::spawn().unwrap();
        report::spawn_after(REPORT_PERIOD_MS.millis()).unwrap();

        (
            Shared { sensor },
            Local { receiver, serial },
            init::Monotonics(mono),
        )
    }

    /// Runs the telemetry state machine
    #[task(shared = [sensor])]
    fn poll(mut cx: poll::Context) {
        let now_us = monotonics::now().duration_since_epoch().to_micros();
        cx.shared.sensor.lock(|sensor| sensor.process(now_us));

        poll::spawn_after(POLL_PERIOD_MS.millis()).unwrap();
    }

    // Periodically dump the telemetry for debugging
    #[task(shared = [sensor])]
    fn report(mut cx: report::Context) {
        let (active, debug, combined) = cx.shared.sensor.lock(|sensor| {
            (sensor.is_active(), sensor.debug(), sensor.get_reading(ReadingSource::Combined))
        });

        if active {
            info!(
                "esc={} timeouts={} overruns={} temp={} rpm={}",
                debug.motor_index, debug.timeouts, debug.overruns, debug.temperature, debug.rpm
            );
            if !combined.stale {
                info!(
                    "combined: {}.{:02}V {}.{:02}A {}mAh",
                    combined.voltage / 100,
                    combined.voltage % 100,
                    combined.current / 100,
                    combined.current % 100,
                    combined.consumption
                );
            }
        }

        report::spawn_after(REPORT_PERIOD_MS.millis()).unwrap();
    }

    // Hardware task, bound to a hardware interrupt
    #[task(binds = USART1, priority = 2, local = [receiver, serial])]
    fn uart1_interrupt(cx: uart1_interrupt::Context) {
        match cx.local.serial.read() {
            Ok(rxbyte) => {
                cx.local.receiver.push_byte(rxbyte);
            },
            Err(_) => () // Error can be nb::WouldBlock if empty, or Other for uart error
                         // flags such as framing error etc
        };
    }
}
