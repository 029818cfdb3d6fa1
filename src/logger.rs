use cortex_m_semihosting::hprintln;
use log::{LevelFilter, Metadata, Record};

/// Routes `log` records to the debugger console.
pub struct SemihostingLogger;

static LOGGER: SemihostingLogger = SemihostingLogger;

impl log::Log for SemihostingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            hprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Must be called once, before interrupts are enabled.
pub fn init(level: LevelFilter) {
    // thumbv6m has no compare-and-swap, so only the racy setter exists
    unsafe {
        log::set_logger_racy(&LOGGER).ok();
        log::set_max_level_racy(level);
    }
}
