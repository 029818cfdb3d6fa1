use core::cmp::max;

use crate::frame::SensorReading;
use crate::motor::MAX_SUPPORTED_MOTORS;

/// Selector value that asks for the combined reading.
pub const ESC_SENSOR_COMBINED: u8 = 255;

/// Which reading to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingSource {
    Motor(u8),
    /// All motors with fresh data, folded into one reading.
    Combined,
}

impl From<u8> for ReadingSource {
    fn from(index: u8) -> Self {
        if index == ESC_SENSOR_COMBINED {
            ReadingSource::Combined
        } else {
            ReadingSource::Motor(index)
        }
    }
}

/// Latest reading per motor.
#[derive(Debug, Clone)]
pub struct SensorStore {
    readings: [SensorReading; MAX_SUPPORTED_MOTORS],
}

impl SensorStore {
    pub const fn new() -> Self {
        SensorStore {
            readings: [SensorReading::STALE; MAX_SUPPORTED_MOTORS],
        }
    }

    pub fn reset(&mut self) {
        for reading in self.readings.iter_mut() {
            reading.stale = true;
        }
    }

    pub fn update(&mut self, motor: u8, reading: SensorReading) {
        if let Some(slot) = self.readings.get_mut(usize::from(motor)) {
            *slot = reading;
        }
    }

    pub fn mark_stale(&mut self, motor: u8) {
        if let Some(slot) = self.readings.get_mut(usize::from(motor)) {
            slot.stale = true;
        }
    }

    /// Look up a reading. Motors at or above `motor_count` read as stale.
    pub fn get(&self, source: ReadingSource, motor_count: u8) -> SensorReading {
        match source {
            ReadingSource::Motor(motor) if motor < motor_count => self
                .readings
                .get(usize::from(motor))
                .copied()
                .unwrap_or(SensorReading::STALE),
            ReadingSource::Motor(_) => SensorReading::STALE,
            ReadingSource::Combined => self.combined(motor_count),
        }
    }

    /// Hottest ESC, summed current and consumption, mean voltage and rpm.
    pub fn combined(&self, motor_count: u8) -> SensorReading {
        let count = usize::from(motor_count).min(MAX_SUPPORTED_MOTORS);
        let mut temperature = 0u8;
        let mut voltage = 0u32;
        let mut current = 0u32;
        let mut consumption = 0u32;
        let mut rpm = 0u32;
        let mut active = 0u32;

        for reading in self.readings[..count].iter().filter(|r| !r.stale) {
            temperature = max(temperature, reading.temperature);
            voltage += u32::from(reading.voltage);
            current += reading.current;
            consumption += reading.consumption;
            rpm += u32::from(reading.rpm);
            active += 1;
        }

        if active == 0 {
            return SensorReading::STALE;
        }

        // Means of u16 values fit back into u16
        SensorReading {
            stale: false,
            temperature,
            voltage: (voltage / active) as u16,
            current,
            consumption,
            rpm: (rpm / active) as u16,
        }
    }
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::new()
    }
}
