//! CRC-8 used by the KISS telemetry frames.
//!
//! Polynomial x^8 + x^2 + x + 1 (0x07), initial value 0x00, no reflection,
//! no output xor. Computed bit by bit, no lookup table.

const CRC8_POLY: u8 = 0x07;

/// Fold one byte into a running CRC.
pub fn update_crc8(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// CRC of a whole buffer. An empty buffer gives 0.
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |crc, &b| update_crc8(crc, b))
}
