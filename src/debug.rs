/// Read-only view of the poller for debug output. Not needed for correct
/// operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugSnapshot {
    /// Motor currently being polled.
    pub motor_index: u8,
    /// Response timeouts since the last `init`.
    pub timeouts: u32,
    /// From the last frame that passed its CRC.
    pub temperature: u8,
    pub rpm: u16,
    /// Frames lost because the previous one was still unconsumed.
    pub overruns: u32,
}
