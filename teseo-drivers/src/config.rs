//! Transport timing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing used by the transports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransportConfig {
    /// How long the reset line is held low
    pub reset_pulse_ms: u32,
    /// Wait after releasing reset before the receiver accepts commands
    pub boot_delay_ms: u32,
    /// Pause between two I2C polls that returned no data
    pub poll_interval_ms: u32,
    /// Consecutive empty I2C polls before a read gives up
    pub idle_polls: u16,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            reset_pulse_ms: 10,
            boot_delay_ms: 4000,
            poll_interval_ms: 10,
            idle_polls: 50,
        }
    }
}

impl TransportConfig {
    /// Longest silence a read waits through before giving up
    ///
    /// The I2C transport reaches it by polling; the UART transport hands
    /// it to `UartRx::read_byte_timeout`.
    pub fn idle_timeout_ms(&self) -> u32 {
        self.poll_interval_ms
            .saturating_mul(u32::from(self.idle_polls.saturating_sub(1)))
    }
}
