//! I2C bus abstractions
//!
//! Provides the I2C master operations the Teseo I2C transport needs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default 7-bit I2C address of the Teseo-LIV3 receiver
pub const TESEO_I2C_ADDRESS: u8 = 0x3A;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// I2C configuration
///
/// The bus clock is set up by the board; the receiver handles both
/// standard and fast mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::with_address(TESEO_I2C_ADDRESS)
    }
}

impl I2cConfig {
    /// Receiver reprogrammed to another address
    pub const fn with_address(address: u8) -> Self {
        Self { address }
    }
}
