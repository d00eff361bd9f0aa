//! UART serial communication abstractions
//!
//! Provides traits for blocking serial communication that can be
//! implemented by chip-specific HALs. The Teseo factory setting is
//! 9600 baud 8N1; configuring the peripheral is left to the board.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read a single byte, waiting at most `timeout_ms` for it
    ///
    /// Returns `Ok(None)` when the line stayed silent for the whole
    /// timeout. Errors are reserved for faults such as framing or
    /// overrun errors.
    fn read_byte_timeout(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error>;
}
