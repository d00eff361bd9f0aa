//! Transport implementations
//!
//! Both transports assemble the byte stream into lines and stop reading as
//! soon as a line starting with [`STATUS_PREFIX`] is complete: that is the
//! status echo closing a reply, or an acknowledgement.

pub mod i2c;
pub mod uart;

pub use i2c::I2cTransport;
pub use uart::UartTransport;

use embedded_hal::delay::DelayNs;
use teseo_hal::OutputPin;
use teseo_protocol::{RawReply, STATUS_PREFIX};

use crate::config::TransportConfig;

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// The bus reported an error
    Bus(E),
    /// The reply does not fit a [`RawReply`]
    ///
    /// The rest of the reply has been read and discarded, so the next
    /// request starts on a clean stream.
    Overflow,
    /// Reset requested on a transport built without a reset line
    NoResetLine,
}

/// Placeholder for a transport without a reset line
///
/// A transport built with it reports `can_reset() == false`, so
/// [`Teseo::init`](teseo_core::Teseo::init) refuses to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl OutputPin for NoResetPin {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}
}

/// Hold the active-low reset line, release it and wait for boot
fn pulse_reset<P: OutputPin, D: DelayNs>(pin: &mut P, delay: &mut D, config: &TransportConfig) {
    pin.set_low();
    delay.delay_ms(config.reset_pulse_ms);
    pin.set_high();
    delay.delay_ms(config.boot_delay_ms);

    #[cfg(feature = "defmt")]
    defmt::debug!("teseo reset, waited {} ms for boot", config.boot_delay_ms);
}

/// Splits incoming bytes into lines and spots the end of a reply
///
/// Lines are tracked on the byte stream itself, so a reply that no longer
/// fits its [`RawReply`] is still followed to its status line.
#[derive(Debug, Default)]
struct LineAssembler {
    /// Bytes of the current line seen so far
    column: usize,
    /// The current line matches [`STATUS_PREFIX`] up to `column`
    status: bool,
    last_was_cr: bool,
    overflowed: bool,
}

impl LineAssembler {
    fn new() -> Self {
        Self::default()
    }

    /// Append one byte; returns true once a status line is complete
    ///
    /// Non-ASCII bytes (including the `0xFF` I2C idle filler) are dropped.
    /// Once the reply is full, bytes are only scanned for line ends.
    fn push(&mut self, reply: &mut RawReply, byte: u8) -> bool {
        if !byte.is_ascii() {
            return false;
        }
        if !self.overflowed && reply.push(char::from(byte)).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("reply overflow, discarding up to the status line");
            self.overflowed = true;
        }

        let prefix = STATUS_PREFIX.as_bytes();
        if let Some(&expected) = prefix.get(self.column) {
            self.status = (self.column == 0 || self.status) && byte == expected;
        }
        self.column += 1;

        let line_end = self.last_was_cr && byte == b'\n';
        self.last_was_cr = byte == b'\r';
        if !line_end {
            return false;
        }
        let complete = self.status;
        self.column = 0;
        self.status = false;
        complete
    }

    /// Append bytes until a reply completes
    ///
    /// Returns the number of bytes consumed when it does.
    fn feed(&mut self, reply: &mut RawReply, bytes: &[u8]) -> Option<usize> {
        bytes
            .iter()
            .position(|&byte| self.push(reply, byte))
            .map(|i| i + 1)
    }

    /// Outcome of the read once it has stopped
    fn finish<E>(&self) -> Result<(), TransportError<E>> {
        if self.overflowed {
            Err(TransportError::Overflow)
        } else {
            Ok(())
        }
    }
}
