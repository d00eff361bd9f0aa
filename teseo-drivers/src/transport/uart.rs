//! UART transport
//!
//! The receiver answers on the same serial line it listens on. Reads pull
//! one byte at a time until the status line is complete, or until the line
//! stays silent for [`TransportConfig::idle_timeout_ms`].

use embedded_hal::delay::DelayNs;
use teseo_core::Transport;
use teseo_hal::{OutputPin, UartRx, UartTx};
use teseo_protocol::RawReply;

use super::{pulse_reset, LineAssembler, NoResetPin, TransportError};
use crate::config::TransportConfig;

/// [`Transport`] over a UART
pub struct UartTransport<U, D, P = NoResetPin> {
    uart: U,
    delay: D,
    reset: Option<P>,
    config: TransportConfig,
}

impl<U, D: DelayNs> UartTransport<U, D, NoResetPin> {
    /// Create a transport without a reset line
    pub fn new(uart: U, delay: D, config: TransportConfig) -> Self {
        Self {
            uart,
            delay,
            reset: None,
            config,
        }
    }

    /// Attach the receiver's reset line
    pub fn with_reset_pin<P: OutputPin>(self, pin: P) -> UartTransport<U, D, P> {
        UartTransport {
            uart: self.uart,
            delay: self.delay,
            reset: Some(pin),
            config: self.config,
        }
    }
}

impl<U, D, P> UartTransport<U, D, P> {
    /// Give the UART, delay and reset pin back
    pub fn release(self) -> (U, D, Option<P>) {
        (self.uart, self.delay, self.reset)
    }
}

impl<U, D, P> Transport for UartTransport<U, D, P>
where
    U: UartTx + UartRx<Error = <U as UartTx>::Error>,
    D: DelayNs,
    P: OutputPin,
{
    type Error = TransportError<<U as UartTx>::Error>;

    fn write(&mut self, command: &str) -> Result<(), Self::Error> {
        self.uart
            .write_blocking(command.as_bytes())
            .map_err(TransportError::Bus)?;
        self.uart.flush().map_err(TransportError::Bus)
    }

    fn read(&mut self, reply: &mut RawReply) -> Result<(), Self::Error> {
        let timeout_ms = self.config.idle_timeout_ms();
        let mut lines = LineAssembler::new();
        while let Some(byte) = self
            .uart
            .read_byte_timeout(timeout_ms)
            .map_err(TransportError::Bus)?
        {
            if lines.push(reply, byte) {
                return lines.finish();
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("uart read timed out with {} bytes", reply.len());
        lines.finish()
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        let pin = self.reset.as_mut().ok_or(TransportError::NoResetLine)?;
        pulse_reset(pin, &mut self.delay, &self.config);
        Ok(())
    }

    fn can_reset(&self) -> bool {
        self.reset.is_some()
    }
}
