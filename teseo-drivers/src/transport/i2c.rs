//! I2C transport
//!
//! Over I2C the receiver is a byte queue: every read returns the next
//! pending output bytes, or `0xFF` filler when it has nothing to say. A
//! read is therefore a polling loop that stops on a complete status line,
//! or after `idle_polls` empty chunks in a row.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use teseo_core::Transport;
use teseo_hal::{I2cBus, I2cConfig, OutputPin};
use teseo_protocol::RawReply;

use super::{pulse_reset, LineAssembler, NoResetPin, TransportError};
use crate::config::TransportConfig;

/// Bytes fetched per I2C read
pub const READ_CHUNK: usize = 32;

/// Filler the receiver returns when its output queue is empty
const IDLE_BYTE: u8 = 0xFF;

/// [`Transport`] over an I2C bus
pub struct I2cTransport<B, D, P = NoResetPin> {
    bus: B,
    delay: D,
    reset: Option<P>,
    i2c: I2cConfig,
    config: TransportConfig,
    /// Bytes read past the end of the previous reply
    carry: Vec<u8, READ_CHUNK>,
}

impl<B: I2cBus, D: DelayNs> I2cTransport<B, D, NoResetPin> {
    /// Create a transport without a reset line
    pub fn new(bus: B, delay: D, i2c: I2cConfig, config: TransportConfig) -> Self {
        Self {
            bus,
            delay,
            reset: None,
            i2c,
            config,
            carry: Vec::new(),
        }
    }

    /// Attach the receiver's reset line
    pub fn with_reset_pin<P: OutputPin>(self, pin: P) -> I2cTransport<B, D, P> {
        I2cTransport {
            bus: self.bus,
            delay: self.delay,
            reset: Some(pin),
            i2c: self.i2c,
            config: self.config,
            carry: self.carry,
        }
    }
}

impl<B, D, P> I2cTransport<B, D, P> {
    /// Give the bus, delay and reset pin back
    pub fn release(self) -> (B, D, Option<P>) {
        (self.bus, self.delay, self.reset)
    }

    fn keep(&mut self, rest: &[u8]) {
        self.carry.clear();
        // rest never exceeds one chunk
        let _ = self.carry.extend_from_slice(rest);
    }
}

impl<B, D, P> Transport for I2cTransport<B, D, P>
where
    B: I2cBus,
    D: DelayNs,
    P: OutputPin,
{
    type Error = TransportError<B::Error>;

    fn write(&mut self, command: &str) -> Result<(), Self::Error> {
        self.bus
            .write(self.i2c.address, command.as_bytes())
            .map_err(TransportError::Bus)
    }

    fn read(&mut self, reply: &mut RawReply) -> Result<(), Self::Error> {
        let mut lines = LineAssembler::new();

        let carried = core::mem::take(&mut self.carry);
        if let Some(used) = lines.feed(reply, &carried) {
            self.keep(&carried[used..]);
            return lines.finish();
        }

        let mut chunk = [IDLE_BYTE; READ_CHUNK];
        let mut idle = 0u16;
        loop {
            self.bus
                .read(self.i2c.address, &mut chunk)
                .map_err(TransportError::Bus)?;

            if chunk.iter().all(|&b| b == IDLE_BYTE) {
                idle += 1;
                if idle >= self.config.idle_polls {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("i2c read idle, giving up with {} bytes", reply.len());
                    return lines.finish();
                }
                self.delay.delay_ms(self.config.poll_interval_ms);
                continue;
            }

            idle = 0;
            if let Some(used) = lines.feed(reply, &chunk) {
                self.keep(&chunk[used..]);
                return lines.finish();
            }
        }
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
