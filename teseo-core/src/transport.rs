//! Transport capabilities
//!
//! The engine needs three blocking operations from the board. They are
//! grouped in one trait so a single value carries all of them.

use teseo_protocol::RawReply;

/// Byte transport to the receiver
///
/// All calls block until the operation is complete.
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Send one command, terminator included
    ///
    /// Must complete before the next [`read`](Transport::read).
    fn write(&mut self, command: &str) -> Result<(), Self::Error>;

    /// Receive one complete reply into `reply`
    ///
    /// Blocks until the data lines and the status line have arrived.
    /// Leaving `reply` empty means "nothing more", which ends the
    /// acknowledgement wait of the init script.
    ///
    /// The engine puts no time limit on this call. An implementation that
    /// can wait forever must bound itself (bus timeout, idle poll count),
    /// otherwise [`Teseo::init`](crate::Teseo::init) may never return.
    fn read(&mut self, reply: &mut RawReply) -> Result<(), Self::Error>;

    /// Pulse the reset line and wait for the receiver to boot
    ///
    /// Takes in the order of seconds.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Returns true if [`reset`](Transport::reset) drives a real reset line
    fn can_reset(&self) -> bool {
        true
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, command: &str) -> Result<(), Self::Error> {
        (**self).write(command)
    }

    fn read(&mut self, reply: &mut RawReply) -> Result<(), Self::Error> {
        (**self).read(reply)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        (**self).reset()
    }

    fn can_reset(&self) -> bool {
        (**self).can_reset()
    }
}
