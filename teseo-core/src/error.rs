//! Engine errors
//!
//! A reply that fails validation is not an error: it comes back with
//! `valid == false` and the caller decides whether to ask again.

/// Errors raised by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport failed to move bytes
    Transport(E),
    /// `init` needs a reset line and the transport has none
    ///
    /// This is a wiring mistake, reported before anything is sent.
    ResetUnavailable,
}

impl<E> Error<E> {
    /// Check if this is a wiring mistake rather than an I/O failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::ResetUnavailable)
    }
}
