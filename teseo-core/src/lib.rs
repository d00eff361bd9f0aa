//! Protocol engine for the ST Teseo GNSS receiver
//!
//! This crate drives the receiver through its command/response protocol
//! without knowing how bytes reach it:
//!
//! - [`Transport`] - the write / read / reset capabilities an integrator
//!   provides (I2C, UART, a test double...)
//! - [`Teseo`] - one write, one blocking read and one parse per query
//! - [`InitState`] - the fixed start-up script, run by [`Teseo::init`]
//!
//! Everything is synchronous. The only suspension points are inside the
//! transport calls; parsing never blocks. A [`Teseo`] owns its scratch
//! buffer, so share it between callers only behind a mutex.
//!
//! # Example
//!
//! ```ignore
//! use teseo_core::Teseo;
//!
//! let mut gps = Teseo::new(transport);
//! gps.init()?; // optional when the receiver is preconfigured
//!
//! let reply = gps.ask_gll()?;
//! if reply.valid {
//!     handle_sentence(reply.line);
//! }
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod init;
pub mod transport;

#[cfg(test)]
mod mock;

pub use engine::{Reply, Teseo, SINGLE_LINE_CAPACITY};
pub use error::Error;
pub use init::InitState;
pub use transport::Transport;

pub use teseo_protocol::{Command, ParseResult, Query, RawReply, Record};
