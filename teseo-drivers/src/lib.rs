//! Hardware transports for the Teseo driver
//!
//! This crate provides concrete implementations of
//! [`teseo_core::Transport`] on top of the traits in `teseo-hal`:
//!
//! - [`I2cTransport`] - I2C, polling the receiver's output buffer
//! - [`UartTransport`] - blocking UART byte stream
//!
//! Both drive an optional active-low reset line and take their timing from
//! [`TransportConfig`].

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod transport;

pub use config::TransportConfig;
pub use transport::{I2cTransport, NoResetPin, TransportError, UartTransport};
