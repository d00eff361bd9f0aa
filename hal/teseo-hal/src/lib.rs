//! Teseo Hardware Abstraction Layer
//!
//! This crate defines the board-facing traits the Teseo transports are
//! written against. A board support crate implements them once for its
//! chip, and the same driver code runs on any of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  teseo-core (protocol engine, init)     │
//! └─────────────────────────────────────────┘
//!                     │ Transport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  teseo-drivers (I2C / UART transports)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  teseo-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Reset line
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig};
pub use uart::{UartRx, UartTx};
