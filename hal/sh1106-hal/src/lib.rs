//! SH1106 Bus Abstraction Layer
//!
//! This crate defines the transport capability the SH1106 driver consumes.
//! The driver never touches bus registers itself; it only frames
//! transactions and pushes bytes through a [`Transport`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sh1106-display (controller session)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sh1106-hal (this crate - Transport)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ I2cTransport  │       │ custom bit-   │
//! │ (embedded-hal)│       │ banged buses  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Start/byte/stop framed write transport
//!
//! # Adapters
//!
//! - [`i2c::I2cTransport`] - Buffers a transaction and issues it as a single
//!   `embedded_hal::i2c::I2c::write`

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod transport;

// Re-export key types at crate root for convenience
pub use i2c::{
    I2cConfig, I2cTransport, MAX_TRANSACTION_LEN, SH1106_ADDRESS_ALT, SH1106_ADDRESS_PRIMARY,
};
pub use transport::{Transport, TransportError};
