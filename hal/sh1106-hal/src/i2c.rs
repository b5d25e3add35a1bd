//! I2C transport adapter
//!
//! Maps the byte-at-a-time [`Transport`] onto an embedded-hal 1.0 I2C bus.
//! Bytes of one transaction are collected and written in a single
//! `I2c::write`, which the bus frames as start + address + payload + stop.

use embedded_hal::i2c::I2c;
use heapless::Vec;

use crate::transport::{Transport, TransportError};

/// Default SH1106 address (SA0 low)
pub const SH1106_ADDRESS_PRIMARY: u8 = 0x3C;

/// Alternate SH1106 address (SA0 high)
pub const SH1106_ADDRESS_ALT: u8 = 0x3D;

/// Largest transaction the adapter buffers
///
/// One control byte plus a full row of controller RAM (132 columns).
pub const MAX_TRANSACTION_LEN: usize = 1 + 132;

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz), the SH1106 maximum
    pub const FAST: Self = Self { frequency: 400_000 };
}

/// Buffered I2C transport
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: Option<u8>,
    buffer: Vec<u8, MAX_TRANSACTION_LEN>,
    open: bool,
}

impl<I2C: I2c> I2cTransport<I2C> {
    /// Wrap an I2C bus. Call [`Transport::init`] before use.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: None,
            buffer: Vec::new(),
            open: false,
        }
    }

    /// The bound device address, if `init` has run
    pub fn address(&self) -> Option<u8> {
        self.address
    }

    /// Give back the wrapped bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = TransportError<I2C::Error>;

    fn init(&mut self, address: u8) -> Result<(), Self::Error> {
        if address > 0x7F {
            return Err(TransportError::InvalidAddress);
        }
        self.address = Some(address);
        self.buffer.clear();
        self.open = false;
        Ok(())
    }

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        if self.address.is_none() {
            return Err(TransportError::NotInitialized);
        }
        if self.open {
            return Err(TransportError::TransactionOpen);
        }
        self.buffer.clear();
        self.open = true;
        Ok(())
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if !self.open {
            return Err(TransportError::NoTransaction);
        }
        self.buffer.push(byte).map_err(|_| TransportError::Overflow)
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        if !self.open {
            return Err(TransportError::NoTransaction);
        }
        self.open = false;
        let address = self.address.ok_or(TransportError::NotInitialized)?;
        self.i2c
            .write(address, &self.buffer)
            .map_err(TransportError::Bus)
    }
}
