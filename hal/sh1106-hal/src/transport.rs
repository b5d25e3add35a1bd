//! Transport abstraction
//!
//! The SH1106 speaks in transactions: a start condition, a control byte
//! selecting command or data stream, a run of payload bytes, and a stop
//! condition. Implementations decide how that maps onto real hardware.

/// Framed write-only transport to a single bus device
///
/// Calls always arrive in the order `begin_transaction`, zero or more
/// `send_byte`, `end_transaction`. Implementations may report misuse of that
/// order as an error instead of corrupting the bus.
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Bind the transport to a device
    ///
    /// # Arguments
    /// * `address` - 7-bit device address (without the R/W bit)
    fn init(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Open a transaction (start condition + write address)
    fn begin_transaction(&mut self) -> Result<(), Self::Error>;

    /// Send one payload byte inside the open transaction
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Close the open transaction (stop condition)
    fn end_transaction(&mut self) -> Result<(), Self::Error>;

    /// Send a run of payload bytes inside the open transaction
    fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.send_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn init(&mut self, address: u8) -> Result<(), Self::Error> {
        (**self).init(address)
    }

    fn begin_transaction(&mut self) -> Result<(), Self::Error> {
        (**self).begin_transaction()
    }

    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).send_byte(byte)
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        (**self).end_transaction()
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).send_bytes(bytes)
    }
}

/// Errors from the bundled transport adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// Underlying bus error
    Bus(E),
    /// Transaction attempted before `init`
    NotInitialized,
    /// Byte sent or transaction closed without an open transaction
    NoTransaction,
    /// Transaction opened while another one is still open
    TransactionOpen,
    /// Transaction exceeds the adapter's buffer
    Overflow,
    /// Address does not fit in 7 bits
    InvalidAddress,
}
