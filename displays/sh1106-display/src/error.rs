//! Driver errors

/// Controller session errors
///
/// `E` is the transport's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the display
    Transport(E),
    /// Control or flush attempted before `init`
    NotInitialized,
    /// Pattern fill called with an empty pattern
    EmptyPattern,
    /// Device address does not fit in 7 bits
    InvalidAddress,
}
