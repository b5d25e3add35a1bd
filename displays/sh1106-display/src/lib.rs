//! SH1106 OLED controller driver
//!
//! This crate provides:
//! - [`Sh1106`], the controller session: init, power, contrast, polarity,
//!   pattern reset and page-by-page flush
//! - [`cmd`], the SH1106 register map
//! - [`Sh1106Config`] for address, contrast and polarity
//!
//! # Architecture
//!
//! The driver owns a [`Framebuffer`](sh1106_core::Framebuffer) and a
//! [`Transport`](sh1106_hal::Transport). Drawing goes through the
//! [`Canvas`](sh1106_core::Canvas) primitives or embedded-graphics and only
//! touches memory. [`Sh1106::flush`] pushes the whole buffer, eight pages of
//! 128 bytes, starting at RAM column 2.
//!
//! ```ignore
//! let transport = I2cTransport::new(i2c);
//! let mut display = Sh1106::new(transport, Sh1106Config::default())?;
//! display.init()?;
//! display.draw_box_empty(0, 0, 127, 63, BinaryColor::On);
//! display.flush()?;
//! ```
//!
//! # Logging
//!
//! With the `defmt` feature, drivers with [`Sh1106::set_debug`] enabled log
//! every control operation and every clipped pixel at debug level.

#![no_std]
#![deny(unsafe_code)]

/// Log at debug level when the driver's debug flag is set
macro_rules! debug_log {
    ($driver:expr, $($arg:tt)+) => {
        #[cfg(feature = "defmt")]
        {
            if $driver.debug {
                defmt::debug!($($arg)+);
            }
        }
    };
}

pub mod cmd;
pub mod config;
pub mod driver;
pub mod error;

// Re-export key types
pub use config::{Polarity, Sh1106Config, DEFAULT_CONTRAST};
pub use driver::{
    init_sequence, Sh1106, COLUMN_OFFSET, FILL_PATTERN_CLEAR, FILL_PATTERN_FILL, RAM_WIDTH,
};
pub use error::Error;
pub use sh1106_core::{BinaryColor, Canvas, Font, FontError, GlyphDescriptor};
pub use sh1106_hal::{I2cTransport, Transport};
