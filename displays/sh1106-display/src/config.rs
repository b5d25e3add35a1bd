//! Driver configuration

use sh1106_hal::SH1106_ADDRESS_PRIMARY;

use crate::cmd;

/// Pixel polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Set bits are lit
    #[default]
    Normal,
    /// Set bits are dark
    Inverted,
}

impl Polarity {
    /// Controller opcode selecting this polarity
    pub const fn command(self) -> u8 {
        match self {
            Polarity::Normal => cmd::SET_DISPLAY_NORMAL,
            Polarity::Inverted => cmd::SET_DISPLAY_INVERTED,
        }
    }
}

/// SH1106 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sh1106Config {
    /// 7-bit I2C address (0x3C or 0x3D depending on SA0)
    pub address: u8,
    /// Contrast written during init (0-255, higher draws more current)
    pub contrast: u8,
    /// Polarity written during init
    pub polarity: Polarity,
}

impl Default for Sh1106Config {
    fn default() -> Self {
        Self {
            address: SH1106_ADDRESS_PRIMARY,
            contrast: DEFAULT_CONTRAST,
            polarity: Polarity::Normal,
        }
    }
}

/// Contrast used when none is configured
pub const DEFAULT_CONTRAST: u8 = 0x7F;

impl Sh1106Config {
    /// Default configuration at a different address
    pub fn with_address(address: u8) -> Self {
        Self {
            address,
            ..Self::default()
        }
    }
}
