//! SH1106 Controller Session
//!
//! Owns the transport and the framebuffer. Drawing only touches the
//! framebuffer; nothing reaches the panel until [`Sh1106::flush`].
//!
//! # Transaction layout
//!
//! Every transaction starts with a control byte. The controller decides
//! between command and data interpretation per transaction, so a page
//! update needs two of them:
//!
//! ```text
//! [0x00] [0x02] [0x10] [0xB0 | page]         command: column 2, page n
//! [0x40] [128 bytes of page n]               data
//! ```

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;
use sh1106_core::{Canvas, Framebuffer, HEIGHT, WIDTH};
use sh1106_hal::Transport;

use crate::cmd;
use crate::config::{Polarity, Sh1106Config};
use crate::error::Error;

/// First RAM column of the visible panel
///
/// The SH1106 has 132 columns of RAM; 128-pixel panels are wired to
/// columns 2..=129.
pub const COLUMN_OFFSET: u8 = 2;

/// Controller RAM width in columns
pub const RAM_WIDTH: usize = 132;

/// Pattern byte that clears the screen
pub const FILL_PATTERN_CLEAR: u8 = 0x00;

/// Pattern byte that lights the whole screen
pub const FILL_PATTERN_FILL: u8 = 0xFF;

/// Number of bytes in the init command stream (without control byte)
pub const INIT_SEQUENCE_LEN: usize = 26;

/// Power-on command stream for a configuration
pub fn init_sequence(config: &Sh1106Config) -> [u8; INIT_SEQUENCE_LEN] {
    let [column_low, column_high] = cmd::column_address(COLUMN_OFFSET);
    [
        cmd::SET_DISPLAY_OFF,
        column_low,
        column_high,
        cmd::page_address(0),
        cmd::SET_COMMON_SCAN_DIRECTION | 0x08,
        cmd::SET_DISPLAY_START_LINE,
        cmd::SET_CONTRAST,
        config.contrast,
        cmd::SET_SEGMENT_REMAP | 0x01,
        config.polarity.command(),
        cmd::SET_MULTIPLEX_RATIO,
        (HEIGHT - 1) as u8,
        cmd::SET_ENTIRE_DISPLAY_ON,
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_OSCILLATOR_FREQUENCY,
        0xF0,
        cmd::SET_DISCHARGE_PRECHARGE,
        0x22,
        cmd::SET_COMMON_PADS_HARDWARE,
        0x12,
        cmd::SET_COMMON_PADS_VOLTAGE,
        0x20,
        cmd::SET_CHARGE_PUMP,
        0x14,
        cmd::SET_DISPLAY_ON,
    ]
}

/// One framed transaction: control byte, then payload
///
/// A failed send still ends the transaction so the bus is released; the
/// send error is reported, not the outcome of the stop.
fn transaction<T: Transport>(
    transport: &mut T,
    control: u8,
    payload: &[u8],
) -> Result<(), T::Error> {
    transport.begin_transaction()?;
    let sent = transport
        .send_byte(control)
        .and_then(|()| transport.send_bytes(payload));
    match sent {
        Ok(()) => transport.end_transaction(),
        Err(e) => {
            let _ = transport.end_transaction();
            Err(e)
        }
    }
}

/// SH1106 OLED driver
pub struct Sh1106<T> {
    transport: T,
    config: Sh1106Config,
    framebuffer: Framebuffer,
    debug: bool,
    initialized: bool,
}

impl<T: Transport> Sh1106<T> {
    /// Bind a transport to the configured device address
    ///
    /// Runs `transport.init(address)`. The panel itself is untouched until
    /// [`init`](Self::init).
    pub fn new(mut transport: T, config: Sh1106Config) -> Result<Self, Error<T::Error>> {
        if config.address > 0x7F {
            return Err(Error::InvalidAddress);
        }
        transport.init(config.address).map_err(Error::Transport)?;

        Ok(Self {
            transport,
            config,
            framebuffer: Framebuffer::new(),
            debug: false,
            initialized: false,
        })
    }

    /// Enable or disable debug logging for this driver
    pub fn set_debug(&mut self, on: bool) {
        self.debug = on;
    }

    /// Whether debug logging is enabled
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// 7-bit device address
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Active configuration
    pub fn config(&self) -> &Sh1106Config {
        &self.config
    }

    /// Whether `init` has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Clear the framebuffer and run the power-on sequence
    ///
    /// The whole sequence goes out in one command stream so no two-byte
    /// command is ever split across transactions.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.framebuffer.clear();

        let sequence = init_sequence(&self.config);
        transaction(&mut self.transport, cmd::CONTROL_CMD_STREAM, &sequence)
            .map_err(Error::Transport)?;
        self.initialized = true;

        debug_log!(self, "SH1106: display initialized at {=u8:#x}", self.config.address);
        Ok(())
    }

    /// Send a short command stream to an initialized controller
    fn command(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        transaction(&mut self.transport, cmd::CONTROL_CMD_STREAM, bytes).map_err(Error::Transport)
    }

    /// Turn the panel on or off (RAM content is kept)
    pub fn set_display_power(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        let opcode = if on {
            cmd::SET_DISPLAY_ON
        } else {
            cmd::SET_DISPLAY_OFF
        };
        self.command(&[opcode])?;

        debug_log!(self, "SH1106: display power {=bool}", on);
        Ok(())
    }

    /// Set the contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<T::Error>> {
        self.command(&[cmd::SET_CONTRAST, contrast])?;

        debug_log!(self, "SH1106: contrast set to {=u8}", contrast);
        Ok(())
    }

    /// Select normal or inverted pixel polarity
    pub fn set_polarity(&mut self, polarity: Polarity) -> Result<(), Error<T::Error>> {
        self.command(&[polarity.command()])?;

        debug_log!(self, "SH1106: polarity {}", polarity);
        Ok(())
    }

    /// Set normal polarity
    pub fn set_display_normal(&mut self) -> Result<(), Error<T::Error>> {
        self.set_polarity(Polarity::Normal)
    }

    /// Set inverted polarity
    pub fn set_display_inverted(&mut self) -> Result<(), Error<T::Error>> {
        self.set_polarity(Polarity::Inverted)
    }

    /// Repaint every pixel from a repeating row pattern
    ///
    /// Row `y` uses `pattern[y % pattern.len()]`. The byte's bits, MSB
    /// first, give columns 0-7 of each 8-pixel group across the panel.
    /// Pixels are both set and cleared. Only the framebuffer changes; call
    /// [`flush`](Self::flush) to show the result.
    pub fn reset_and_clear(&mut self, pattern: &[u8]) -> Result<(), Error<T::Error>> {
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }

        for (y, &byte) in (0..HEIGHT).zip(pattern.iter().cycle()) {
            for bit in 0..8 {
                let color = BinaryColor::from(byte & (0x80 >> bit) != 0);
                for group in (0..WIDTH).step_by(8) {
                    self.framebuffer
                        .set_pixel((group + bit) as i32, y as i32, color);
                }
            }
        }

        debug_log!(self, "SH1106: screen reset with {=usize} byte pattern", pattern.len());
        Ok(())
    }

    /// Blank the framebuffer, same as a reset with [`FILL_PATTERN_CLEAR`]
    pub fn clear_screen(&mut self) {
        self.framebuffer.clear();
    }

    /// Push the framebuffer to the panel, one page at a time
    pub fn flush(&mut self) -> Result<(), Error<T::Error>> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        let [column_low, column_high] = cmd::column_address(COLUMN_OFFSET);
        for (page, data) in self.framebuffer.pages().enumerate() {
            transaction(
                &mut self.transport,
                cmd::CONTROL_CMD_STREAM,
                &[column_low, column_high, cmd::page_address(page as u8)],
            )
            .map_err(Error::Transport)?;
            transaction(&mut self.transport, cmd::CONTROL_DATA_STREAM, data)
                .map_err(Error::Transport)?;
        }

        debug_log!(self, "SH1106: display updated with frame buffer");
        Ok(())
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The framebuffer, mutably
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Read back one pixel from the framebuffer
    pub fn pixel(&self, x: i32, y: i32) -> Option<BinaryColor> {
        self.framebuffer.pixel(x, y)
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }
}

impl<T: Transport> Canvas for Sh1106<T> {
    fn draw_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if !self.framebuffer.set_pixel(x, y, color) {
            debug_log!(self, "SH1106: pixel ({=i32}, {=i32}) out of range", x, y);
        }
    }
}

impl<T: Transport> OriginDimensions for Sh1106<T> {
    fn size(&self) -> Size {
        self.framebuffer.size()
    }
}

impl<T: Transport> DrawTarget for Sh1106<T> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.draw_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use sh1106_core::{Font, GlyphDescriptor, PAGES};
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum MockError {
        Nack,
        TransactionOpen,
    }

    /// Mock transport recording every completed transaction
    #[derive(Default)]
    struct MockTransport {
        address: Option<u8>,
        transactions: Vec<Vec<u8>>,
        current: Option<Vec<u8>>,
        /// Fail `end_transaction` once this many transactions have completed
        fail_at: Option<usize>,
        /// Reject the next `send_byte`
        fail_next_byte: bool,
    }

    impl Transport for MockTransport {
        type Error = MockError;

        fn init(&mut self, address: u8) -> Result<(), Self::Error> {
            self.address = Some(address);
            Ok(())
        }

        fn begin_transaction(&mut self) -> Result<(), Self::Error> {
            if self.current.is_some() {
                return Err(MockError::TransactionOpen);
            }
            self.current = Some(Vec::new());
            Ok(())
        }

        fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
            if core::mem::take(&mut self.fail_next_byte) {
                return Err(MockError::Nack);
            }
            self.current
                .as_mut()
                .expect("byte outside transaction")
                .push(byte);
            Ok(())
        }

        fn end_transaction(&mut self) -> Result<(), Self::Error> {
            let bytes = self.current.take().expect("stop without start");
            if self.fail_at == Some(self.transactions.len()) {
                return Err(MockError::Nack);
            }
            self.transactions.push(bytes);
            Ok(())
        }
    }

    fn initialized() -> Sh1106<MockTransport> {
        let mut display = Sh1106::new(MockTransport::default(), Sh1106Config::default()).unwrap();
        display.init().unwrap();
        display.transport.transactions.clear();
        display
    }

    #[test]
    fn test_new_binds_address() {
        let display =
            Sh1106::new(MockTransport::default(), Sh1106Config::with_address(0x3D)).unwrap();

        assert_eq!(display.transport.address, Some(0x3D));
        assert_eq!(display.address(), 0x3D);
        assert!(!display.is_initialized());
        assert!(display.transport.transactions.is_empty());
    }

    #[test]
    fn test_new_rejects_8bit_address() {
        let result = Sh1106::new(MockTransport::default(), Sh1106Config::with_address(0x78));
        assert!(matches!(result, Err(Error::InvalidAddress)));
    }

    #[test]
    fn test_init_sequence_single_transaction() {
        let mut display = Sh1106::new(MockTransport::default(), Sh1106Config::default()).unwrap();
        display.init().unwrap();

        let transport = display.release();
        assert_eq!(transport.transactions.len(), 1);
        assert_eq!(
            transport.transactions[0],
            [
                0x00, // command stream
                0xAE, // display off
                0x02, 0x10, // column 2
                0xB0, // page 0
                0xC8, // COM scan direction
                0x40, // start line 0
                0x81, 0x7F, // contrast
                0xA1, // segment remap
                0xA6, // normal
                0xA8, 0x3F, // multiplex 64
                0xA4, // entire display on
                0xD3, 0x00, // display offset
                0xD5, 0xF0, // oscillator
                0xD9, 0x22, // discharge/precharge
                0xDA, 0x12, // COM pads hardware
                0xDB, 0x20, // COM pads voltage
                0x8D, 0x14, // charge pump
                0xAF, // display on
            ]
        );
    }

    #[test]
    fn test_panel_fits_controller_ram() {
        assert!(COLUMN_OFFSET as usize + WIDTH <= RAM_WIDTH);
    }

    #[test]
    fn test_init_uses_configured_contrast_and_polarity() {
        let config = Sh1106Config {
            contrast: 0x20,
            polarity: Polarity::Inverted,
            ..Sh1106Config::default()
        };
        let sequence = init_sequence(&config);

        assert_eq!(&sequence[6..8], &[0x81, 0x20]);
        assert_eq!(sequence[9], 0xA7);
    }

    #[test]
    fn test_init_clears_framebuffer() {
        let mut display = Sh1106::new(MockTransport::default(), Sh1106Config::default()).unwrap();
        display.draw_pixel(3, 3, BinaryColor::On);
        display.init().unwrap();

        assert!(display.framebuffer().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_control_commands() {
        let mut display = initialized();

        display.set_display_power(false).unwrap();
        display.set_display_power(true).unwrap();
        display.set_contrast(0xCF).unwrap();
        display.set_display_inverted().unwrap();
        display.set_display_normal().unwrap();

        let transport = display.release();
        assert_eq!(transport.transactions[0], [0x00, 0xAE]);
        assert_eq!(transport.transactions[1], [0x00, 0xAF]);
        assert_eq!(transport.transactions[2], [0x00, 0x81, 0xCF]);
        assert_eq!(transport.transactions[3], [0x00, 0xA7]);
        assert_eq!(transport.transactions[4], [0x00, 0xA6]);
    }

    #[test]
    fn test_control_before_init() {
        let mut display = Sh1106::new(MockTransport::default(), Sh1106Config::default()).unwrap();

        assert_eq!(display.set_contrast(0x10), Err(Error::NotInitialized));
        assert_eq!(display.set_display_power(true), Err(Error::NotInitialized));
        assert_eq!(display.flush(), Err(Error::NotInitialized));
        assert!(display.release().transactions.is_empty());
    }

    #[test]
    fn test_flush_page_protocol() {
        let mut display = initialized();
        display.draw_pixel(5, 10, BinaryColor::On);
        display.draw_pixel(127, 63, BinaryColor::On);
        display.flush().unwrap();

        let transport = display.release();
        assert_eq!(transport.transactions.len(), 2 * PAGES);

        for page in 0..PAGES {
            let setup = &transport.transactions[2 * page];
            let data = &transport.transactions[2 * page + 1];

            assert_eq!(setup.as_slice(), &[0x00, 0x02, 0x10, 0xB0 | page as u8]);
            assert_eq!(data.len(), 1 + WIDTH);
            assert_eq!(data[0], 0x40);
        }

        assert_eq!(transport.transactions[3][1 + 5], 0b0000_0100);
        assert_eq!(transport.transactions[15][1 + 127], 0b1000_0000);
    }

    #[test]
    fn test_flush_sends_framebuffer_verbatim() {
        let mut display = initialized();
        display.reset_and_clear(&[0xA5, 0x3C]).unwrap();
        display.flush().unwrap();

        let sent: Vec<u8> = display
            .transport
            .transactions
            .iter()
            .skip(1)
            .step_by(2)
            .flat_map(|t| t[1..].iter().copied())
            .collect();
        assert_eq!(sent.as_slice(), display.framebuffer().as_bytes());
    }

    #[test]
    fn test_flush_stops_on_transport_error() {
        let mut display = initialized();
        display.transport.fail_at = Some(3);

        assert_eq!(display.flush(), Err(Error::Transport(MockError::Nack)));
        assert_eq!(display.transport.transactions.len(), 3);
    }

    #[test]
    fn test_failed_send_releases_bus() {
        let mut display = initialized();
        display.transport.fail_next_byte = true;

        assert_eq!(display.flush(), Err(Error::Transport(MockError::Nack)));
        assert!(display.transport.current.is_none());

        display.transport.transactions.clear();
        display.flush().unwrap();
        assert_eq!(display.transport.transactions.len(), 2 * PAGES);

        display.set_contrast(0x10).unwrap();
        assert_eq!(
            display.transport.transactions.last().map(Vec::as_slice),
            Some(&[cmd::CONTROL_CMD_STREAM, cmd::SET_CONTRAST, 0x10][..])
        );
    }

    #[test]
    fn test_transport_error_leaves_framebuffer() {
        let mut display = initialized();
        display.draw_circle_filled(20, 20, 5, BinaryColor::On);
        let before = display.framebuffer().clone();

        display.transport.fail_at = Some(0);
        assert!(display.flush().is_err());
        assert_eq!(display.framebuffer(), &before);
    }

    #[test]
    fn test_reset_and_clear_pattern() {
        let mut display = initialized();
        display.reset_and_clear(&[0b1000_0001, 0xFF, 0x00]).unwrap();

        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let expected = match y % 3 {
                    0 => x % 8 == 0 || x % 8 == 7,
                    1 => true,
                    _ => false,
                };
                assert_eq!(display.pixel(x, y), Some(BinaryColor::from(expected)));
            }
        }
        // Pure framebuffer operation
        assert!(display.transport.transactions.is_empty());
    }

    #[test]
    fn test_reset_and_clear_overwrites() {
        let mut display = initialized();
        display.reset_and_clear(&[FILL_PATTERN_FILL]).unwrap();
        assert!(display.framebuffer().as_bytes().iter().all(|&b| b == 0xFF));

        display.reset_and_clear(&[FILL_PATTERN_CLEAR]).unwrap();
        assert!(display.framebuffer().as_bytes().iter().all(|&b| b == 0x00));

        display.reset_and_clear(&[FILL_PATTERN_FILL]).unwrap();
        display.clear_screen();
        assert!(display.framebuffer().as_bytes().iter().all(|&b| b == 0x00));
        assert!(display.transport.transactions.is_empty());
    }

    #[test]
    fn test_reset_and_clear_rejects_empty_pattern() {
        let mut display = initialized();
        assert_eq!(display.reset_and_clear(&[]), Err(Error::EmptyPattern));
    }

    #[test]
    fn test_out_of_range_drawing_is_clipped() {
        let mut display = initialized();
        display.set_debug(true);
        assert!(display.debug());

        display.draw_pixel(128, 0, BinaryColor::On);
        display.draw_line_vertical(-1, 0, 63, BinaryColor::On);
        display.draw_circle_empty(-20, -20, 5, BinaryColor::On);

        assert!(display.framebuffer().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_text_through_driver() {
        let glyphs = [GlyphDescriptor::new(1, 8, 0)];
        let bits = [0xFFu8; 8];
        let font = Font::new(b'#', b'#', &glyphs, &bits).unwrap();
        let mut display = initialized();

        let end = display.draw_string("#!", 0, 0, &font, BinaryColor::On);

        assert_eq!(end, 16);
        // Both the glyph and the placeholder block are solid 8x8
        let bytes = display.framebuffer().as_bytes();
        assert!(bytes[..16].iter().all(|&b| b == 0xFF));
        assert_eq!(bytes[16], 0x00);
    }

    #[test]
    fn test_embedded_graphics_target() {
        use embedded_graphics::prelude::*;
        use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

        let mut display = initialized();
        Rectangle::new(Point::new(0, 0), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut display)
            .unwrap();

        assert_eq!(
            &display.framebuffer().as_bytes()[..5],
            &[0x0F, 0x0F, 0x0F, 0x0F, 0x00]
        );
        assert_eq!(display.size(), Size::new(128, 64));
    }
}
