//! SH1106 Demo Firmware
//!
//! Drives a 128x64 SH1106 OLED on I2C1 (PB6=SCL, PB7=SDA) of an
//! STM32F042K6 and shows an uptime clock inside a frame.

#![no_std]
#![no_main]

mod font;

use core::fmt::Write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Ticker};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use {defmt_rtt as _, panic_probe as _};

use sh1106_display::{BinaryColor, Canvas, I2cTransport, Polarity, Sh1106, Sh1106Config};
use sh1106_hal::I2cConfig;

/// Seconds between polarity flips (burn-in relief)
const INVERT_PERIOD_S: u32 = 60;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("SH1106 demo firmware starting...");

    let p = embassy_stm32::init(Default::default());

    let bus = I2cConfig::FAST;
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = Hertz(bus.frequency);
    i2c_config.timeout = Duration::from_millis(100);

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);

    let mut display = match Sh1106::new(I2cTransport::new(i2c), Sh1106Config::default()) {
        Ok(display) => display,
        Err(e) => {
            error!("Failed to bind display transport: {:?}", e);
            return;
        }
    };
    display.set_debug(true);

    if let Err(e) = display.init() {
        error!("Failed to initialize display: {:?}", e);
        return;
    }
    info!("OLED initialized at {=u8:#x}", display.address());

    let font = unwrap!(font::digits());
    let mut ticker = Ticker::every(Duration::from_secs(1));
    let mut uptime: u32 = 0;
    let mut polarity = Polarity::Normal;

    loop {
        display.clear_screen();

        display.draw_box_empty(0, 0, 127, 63, BinaryColor::On);
        display.draw_circle_empty(110, 46, 10, BinaryColor::On);
        display.draw_circle_filled(110, 46, (uptime % 8) as i32, BinaryColor::On);
        let _ = Line::new(Point::new(4, 30), Point::new(90, 30))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut display);

        let mut text: heapless::String<12> = heapless::String::new();
        let _ = core::write!(
            text,
            "{:02}:{:02}:{:02}",
            uptime / 3600,
            (uptime / 60) % 60,
            uptime % 60
        );
        display.draw_string(&text, 8, 12, &font, BinaryColor::On);

        if let Err(e) = display.flush() {
            warn!("Display flush failed: {:?}", e);
        }

        if uptime > 0 && uptime % INVERT_PERIOD_S == 0 {
            polarity = match polarity {
                Polarity::Normal => Polarity::Inverted,
                Polarity::Inverted => Polarity::Normal,
            };
            if let Err(e) = display.set_polarity(polarity) {
                warn!("Polarity change failed: {:?}", e);
            }
        }

        uptime = uptime.wrapping_add(1);
        ticker.next().await;
    }
}
