//! SH1106 register map
//!
//! Opcodes from the SH1106 datasheet command table. Commands that take an
//! operand are sent as two consecutive bytes in the same command stream.
//! Address commands carry their argument in the low bits (`SET_PAGE_ADDRESS
//! | page`).

/// Control byte: single command follows
pub const CONTROL_CMD_SINGLE: u8 = 0x80;
/// Control byte: command stream follows
pub const CONTROL_CMD_STREAM: u8 = 0x00;
/// Control byte: single data byte follows
pub const CONTROL_DATA_SINGLE: u8 = 0xC0;
/// Control byte: data stream follows
pub const CONTROL_DATA_STREAM: u8 = 0x40;

/// Lower column address nibble (`| low4`)
pub const SET_COLUMN_LOWER: u8 = 0x00;
/// Upper column address nibble (`| high4`)
pub const SET_COLUMN_UPPER: u8 = 0x10;
/// Charge pump output voltage (`| 0..=3`)
pub const SET_CHARGE_PUMP_VOLTAGE: u8 = 0x30;
/// Display start line (`| 0..=63`)
pub const SET_DISPLAY_START_LINE: u8 = 0x40;
/// Contrast control, followed by the contrast byte
pub const SET_CONTRAST: u8 = 0x81;
/// Charge pump enable, followed by 0x14 (on) or 0x10 (off)
pub const SET_CHARGE_PUMP: u8 = 0x8D;
/// Segment remap (`| 1` flips columns)
pub const SET_SEGMENT_REMAP: u8 = 0xA0;
/// Output follows RAM content
pub const SET_ENTIRE_DISPLAY_ON: u8 = 0xA4;
/// All pixels forced on regardless of RAM
pub const SET_ENTIRE_DISPLAY_OFF: u8 = 0xA5;
/// RAM bit 1 = lit pixel
pub const SET_DISPLAY_NORMAL: u8 = 0xA6;
/// RAM bit 0 = lit pixel
pub const SET_DISPLAY_INVERTED: u8 = 0xA7;
/// Multiplex ratio, followed by ratio - 1
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;
/// DC-DC converter mode, followed by the mode byte
pub const SET_DC_DC_MODE: u8 = 0xAD;
/// Panel off (sleep)
pub const SET_DISPLAY_OFF: u8 = 0xAE;
/// Panel on
pub const SET_DISPLAY_ON: u8 = 0xAF;
/// Page address (`| 0..=7`)
pub const SET_PAGE_ADDRESS: u8 = 0xB0;
/// COM output scan direction (`| 8` scans COM[N-1] to COM0)
pub const SET_COMMON_SCAN_DIRECTION: u8 = 0xC0;
/// Display offset, followed by the offset byte
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
/// Oscillator frequency / clock divide, followed by the setting byte
pub const SET_OSCILLATOR_FREQUENCY: u8 = 0xD5;
/// Discharge/precharge period, followed by the period byte
pub const SET_DISCHARGE_PRECHARGE: u8 = 0xD9;
/// Common pads hardware configuration, followed by the setting byte
pub const SET_COMMON_PADS_HARDWARE: u8 = 0xDA;
/// Common pad output voltage (VCOM deselect), followed by the level byte
pub const SET_COMMON_PADS_VOLTAGE: u8 = 0xDB;
/// Enter read-modify-write
pub const SET_READ_MODIFY_WRITE: u8 = 0xE0;
/// No operation
pub const NOP: u8 = 0xE3;
/// Leave read-modify-write
pub const SET_READ_MODIFY_WRITE_END: u8 = 0xEE;

/// Lower and upper column nibble commands for a RAM column
pub const fn column_address(column: u8) -> [u8; 2] {
    [
        SET_COLUMN_LOWER | (column & 0x0F),
        SET_COLUMN_UPPER | ((column >> 4) & 0x0F),
    ]
}

/// Page address command for a page index
pub const fn page_address(page: u8) -> u8 {
    SET_PAGE_ADDRESS | (page & 0x07)
}
