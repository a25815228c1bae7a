//! HD44780 character LCD driver
//!
//! Drives a 16x2 panel in 4-bit mode over six GPIO lines (RS, E, D4-D7).
//! Write-only: R/W is strapped to ground, so busy-flag polling is replaced
//! by worst-case instruction delays.

use embassy_rp::gpio::Output;
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;

use hygra_display::{DisplayError, TextDisplay};

/// Display dimensions
const COLS: u8 = 16;
const ROWS: u8 = 2;

/// HD44780 instructions
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE_INC: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const DISPLAY_OFF: u8 = 0x08;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM base address of each row
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

/// HD44780 driver in 4-bit mode
pub struct Hd44780 {
    rs: Output<'static>,
    en: Output<'static>,
    // D4..D7, lowest nibble bit first
    data: [Output<'static>; 4],
}

impl Hd44780 {
    /// Take the six control pins and run the power-on initialization.
    ///
    /// Blocks for roughly 60ms while the controller wakes up.
    pub fn new(rs: Output<'static>, en: Output<'static>, data: [Output<'static>; 4]) -> Self {
        let mut lcd = Self { rs, en, data };
        lcd.init();
        lcd
    }

    /// Datasheet initialization by instruction for 4-bit mode.
    fn init(&mut self) {
        // The controller accepts nothing for 40ms after power-on.
        Delay.delay_ms(50);
        self.rs.set_low();

        // Three 8-bit function sets, then the switch to 4-bit.
        self.write_nibble(0x03);
        Delay.delay_ms(5);
        self.write_nibble(0x03);
        Delay.delay_us(150);
        self.write_nibble(0x03);
        Delay.delay_us(150);
        self.write_nibble(0x02);
        Delay.delay_us(150);

        self.command(cmd::FUNCTION_4BIT_2LINE);
        self.command(cmd::DISPLAY_ON);
        self.command(cmd::ENTRY_MODE_INC);
        self.command(cmd::CLEAR);
        Delay.delay_ms(2);
    }

    fn command(&mut self, byte: u8) {
        self.rs.set_low();
        self.write_byte(byte);
    }

    fn write_char(&mut self, byte: u8) {
        self.rs.set_high();
        self.write_byte(byte);
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        // Every instruction except clear/home completes within 37us.
        Delay.delay_us(50);
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble & (1 << bit) != 0 {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
        self.pulse_enable();
    }

    /// Latch the nibble on the falling edge of E.
    fn pulse_enable(&mut self) {
        self.en.set_high();
        Delay.delay_us(1);
        self.en.set_low();
        Delay.delay_us(1);
    }
}

impl TextDisplay for Hd44780 {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR);
        // Clear is the one slow instruction (1.52ms typical).
        Delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || usize::from(col) + text.len() > usize::from(COLS) {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col));
        for &byte in text.as_bytes() {
            self.write_char(byte);
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }
}
