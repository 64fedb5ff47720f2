//! HD44780 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack maps the expander's eight outputs onto the LCD bus:
//!
//! | Bit | Signal |
//! |-----|--------|
//! | 0   | RS (register select) |
//! | 1   | RW (held low, write only) |
//! | 2   | EN (enable strobe) |
//! | 3   | Backlight transistor (board dependent) |
//! | 4-7 | D4-D7 |
//!
//! The controller runs in 4-bit mode, so every byte goes out as two
//! nibbles, high first. Each nibble is one I2C write of two expander bytes:
//! EN high, then EN low. The controller latches on the falling edge.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use openstill_core::config::LcdConfig;
use openstill_display::{CharacterDisplay, DisplayError, GlyphBitmap};

/// HD44780 instruction set (the subset used here)
pub mod cmd {
    /// Clear display, cursor home
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Entry mode: increment, no shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, two line mode, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set CGRAM address (glyph slot << 3)
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    /// Set DDRAM address (cursor position)
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// PCF8574 expander bits
pub mod pin {
    /// Register select: high for data, low for instructions
    pub const RS: u8 = 0x01;
    /// Read/write: always low
    pub const RW: u8 = 0x02;
    /// Enable strobe
    pub const EN: u8 = 0x04;
}

/// Number of CGRAM glyph slots
pub const CGRAM_SLOTS: u8 = 8;

/// Largest supported geometry
pub const MAX_COLUMNS: u8 = 40;
/// Largest supported row count
pub const MAX_ROWS: u8 = 4;

/// Power-on settle time before the first instruction
const POWER_ON_DELAY_MS: u32 = 50;
/// Wait after the first two 8-bit wake-up nibbles
const WAKE_DELAY_US: u32 = 4_500;
/// Execution time of a regular instruction or data write
const EXEC_DELAY_US: u32 = 50;
/// Execution time of clear display
const CLEAR_DELAY_US: u32 = 2_000;

/// Which controller register a byte is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Register {
    Instruction,
    Data,
}

/// HD44780 LCD on a PCF8574 backpack
///
/// Characters written past the last column are dropped rather than spilling
/// into the next DDRAM line, which on a 4-row panel is not the row below.
pub struct Hd44780I2c<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight_mask: u8,
    backlight: bool,
    cols: u8,
    rows: u8,
    col: u8,
    row: u8,
    initialized: bool,
}

impl<I2C, D> Hd44780I2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for the configured backpack
    ///
    /// Nothing is sent until [`begin`](CharacterDisplay::begin) or
    /// [`set_backlight`](CharacterDisplay::set_backlight) is called.
    pub fn new(i2c: I2C, delay: D, config: &LcdConfig) -> Self {
        Self {
            i2c,
            delay,
            address: config.i2c_address,
            backlight_mask: 1 << (config.backlight_bit & 0x07),
            backlight: false,
            cols: config.columns,
            rows: config.rows,
            col: 0,
            row: 0,
            initialized: false,
        }
    }

    /// Release the bus and the delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// DDRAM address of a cell
    ///
    /// Rows 2 and 3 continue lines 0 and 1 at an offset of one row width.
    pub fn ddram_address(&self, col: u8, row: u8) -> u8 {
        let offset = match row {
            0 => 0x00,
            1 => 0x40,
            2 => self.cols,
            _ => 0x40 + self.cols,
        };
        offset + col
    }

    fn backlight_bits(&self) -> u8 {
        if self.backlight {
            self.backlight_mask
        } else {
            0
        }
    }

    fn expander_write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, bytes)
            .map_err(|_| DisplayError::Communication)
    }

    /// Strobe one nibble (in bits 4-7 of `bits`) into the controller
    fn write_nibble(&mut self, bits: u8) -> Result<(), DisplayError> {
        let out = (bits & 0xF0) | (bits & pin::RS) | self.backlight_bits();
        self.expander_write(&[out | pin::EN, out & !pin::EN])
    }

    fn send(&mut self, value: u8, register: Register) -> Result<(), DisplayError> {
        let rs = match register {
            Register::Instruction => 0,
            Register::Data => pin::RS,
        };
        self.write_nibble((value & 0xF0) | rs)?;
        self.write_nibble((value << 4) | rs)?;
        self.delay.delay_us(EXEC_DELAY_US);
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, Register::Instruction)
    }

    fn require_init(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Write one character code at the cursor, clipped at the last column
    fn put(&mut self, code: u8) -> Result<(), DisplayError> {
        if self.col < self.cols {
            self.send(code, Register::Data)?;
        }
        self.col = self.col.saturating_add(1);
        Ok(())
    }
}

impl<I2C, D> CharacterDisplay for Hd44780I2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        if cols == 0 || rows == 0 || cols > MAX_COLUMNS || rows > MAX_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cols = cols;
        self.rows = rows;
        self.initialized = false;

        self.delay.delay_ms(POWER_ON_DELAY_MS);
        let idle = self.backlight_bits();
        self.expander_write(&[idle])?;

        // Wake-up: three times "8-bit mode", whatever state the bus was in
        self.write_nibble(0x30)?;
        self.delay.delay_us(WAKE_DELAY_US);
        self.write_nibble(0x30)?;
        self.delay.delay_us(WAKE_DELAY_US);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;
        self.delay.delay_us(EXEC_DELAY_US);

        self.command(cmd::FUNCTION_SET_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        self.command(cmd::ENTRY_MODE_INCREMENT)?;

        self.col = 0;
        self.row = 0;
        self.initialized = true;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        let idle = self.backlight_bits();
        self.expander_write(&[idle])
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.require_init()?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.require_init()?;
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        let address = self.ddram_address(col, row);
        self.command(cmd::SET_DDRAM_ADDR | address)?;
        self.col = col;
        self.row = row;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.require_init()?;
        for c in text.chars() {
            let code = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.put(code)?;
        }
        Ok(())
    }

    fn write_glyph(&mut self, index: u8) -> Result<(), DisplayError> {
        self.require_init()?;
        if index >= CGRAM_SLOTS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.put(index)
    }

    fn create_glyph(&mut self, index: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        self.require_init()?;
        if index >= CGRAM_SLOTS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.command(cmd::SET_CGRAM_ADDR | (index << 3))?;
        for &line in bitmap.iter() {
            self.send(line & 0x1F, Register::Data)?;
        }

        // CGRAM writes move the address counter away from the screen
        let col = self.col.min(self.cols - 1);
        let address = self.ddram_address(col, self.row);
        self.command(cmd::SET_DDRAM_ADDR | address)
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }
}
