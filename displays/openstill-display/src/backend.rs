//! Character display trait
//!
//! Defines the cursor-addressed interface shared by the physical LCD and
//! the in-memory screen.

use core::fmt::{self, Write};

use heapless::String;

use crate::glyph::GlyphBitmap;

/// Longest formatted fragment accepted by [`CharacterDisplay::print_fmt`]
///
/// Fits any `f32` printed with two decimals.
pub const MAX_FORMATTED_LEN: usize = 48;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates, dimensions or glyph slot
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Character display trait
///
/// Provides a hardware-agnostic interface for text-mode displays with a
/// handful of user-definable glyphs. Every write goes to the current cursor
/// position, so callers position the cursor before each field they draw.
pub trait CharacterDisplay {
    /// Initialize the controller for the given geometry
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError>;

    /// Switch the backlight on or off
    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Clear the entire display and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `col`: Column number (0-based)
    /// - `row`: Row number (0-based)
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Print ASCII text at the cursor, advancing it
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write a custom glyph by slot index at the cursor, advancing it
    fn write_glyph(&mut self, index: u8) -> Result<(), DisplayError>;

    /// Store a 5x8 bitmap in a custom glyph slot
    fn create_glyph(&mut self, index: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Format and print at the cursor
    fn print_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), DisplayError> {
        let mut buf: String<MAX_FORMATTED_LEN> = String::new();
        buf.write_fmt(args)
            .map_err(|_| DisplayError::BufferOverflow)?;
        self.print(&buf)
    }

    /// Position the cursor, then print
    fn print_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(col, row)?;
        self.print(text)
    }
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        (**self).begin(cols, rows)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        (**self).set_backlight(on)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        (**self).set_cursor(col, row)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        (**self).print(text)
    }

    fn write_glyph(&mut self, index: u8) -> Result<(), DisplayError> {
        (**self).write_glyph(index)
    }

    fn create_glyph(&mut self, index: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        (**self).create_glyph(index, bitmap)
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }
}
