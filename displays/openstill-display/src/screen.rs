//! In-memory character screen
//!
//! Provides a character grid that behaves like a cursor-addressed LCD and
//! remembers how many times each cell was written.

use heapless::String;

use crate::backend::{CharacterDisplay, DisplayError};
use crate::glyph::{Glyph, GlyphBitmap, GLYPH_SLOTS};

/// Number of character rows on standard display
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on standard display
pub const SCREEN_COLS: usize = 20;

/// Byte capacity of one dumped line (glyph symbols are multi-byte UTF-8)
pub const LINE_BYTES: usize = SCREEN_COLS * 4;

/// Character the controller substitutes for anything outside printable ASCII
const REPLACEMENT: u8 = b'?';

/// Screen buffer for text-mode displays
///
/// Cells hold raw character codes exactly as an HD44780 does: codes below
/// [`GLYPH_SLOTS`] select a custom glyph, everything else is ASCII. Text
/// running past the last column is dropped rather than wrapped.
#[derive(Clone)]
pub struct CharScreen {
    /// Current display content
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Number of writes that landed on each cell
    writes: [[u16; SCREEN_COLS]; SCREEN_ROWS],
    /// Uploaded custom glyphs
    glyphs: [Option<GlyphBitmap>; GLYPH_SLOTS as usize],
    /// Active geometry, set by `begin`
    size: Option<(u8, u8)>,
    /// Cursor (col, row)
    cursor: (u8, u8),
    backlight: bool,
}

impl Default for CharScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CharScreen {
    /// Create a blank, uninitialized screen
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; SCREEN_COLS]; SCREEN_ROWS],
            writes: [[0; SCREEN_COLS]; SCREEN_ROWS],
            glyphs: [None; GLYPH_SLOTS as usize],
            size: None,
            cursor: (0, 0),
            backlight: false,
        }
    }

    /// Raw character code at a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Custom glyph shown at a cell, if any
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<Glyph> {
        self.cell(col, row)
            .filter(|code| *code < GLYPH_SLOTS)
            .and_then(Glyph::from_index)
    }

    /// Text of `len` cells starting at `col`, glyphs replaced by their symbols
    pub fn text(&self, col: usize, row: usize, len: usize) -> String<LINE_BYTES> {
        let mut out = String::new();
        let Some(cells) = self.cells.get(row) else {
            return out;
        };
        for &code in cells.iter().skip(col).take(len) {
            let ch = if code < GLYPH_SLOTS {
                Glyph::from_index(code).map_or('?', Glyph::symbol)
            } else {
                code as char
            };
            let _ = out.push(ch);
        }
        out
    }

    /// Full text of a row
    pub fn line(&self, row: usize) -> String<LINE_BYTES> {
        self.text(0, row, SCREEN_COLS)
    }

    /// Number of writes that landed on a cell
    pub fn writes_at(&self, col: usize, row: usize) -> u16 {
        self.writes
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }

    /// Number of writes that landed anywhere in a row
    pub fn row_writes(&self, row: usize) -> u32 {
        self.writes
            .get(row)
            .map_or(0, |r| r.iter().map(|w| *w as u32).sum())
    }

    /// Number of writes that landed on `len` cells starting at `col`
    pub fn span_writes(&self, col: usize, row: usize, len: usize) -> u32 {
        self.writes.get(row).map_or(0, |r| {
            r.iter().skip(col).take(len).map(|w| *w as u32).sum()
        })
    }

    /// Forget write counts (content is kept)
    pub fn reset_write_counts(&mut self) {
        self.writes = [[0; SCREEN_COLS]; SCREEN_ROWS];
    }

    /// Bitmap uploaded to a glyph slot
    pub fn registered_glyph(&self, index: u8) -> Option<GlyphBitmap> {
        self.glyphs.get(index as usize).copied().flatten()
    }

    /// Current cursor (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Check if the backlight is on
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Check if `begin` has been called
    pub fn is_ready(&self) -> bool {
        self.size.is_some()
    }

    fn active_size(&self) -> Result<(u8, u8), DisplayError> {
        self.size.ok_or(DisplayError::NotInitialized)
    }

    /// Put one character code at the cursor and advance
    fn put(&mut self, code: u8) -> Result<(), DisplayError> {
        let (cols, _) = self.active_size()?;
        let (col, row) = self.cursor;
        if col < cols {
            self.cells[row as usize][col as usize] = code;
            self.writes[row as usize][col as usize] =
                self.writes[row as usize][col as usize].saturating_add(1);
        }
        self.cursor.0 = col.saturating_add(1);
        Ok(())
    }
}

impl CharacterDisplay for CharScreen {
    fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        if cols == 0 || rows == 0 || cols as usize > SCREEN_COLS || rows as usize > SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.size = Some((cols, rows));
        self.cells = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.active_size()?;
        self.cells = [[b' '; SCREEN_COLS]; SCREEN_ROWS];
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let (cols, rows) = self.active_size()?;
        if col >= cols || row >= rows {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let code = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                REPLACEMENT
            };
            self.put(code)?;
        }
        Ok(())
    }

    fn write_glyph(&mut self, index: u8) -> Result<(), DisplayError> {
        if index >= GLYPH_SLOTS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.put(index)
    }

    fn create_glyph(&mut self, index: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        let slot = self
            .glyphs
            .get_mut(index as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        *slot = Some(*bitmap);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        self.size.unwrap_or((SCREEN_COLS as u8, SCREEN_ROWS as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> CharScreen {
        let mut screen = CharScreen::new();
        screen.begin(20, 4).unwrap();
        screen
    }

    #[test]
    fn test_requires_begin() {
        let mut screen = CharScreen::new();
        assert_eq!(screen.print("x"), Err(DisplayError::NotInitialized));
        assert_eq!(screen.set_cursor(0, 0), Err(DisplayError::NotInitialized));
        assert!(!screen.is_ready());
    }

    #[test]
    fn test_begin_rejects_oversized_geometry() {
        let mut screen = CharScreen::new();
        assert_eq!(screen.begin(40, 4), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.begin(20, 0), Err(DisplayError::InvalidCoordinates));
    }

    #[test]
    fn test_print_at_position() {
        let mut screen = ready();
        screen.print_at(3, 2, "abc").unwrap();
        assert_eq!(screen.text(3, 2, 3).as_str(), "abc");
        assert_eq!(screen.writes_at(3, 2), 1);
        assert_eq!(screen.writes_at(2, 2), 0);
        assert_eq!(screen.cursor(), (6, 2));
    }

    #[test]
    fn test_text_is_clipped_at_last_column() {
        let mut screen = ready();
        screen.print_at(17, 0, "abcdef").unwrap();
        assert_eq!(screen.text(17, 0, 3).as_str(), "abc");
        assert_eq!(screen.row_writes(0), 3);
        assert_eq!(screen.row_writes(1), 0);
    }

    #[test]
    fn test_cursor_out_of_range() {
        let mut screen = ready();
        assert_eq!(screen.set_cursor(20, 0), Err(DisplayError::InvalidCoordinates));
        assert_eq!(screen.set_cursor(0, 4), Err(DisplayError::InvalidCoordinates));
    }

    #[test]
    fn test_glyphs() {
        let mut screen = ready();
        screen
            .create_glyph(Glyph::Tank.index(), &Glyph::Tank.bitmap())
            .unwrap();
        assert_eq!(
            screen.registered_glyph(Glyph::Tank.index()),
            Some(Glyph::Tank.bitmap())
        );
        assert_eq!(
            screen.create_glyph(GLYPH_SLOTS, &[0; 8]),
            Err(DisplayError::InvalidCoordinates)
        );

        screen.set_cursor(5, 1).unwrap();
        screen.write_glyph(Glyph::Rising.index()).unwrap();
        assert_eq!(screen.glyph_at(5, 1), Some(Glyph::Rising));
        assert_eq!(screen.text(5, 1, 1).as_str(), "↑");
        assert_eq!(screen.glyph_at(6, 1), None);
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        let mut screen = ready();
        screen.print_at(0, 0, "°C").unwrap();
        assert_eq!(screen.text(0, 0, 2).as_str(), "?C");
    }

    #[test]
    fn test_clear_keeps_write_counts() {
        let mut screen = ready();
        screen.print_at(0, 0, "abc").unwrap();
        screen.clear().unwrap();
        assert_eq!(screen.line(0).as_str(), "                    ");
        assert_eq!(screen.row_writes(0), 3);
        screen.reset_write_counts();
        assert_eq!(screen.row_writes(0), 0);
    }

    #[test]
    fn test_print_fmt() {
        let mut screen = ready();
        screen.set_cursor(0, 3).unwrap();
        screen.print_fmt(format_args!("{:6.2}", 21.5f32)).unwrap();
        assert_eq!(screen.text(0, 3, 6).as_str(), " 21.50");
    }
}
