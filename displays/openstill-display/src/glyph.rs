//! Custom glyph set
//!
//! HD44780-class controllers expose eight user-definable 5x8 characters,
//! addressed by character codes 0-7. OpenStill registers five of them at
//! start-up and refers to them by slot index afterwards.

/// One custom glyph: eight rows, the low five bits of each are pixels
pub type GlyphBitmap = [u8; 8];

/// Number of glyphs OpenStill registers
pub const GLYPH_COUNT: usize = 5;

/// Number of user-definable glyph slots on the controller
pub const GLYPH_SLOTS: u8 = 8;

/// Custom glyphs, discriminant = slot index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    /// Temperature went up since the last redraw
    Rising = 0,
    /// Temperature went down (or stayed put) since the last redraw
    Falling = 1,
    /// Wash tank, prefixes the remaining alcohol volume
    Tank = 2,
    /// Still head, prefixes the head ABV
    Head = 3,
    /// Flow marker, suffixes the flow rate
    Flow = 4,
}

impl Glyph {
    /// All glyphs in slot order
    pub const ALL: [Glyph; GLYPH_COUNT] = [
        Glyph::Rising,
        Glyph::Falling,
        Glyph::Tank,
        Glyph::Head,
        Glyph::Flow,
    ];

    /// Slot index the glyph is registered at
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Look up the glyph registered at `index`
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Pixel pattern uploaded to the controller
    pub const fn bitmap(self) -> GlyphBitmap {
        match self {
            Glyph::Rising => [
                0b00100, 0b01110, 0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100,
            ],
            Glyph::Falling => [
                0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111, 0b01110, 0b00100,
            ],
            Glyph::Tank => [
                0b01110, 0b10001, 0b11111, 0b11111, 0b11111, 0b11111, 0b11111, 0b01110,
            ],
            Glyph::Head => [
                0b11111, 0b11111, 0b11000, 0b11000, 0b11000, 0b11000, 0b11000, 0b11000,
            ],
            Glyph::Flow => [
                0b11000, 0b11001, 0b01010, 0b11100, 0b01000, 0b10111, 0b00111, 0b00101,
            ],
        }
    }

    /// Stand-in character used when a screen is dumped as text
    pub const fn symbol(self) -> char {
        match self {
            Glyph::Rising => '↑',
            Glyph::Falling => '↓',
            Glyph::Tank => '▯',
            Glyph::Head => '⌐',
            Glyph::Flow => '≈',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_stable() {
        for (i, glyph) in Glyph::ALL.iter().enumerate() {
            assert_eq!(glyph.index() as usize, i);
            assert_eq!(Glyph::from_index(i as u8), Some(*glyph));
        }
        assert_eq!(Glyph::from_index(GLYPH_COUNT as u8), None);
    }

    #[test]
    fn test_bitmaps_fit_five_columns() {
        for glyph in Glyph::ALL {
            assert!(glyph.bitmap().iter().all(|row| *row < 0b100000));
        }
    }

    #[test]
    fn test_arrows_are_mirrored() {
        let mut up = Glyph::Rising.bitmap();
        up.reverse();
        assert_eq!(up, Glyph::Falling.bitmap());
    }
}
