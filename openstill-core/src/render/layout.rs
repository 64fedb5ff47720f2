//! Screen layout
//!
//! Fixed positions on the 20x4 panel:
//!
//! ```text
//!  col 0          11  14   19
//!     ┌────────────────────┐
//! r0  │Shel: 78.40↑    123g│  shelf, weight / heater override
//! r1  │Head: 78.10↑  ⌐92.1%│  head, head ABV
//! r2  │Tank: 95.30↓  ▯3.2 L│  tank, alcohol left
//! r3  │Wate: 21.00↑PWR: 40%│  water, power / flow rate
//!     └────────────────────┘
//! ```
//!
//! Power is redrawn on every render and overwrites the flow reading that
//! shares row 3; the heater override and the weight likewise share row 0.

use heapless::String;

use crate::reading::Slot;

/// Widest field on the panel
pub const MAX_FIELD_WIDTH: usize = 20;

/// Panel columns
pub const LCD_COLUMNS: u8 = 20;

/// Panel rows
pub const LCD_ROWS: u8 = 4;

/// Boot banner shown at start-up
pub const BANNER: &str = "OpenStill";

/// Characters of the slot name shown
pub const NAME_WIDTH: usize = 4;

/// Width of the temperature after the name
pub const TEMP_WIDTH: usize = 6;

/// Weight and flow readings wrap at this bound to stay within five digits
pub const READING_WRAP: i32 = 99_999;

/// Largest head ABV or tank volume that fits its 6-cell field
pub const DERIVED_MAX: f32 = 99.9;

/// Row used by the weight reading and the heater override
pub const WEIGHT_ROW: u8 = 0;

/// Row used by the flow reading and the power percentage
pub const FLOW_ROW: u8 = 3;

/// Position and width of a fixed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldSpec {
    /// Start column
    pub col: u8,
    /// Row
    pub row: u8,
    /// Width in characters, glyphs included
    pub width: usize,
}

impl FieldSpec {
    /// Create a field spec
    pub const fn new(col: u8, row: u8, width: usize) -> Self {
        Self { col, row, width }
    }

    /// Spaces covering the whole field
    pub fn blank(&self) -> String<MAX_FIELD_WIDTH> {
        let mut out = String::new();
        for _ in 0..self.width.min(MAX_FIELD_WIDTH) {
            let _ = out.push(' ');
        }
        out
    }
}

/// Slot line: name, colon, temperature, trend glyph
pub const fn slot_field(slot: Slot) -> FieldSpec {
    FieldSpec::new(0, slot.row(), NAME_WIDTH + 1 + TEMP_WIDTH + 1)
}

/// Column of the trend glyph on a slot line
pub const TREND_COL: u8 = (NAME_WIDTH + 1 + TEMP_WIDTH) as u8;

/// Head ABV: glyph, `{:4.1}`, `%`
pub const HEAD_ABV: FieldSpec = FieldSpec::new(14, Slot::Header.row(), 6);

/// Alcohol left in the tank: glyph, `{:<4.1}`, `L`
pub const TANK_ALCOHOL: FieldSpec = FieldSpec::new(14, Slot::Tank.row(), 6);

/// Weight: `{:5}g`
pub const WEIGHT: FieldSpec = FieldSpec::new(14, WEIGHT_ROW, 6);

/// Flow rate: `{:5}` and flow glyph
pub const FLOW_RATE: FieldSpec = FieldSpec::new(14, FLOW_ROW, 6);

/// Power percentage: `PWR:{:3}%`
pub const POWER: FieldSpec = FieldSpec::new(12, FLOW_ROW, 8);

/// Heater override: `HTR:{:3}%`
pub const HEATER: FieldSpec = FieldSpec::new(12, WEIGHT_ROW, 8);

/// IP address banner
pub const IP_ADDRESS: FieldSpec = FieldSpec::new(0, 0, MAX_FIELD_WIDTH);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_matches_width() {
        assert_eq!(HEAD_ABV.blank().as_str(), "      ");
        assert_eq!(POWER.blank().len(), POWER.width);
    }

    #[test]
    fn test_fields_fit_panel() {
        for spec in [HEAD_ABV, TANK_ALCOHOL, WEIGHT, FLOW_RATE, POWER, HEATER, IP_ADDRESS] {
            assert!(spec.col as usize + spec.width <= LCD_COLUMNS as usize);
            assert!(spec.row < LCD_ROWS);
        }
    }

    #[test]
    fn test_largest_derived_value_fits() {
        let mut text: String<MAX_FIELD_WIDTH> = String::new();
        core::fmt::Write::write_fmt(&mut text, format_args!("{:>4.1}%", DERIVED_MAX)).unwrap();
        assert_eq!(text.len() + 1, HEAD_ABV.width);
    }

    #[test]
    fn test_slot_line_ends_before_derived_fields() {
        assert_eq!(TREND_COL, 11);
        assert!((slot_field(Slot::Header).width as u8) <= HEAD_ABV.col);
    }
}
