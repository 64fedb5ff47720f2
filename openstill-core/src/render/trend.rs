//! Temperature trend

use openstill_display::Glyph;

/// Direction of a slot's temperature since its previous redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trend {
    /// New value above the previous one
    Rising,
    /// New value at or below the previous one
    FallingOrEqual,
}

impl Trend {
    /// Compare a new raw value with the previously drawn one
    pub fn between(new: f32, previous: f32) -> Self {
        if new > previous {
            Trend::Rising
        } else {
            Trend::FallingOrEqual
        }
    }

    /// Glyph drawn after the temperature
    pub const fn glyph(self) -> Glyph {
        match self {
            Trend::Rising => Glyph::Rising,
            Trend::FallingOrEqual => Glyph::Falling,
        }
    }
}
