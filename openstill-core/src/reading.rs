//! Process readings shown on the front panel

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of primary temperature slots
pub const SLOT_COUNT: usize = 4;

/// Primary temperature slot
///
/// The discriminant is both the cache index and the display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot {
    /// Column shelf (10th plate)
    PrimaryShelf = 0,
    /// Vapour temperature in the head
    Header = 1,
    /// Wash in the boiler tank
    Tank = 2,
    /// Cooling water
    Water = 3,
}

impl Slot {
    /// All slots in row order
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::PrimaryShelf, Slot::Header, Slot::Tank, Slot::Water];

    /// Cache index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display row
    pub const fn row(self) -> u8 {
        self as u8
    }
}

/// Snapshot of the readings the renderer consumes
///
/// Immutable for the duration of one render call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Temperatures in °C, indexed by [`Slot::index`]
    pub temperatures: [f32; SLOT_COUNT],
    /// Heater power (0-100 %)
    pub power_percent: u8,
}

impl Reading {
    /// Create a reading with the heater off
    pub const fn new(shelf: f32, header: f32, tank: f32, water: f32) -> Self {
        Self {
            temperatures: [shelf, header, tank, water],
            power_percent: 0,
        }
    }

    /// Set the heater power percentage
    pub const fn with_power(mut self, power_percent: u8) -> Self {
        self.power_percent = power_percent;
        self
    }

    /// Temperature of one slot
    pub const fn temperature(&self, slot: Slot) -> f32 {
        self.temperatures[slot.index()]
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
