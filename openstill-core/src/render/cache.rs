//! Last-rendered value per temperature slot

use crate::reading::{Slot, SLOT_COUNT};

/// Value every slot starts with
pub const CACHE_SENTINEL: f32 = 0.0;

/// Field cache
///
/// Holds, per slot, the raw (unclamped) temperature most recently written
/// to the display. A stale slot no longer shows that value (the screen was
/// cleared or overwritten) and must be redrawn whatever the reading is; its
/// value is kept so the trend still compares against the last reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldCache {
    values: [f32; SLOT_COUNT],
    stale: [bool; SLOT_COUNT],
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCache {
    /// Create a cache with every slot at the sentinel
    pub const fn new() -> Self {
        Self {
            values: [CACHE_SENTINEL; SLOT_COUNT],
            stale: [false; SLOT_COUNT],
        }
    }

    /// Value last drawn for a slot
    pub fn get(&self, slot: Slot) -> f32 {
        self.values[slot.index()]
    }

    /// Check whether the slot must be redrawn to show `value`
    pub fn is_dirty(&self, slot: Slot, value: f32) -> bool {
        self.stale[slot.index()] || self.values[slot.index()] != value
    }

    /// Check whether the slot was invalidated since it was last drawn
    pub fn is_stale(&self, slot: Slot) -> bool {
        self.stale[slot.index()]
    }

    /// Record that `value` was written for a slot
    pub fn store(&mut self, slot: Slot, value: f32) {
        self.values[slot.index()] = value;
        self.stale[slot.index()] = false;
    }

    /// Mark one slot for redraw on the next render
    pub fn invalidate_slot(&mut self, slot: Slot) {
        self.stale[slot.index()] = true;
    }

    /// Mark every slot for redraw
    pub fn invalidate(&mut self) {
        self.stale = [true; SLOT_COUNT];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_sentinel() {
        let cache = FieldCache::new();
        for slot in Slot::ALL {
            assert_eq!(cache.get(slot), CACHE_SENTINEL);
            assert!(!cache.is_stale(slot));
            assert!(!cache.is_dirty(slot, 0.0));
            assert!(cache.is_dirty(slot, 0.5));
        }
    }

    #[test]
    fn test_store_is_per_slot() {
        let mut cache = FieldCache::new();
        cache.store(Slot::Tank, 78.25);
        assert_eq!(cache.get(Slot::Tank), 78.25);
        assert!(!cache.is_dirty(Slot::Tank, 78.25));
        assert_eq!(cache.get(Slot::Header), CACHE_SENTINEL);
    }

    #[test]
    fn test_invalidate_keeps_last_value() {
        let mut cache = FieldCache::new();
        cache.store(Slot::Water, 12.0);
        cache.invalidate();
        assert!(cache.is_dirty(Slot::Water, 12.0));
        assert!(cache.is_dirty(Slot::Header, 0.0));
        assert_eq!(cache.get(Slot::Water), 12.0);

        cache.store(Slot::Water, 12.0);
        assert!(!cache.is_dirty(Slot::Water, 12.0));
        assert!(cache.is_stale(Slot::Header));
    }

    #[test]
    fn test_invalidate_single_slot() {
        let mut cache = FieldCache::new();
        cache.store(Slot::PrimaryShelf, 30.0);
        cache.store(Slot::Header, 31.0);
        cache.invalidate_slot(Slot::PrimaryShelf);
        assert!(cache.is_dirty(Slot::PrimaryShelf, 30.0));
        assert_eq!(cache.get(Slot::PrimaryShelf), 30.0);
        assert!(!cache.is_dirty(Slot::Header, 31.0));
    }
}
