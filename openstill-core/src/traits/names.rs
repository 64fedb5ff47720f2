//! Slot name accessor

use crate::reading::Slot;

/// Read-only access to the short display name of each sensor slot
pub trait SlotNames {
    /// Name shown in front of the slot's temperature
    ///
    /// The renderer shows at most four characters of it.
    fn slot_name(&self, slot: Slot) -> &str;
}

impl<T: SlotNames + ?Sized> SlotNames for &T {
    fn slot_name(&self, slot: Slot) -> &str {
        (**self).slot_name(slot)
    }
}
