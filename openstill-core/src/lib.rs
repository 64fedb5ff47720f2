//! Board-agnostic core logic for the still controller front panel
//!
//! This crate contains the application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (alcohol calculator, slot names, push transport)
//! - Dirty-tracking renderer for the character display
//! - Notification queue and the rate-limited dispatcher draining it
//! - Periodic task trait and a cooperative task runner
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

// Must come first so the logging macros are visible to the other modules
#[macro_use]
mod fmt;

pub mod config;
pub mod notify;
pub mod reading;
pub mod render;
pub mod scheduler;
pub mod traits;

pub use reading::{Reading, Slot, SLOT_COUNT};
