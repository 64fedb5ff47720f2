//! Configuration types
//!
//! Board-agnostic configuration structures for the front panel and the
//! notification service.

pub mod types;

pub use types::*;
