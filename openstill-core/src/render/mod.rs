//! Front panel rendering
//!
//! Character displays are slow and flicker when rewritten, so the renderer
//! keeps the last value drawn for each temperature slot and only touches
//! slots whose value changed. Derived fields (head ABV, alcohol left in the
//! tank, heater power) are cheap and are redrawn on every call.

pub mod cache;
pub mod layout;
pub mod renderer;
pub mod trend;

pub use cache::{FieldCache, CACHE_SENTINEL};
pub use layout::FieldSpec;
pub use renderer::DisplayRenderer;
pub use trend::Trend;
