//! Character display abstraction for OpenStill
//!
//! This crate provides:
//! - `CharacterDisplay` trait for cursor-addressed text displays (HD44780 and friends)
//! - The custom glyph set shown next to readings (trend arrows, tank, head, flow)
//! - `CharScreen`, an in-memory character grid implementing `CharacterDisplay`
//!
//! # Architecture
//!
//! The renderer in `openstill-core` only talks to `CharacterDisplay`. The
//! physical LCD driver lives in `openstill-drivers`; `CharScreen` stands in
//! for it on the host and records how often each cell was rewritten, which
//! is what the partial-redraw logic is judged by.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod glyph;
pub mod screen;

// Re-export key types
pub use backend::{CharacterDisplay, DisplayError};
pub use glyph::{Glyph, GlyphBitmap, GLYPH_COUNT};
pub use screen::{CharScreen, SCREEN_COLS, SCREEN_ROWS};
