//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in openstill-display and openstill-core for the front panel hardware:
//!
//! - Character LCDs (HD44780 behind a PCF8574 I2C backpack)

#![no_std]
#![deny(unsafe_code)]

pub mod lcd;
