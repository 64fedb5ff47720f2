//! Configuration type definitions
//!
//! These types describe the display hardware, the push notification
//! service and the process labels. Loading and storing them is up to the
//! host firmware.

use heapless::String;

use crate::reading::{Slot, SLOT_COUNT};
use crate::render::layout::{LCD_COLUMNS, LCD_ROWS};
use crate::traits::SlotNames;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum slot label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum notification host name length
pub const MAX_HOST_LEN: usize = 32;

/// Maximum push topic (notification code) length
pub const MAX_TOPIC_LEN: usize = 64;

/// Default notification service
pub const DEFAULT_NOTIFY_HOST: &str = "ntfy.sh";

/// Default notification service port (HTTPS)
pub const DEFAULT_NOTIFY_PORT: u16 = 443;

/// Interval between notification queue checks, fixed
pub const CHECK_INTERVAL_MS: u32 = 10_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No push topic configured
    EmptyTopic,
    /// Tank size is zero, negative or not a number
    InvalidTankSize,
    /// Display geometry does not hold the 20x4 panel layout
    InvalidGeometry,
    /// A string does not fit its fixed capacity
    TooLong,
}

/// Character LCD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LcdConfig {
    /// 7-bit I2C address of the PCF8574 backpack
    pub i2c_address: u8,
    /// Character columns
    pub columns: u8,
    /// Character rows
    pub rows: u8,
    /// Expander bit driving the backlight transistor
    pub backlight_bit: u8,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x27,
            columns: 20,
            rows: 4,
            backlight_bit: 3,
        }
    }
}

/// What happens to a notification whose delivery failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeliveryPolicy {
    /// Mark it sent anyway; a failed alert is dropped
    #[default]
    AtMostOnce,
    /// Leave it unsent so the next check tries it again
    RetryOnFailure,
}

/// Push notification service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NotifyConfig {
    /// Service host name
    pub host: String<MAX_HOST_LEN>,
    /// Service port
    pub port: u16,
    /// Topic the device publishes to (the push notification code)
    pub topic: String<MAX_TOPIC_LEN>,
    /// Failed delivery handling
    pub policy: DeliveryPolicy,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        let mut host = String::new();
        let _ = host.push_str(DEFAULT_NOTIFY_HOST);
        Self {
            host,
            port: DEFAULT_NOTIFY_PORT,
            topic: String::new(),
            policy: DeliveryPolicy::AtMostOnce,
        }
    }
}

impl NotifyConfig {
    /// Default service with the given topic
    pub fn with_topic(topic: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.topic = copy_str(topic)?;
        Ok(config)
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.is_empty() {
            return Err(ConfigError::EmptyTopic);
        }
        Ok(())
    }
}

/// Display names of the four temperature slots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotLabels {
    labels: [String<MAX_LABEL_LEN>; SLOT_COUNT],
}

impl Default for SlotLabels {
    fn default() -> Self {
        let mut labels: [String<MAX_LABEL_LEN>; SLOT_COUNT] = core::array::from_fn(|_| String::new());
        for (label, name) in labels.iter_mut().zip(["Shelf10", "Head", "Tank", "Water"]) {
            let _ = label.push_str(name);
        }
        Self { labels }
    }
}

impl SlotLabels {
    /// Create labels in slot order
    pub fn new(shelf: &str, head: &str, tank: &str, water: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            labels: [
                copy_str(shelf)?,
                copy_str(head)?,
                copy_str(tank)?,
                copy_str(water)?,
            ],
        })
    }

    /// Rename one slot
    pub fn set(&mut self, slot: Slot, name: &str) -> Result<(), ConfigError> {
        self.labels[slot.index()] = copy_str(name)?;
        Ok(())
    }
}

impl SlotNames for SlotLabels {
    fn slot_name(&self, slot: Slot) -> &str {
        self.labels[slot.index()].as_str()
    }
}

/// Complete front panel configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StillConfig {
    /// Display hardware
    pub lcd: LcdConfig,
    /// Notification service
    pub notify: NotifyConfig,
    /// Slot display names
    pub labels: SlotLabels,
    /// Wash tank capacity in litres
    pub tank_size_l: f32,
}

impl Default for StillConfig {
    fn default() -> Self {
        Self {
            lcd: LcdConfig::default(),
            notify: NotifyConfig::default(),
            labels: SlotLabels::default(),
            tank_size_l: 30.0,
        }
    }
}

impl StillConfig {
    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Field positions assume the full 20x4 panel
        if self.lcd.columns < LCD_COLUMNS || self.lcd.rows != LCD_ROWS {
            return Err(ConfigError::InvalidGeometry);
        }
        if !self.tank_size_l.is_finite() || self.tank_size_l <= 0.0 {
            return Err(ConfigError::InvalidTankSize);
        }
        self.notify.validate()
    }
}

fn copy_str<const N: usize>(s: &str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(s).map_err(|_| ConfigError::TooLong)?;
    Ok(out)
}
