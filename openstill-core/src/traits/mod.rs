//! Collaborator traits
//!
//! These traits define the interface between the front-panel logic and
//! the rest of the controller: the alcohol calculator, the process
//! context that names the sensor slots, and the channel that delivers
//! push notifications.

pub mod calculator;
pub mod delivery;
pub mod names;

pub use calculator::{AlcoholCalculator, CalcError};
pub use delivery::{DeliveryError, NotificationTransport};
pub use names::SlotNames;
