//! Push notifications
//!
//! Alert producers append human-readable notifications to a fixed-size
//! queue. A periodic dispatcher drains it one notification per run,
//! delivering each through a [`NotificationTransport`](crate::traits::NotificationTransport).

pub mod dispatcher;
pub mod queue;
pub mod request;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use queue::{Notification, NotificationQueue, NotificationStore, QueueError, QUEUE_CAPACITY};
pub use request::{DeliveryResponse, PushRequest};
