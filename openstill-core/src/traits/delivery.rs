//! Push notification delivery trait

use crate::notify::{DeliveryResponse, PushRequest};

/// Errors that can occur while delivering a push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeliveryError {
    /// Could not open the secured connection to the host
    Connect,
    /// Request sent but no response status came back
    NoStatus,
}

/// Channel that delivers a push request to the notification service
///
/// Implementations own the TLS client and HTTP encoding. A call may block
/// for the duration of one request; no timeout is applied beyond what the
/// transport itself enforces.
pub trait NotificationTransport {
    /// POST the request body with its headers
    ///
    /// Returns the response status and body, or why no status was obtained.
    fn post(&mut self, request: &PushRequest<'_>) -> Result<DeliveryResponse, DeliveryError>;
}

impl<T: NotificationTransport + ?Sized> NotificationTransport for &mut T {
    fn post(&mut self, request: &PushRequest<'_>) -> Result<DeliveryResponse, DeliveryError> {
        (**self).post(request)
    }
}
