//! Push request construction
//!
//! Notifications are published to an ntfy-style service: an HTTPS POST
//! to `/<topic>` whose body is the message text, with the title carried in
//! a header.

use heapless::String;

use super::queue::Notification;
use crate::config::{NotifyConfig, MAX_TOPIC_LEN};

/// Body content type
pub const CONTENT_TYPE: &str = "text/plain";

/// Header carrying the notification title
pub const TITLE_HEADER: &str = "Title";

/// Longest request path: `/` plus the topic
pub const MAX_PATH_LEN: usize = MAX_TOPIC_LEN + 1;

/// Longest response body kept for logging
pub const MAX_RESPONSE_LEN: usize = 128;

/// A publish request, borrowing from the config and the notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest<'a> {
    /// Service host name
    pub host: &'a str,
    /// Service port
    pub port: u16,
    path: String<MAX_PATH_LEN>,
    /// Notification title
    pub title: &'a str,
    /// Message text
    pub body: &'a str,
}

impl<'a> PushRequest<'a> {
    /// Build the request publishing `notification` to the configured topic
    pub fn for_notification(config: &'a NotifyConfig, notification: &'a Notification) -> Self {
        let mut path = String::new();
        // Cannot overflow: the topic is at most MAX_TOPIC_LEN bytes
        let _ = path.push('/');
        let _ = path.push_str(&config.topic);

        Self {
            host: &config.host,
            port: config.port,
            path,
            title: notification.name(),
            body: notification.message(),
        }
    }

    /// Request path, `/` followed by the topic
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Headers to send, in order
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [(TITLE_HEADER, self.title), ("Content-Type", CONTENT_TYPE)]
    }
}

/// What the service answered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeliveryResponse {
    /// HTTP status code
    pub status: u16,
    /// Start of the response body
    pub body: String<MAX_RESPONSE_LEN>,
}

impl DeliveryResponse {
    /// Create a response, keeping as much of the body as fits
    pub fn new(status: u16, body: &str) -> Self {
        let mut end = body.len().min(MAX_RESPONSE_LEN);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        let mut kept = String::new();
        let _ = kept.push_str(&body[..end]);
        Self { status, body: kept }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_for_notification() {
        let config = NotifyConfig::with_topic("still-42").unwrap();
        let notification = Notification::new("Head", "Head temperature above 78.5");

        let request = PushRequest::for_notification(&config, &notification);
        assert_eq!(request.host, "ntfy.sh");
        assert_eq!(request.port, 443);
        assert_eq!(request.path(), "/still-42");
        assert_eq!(request.body, "Head temperature above 78.5");
        assert_eq!(
            request.headers(),
            [("Title", "Head"), ("Content-Type", "text/plain")]
        );
    }

    #[test]
    fn test_longest_topic_fits_path() {
        let topic = [b't'; MAX_TOPIC_LEN];
        let topic = core::str::from_utf8(&topic).unwrap();
        let config = NotifyConfig::with_topic(topic).unwrap();
        let notification = Notification::new("n", "m");

        let request = PushRequest::for_notification(&config, &notification);
        assert_eq!(request.path().len(), MAX_PATH_LEN);
        assert!(request.path().ends_with(topic));
    }

    #[test]
    fn test_response_keeps_body_prefix() {
        let response = DeliveryResponse::new(429, "slow down");
        assert_eq!(response.status, 429);
        assert_eq!(response.body.as_str(), "slow down");

        let long = "é".repeat(MAX_RESPONSE_LEN);
        let response = DeliveryResponse::new(200, &long);
        assert_eq!(response.body.len(), MAX_RESPONSE_LEN);
        assert!(response.body.chars().all(|c| c == 'é'));
    }
}
