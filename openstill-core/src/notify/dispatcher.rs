//! Rate-limited notification dispatcher
//!
//! Drains the pending queue one notification per invocation, lowest slot
//! first. The host scheduler sets the pace through [`PeriodicTask`].

use super::queue::NotificationStore;
use super::request::PushRequest;
use crate::config::{DeliveryPolicy, NotifyConfig, CHECK_INTERVAL_MS};
use crate::scheduler::{millis_to_micros, PeriodicTask};
use crate::traits::{DeliveryError, NotificationTransport};

/// Result of one dispatcher invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// Nothing was pending
    Idle,
    /// The service answered
    Delivered {
        /// Queue slot of the notification
        slot: usize,
        /// HTTP status returned
        status: u16,
    },
    /// No status was obtained
    Failed {
        /// Queue slot of the notification
        slot: usize,
        /// Why delivery failed
        error: DeliveryError,
    },
}

/// Sends queued notifications through a transport
pub struct NotificationDispatcher<S, T> {
    config: NotifyConfig,
    store: S,
    transport: T,
    triggered: bool,
}

impl<S, T> NotificationDispatcher<S, T>
where
    S: NotificationStore,
    T: NotificationTransport,
{
    /// Create a dispatcher, not yet triggered
    pub fn new(config: NotifyConfig, store: S, transport: T) -> Self {
        Self {
            config,
            store,
            transport,
            triggered: false,
        }
    }

    /// Send the lowest-index unsent notification, if any
    ///
    /// At most one delivery is attempted per call. Failures are logged and
    /// reported in the outcome, never returned as errors. Whether a failed
    /// notification counts as sent depends on the configured
    /// [`DeliveryPolicy`].
    pub fn dispatch(&mut self) -> DispatchOutcome {
        let Self {
            config,
            store,
            transport,
            ..
        } = self;

        store
            .with_first_unsent(|slot, notification| {
                let result = {
                    let request = PushRequest::for_notification(config, notification);
                    info!(
                        "Sending notification '{}': {}",
                        request.title,
                        request.body
                    );
                    transport.post(&request)
                };

                match result {
                    Ok(response) => {
                        info!(
                            "Notification response status {}: {}",
                            response.status,
                            response.body.as_str()
                        );
                        notification.mark_sent();
                        DispatchOutcome::Delivered {
                            slot,
                            status: response.status,
                        }
                    }
                    Err(error) => {
                        warn!("Notification delivery failed: {:?}", error);
                        if config.policy == DeliveryPolicy::AtMostOnce {
                            notification.mark_sent();
                        }
                        DispatchOutcome::Failed { slot, error }
                    }
                }
            })
            .unwrap_or(DispatchOutcome::Idle)
    }

    /// Service configuration
    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Queue handle
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Release the queue handle and the transport
    pub fn into_parts(self) -> (S, T) {
        (self.store, self.transport)
    }
}

impl<S, T> PeriodicTask for NotificationDispatcher<S, T>
where
    S: NotificationStore,
    T: NotificationTransport,
{
    fn exec(&mut self) {
        let _ = self.dispatch();
    }

    /// Arms the task and asks to be checked again in ten seconds
    ///
    /// The interval does not depend on the queue contents.
    fn time_of_next_check(&mut self) -> u64 {
        self.triggered = true;
        millis_to_micros(CHECK_INTERVAL_MS)
    }

    fn is_triggered(&self) -> bool {
        self.triggered
    }

    fn clear_triggered(&mut self) {
        self.triggered = false;
    }
}
