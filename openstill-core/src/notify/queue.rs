//! Pending notification queue

use core::cell::RefCell;

use heapless::{String, Vec};

/// Number of notification slots
pub const QUEUE_CAPACITY: usize = 10;

/// Maximum notification title length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum notification message length
pub const MAX_MESSAGE_LEN: usize = 128;

/// Queue errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// All slots are taken (sent notifications are never evicted)
    Full,
}

/// One alert
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Notification {
    name: String<MAX_NAME_LEN>,
    message: String<MAX_MESSAGE_LEN>,
    sent: bool,
}

impl Notification {
    /// Create an unsent notification
    ///
    /// Name and message are cut to their capacity on a character boundary.
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: truncated(name),
            message: truncated(message),
            sent: false,
        }
    }

    /// Short title
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Body text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the notification has been handed to the transport
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Flag the notification as sent
    pub fn mark_sent(&mut self) {
        self.sent = true;
    }
}

/// Fixed-capacity notification queue
///
/// Slot order is arrival order and also priority order. Notifications stay
/// in their slot once sent; nothing is reordered or removed.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    slots: Vec<Notification, QUEUE_CAPACITY>,
}

impl NotificationQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append a notification
    ///
    /// Returns the slot it was stored in.
    pub fn push(&mut self, name: &str, message: &str) -> Result<usize, QueueError> {
        let slot = self.slots.len();
        self.slots
            .push(Notification::new(name, message))
            .map_err(|_| {
                warn!("Notification queue full, dropping '{}'", name);
                QueueError::Full
            })?;
        debug!("Queued notification '{}' in slot {}", name, slot);
        Ok(slot)
    }

    /// Notification in a slot
    pub fn get(&self, slot: usize) -> Option<&Notification> {
        self.slots.get(slot)
    }

    /// Mutable access to a slot
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Notification> {
        self.slots.get_mut(slot)
    }

    /// All occupied slots in order
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.slots.iter()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    /// Number of notifications not yet sent
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|n| !n.is_sent()).count()
    }

    /// Lowest-index unsent notification
    pub fn first_unsent_mut(&mut self) -> Option<(usize, &mut Notification)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find(|(_, n)| !n.is_sent())
    }
}

/// Read-write handle on the queue, as seen by the dispatcher
///
/// Lets the dispatcher work on a queue it owns, one it borrows, or one
/// shared with alert producers through a `RefCell`.
pub trait NotificationStore {
    /// Run `f` on the lowest-index unsent notification
    ///
    /// Returns `None` without calling `f` if nothing is pending.
    fn with_first_unsent<R, F>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(usize, &mut Notification) -> R;
}

impl NotificationStore for NotificationQueue {
    fn with_first_unsent<R, F>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(usize, &mut Notification) -> R,
    {
        self.first_unsent_mut().map(|(slot, n)| f(slot, n))
    }
}

impl<S: NotificationStore> NotificationStore for &mut S {
    fn with_first_unsent<R, F>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(usize, &mut Notification) -> R,
    {
        (**self).with_first_unsent(f)
    }
}

impl NotificationStore for &RefCell<NotificationQueue> {
    fn with_first_unsent<R, F>(&mut self, f: F) -> Option<R>
    where
        F: FnOnce(usize, &mut Notification) -> R,
    {
        match self.try_borrow_mut() {
            Ok(mut queue) => queue.with_first_unsent(f),
            Err(_) => {
                warn!("Notification queue busy, skipping check");
                None
            }
        }
    }
}

/// Copy as much of `s` as fits, never splitting a character
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    let _ = out.push_str(&s[..end]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_in_arrival_order() {
        let mut queue = NotificationQueue::new();
        assert_eq!(queue.push("A", "m1"), Ok(0));
        assert_eq!(queue.push("B", "m2"), Ok(1));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pending(), 2);
        assert_eq!(queue.get(0).map(Notification::name), Some("A"));
        assert_eq!(queue.get(1).map(Notification::message), Some("m2"));
        assert!(queue.get(2).is_none());
    }

    #[test]
    fn test_full_queue_rejects() {
        let mut queue = NotificationQueue::new();
        for i in 0..QUEUE_CAPACITY {
            assert_eq!(queue.push("n", "m"), Ok(i));
        }
        assert!(queue.is_full());
        assert_eq!(queue.push("late", "m"), Err(QueueError::Full));
        assert_eq!(queue.len(), QUEUE_CAPACITY);
    }

    #[test]
    fn test_sent_stays_in_place() {
        let mut queue = NotificationQueue::new();
        queue.push("A", "m1").unwrap();
        queue.push("B", "m2").unwrap();

        if let Some((slot, n)) = queue.first_unsent_mut() {
            assert_eq!(slot, 0);
            n.mark_sent();
        }
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pending(), 1);
        assert!(queue.get(0).unwrap().is_sent());

        let (slot, n) = queue.first_unsent_mut().unwrap();
        assert_eq!(slot, 1);
        assert_eq!(n.name(), "B");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'ă' would straddle the 16-byte limit
        let n = Notification::new("aaaaaaaaaaaaaaaă", "ok");
        assert_eq!(n.name(), "aaaaaaaaaaaaaaa");

        let long = "x".repeat(MAX_MESSAGE_LEN + 10);
        let n = Notification::new("t", &long);
        assert_eq!(n.message().len(), MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_refcell_store_shared_with_producer() {
        let shared = RefCell::new(NotificationQueue::new());
        shared.borrow_mut().push("A", "m1").unwrap();

        let mut store = &shared;
        let name = store.with_first_unsent(|_, n| {
            n.mark_sent();
            String::<MAX_NAME_LEN>::try_from(n.name()).unwrap()
        });
        assert_eq!(name.as_deref(), Some("A"));
        assert_eq!(shared.borrow().pending(), 0);

        // Producer keeps appending through its own handle
        shared.borrow_mut().push("B", "m2").unwrap();
        assert_eq!(store.with_first_unsent(|slot, _| slot), Some(1));
    }

    #[test]
    fn test_refcell_store_busy() {
        let shared = RefCell::new(NotificationQueue::new());
        shared.borrow_mut().push("A", "m1").unwrap();

        let _producer = shared.borrow();
        let mut store = &shared;
        assert_eq!(store.with_first_unsent(|slot, _| slot), None);
    }
}
