//! Bounded, ordered, thread-safe notification log.
//!
//! [`NotificationStore`] is the one piece of shared mutable state on the bus.
//! It is created once at startup and shared via `Arc<NotificationStore>`.
//! Every read hands back an owned snapshot; nothing outside the store ever
//! holds a reference into the ring.

use std::sync::{Mutex, MutexGuard, PoisonError};

use beacon_core::types::NotificationId;
use beacon_core::{NewNotification, Notification, NotificationLevel};
use chrono::Utc;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

use crate::config::BusConfig;
use crate::query;
use crate::ring::RingBuffer;

struct StoreState {
    ring: RingBuffer<Notification>,
    /// Id handed to the next push. Never reused, even after eviction.
    next_id: NotificationId,
}

/// In-memory notification log with monotonic ids and FIFO eviction.
///
/// Pushes and snapshot reads are serialized by a short-lived mutex that is
/// never held across an `.await`. Waiters block on [`changed`](Self::changed)
/// instead, which every push fires for all of them at once.
///
/// # Usage
///
/// ```rust
/// use beacon_core::NewNotification;
/// use beacon_events::NotificationStore;
///
/// let store = NotificationStore::new(500, "beacon");
/// let n = store.push(NewNotification::new("Backup completed").with_level("success"));
/// assert_eq!(n.id, 1);
/// assert_eq!(store.slice_since(0, 0).len(), 1);
/// ```
pub struct NotificationStore {
    state: Mutex<StoreState>,
    changed: Notify,
    source_name: String,
}

impl NotificationStore {
    /// Create an empty store holding at most `capacity` notifications.
    pub fn new(capacity: usize, source_name: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                ring: RingBuffer::new(capacity),
                next_id: 1,
            }),
            changed: Notify::new(),
            source_name: source_name.into(),
        }
    }

    /// Create the process-wide store and seed it with an "online" notice.
    pub fn from_config(config: &BusConfig) -> Self {
        let store = Self::new(config.capacity, config.source_name.clone());
        let seed = store.push(
            NewNotification::new(format!("{} notifications online", config.source_name))
                .with_level(NotificationLevel::Info),
        );
        tracing::info!(
            capacity = store.capacity(),
            seed_id = seed.id,
            "Notification store created"
        );
        store
    }

    /// Publish a draft.
    ///
    /// Assigns the next id, stamps the current time, appends, evicts the
    /// oldest entry if over capacity, and wakes every waiter. The whole
    /// sequence runs under the store lock, so ids are handed out and become
    /// visible in the same order.
    pub fn push(&self, draft: NewNotification) -> Notification {
        let mut state = self.lock();

        let id = state.next_id;
        state.next_id += 1;

        let notification = draft.into_notification(id, Utc::now(), &self.source_name);
        if let Some(evicted) = state.ring.push(notification.clone()) {
            tracing::trace!(evicted_id = evicted.id, "Evicted oldest notification");
        }

        self.changed.notify_waiters();
        drop(state);

        tracing::debug!(
            id,
            level = %notification.level,
            source = %notification.source,
            "Notification published"
        );
        notification
    }

    /// Snapshot every live notification with `id > since`, at most `limit`
    /// of them (non-positive means unbounded).
    pub fn slice_since(&self, since: NotificationId, limit: i64) -> Vec<Notification> {
        let state = self.lock();
        query::slice_since(state.ring.iter(), since, limit)
    }

    /// Future that resolves on the next push.
    ///
    /// To avoid missing a push that lands between checking the store and
    /// awaiting, pin the future and call `enable()` on it *before* calling
    /// [`slice_since`](Self::slice_since).
    pub fn changed(&self) -> Notified<'_> {
        self.changed.notified()
    }

    /// Number of live notifications.
    pub fn len(&self) -> usize {
        self.lock().ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().ring.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().ring.capacity()
    }

    /// Id of the most recent push, or 0 if nothing was ever pushed.
    pub fn last_id(&self) -> NotificationId {
        self.lock().next_id - 1
    }

    /// The bus name, used as the default `source`.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // The ring is consistent after every statement; poisoning is ignored.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
