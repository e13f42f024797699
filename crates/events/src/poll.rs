//! Bounded long-poll over the notification store.

use std::time::Duration;

use beacon_core::types::NotificationId;
use beacon_core::Notification;
use tokio::time::Instant;

use crate::store::NotificationStore;

/// Shortest wait a blocking poll is granted.
pub const MIN_WAIT: Duration = Duration::from_secs(1);

/// A normalized pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollRequest {
    /// Last id the consumer has seen.
    pub since: NotificationId,
    /// Maximum items to return; non-positive means unbounded.
    pub limit: i64,
    /// Seconds to block when nothing is available; non-positive means
    /// return immediately.
    pub wait_secs: i64,
}

impl Default for PollRequest {
    fn default() -> Self {
        Self {
            since: 0,
            limit: 50,
            wait_secs: 0,
        }
    }
}

/// Items returned by a poll together with the consumer's next cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct PollResult {
    pub items: Vec<Notification>,
    /// Id of the last returned item, or the request's `since` when empty.
    pub last_id: NotificationId,
}

impl PollResult {
    fn new(items: Vec<Notification>, since: NotificationId) -> Self {
        let last_id = items.last().map_or(since, |n| n.id);
        Self { items, last_id }
    }
}

/// Clamp a requested wait into `[MIN_WAIT, max_wait]`.
pub fn clamp_wait(wait_secs: i64, max_wait: Duration) -> Duration {
    let requested = Duration::from_secs(u64::try_from(wait_secs).unwrap_or(0));
    requested.clamp(MIN_WAIT, max_wait.max(MIN_WAIT))
}

/// Return matching items, blocking up to a bounded deadline if there are
/// none yet.
///
/// Returns immediately when items already exist or `wait_secs <= 0`.
/// Otherwise waits for pushes without holding the store lock, re-checking
/// after each wake, until something matches or the clamped deadline passes.
pub async fn poll(store: &NotificationStore, request: PollRequest, max_wait: Duration) -> PollResult {
    let PollRequest {
        since,
        limit,
        wait_secs,
    } = request;

    let items = store.slice_since(since, limit);
    if !items.is_empty() || wait_secs <= 0 {
        return PollResult::new(items, since);
    }

    let wait = clamp_wait(wait_secs, max_wait);
    let deadline = Instant::now() + wait;

    loop {
        let changed = store.changed();
        tokio::pin!(changed);
        changed.as_mut().enable();

        let items = store.slice_since(since, limit);
        if !items.is_empty() {
            return PollResult::new(items, since);
        }

        if tokio::time::timeout_at(deadline, changed).await.is_err() {
            tracing::debug!(since, wait_ms = wait.as_millis() as u64, "Long-poll timed out");
            return PollResult::new(store.slice_since(since, limit), since);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use beacon_core::NewNotification;

    use super::*;

    const MAX_WAIT: Duration = Duration::from_secs(30);

    fn request(since: NotificationId, limit: i64, wait_secs: i64) -> PollRequest {
        PollRequest {
            since,
            limit,
            wait_secs,
        }
    }

    #[test]
    fn wait_is_clamped_between_floor_and_ceiling() {
        assert_eq!(clamp_wait(0, MAX_WAIT), Duration::from_secs(1));
        assert_eq!(clamp_wait(-4, MAX_WAIT), Duration::from_secs(1));
        assert_eq!(clamp_wait(5, MAX_WAIT), Duration::from_secs(5));
        assert_eq!(clamp_wait(600, MAX_WAIT), Duration::from_secs(30));
        assert_eq!(clamp_wait(5, Duration::ZERO), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn returns_available_items_immediately() {
        let store = NotificationStore::new(10, "test");
        for i in 0..3 {
            store.push(NewNotification::new(format!("n{i}")));
        }

        let result = poll(&store, request(1, 50, 10), MAX_WAIT).await;
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.last_id, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_wait_with_nothing_new_does_not_block() {
        let store = NotificationStore::new(10, "test");
        store.push(NewNotification::new("old"));

        let started = Instant::now();
        let result = poll(&store, request(1, 50, 0), MAX_WAIT).await;
        assert!(result.items.is_empty());
        assert_eq!(result.last_id, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_empty_with_unchanged_cursor() {
        let store = NotificationStore::new(10, "test");

        let started = Instant::now();
        let result = poll(&store, request(7, 50, 5), MAX_WAIT).await;
        assert!(result.items.is_empty());
        assert_eq!(result.last_id, 7);
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(started.elapsed() < Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn requested_wait_is_capped_by_max_wait() {
        let store = NotificationStore::new(10, "test");

        let started = Instant::now();
        let result = poll(&store, request(0, 50, 3_600), Duration::from_secs(2)).await;
        assert!(result.items.is_empty());
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn push_during_wait_returns_promptly() {
        let store = Arc::new(NotificationStore::new(10, "test"));
        store.push(NewNotification::new("seen"));

        let producer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(250)).await;
                store.push(NewNotification::new("fresh"));
            })
        };

        let started = Instant::now();
        let result = poll(&store, request(1, 50, 5), MAX_WAIT).await;
        producer.await.unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].message, "fresh");
        assert_eq!(result.last_id, 2);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn limit_applies_to_long_poll_results() {
        let store = NotificationStore::new(10, "test");
        for i in 0..5 {
            store.push(NewNotification::new(format!("n{i}")));
        }

        let result = poll(&store, request(0, 2, 5), MAX_WAIT).await;
        assert_eq!(result.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(result.last_id, 2);
    }
}
