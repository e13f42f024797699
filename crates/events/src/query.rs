//! Stateless slicing of a store snapshot.
//!
//! Items older than a consumer's cursor that have already been evicted are
//! simply absent from the result; no gap marker is produced.

use beacon_core::types::NotificationId;
use beacon_core::Notification;

/// Return every notification with `id > since`, oldest first, truncated to
/// `limit` entries. A non-positive `limit` means unbounded.
///
/// `snapshot` must yield notifications in ascending id order, which is how
/// the store keeps them.
pub fn slice_since<'a, I>(snapshot: I, since: NotificationId, limit: i64) -> Vec<Notification>
where
    I: IntoIterator<Item = &'a Notification>,
{
    snapshot
        .into_iter()
        .skip_while(|n| n.id <= since)
        .take(effective_limit(limit))
        .cloned()
        .collect()
}

fn effective_limit(limit: i64) -> usize {
    if limit <= 0 {
        usize::MAX
    } else {
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}
