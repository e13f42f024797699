//! Long-lived push stream over the notification store.
//!
//! A stream first replays everything buffered after the consumer's cursor,
//! then forwards each new push as it lands. When nothing has been emitted
//! for a heartbeat interval it yields [`StreamFrame::Heartbeat`] so that
//! intermediaries keep the connection open.
//!
//! Dropping the stream drops its pending wait, so a disconnected consumer
//! leaves nothing registered on the store.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::types::NotificationId;
use beacon_core::Notification;
use futures::Stream;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::{clamp_heartbeat, MAX_HEARTBEAT_SECS};
use crate::store::NotificationStore;

/// One unit of output on a notification stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    Notification(Notification),
    /// Idle keep-alive. Does not move the stream's cursor.
    Heartbeat,
}

enum Wake {
    Pushed,
    Idle,
    Shutdown,
}

/// Logs when a stream is dropped, whether by shutdown or disconnect.
struct ClosedLog;

impl Drop for ClosedLog {
    fn drop(&mut self) {
        tracing::info!("Notification stream closed");
    }
}

/// Open a stream starting after `since`.
///
/// The stream ends only when `shutdown` is cancelled or the consumer drops
/// it. Frames carry notifications in strictly increasing id order and no
/// notification is emitted twice. `heartbeat` is capped at
/// [`MAX_HEARTBEAT_SECS`].
pub fn stream(
    store: Arc<NotificationStore>,
    since: NotificationId,
    heartbeat: Duration,
    shutdown: CancellationToken,
) -> impl Stream<Item = StreamFrame> + Send + 'static {
    let heartbeat = clamp_heartbeat(heartbeat);

    async_stream::stream! {
        let _closed = ClosedLog;
        let mut cursor = since;

        for notification in store.slice_since(cursor, 0) {
            cursor = notification.id;
            yield StreamFrame::Notification(notification);
        }
        let mut idle_deadline = Instant::now() + heartbeat;

        loop {
            let changed = store.changed();
            tokio::pin!(changed);
            changed.as_mut().enable();

            let fresh = store.slice_since(cursor, 0);
            if !fresh.is_empty() {
                for notification in fresh {
                    cursor = notification.id;
                    yield StreamFrame::Notification(notification);
                }
                idle_deadline = Instant::now() + heartbeat;
                continue;
            }

            let wake = tokio::select! {
                () = shutdown.cancelled() => Wake::Shutdown,
                () = changed.as_mut() => Wake::Pushed,
                () = tokio::time::sleep_until(idle_deadline) => Wake::Idle,
            };

            match wake {
                Wake::Pushed => {}
                Wake::Idle => {
                    tracing::trace!(cursor, "Stream heartbeat");
                    yield StreamFrame::Heartbeat;
                    idle_deadline = Instant::now() + heartbeat;
                }
                Wake::Shutdown => {
                    tracing::debug!(cursor, "Stream closed by shutdown");
                    break;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
