//! Server-Sent Events framing for notification streams.
//!
//! Each notification becomes `data: <json>\n\n`; each heartbeat becomes
//! `event: ping\ndata: {}\n\n`.

use std::convert::Infallible;

use axum::response::sse::Event;
use beacon_events::StreamFrame;
use futures::{Stream, StreamExt};

/// SSE event name used for idle keep-alives.
pub const PING_EVENT: &str = "ping";

/// Convert a single stream frame into an SSE event.
///
/// Returns `None` if the notification cannot be serialized.
pub fn frame_to_event(frame: StreamFrame) -> Option<Event> {
    match frame {
        StreamFrame::Notification(notification) => match Event::default().json_data(&notification) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::error!(id = notification.id, error = %e, "Failed to encode notification");
                None
            }
        },
        StreamFrame::Heartbeat => Some(Event::default().event(PING_EVENT).data("{}")),
    }
}

/// Adapt a frame stream into the item type `axum::response::Sse` expects.
pub fn into_sse_events<S>(frames: S) -> impl Stream<Item = Result<Event, Infallible>> + Send
where
    S: Stream<Item = StreamFrame> + Send,
{
    frames.filter_map(|frame| futures::future::ready(frame_to_event(frame).map(Ok)))
}
