//! Handlers for the `/notify` resource.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::HeaderName;
use axum::response::sse::Sse;
use axum::response::IntoResponse;
use axum::Json;
use beacon_core::NewNotification;
use beacon_events::{poll, stream as notification_stream};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::query::{PullParams, QueryPairs, StreamParams};
use crate::response::{OkResponse, Published, Pulled};
use crate::sse::into_sse_events;
use crate::state::AppState;

/// Tells nginx-style proxies not to buffer the stream.
const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /notify/send`.
///
/// Every field is optional at the parsing stage so that the missing-message
/// case produces the bus's own error rather than a deserialization failure.
/// Text fields accept any JSON scalar: numbers and booleans are kept as their
/// JSON text.
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    pub level: Option<Value>,
    pub message: Option<Value>,
    pub source: Option<Value>,
    pub user: Option<Value>,
    pub details: Option<Value>,
}

impl SendRequest {
    /// Normalize into a draft: blank level means `info`, blank source means
    /// the bus name, absent user is empty, absent details are `{}`.
    pub fn into_draft(self) -> NewNotification {
        let mut draft = NewNotification::new(as_text(self.message).unwrap_or_default())
            .with_level(as_text(self.level).unwrap_or_default())
            .with_user(as_text(self.user).unwrap_or_default());
        if let Some(source) = as_text(self.source) {
            draft = draft.with_source(source);
        }
        if let Some(details) = self.details {
            draft = draft.with_details(details);
        }
        draft
    }
}

/// `null` is absent; strings are taken as-is; anything else becomes its JSON
/// text.
fn as_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /notify/send
///
/// Publish a notification. A body that is not a JSON object is treated as
/// empty and fails with `Missing 'message'`.
pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> AppResult<Json<OkResponse<Published>>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable publish body, treating as empty");
            SendRequest::default()
        }
    };

    let draft = request.into_draft();
    draft.validate()?;

    let notification = state.publisher().publish(draft);
    Ok(Json(OkResponse::new(Published { notification })))
}

/// GET /notify/pull?since=&limit=&wait=
///
/// Immediate pull, or a long-poll when `wait > 0` and nothing is available
/// yet. Malformed parameters fall back to their defaults.
pub async fn pull(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> Json<OkResponse<Pulled>> {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let request = PullParams::from_pairs(&pairs).to_request();

    let result = poll::poll(&state.store, request, state.config.bus.max_wait).await;

    Json(OkResponse::new(Pulled {
        notifications: result.items,
        last_id: result.last_id,
    }))
}

/// GET /notify/stream?since=&heartbeat=
///
/// Server-Sent Events: backlog after `since`, then live notifications and
/// `ping` heartbeats until the client disconnects or the server shuts down.
pub async fn stream(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> impl IntoResponse {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let params = StreamParams::from_pairs(&pairs);
    let since = params.since();
    let heartbeat = params
        .heartbeat_secs()
        .map(Duration::from_secs)
        .unwrap_or(state.config.bus.heartbeat);

    tracing::info!(since, heartbeat_secs = heartbeat.as_secs(), "Notification stream opened");

    let frames = notification_stream::stream(
        Arc::clone(&state.store),
        since,
        heartbeat,
        state.shutdown.child_token(),
    );

    (
        [(X_ACCEL_BUFFERING, "no")],
        Sse::new(into_sse_events(frames)),
    )
}

/// GET|POST /notify/test
///
/// Inject a synthetic notification and return it.
pub async fn self_test(State(state): State<AppState>) -> Json<OkResponse<Published>> {
    let draft = NewNotification::new(format!(
        "Test notification @ {}",
        chrono::Utc::now().to_rfc3339()
    ))
    .with_user("Tester");

    let notification = state.publisher().publish(draft);
    Json(OkResponse::new(Published { notification }))
}
