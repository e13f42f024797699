//! Route definitions for the `/notify` resource.
//!
//! No authentication at this layer; it is delegated to the gateway.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notify;
use crate::state::AppState;

/// Routes mounted at `/notify`.
///
/// ```text
/// POST      /send       -> send
/// GET       /pull       -> pull     (?since=&limit=&wait=)
/// GET       /stream     -> stream   (?since=&heartbeat=)
/// GET|POST  /test       -> self_test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(notify::send))
        .route("/pull", get(notify::pull))
        .route("/stream", get(notify::stream))
        .route("/test", get(notify::self_test).post(notify::self_test))
}
