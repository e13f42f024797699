//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "ok": true, ...fields }`. Use
//! [`OkResponse`] instead of ad-hoc `serde_json::json!({ "ok": true, ... })`
//! to get compile-time type safety and consistent serialization.

use beacon_core::types::NotificationId;
use beacon_core::Notification;
use serde::Serialize;

/// Standard `{ "ok": true, ... }` response envelope.
///
/// The fields of `body` are flattened next to `ok`.
///
/// # Example
///
/// ```ignore
/// Ok(Json(OkResponse::new(Published { notification })))
/// ```
#[derive(Debug, Serialize)]
pub struct OkResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> OkResponse<T> {
    pub fn new(body: T) -> Self {
        Self { ok: true, body }
    }
}

/// Body of publish and self-test responses.
#[derive(Debug, Serialize)]
pub struct Published {
    pub notification: Notification,
}

/// Body of pull responses.
#[derive(Debug, Serialize)]
pub struct Pulled {
    pub notifications: Vec<Notification>,
    pub last_id: NotificationId,
}
