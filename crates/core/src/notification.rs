//! The notification record carried by the bus.
//!
//! A [`Notification`] is immutable once the store has stamped it with an id
//! and timestamp. Producers describe what they want published with a
//! [`NewNotification`] draft.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{NotificationId, Timestamp};

// ---------------------------------------------------------------------------
// NotificationLevel
// ---------------------------------------------------------------------------

/// Severity of a notification.
///
/// The four well-known levels are modelled as variants. Anything else is
/// lowercased and kept as [`NotificationLevel::Other`] rather than rejected,
/// so producers using their own vocabulary still get through.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Other(String),
}

impl NotificationLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }

    /// Parse a raw level. Blank input means [`NotificationLevel::Info`].
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.as_str() {
            "" | "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other(lowered),
        }
    }
}

impl From<String> for NotificationLevel {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for NotificationLevel {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<NotificationLevel> for String {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A published notification as stored and delivered by the bus.
///
/// `details` is an opaque JSON value passed through verbatim. Consumers must
/// tolerate arbitrary or absent keys inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned, strictly increasing id.
    pub id: NotificationId,

    /// When the store accepted the notification (UTC).
    #[serde(rename = "ts")]
    pub timestamp: Timestamp,

    pub level: NotificationLevel,

    pub message: String,

    /// Origin label, e.g. the producing subsystem's name.
    pub source: String,

    /// Acting user label. May be empty.
    pub user: String,

    pub details: serde_json::Value,
}

// ---------------------------------------------------------------------------
// NewNotification
// ---------------------------------------------------------------------------

/// A notification that has not been published yet.
///
/// Constructed via [`NewNotification::new`] and enriched with the builder
/// methods [`with_level`](NewNotification::with_level),
/// [`with_source`](NewNotification::with_source),
/// [`with_user`](NewNotification::with_user), and
/// [`with_details`](NewNotification::with_details).
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub level: NotificationLevel,
    pub message: String,
    /// `None` means "use the bus's own name".
    pub source: Option<String>,
    pub user: String,
    pub details: serde_json::Value,
}

impl NewNotification {
    /// Create an `info` draft with only the required message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
            source: None,
            user: String::new(),
            details: empty_details(),
        }
    }

    pub fn with_level(mut self, level: impl Into<NotificationLevel>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the origin label. A blank label falls back to the bus name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        self.source = (!source.is_empty()).then_some(source);
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Attach a details payload. `null` is stored as an empty object.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = if details.is_null() {
            empty_details()
        } else {
            details
        };
        self
    }

    /// Check the draft is publishable: `message` must be non-empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.message.is_empty() {
            return Err(CoreError::Validation("Missing 'message'".to_string()));
        }
        Ok(())
    }

    /// Stamp the draft with its id and timestamp.
    pub fn into_notification(
        self,
        id: NotificationId,
        timestamp: Timestamp,
        default_source: &str,
    ) -> Notification {
        Notification {
            id,
            timestamp,
            level: self.level,
            message: self.message,
            source: self
                .source
                .unwrap_or_else(|| default_source.to_string()),
            user: self.user,
            details: self.details,
        }
    }
}

fn empty_details() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
