//! Domain types shared by every beacon crate.
//!
//! - [`notification`] — the [`Notification`] record, its
//!   [`NotificationLevel`], and the [`NewNotification`] draft builder.
//! - [`error`] — the [`CoreError`] taxonomy.
//! - [`types`] — id and timestamp aliases.

pub mod error;
pub mod notification;
pub mod types;

pub use error::CoreError;
pub use notification::{NewNotification, Notification, NotificationLevel};
