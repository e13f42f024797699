//! The capability subsystems use to emit notifications.
//!
//! Producers depend on [`Publisher`] only; they never see the store, its
//! lock, or its consumers.

use std::sync::Arc;

use beacon_core::{NewNotification, Notification};

use crate::store::NotificationStore;

/// Something that accepts notification drafts and publishes them.
pub trait Publisher: Send + Sync {
    /// Publish a draft and return the stored notification.
    ///
    /// Drafts are expected to be validated by the caller; a publisher never
    /// rejects one.
    fn publish(&self, draft: NewNotification) -> Notification;
}

impl Publisher for NotificationStore {
    fn publish(&self, draft: NewNotification) -> Notification {
        self.push(draft)
    }
}

impl<P: Publisher + ?Sized> Publisher for Arc<P> {
    fn publish(&self, draft: NewNotification) -> Notification {
        (**self).publish(draft)
    }
}
