/// Store-assigned notification id. Strictly increasing, starts at 1.
pub type NotificationId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
