//! Tunables for the notification bus.

use std::time::Duration;

/// Default ring capacity.
pub const DEFAULT_CAPACITY: usize = 500;

/// Default idle interval between stream keep-alive frames.
pub const DEFAULT_HEARTBEAT_SECS: u64 = 20;

/// Longest heartbeat interval a stream will use.
pub const MAX_HEARTBEAT_SECS: u64 = 3600;

/// Default ceiling on how long a long-poll may block.
pub const DEFAULT_MAX_WAIT_SECS: u64 = 30;

/// Highest accepted long-poll ceiling.
pub const MAX_LONG_POLL_SECS: u64 = 3600;

/// Default bus name, used as `source` when a producer gives none.
pub const DEFAULT_SOURCE_NAME: &str = "beacon";

/// Configuration for the store, long-poll, and stream services.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// Maximum number of live notifications (at least 1).
    pub capacity: usize,
    /// Stream heartbeat used when the consumer does not pick one. At most
    /// [`MAX_HEARTBEAT_SECS`].
    pub heartbeat: Duration,
    /// Upper bound on a single long-poll wait.
    pub max_wait: Duration,
    /// Name of the bus itself.
    pub source_name: String,
}

impl BusConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to the defaults. The heartbeat is capped
    /// at [`MAX_HEARTBEAT_SECS`] and the long-poll ceiling at
    /// [`MAX_LONG_POLL_SECS`].
    ///
    /// | Variable                | Default  |
    /// |-------------------------|----------|
    /// | `NOTIFY_CAPACITY`       | `500`    |
    /// | `NOTIFY_HEARTBEAT_SECS` | `20`     |
    /// | `NOTIFY_MAX_WAIT_SECS`  | `30`     |
    /// | `NOTIFY_SOURCE`         | `beacon` |
    pub fn from_env() -> Self {
        let capacity = std::env::var("NOTIFY_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_CAPACITY)
            .max(1);

        let heartbeat_secs = std::env::var("NOTIFY_HEARTBEAT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_HEARTBEAT_SECS)
            .min(MAX_HEARTBEAT_SECS);

        let max_wait_secs = std::env::var("NOTIFY_MAX_WAIT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_MAX_WAIT_SECS)
            .min(MAX_LONG_POLL_SECS);

        let source_name = std::env::var("NOTIFY_SOURCE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string());

        Self {
            capacity,
            heartbeat: Duration::from_secs(heartbeat_secs),
            max_wait: Duration::from_secs(max_wait_secs),
            source_name,
        }
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            heartbeat: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }
}

/// Cap a heartbeat interval at [`MAX_HEARTBEAT_SECS`].
///
/// Keeps idle deadlines representable as an [`Instant`](std::time::Instant).
pub fn clamp_heartbeat(heartbeat: Duration) -> Duration {
    heartbeat.min(Duration::from_secs(MAX_HEARTBEAT_SECS))
}
