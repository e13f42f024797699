use beacon_events::BusConfig;

/// Slack added on top of the longest long-poll when sizing the request
/// timeout.
const LONG_POLL_TIMEOUT_SLACK_SECS: u64 = 5;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5069`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `60`).
    ///
    /// Never lower than the long-poll ceiling plus a few seconds.
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal
    /// (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Notification bus settings.
    pub bus: BusConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default     |
    /// |-------------------------|-------------|
    /// | `HOST`                  | `127.0.0.1` |
    /// | `PORT`                  | `5069`      |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`        |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `10`        |
    ///
    /// Bus settings are read by [`BusConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5069".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let bus = BusConfig::from_env();

        Self {
            host,
            port,
            request_timeout_secs: request_timeout_secs
                .max(min_request_timeout_secs(&bus)),
            shutdown_timeout_secs,
            bus,
        }
    }
}

/// Smallest request timeout that never cuts a long-poll short.
pub fn min_request_timeout_secs(bus: &BusConfig) -> u64 {
    bus.max_wait.as_secs().saturating_add(LONG_POLL_TIMEOUT_SLACK_SECS)
}
