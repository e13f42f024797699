//! Query parameter types for the notification endpoints.
//!
//! Parameters are read from the raw `key=value` pairs of the query string,
//! one key at a time: a malformed or unknown value only affects its own
//! key, which silently takes its default. When a key repeats, the first
//! occurrence wins.

use beacon_events::config::MAX_HEARTBEAT_SECS;
use beacon_events::PollRequest;

/// Default `limit` for pulls.
pub const DEFAULT_PULL_LIMIT: i64 = 50;

/// Decoded query string pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Parameters for `GET /notify/pull?since=&limit=&wait=`.
#[derive(Debug, Default)]
pub struct PullParams {
    pub since: Option<String>,
    pub limit: Option<String>,
    pub wait: Option<String>,
}

impl PullParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            since: first_value(pairs, "since"),
            limit: first_value(pairs, "limit"),
            wait: first_value(pairs, "wait"),
        }
    }

    pub fn to_request(&self) -> PollRequest {
        PollRequest {
            since: parse_int_or(self.since.as_deref(), 0),
            limit: parse_int_or(self.limit.as_deref(), DEFAULT_PULL_LIMIT),
            wait_secs: parse_int_or(self.wait.as_deref(), 0),
        }
    }
}

/// Parameters for `GET /notify/stream?since=&heartbeat=`.
#[derive(Debug, Default)]
pub struct StreamParams {
    pub since: Option<String>,
    pub heartbeat: Option<String>,
}

impl StreamParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            since: first_value(pairs, "since"),
            heartbeat: first_value(pairs, "heartbeat"),
        }
    }

    pub fn since(&self) -> i64 {
        parse_int_or(self.since.as_deref(), 0)
    }

    /// Requested heartbeat in seconds, if it is a positive integer. Capped at
    /// [`MAX_HEARTBEAT_SECS`].
    pub fn heartbeat_secs(&self) -> Option<u64> {
        let secs = parse_int_or(self.heartbeat.as_deref(), 0);
        u64::try_from(secs)
            .ok()
            .filter(|&s| s > 0)
            .map(|s| s.min(MAX_HEARTBEAT_SECS))
    }
}

/// Parse an optional integer, falling back to `default` when absent or
/// malformed.
pub fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pull(since: Option<&str>, limit: Option<&str>, wait: Option<&str>) -> PullParams {
        PullParams {
            since: since.map(str::to_string),
            limit: limit.map(str::to_string),
            wait: wait.map(str::to_string),
        }
    }

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_pull_params_use_defaults() {
        assert_eq!(PullParams::default().to_request(), PollRequest::default());
        assert_eq!(
            PullParams::default().to_request(),
            PollRequest {
                since: 0,
                limit: 50,
                wait_secs: 0
            }
        );
    }

    #[test]
    fn malformed_pull_params_are_normalized() {
        let request = pull(Some("abc"), Some("1.5"), Some("")).to_request();
        assert_eq!(request, PollRequest::default());
    }

    #[test]
    fn valid_pull_params_are_parsed() {
        let request = pull(Some(" 12 "), Some("5"), Some("+3")).to_request();
        assert_eq!(request.since, 12);
        assert_eq!(request.limit, 5);
        assert_eq!(request.wait_secs, 3);
    }

    #[test]
    fn one_bad_key_does_not_reset_the_others() {
        let request = PullParams::from_pairs(&pairs(&[
            ("since", "7"),
            ("limit", "lots"),
            ("wait", "2"),
            ("extra", "ignored"),
        ]))
        .to_request();
        assert_eq!(
            request,
            PollRequest {
                since: 7,
                limit: DEFAULT_PULL_LIMIT,
                wait_secs: 2
            }
        );
    }

    #[test]
    fn repeated_key_keeps_first_value() {
        let params = StreamParams::from_pairs(&pairs(&[
            ("since", "4"),
            ("since", "9"),
            ("heartbeat", "5"),
        ]));
        assert_eq!(params.since(), 4);
        assert_eq!(params.heartbeat_secs(), Some(5));
    }

    #[test]
    fn heartbeat_must_be_positive() {
        let params = |hb: &str| StreamParams {
            since: None,
            heartbeat: Some(hb.to_string()),
        };
        assert_eq!(params("15").heartbeat_secs(), Some(15));
        assert_eq!(params("0").heartbeat_secs(), None);
        assert_eq!(params("-2").heartbeat_secs(), None);
        assert_eq!(params("soon").heartbeat_secs(), None);
        assert_eq!(StreamParams::default().since(), 0);
    }

    #[test]
    fn huge_heartbeat_is_capped() {
        let params = StreamParams {
            since: None,
            heartbeat: Some(i64::MAX.to_string()),
        };
        assert_eq!(params.heartbeat_secs(), Some(MAX_HEARTBEAT_SECS));
    }
}
