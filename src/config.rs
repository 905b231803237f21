//! Process configuration.
//!
//! Everything is read from environment variables. Unset or unparseable values
//! fall back to the defaults, so the relay always starts with a usable
//! configuration; only acting on it (binding the listener, building the HTTP
//! client) can fail.
//!
//! - **Listen address**: `0.0.0.0:8080` (`ALERT_RELAY_LISTEN_ADDR`)
//! - **Feed request timeout**: 30 seconds (`ALERT_RELAY_HTTP_TIMEOUT_SECS`)
//! - **Polling**: see [`PollConfig`]

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::feed::DEFAULT_HTTP_TIMEOUT;
use crate::poller::PollConfig;

const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    8080,
);

/// Errors that stop the relay from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The feed HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Top-level configuration of the relay process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub listen_addr: SocketAddr,

    /// Timeout for a single feed request.
    pub http_timeout: Duration,

    pub poll: PollConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: DEFAULT_LISTEN_ADDR,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            poll: PollConfig::new(),
        }
    }
}

impl Config {
    /// Creates a `Config` from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let listen_addr = lookup("ALERT_RELAY_LISTEN_ADDR")
            .and_then(|s| s.trim().parse::<SocketAddr>().ok())
            .unwrap_or(DEFAULT_LISTEN_ADDR);

        let http_timeout = lookup("ALERT_RELAY_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT);

        Config {
            listen_addr,
            http_timeout,
            poll: PollConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.poll.poll_interval, Duration::from_secs(90));
        assert_eq!(config.poll.feed_urls.len(), 4);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("ALERT_RELAY_LISTEN_ADDR", "127.0.0.1:9000"),
            ("ALERT_RELAY_HTTP_TIMEOUT_SECS", "5"),
            ("ALERT_RELAY_POLL_INTERVAL_SECS", "10"),
            ("ALERT_RELAY_FEED_URLS", "http://feeds.test/only.json"),
        ]));

        assert_eq!(config.listen_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.poll.poll_interval, Duration::from_secs(10));
        assert_eq!(config.poll.feed_urls.len(), 1);
    }

    #[test]
    fn unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("ALERT_RELAY_LISTEN_ADDR", "localhost"),
            ("ALERT_RELAY_HTTP_TIMEOUT_SECS", "-1"),
        ]));

        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
    }

    #[test]
    fn bind_error_names_address() {
        let err = ConfigError::Bind {
            addr: "127.0.0.1:1".parse().unwrap(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("failed to bind 127.0.0.1:1"));
    }
}
