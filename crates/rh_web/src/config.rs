use rh_upstream::DEFAULT_UPSTREAM_URL;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PING_MESSAGE: &str = "ping";

/// Where the dataset document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Upstream {
    Url(Url),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub upstream: Upstream,
    pub cache_ttl: Duration,
    /// Upstream requests are unbounded unless set.
    pub upstream_timeout: Option<Duration>,
    pub ping_message: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            upstream: Upstream::Url(
                Url::parse(DEFAULT_UPSTREAM_URL).expect("default upstream URL is valid"),
            ),
            cache_ttl: rh_storage::DEFAULT_TTL,
            upstream_timeout: None,
            ping_message: DEFAULT_PING_MESSAGE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    pub fn with_upstream(mut self, upstream: Upstream) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_upstream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    pub fn with_ping_message(mut self, message: impl Into<String>) -> Self {
        self.ping_message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.ping_message, "ping");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.bind.port(), 8080);
        assert!(matches!(config.upstream, Upstream::Url(ref u) if u.as_str() == DEFAULT_UPSTREAM_URL));
    }
}
