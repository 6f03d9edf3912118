//! Application state and configuration.

use std::fmt;
use std::sync::Arc;

use restis_core::CredentialStore;

use crate::dispatch::Dispatcher;
use crate::store::Store;

/// Gateway configuration. Immutable after startup.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8000").
    pub bind_addr: String,

    /// Store connection URL (e.g., "redis://127.0.0.1:6379").
    pub redis_url: String,

    /// Administrator token. Grants access without an issued credential.
    pub api_token: String,
}

impl Config {
    /// Validate and normalize raw settings.
    ///
    /// Addresses may be given as `:port`, `host:port`, or (for the store) a
    /// full `redis://` / `rediss://` URL. A bare `:port` listens on all
    /// interfaces and connects to the store on localhost.
    pub fn new(bind_addr: &str, redis_addr: &str, api_token: &str) -> anyhow::Result<Self> {
        if api_token.is_empty() {
            anyhow::bail!("API token empty");
        }
        if redis_addr.trim().is_empty() {
            anyhow::bail!("redis addr empty");
        }
        if bind_addr.trim().is_empty() {
            anyhow::bail!("webserver addr empty");
        }

        let bind_addr = normalize_bind_addr(bind_addr.trim());
        let redis_url = normalize_redis_url(redis_addr.trim());

        tracing::info!(
            bind_addr = %bind_addr,
            redis_url = %redis_url,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            redis_url,
            api_token: api_token.to_string(),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("redis_url", &self.redis_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

fn normalize_bind_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

fn normalize_redis_url(addr: &str) -> String {
    if addr.contains("://") {
        addr.to_string()
    } else if addr.starts_with(':') {
        format!("redis://127.0.0.1{addr}")
    } else {
        format!("redis://{addr}")
    }
}

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<Config>,

    /// Tokens issued by `ACL RESTTOKEN`. Read by the auth middleware,
    /// written by the dispatcher.
    pub credentials: Arc<CredentialStore>,

    /// Executes commands against the store.
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Create application state around a connected store.
    ///
    /// The credential store starts empty and lives as long as the state.
    pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
        let credentials = Arc::new(CredentialStore::new());
        let dispatcher = Arc::new(Dispatcher::new(store, Arc::clone(&credentials)));

        Self {
            config: Arc::new(config),
            credentials,
            dispatcher,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_normalizes_port_only_addresses() {
        let config = Config::new(":8000", ":6379", "upstash").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.api_token, "upstash");
    }

    #[test]
    fn config_keeps_explicit_hosts() {
        let config = Config::new("127.0.0.1:9000", "cache:6380", "t").unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.redis_url, "redis://cache:6380");
    }

    #[test]
    fn config_keeps_redis_urls() {
        let config = Config::new(":8000", "rediss://user:pw@cache:6380/2", "t").unwrap();
        assert_eq!(config.redis_url, "rediss://user:pw@cache:6380/2");
    }

    #[test]
    fn config_rejects_empty_values() {
        let err = Config::new(":8000", ":6379", "").unwrap_err();
        assert_eq!(err.to_string(), "API token empty");

        let err = Config::new(":8000", " ", "t").unwrap_err();
        assert_eq!(err.to_string(), "redis addr empty");

        let err = Config::new("", ":6379", "t").unwrap_err();
        assert_eq!(err.to_string(), "webserver addr empty");
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = Config::new(":8000", ":6379", "super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("0.0.0.0:8000"));
        assert!(!debug.contains("super-secret"));
    }
}
