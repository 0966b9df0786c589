use crate::error::{ExplorerError, Result};
use std::time::Duration;
use url::Url;
use vertiscope_connector::Dialect;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One database connection: where the proxy endpoint lives and which
/// dialect it speaks. The engine's lifecycle is tied to a connection;
/// disconnecting tears the engine (and its cache) down.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub endpoint: Url,
    pub dialect: Dialect,
    /// Transport-level timeout. The core mandates none; this is handed to
    /// the transport as its default.
    pub timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(endpoint: Url, dialect: Dialect) -> Self {
        Self {
            endpoint,
            dialect,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Parse an endpoint string, rejecting non-HTTP schemes up front.
    pub fn parse(endpoint: &str, dialect: Dialect) -> Result<Self> {
        let url = Url::parse(endpoint)
            .map_err(|e| ExplorerError::Config(format!("invalid endpoint `{endpoint}`: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ExplorerError::Config(format!(
                "unsupported endpoint scheme `{}`",
                url.scheme()
            )));
        }
        Ok(Self::new(url, dialect))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
