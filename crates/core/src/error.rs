use std::sync::Arc;
use thiserror::Error;
use vertiscope_api::ConnectorError;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// A schema resolution failed. The error is shared: every caller that
    /// joined the in-flight resolution observes the same failure.
    #[error("schema resolution failed: {0}")]
    Resolution(Arc<ConnectorError>),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ExplorerError {
    /// Whether this failure stems from a cancelled request.
    pub fn is_cancelled(&self) -> bool {
        match self {
            ExplorerError::Connector(e) => e.is_cancelled(),
            ExplorerError::Resolution(e) => e.is_cancelled(),
            ExplorerError::Config(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
