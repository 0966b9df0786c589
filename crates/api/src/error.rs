use thiserror::Error;

/// Shared error taxonomy for the connector layer.
///
/// Transport and normalization failures are deliberately distinct variants:
/// the first is retryable by the caller, the second points at a wire-shape
/// mismatch that retrying will not fix.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Network or HTTP failure. Surfaced to the caller as retryable;
    /// the core never retries automatically.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The wire response did not match the dialect's expected shape.
    /// `field` names the offending part of the payload.
    #[error("malformed response at `{field}`: {detail}")]
    MalformedResponse { field: String, detail: String },

    /// One schema sub-step failed. Resolution still completes; the affected
    /// section of the schema stays empty.
    #[error("schema step `{step}` failed: {source}")]
    PartialSchema {
        step: &'static str,
        #[source]
        source: Box<ConnectorError>,
    },

    /// The request was cancelled before it completed. Not an error state
    /// from the user's point of view; discarded silently, never logged as
    /// a malformed response.
    #[error("request cancelled")]
    Cancelled,
}

impl ConnectorError {
    pub fn transport(detail: impl Into<String>) -> Self {
        ConnectorError::Transport(detail.into())
    }

    pub fn malformed(field: impl Into<String>, detail: impl Into<String>) -> Self {
        ConnectorError::MalformedResponse {
            field: field.into(),
            detail: detail.into(),
        }
    }

    pub fn partial(step: &'static str, source: ConnectorError) -> Self {
        ConnectorError::PartialSchema {
            step,
            source: Box::new(source),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConnectorError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
