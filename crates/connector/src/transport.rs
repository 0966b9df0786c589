use crate::dialect::Dialect;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vertiscope_api::Result;

/// One query to execute against the database, in the dialect's literal
/// query-string form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
    pub dialect: Dialect,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            query: query.into(),
            dialect,
        }
    }
}

/// The transport collaborator: executes a query string against the
/// database (through the reverse proxy) and returns the dialect-native
/// JSON body verbatim.
///
/// Transports surface failures as [`ConnectorError::Transport`], which
/// keeps them distinguishable from normalization errors. Timeouts are the
/// transport's responsibility; the core mandates none.
///
/// [`ConnectorError::Transport`]: vertiscope_api::ConnectorError::Transport
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: QueryRequest) -> Result<serde_json::Value>;
}
