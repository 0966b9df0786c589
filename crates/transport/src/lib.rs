//! HTTP transport: forwards `{query, dialect}` requests to the reverse
//! proxy, which passes them through verbatim (plus auth headers) to the
//! configured database endpoint. The core treats the proxy as a pure
//! pass-through and depends on nothing proxy-specific.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;
use vertiscope_api::{ConnectorError, Result};
use vertiscope_connector::{QueryRequest, Transport};

/// Reqwest-backed [`Transport`]. Timeouts live here, not in the core: the
/// client-wide timeout applies to every query.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConnectorError::transport(format!("failed to build client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: QueryRequest) -> Result<serde_json::Value> {
        debug!(endpoint = %self.endpoint, dialect = %request.dialect, "forwarding query");
        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(ConnectorError::transport(format!(
                "HTTP {status}: {snippet}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ConnectorError::transport(format!("invalid JSON body: {e}")))
    }
}

fn request_error(error: reqwest::Error) -> ConnectorError {
    if error.is_timeout() {
        ConnectorError::transport(format!("request timed out: {error}"))
    } else {
        ConnectorError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertiscope_connector::Dialect;

    #[test]
    fn request_payload_matches_the_proxy_contract() {
        let request = QueryRequest::new("g.V().limit(1)", Dialect::Gremlin);
        let payload = serde_json::to_value(&request).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"query": "g.V().limit(1)", "dialect": "gremlin"})
        );
    }

    #[test]
    fn builds_with_a_timeout() {
        let endpoint = Url::parse("http://localhost:8182/query").unwrap();
        let transport = HttpTransport::new(endpoint, Duration::from_secs(5)).unwrap();
        assert_eq!(transport.endpoint().path(), "/query");
    }
}
