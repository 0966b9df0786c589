use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use vertiscope_api::{ConnectorError, Result};
use vertiscope_connector::{QueryRequest, Transport};

/// Transport double: hands out canned JSON bodies in order and records
/// every executed request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<serde_json::Value>>,
    requests: Mutex<Vec<QueryRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(body);
    }

    pub fn requests(&self) -> Vec<QueryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: QueryRequest) -> Result<serde_json::Value> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ConnectorError::transport("no canned response left"))
    }
}
