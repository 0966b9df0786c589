#![allow(dead_code)]

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use vertiscope_api::{
    AttributeSchema, ConnectorError, EdgeId, EdgeRecord, LabelConnection, Neighborhood, Result,
    SchemaCounts, ValueKind, VertexId, VertexRecord,
};
use vertiscope_connector::{Dialect, GraphConnector};

/// Connector double backed by an in-memory vertex table, with switches to
/// gate, fail, or count individual operations.
pub struct MockConnector {
    vertices: Mutex<HashMap<String, VertexRecord>>,
    pub vertex_fetches: AtomicUsize,
    pub label_count_calls: AtomicUsize,
    /// While true, fetches block until a permit is added to `gate`.
    pub gated: AtomicBool,
    pub gate: Semaphore,
    pub fail_vertex_fetches: AtomicBool,
    pub fail_connections: AtomicBool,
    pub fail_samples: AtomicBool,
    pub fail_label_counts: AtomicBool,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            vertices: Mutex::new(HashMap::new()),
            vertex_fetches: AtomicUsize::new(0),
            label_count_calls: AtomicUsize::new(0),
            gated: AtomicBool::new(false),
            gate: Semaphore::new(0),
            fail_vertex_fetches: AtomicBool::new(false),
            fail_connections: AtomicBool::new(false),
            fail_samples: AtomicBool::new(false),
            fail_label_counts: AtomicBool::new(false),
        }
    }

    pub fn put_vertex(&self, record: VertexRecord) {
        self.vertices
            .lock()
            .unwrap()
            .insert(record.id.to_string(), record);
    }

    pub fn airport(id: &str, code: &str) -> VertexRecord {
        VertexRecord::resolved(id, ["airport".to_string()]).with_attribute("code", code)
    }

    async fn pass_gate(&self) {
        if self.gated.load(Ordering::SeqCst) {
            let permit = self.gate.acquire().await.expect("gate closed");
            permit.forget();
        }
    }
}

#[async_trait]
impl GraphConnector for MockConnector {
    fn dialect(&self) -> Dialect {
        Dialect::Gremlin
    }

    async fn fetch_vertex_label_counts(&self) -> Result<SchemaCounts> {
        self.label_count_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        if self.fail_label_counts.load(Ordering::SeqCst) {
            return Err(ConnectorError::transport("label counts unavailable"));
        }
        let mut counts = SchemaCounts::new();
        counts.add_bucket("airport", 16);
        counts.add_bucket("country", 3);
        Ok(counts)
    }

    async fn fetch_edge_label_counts(&self) -> Result<SchemaCounts> {
        let mut counts = SchemaCounts::new();
        counts.add_bucket("route", 40);
        Ok(counts)
    }

    async fn fetch_label_connections(&self) -> Result<Vec<LabelConnection>> {
        if self.fail_connections.load(Ordering::SeqCst) {
            return Err(ConnectorError::transport("connections unavailable"));
        }
        Ok(vec![LabelConnection::new("airport", "route", "airport")])
    }

    async fn fetch_vertex_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        if self.fail_samples.load(Ordering::SeqCst) {
            return Err(ConnectorError::transport("samples unavailable"));
        }
        Ok(labels
            .iter()
            .map(|label| {
                (
                    label.clone(),
                    vec![AttributeSchema::new("code", ValueKind::String)],
                )
            })
            .collect())
    }

    async fn fetch_edge_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        Ok(labels
            .iter()
            .map(|label| (label.clone(), Vec::new()))
            .collect())
    }

    async fn fetch_vertex(&self, id: &VertexId) -> Result<Option<VertexRecord>> {
        self.vertex_fetches.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        if self.fail_vertex_fetches.load(Ordering::SeqCst) {
            return Err(ConnectorError::transport("vertex fetch failed"));
        }
        Ok(self.vertices.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn fetch_edge(&self, _id: &EdgeId) -> Result<Option<EdgeRecord>> {
        Ok(None)
    }

    async fn fetch_neighbor_counts(&self, _id: &VertexId) -> Result<SchemaCounts> {
        let mut counts = SchemaCounts::new();
        counts.add_bucket("airport", 2);
        Ok(counts)
    }

    async fn fetch_neighbors(&self, id: &VertexId, _limit: usize) -> Result<Neighborhood> {
        let origin = self
            .vertices
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| VertexRecord::fragment(id.clone(), []));
        let far = VertexRecord::fragment("far-1", ["airport".to_string()]);
        let edge = EdgeRecord::new("e-far", id.clone(), "far-1", "route");
        Ok(Neighborhood::new(vec![origin, far], vec![edge]))
    }

    async fn fetch_vertices_with_label(
        &self,
        label: &str,
        limit: usize,
    ) -> Result<Vec<VertexRecord>> {
        Ok(self
            .vertices
            .lock()
            .unwrap()
            .values()
            .filter(|v| v.types.contains(label))
            .take(limit)
            .cloned()
            .collect())
    }
}
