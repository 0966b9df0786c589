use crate::normalize;
use crate::response::GremlinRawResponse;
use crate::templates;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;
use vertiscope_api::{
    AttributeSchema, EdgeId, EdgeRecord, LabelConnection, Neighborhood, Result, SchemaCounts,
    VertexId, VertexRecord,
};
use vertiscope_connector::{Dialect, GraphConnector, QueryRequest, Transport};

/// Gremlin implementation of the connector facade: every operation is one
/// template build, one transport round trip, one normalization.
pub struct GremlinConnector {
    transport: Arc<dyn Transport>,
}

impl GremlinConnector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn run(&self, query: String) -> Result<GremlinRawResponse> {
        debug!(dialect = "gremlin", %query, "executing query");
        let body = self
            .transport
            .execute(QueryRequest::new(query, Dialect::Gremlin))
            .await?;
        GremlinRawResponse::parse(&body)
    }
}

#[async_trait]
impl GraphConnector for GremlinConnector {
    fn dialect(&self) -> Dialect {
        Dialect::Gremlin
    }

    async fn fetch_vertex_label_counts(&self) -> Result<SchemaCounts> {
        let response = self.run(templates::vertex_labels_query()).await?;
        normalize::label_counts(&response)
    }

    async fn fetch_edge_label_counts(&self) -> Result<SchemaCounts> {
        let response = self.run(templates::edge_labels_query()).await?;
        normalize::label_counts(&response)
    }

    async fn fetch_label_connections(&self) -> Result<Vec<LabelConnection>> {
        let response = self.run(templates::label_connections_query()).await?;
        normalize::label_connections(&response)
    }

    async fn fetch_vertex_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        if labels.is_empty() {
            return Ok(IndexMap::new());
        }
        let response = self.run(templates::vertex_samples_query(labels)).await?;
        normalize::sample_attribute_schemas(&response, labels)
    }

    async fn fetch_edge_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        if labels.is_empty() {
            return Ok(IndexMap::new());
        }
        let response = self.run(templates::edge_samples_query(labels)).await?;
        normalize::sample_attribute_schemas(&response, labels)
    }

    async fn fetch_vertex(&self, id: &VertexId) -> Result<Option<VertexRecord>> {
        let response = self.run(templates::vertex_query(id.as_str())).await?;
        match response.first() {
            Some(item) => Ok(Some(normalize::vertex_from_element_map(
                item,
                "result.data[0]",
            )?)),
            None => Ok(None),
        }
    }

    async fn fetch_edge(&self, id: &EdgeId) -> Result<Option<EdgeRecord>> {
        let response = self.run(templates::edge_query(id.as_str())).await?;
        match response.first() {
            Some(item) => Ok(Some(normalize::edge_from_element_map(
                item,
                "result.data[0]",
            )?)),
            None => Ok(None),
        }
    }

    async fn fetch_neighbor_counts(&self, id: &VertexId) -> Result<SchemaCounts> {
        let response = self
            .run(templates::neighbor_counts_query(id.as_str()))
            .await?;
        normalize::neighbor_counts(&response)
    }

    async fn fetch_neighbors(&self, id: &VertexId, limit: usize) -> Result<Neighborhood> {
        let response = self
            .run(templates::neighbors_query(id.as_str(), limit))
            .await?;
        normalize::neighborhood(&response)
    }

    async fn fetch_vertices_with_label(
        &self,
        label: &str,
        limit: usize,
    ) -> Result<Vec<VertexRecord>> {
        let response = self
            .run(templates::vertices_with_label_query(label, limit))
            .await?;
        normalize::vertices(&response)
    }
}
