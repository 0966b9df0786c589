use crate::normalize;
use crate::response::SparqlRawResponse;
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

/// SPARQL implementation of the connector facade.
pub struct SparqlConnector {
    transport: Arc<dyn Transport>,
}

impl SparqlConnector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn run(&self, query: String) -> Result<SparqlRawResponse> {
        debug!(dialect = "sparql", %query, "executing query");
        let body = self
            .transport
            .execute(QueryRequest::new(query, Dialect::Sparql))
            .await?;
        SparqlRawResponse::parse(&body)
    }
}

#[async_trait]
impl GraphConnector for SparqlConnector {
    fn dialect(&self) -> Dialect {
        Dialect::Sparql
    }

    async fn fetch_vertex_label_counts(&self) -> Result<SchemaCounts> {
        let response = self.run(templates::class_counts_query()).await?;
        normalize::class_counts(&response)
    }

    async fn fetch_edge_label_counts(&self) -> Result<SchemaCounts> {
        let response = self.run(templates::predicate_counts_query()).await?;
        normalize::predicate_counts(&response)
    }

    async fn fetch_label_connections(&self) -> Result<Vec<LabelConnection>> {
        let response = self.run(templates::class_connections_query()).await?;
        normalize::connections(&response)
    }

    async fn fetch_vertex_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        // One nested-subquery sample per class; the LIMIT 1 inner select
        // keeps each round trip cheap regardless of class size.
        let mut out = IndexMap::new();
        for label in labels {
            let response = self.run(templates::class_sample_query(label)).await?;
            out.insert(label.clone(), normalize::sample_attribute_schemas(&response)?);
        }
        Ok(out)
    }

    async fn fetch_edge_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
        // Plain RDF predicates carry no properties of their own, so there
        // is nothing to sample; every label maps to an empty shape.
        Ok(labels
            .iter()
            .map(|label| (label.clone(), Vec::new()))
            .collect())
    }

    async fn fetch_vertex(&self, id: &VertexId) -> Result<Option<VertexRecord>> {
        let response = self.run(templates::vertex_query(id.as_str())).await?;
        normalize::vertex(&response, id.as_str())
    }

    async fn fetch_edge(&self, id: &EdgeId) -> Result<Option<EdgeRecord>> {
        // Edge ids are synthesized triples; an id that does not parse
        // cannot name an edge in this graph.
        let Some((source, predicate, target)) = normalize::parse_edge_id(id.as_str()) else {
            return Ok(None);
        };
        let response = self
            .run(templates::edge_exists_query(&source, &predicate, &target))
            .await?;
        if response.ask()? {
            Ok(Some(EdgeRecord::new(
                id.clone(),
                source,
                target,
                predicate,
            )))
        } else {
            Ok(None)
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
            .run(templates::instances_of_class_query(label, limit))
            .await?;
        normalize::instance_vertices(&response, label)
    }
}
