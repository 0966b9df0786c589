use crate::dialect::Dialect;
use async_trait::async_trait;
use indexmap::IndexMap;
use vertiscope_api::{
    AttributeSchema, EdgeId, EdgeRecord, LabelConnection, Neighborhood, Result, SchemaCounts,
    VertexId, VertexRecord,
};

/// Unified interface for dialect-specific graph database access.
///
/// Exactly two implementations exist, one per dialect. Callers (the
/// schema resolver, the graph cache, clients) depend only on this trait,
/// never on a concrete dialect. Every operation is one query build, one
/// transport round trip, one normalization.
#[async_trait]
pub trait GraphConnector: Send + Sync {
    /// Which dialect this connector speaks.
    fn dialect(&self) -> Dialect;

    // ---- Schema discovery ----

    /// Vertex labels with the number of vertices carrying each.
    async fn fetch_vertex_label_counts(&self) -> Result<SchemaCounts>;

    /// Edge labels with the number of edges carrying each.
    async fn fetch_edge_label_counts(&self) -> Result<SchemaCounts>;

    /// Observed (source label, edge label, target label) triples.
    async fn fetch_label_connections(&self) -> Result<Vec<LabelConnection>>;

    /// Sample one element per vertex label and report its attribute shape.
    /// Labels with no instance map to an empty list.
    async fn fetch_vertex_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>>;

    /// Sample one element per edge label and report its attribute shape.
    async fn fetch_edge_attribute_samples(
        &self,
        labels: &[String],
    ) -> Result<IndexMap<String, Vec<AttributeSchema>>>;

    // ---- Element fetch ----

    /// Fetch one vertex with all attributes. `None` when the id is absent
    /// from the remote graph.
    async fn fetch_vertex(&self, id: &VertexId) -> Result<Option<VertexRecord>>;

    /// Fetch one edge with all attributes.
    async fn fetch_edge(&self, id: &EdgeId) -> Result<Option<EdgeRecord>>;

    // ---- Neighborhood ----

    /// Per-label counts of the distinct neighbors of a vertex.
    async fn fetch_neighbor_counts(&self, id: &VertexId) -> Result<SchemaCounts>;

    /// The incident edges of a vertex with their far vertices, capped at
    /// `limit` edges.
    async fn fetch_neighbors(&self, id: &VertexId, limit: usize) -> Result<Neighborhood>;

    /// Up to `limit` vertices carrying the given (possibly composite) label.
    async fn fetch_vertices_with_label(
        &self,
        label: &str,
        limit: usize,
    ) -> Result<Vec<VertexRecord>>;
}
