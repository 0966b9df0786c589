use crate::cache::CacheStats;
use crate::config::ConnectionConfig;
use crate::engine::ExplorerEngine;
use crate::error::Result;
use std::sync::Arc;
use vertiscope_api::{
    EdgeId, EdgeRecord, Neighborhood, Schema, SchemaCounts, VertexId, VertexRecord,
};
use vertiscope_connector::GraphConnector;

/// Engine handle: the cheap-clone facade handed to clients.
///
/// Clients read the graph through here and request mutations through
/// here; they never touch the cache's records directly.
#[derive(Clone)]
pub struct ExplorerHandle {
    engine: Arc<ExplorerEngine>,
}

impl ExplorerHandle {
    /// Build an engine for one connection and wrap it.
    pub fn new(config: ConnectionConfig, connector: Arc<dyn GraphConnector>) -> Result<Self> {
        let engine = ExplorerEngine::builder(config)
            .with_connector(connector)
            .build()?;
        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    /// Wrap an existing engine (useful for testing).
    pub fn from_engine(engine: Arc<ExplorerEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<ExplorerEngine> {
        &self.engine
    }

    // ---- Schema ----

    /// The connection's schema, resolved on first use and cached for the
    /// session.
    pub async fn schema(&self) -> Result<Arc<Schema>> {
        self.engine.resolver().schema().await
    }

    /// Invalidate the cached schema and resolve again.
    pub async fn refresh_schema(&self) -> Result<Arc<Schema>> {
        self.engine.resolver().refresh().await
    }

    // ---- Elements ----

    /// A vertex with its attributes, from the cache when resolved there,
    /// otherwise fetched through the single-flight fragment machinery.
    /// A record that could not be resolved stays visible with its
    /// `Unresolved` marker rather than vanishing.
    pub async fn vertex_details(&self, id: &VertexId) -> Result<Option<VertexRecord>> {
        let cache = self.engine.cache();
        if let Some(existing) = cache.vertex(id).await {
            if !existing.is_fragment() {
                return Ok(Some(existing));
            }
            cache.request_resolve(id);
        } else {
            cache.ensure_fragment(id, &[]).await;
        }
        cache.wait_resolved(id).await;
        Ok(cache.vertex(id).await)
    }

    /// An edge with its attributes. The fetched edge is cached, with
    /// fragments ensured for both endpoints so it anchors in the graph.
    pub async fn edge_details(&self, id: &EdgeId) -> Result<Option<EdgeRecord>> {
        let cache = self.engine.cache();
        if let Some(existing) = cache.edge(id).await {
            return Ok(Some(existing));
        }
        let fetched = self.engine.connector().fetch_edge(id).await?;
        if let Some(edge) = &fetched {
            cache.ensure_fragment(&edge.source, &[]).await;
            cache.ensure_fragment(&edge.target, &[]).await;
            cache.upsert_edge(edge.clone()).await;
        }
        Ok(fetched)
    }

    // ---- Neighborhood ----

    /// Per-label neighbor counts, straight from the database.
    pub async fn neighbor_counts(&self, id: &VertexId) -> Result<SchemaCounts> {
        Ok(self.engine.connector().fetch_neighbor_counts(id).await?)
    }

    /// Expand a vertex's neighbors into the cache and return what was
    /// fetched.
    pub async fn expand_neighbors(&self, id: &VertexId, limit: usize) -> Result<Neighborhood> {
        let neighborhood = self.engine.connector().fetch_neighbors(id, limit).await?;
        self.engine.cache().ingest(&neighborhood).await;
        Ok(neighborhood)
    }

    /// Up to `limit` vertices carrying a label, cached on the way through.
    pub async fn search_by_label(&self, label: &str, limit: usize) -> Result<Vec<VertexRecord>> {
        let records = self
            .engine
            .connector()
            .fetch_vertices_with_label(label, limit)
            .await?;
        let batch = Neighborhood::new(records.clone(), Vec::new());
        self.engine.cache().ingest(&batch).await;
        Ok(records)
    }

    // ---- Cache ----

    pub async fn ensure_fragment(&self, id: &VertexId, type_hint: &[String]) -> VertexRecord {
        self.engine.cache().ensure_fragment(id, type_hint).await
    }

    pub async fn evict(&self, id: &VertexId) -> Option<VertexRecord> {
        self.engine.cache().evict(id).await
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.engine.cache().stats().await
    }

    /// Tear the connection down: cancels all in-flight work.
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}
