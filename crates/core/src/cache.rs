//! The incrementally growing, deduplicated graph cache.
//!
//! The cache exclusively owns the canonical record store; clients never
//! mutate records directly, only through `upsert`/`ensure_fragment`/
//! `evict`. A pending-fetch map keyed by vertex id gives single-flight
//! semantics: at most one in-flight fetch per id, independent of any UI
//! re-render machinery.

use crate::store::GraphStore;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use vertiscope_api::{
    ConnectorError, EdgeId, EdgeRecord, Neighborhood, Resolution, VertexId, VertexRecord,
};
use vertiscope_connector::GraphConnector;

/// A snapshot of cache occupancy.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub vertices: usize,
    pub edges: usize,
    pub pending_fetches: usize,
}

struct PendingFetch {
    /// Distinguishes this fetch from a later one for the same id, so a
    /// finished task only removes its own pending entry.
    generation: u64,
    token: CancellationToken,
    done: watch::Receiver<bool>,
}

pub struct GraphCache {
    store: RwLock<GraphStore>,
    pending: DashMap<VertexId, PendingFetch>,
    connector: Arc<dyn GraphConnector>,
    root: CancellationToken,
    generations: AtomicU64,
}

impl GraphCache {
    /// Fetch tasks are child-scoped to `root`: cancelling it (engine
    /// shutdown) cancels every in-flight fetch.
    pub fn new(connector: Arc<dyn GraphConnector>, root: CancellationToken) -> Self {
        Self {
            store: RwLock::new(GraphStore::new()),
            pending: DashMap::new(),
            connector,
            root,
            generations: AtomicU64::new(0),
        }
    }

    // ---- Reads ----

    pub async fn vertex(&self, id: &VertexId) -> Option<VertexRecord> {
        self.store.read().await.vertex(id).cloned()
    }

    pub async fn edge(&self, id: &EdgeId) -> Option<EdgeRecord> {
        self.store.read().await.edge(id).cloned()
    }

    pub async fn incident_edges(&self, id: &VertexId) -> Vec<EdgeRecord> {
        self.store
            .read()
            .await
            .incident_edges(id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        CacheStats {
            vertices: store.vertex_count(),
            edges: store.edge_count(),
            pending_fetches: self.pending.len(),
        }
    }

    // ---- Writes ----

    /// Insert or replace a record. Per key, the last upsert to complete
    /// wins; there is no staleness check against request issue order.
    pub async fn upsert_vertex(&self, record: VertexRecord) {
        self.store.write().await.upsert_vertex(record);
    }

    /// Insert or replace an edge. Returns false when an endpoint is not
    /// cached, in which case the edge is skipped.
    pub async fn upsert_edge(&self, record: EdgeRecord) -> bool {
        self.store.write().await.upsert_edge(record).is_some()
    }

    /// Return the record for `id`, creating and storing a fragment
    /// synchronously when absent, then triggering the asynchronous fetch
    /// that will upsert the resolved record in place.
    pub async fn ensure_fragment(
        self: &Arc<Self>,
        id: &VertexId,
        type_hint: &[String],
    ) -> VertexRecord {
        {
            let store = self.store.read().await;
            if let Some(existing) = store.vertex(id) {
                return existing.clone();
            }
        }
        let fragment = VertexRecord::fragment(id.clone(), type_hint.iter().cloned());
        {
            let mut store = self.store.write().await;
            // Re-check under the write lock: a concurrent caller may have
            // stored the fragment between the two lock acquisitions.
            if let Some(existing) = store.vertex(id) {
                return existing.clone();
            }
            store.upsert_vertex(fragment.clone());
        }
        self.request_resolve(id);
        fragment
    }

    /// Trigger the fetch for `id` unless one is already in flight. A
    /// second call while the first fetch is pending observes that fetch's
    /// result rather than issuing a new one.
    pub fn request_resolve(self: &Arc<Self>, id: &VertexId) {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let token = self.root.child_token();
        let (done_tx, done_rx) = watch::channel(false);
        match self.pending.entry(id.clone()) {
            Entry::Occupied(_) => return,
            Entry::Vacant(slot) => {
                slot.insert(PendingFetch {
                    generation,
                    token: token.clone(),
                    done: done_rx,
                });
            }
        }

        let cache = Arc::clone(self);
        let id = id.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Err(ConnectorError::Cancelled),
                result = cache.connector.fetch_vertex(&id) => result,
            };
            cache.finish_resolve(&id, generation, &token, outcome).await;
            let _ = done_tx.send(true);
        });
    }

    async fn finish_resolve(
        &self,
        id: &VertexId,
        generation: u64,
        token: &CancellationToken,
        outcome: vertiscope_api::Result<Option<VertexRecord>>,
    ) {
        {
            let mut store = self.store.write().await;
            // An eviction that raced this fetch cancelled the token; the
            // result is discarded and no upsert happens.
            if !token.is_cancelled() {
                match outcome {
                    Ok(Some(record)) => {
                        store.upsert_vertex(record);
                    }
                    Ok(None) => mark_unresolved(&mut store, id),
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => {
                        warn!(vertex = %id, error = %e, "fragment fetch failed");
                        mark_unresolved(&mut store, id);
                    }
                }
            }
        }
        self.pending.remove_if(id, |_, p| p.generation == generation);
    }

    /// Wait for the in-flight fetch for `id`, if any, to settle.
    pub async fn wait_resolved(&self, id: &VertexId) {
        let Some(mut rx) = self.pending.get(id).map(|p| p.done.clone()) else {
            return;
        };
        let _ = rx.wait_for(|done| *done).await;
    }

    /// Delete the record and cancel its in-flight fetch if one exists.
    /// Reads after eviction return absent until the id is re-requested.
    pub async fn evict(&self, id: &VertexId) -> Option<VertexRecord> {
        if let Some((_, pending)) = self.pending.remove(id) {
            pending.token.cancel();
        }
        self.store.write().await.remove_vertex(id)
    }

    /// Fold a fetched neighborhood into the cache: vertices first, then
    /// edges (skipping edges with an uncached endpoint). A fragment never
    /// overwrites a resolved record here; expansion does not degrade what
    /// a detail fetch already filled in.
    pub async fn ingest(&self, neighborhood: &Neighborhood) -> (usize, usize) {
        let mut store = self.store.write().await;
        let mut vertices = 0;
        let mut edges = 0;
        for vertex in &neighborhood.vertices {
            let degrades = vertex.is_fragment()
                && store
                    .vertex(&vertex.id)
                    .is_some_and(|existing| !existing.is_fragment());
            if degrades {
                continue;
            }
            store.upsert_vertex(vertex.clone());
            vertices += 1;
        }
        for edge in &neighborhood.edges {
            if store.upsert_edge(edge.clone()).is_some() {
                edges += 1;
            }
        }
        (vertices, edges)
    }
}

fn mark_unresolved(store: &mut GraphStore, id: &VertexId) {
    if let Some(record) = store.vertex_mut(id) {
        if record.resolution == Resolution::Fragment {
            record.resolution = Resolution::Unresolved;
        }
    }
}
