//! The canonical graph read model.
//!
//! A petgraph topology plus id lookup tables. The store itself is plain
//! synchronous data; [`GraphCache`](crate::cache::GraphCache) wraps it in a
//! lock and funnels every mutation through `upsert`/`remove`, which is what
//! gives the cache its single-writer-per-key semantics.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use vertiscope_api::{EdgeId, EdgeRecord, VertexId, VertexRecord};

pub struct GraphStore {
    topology: StableDiGraph<VertexRecord, EdgeRecord>,
    vertex_index: HashMap<VertexId, NodeIndex>,
    edge_index: HashMap<EdgeId, EdgeIndex>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            topology: StableDiGraph::new(),
            vertex_index: HashMap::new(),
            edge_index: HashMap::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn vertex(&self, id: &VertexId) -> Option<&VertexRecord> {
        let idx = self.vertex_index.get(id)?;
        self.topology.node_weight(*idx)
    }

    pub fn vertex_mut(&mut self, id: &VertexId) -> Option<&mut VertexRecord> {
        let idx = self.vertex_index.get(id)?;
        self.topology.node_weight_mut(*idx)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeRecord> {
        let idx = self.edge_index.get(id)?;
        self.topology.edge_weight(*idx)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &VertexRecord> {
        self.topology.node_weights()
    }

    /// Insert or replace a vertex. Replacement happens in place: the id
    /// keeps its node index, so a fragment is never duplicated when its
    /// resolved record arrives.
    pub fn upsert_vertex(&mut self, record: VertexRecord) -> NodeIndex {
        match self.vertex_index.get(&record.id) {
            Some(&idx) => {
                if let Some(weight) = self.topology.node_weight_mut(idx) {
                    *weight = record;
                }
                idx
            }
            None => {
                let id = record.id.clone();
                let idx = self.topology.add_node(record);
                self.vertex_index.insert(id, idx);
                idx
            }
        }
    }

    /// Insert or replace an edge. Both endpoints must already be present;
    /// an edge with a missing endpoint is skipped and `None` is returned.
    pub fn upsert_edge(&mut self, record: EdgeRecord) -> Option<EdgeIndex> {
        if let Some(&idx) = self.edge_index.get(&record.id) {
            if let Some(weight) = self.topology.edge_weight_mut(idx) {
                *weight = record;
            }
            return Some(idx);
        }
        let source = *self.vertex_index.get(&record.source)?;
        let target = *self.vertex_index.get(&record.target)?;
        let id = record.id.clone();
        let idx = self.topology.add_edge(source, target, record);
        self.edge_index.insert(id, idx);
        Some(idx)
    }

    /// Remove a vertex and every incident edge.
    pub fn remove_vertex(&mut self, id: &VertexId) -> Option<VertexRecord> {
        let idx = self.vertex_index.remove(id)?;
        // Incident edges disappear with the node; drop their index entries
        // first, while the weights are still reachable.
        let incident: Vec<EdgeId> = self
            .topology
            .edges(idx)
            .chain(
                self.topology
                    .edges_directed(idx, petgraph::Direction::Incoming),
            )
            .map(|e| e.weight().id.clone())
            .collect();
        for edge_id in incident {
            self.edge_index.remove(&edge_id);
        }
        self.topology.remove_node(idx)
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<EdgeRecord> {
        let idx = self.edge_index.remove(id)?;
        self.topology.remove_edge(idx)
    }

    /// The cached edges incident to a vertex, with their far endpoint.
    pub fn incident_edges(&self, id: &VertexId) -> Vec<&EdgeRecord> {
        let Some(&idx) = self.vertex_index.get(id) else {
            return Vec::new();
        };
        self.topology
            .edges(idx)
            .chain(
                self.topology
                    .edges_directed(idx, petgraph::Direction::Incoming),
            )
            .map(|e| e.weight())
            .collect()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
