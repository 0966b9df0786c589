use super::edge::EdgeRecord;
use super::vertex::VertexRecord;
use serde::{Deserialize, Serialize};

/// Result of expanding a vertex's neighbors: the far vertices plus the
/// incident edges, ready to be ingested into the graph cache.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Neighborhood {
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Neighborhood {
    pub fn new(vertices: Vec<VertexRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { vertices, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}
