use super::value::AttributeValue;
use super::vertex::VertexId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque edge identifier.
///
/// Gremlin edges carry a native id; SPARQL edges have none, so the dialect
/// synthesizes a deterministic `{source}-[{predicate}]->{target}` id to
/// keep repeated fetches deduplicated in the cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        EdgeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        EdgeId(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        EdgeId(s)
    }
}

/// Canonical edge record: one directed, labelled connection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
    pub label: String,
    pub attributes: IndexMap<String, AttributeValue>,
}

impl EdgeRecord {
    pub fn new(
        id: impl Into<EdgeId>,
        source: impl Into<VertexId>,
        target: impl Into<VertexId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: label.into(),
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}
