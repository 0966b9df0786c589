use super::value::AttributeValue;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Synthetic label applied to fragments created without a type hint.
/// Replaced in place once the real fetch resolves.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Opaque, stable vertex identifier. Equality is string equality.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VertexId(String);

impl VertexId {
    pub fn new(id: impl Into<String>) -> Self {
        VertexId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        VertexId(s.to_string())
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        VertexId(s)
    }
}

impl AsRef<str> for VertexId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How much of a vertex record is actually backed by the remote database.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Placeholder created locally; a fetch may be in flight.
    Fragment,
    /// Fully fetched record.
    Resolved,
    /// The fetch failed; the fragment stays visible with this marker
    /// rather than vanishing from the cache.
    Unresolved,
}

/// Canonical vertex record shared by both dialects.
///
/// `types` is an ordered, deduplicated label set, never empty once
/// resolved. Gremlin packs multiple labels into one `::`-joined string on
/// the wire; normalizers split that before records reach this type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VertexRecord {
    pub id: VertexId,
    pub types: IndexSet<String>,
    pub attributes: IndexMap<String, AttributeValue>,
    pub resolution: Resolution,
}

impl VertexRecord {
    /// A fully resolved record with the given labels.
    pub fn resolved(id: impl Into<VertexId>, types: impl IntoIterator<Item = String>) -> Self {
        let mut set: IndexSet<String> = types.into_iter().collect();
        if set.is_empty() {
            set.insert(UNKNOWN_LABEL.to_string());
        }
        Self {
            id: id.into(),
            types: set,
            attributes: IndexMap::new(),
            resolution: Resolution::Resolved,
        }
    }

    /// A placeholder record created before the full fetch. Labels come from
    /// the caller's hint; with no hint the record carries [`UNKNOWN_LABEL`].
    pub fn fragment(id: impl Into<VertexId>, type_hint: impl IntoIterator<Item = String>) -> Self {
        let mut record = Self::resolved(id, type_hint);
        record.resolution = Resolution::Fragment;
        record
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn is_fragment(&self) -> bool {
        self.resolution != Resolution::Resolved
    }

    /// First label in the ordered set.
    pub fn primary_type(&self) -> &str {
        self.types
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_without_hint_gets_unknown_label() {
        let v = VertexRecord::fragment("v1", []);
        assert!(v.is_fragment());
        assert_eq!(v.primary_type(), UNKNOWN_LABEL);
        assert_eq!(v.types.len(), 1);
    }

    #[test]
    fn fragment_takes_hint_labels_in_order() {
        let v = VertexRecord::fragment("v1", ["airport".to_string(), "place".to_string()]);
        let labels: Vec<_> = v.types.iter().map(String::as_str).collect();
        assert_eq!(labels, vec!["airport", "place"]);
    }

    #[test]
    fn resolved_types_are_deduplicated() {
        let v = VertexRecord::resolved("v1", ["a".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(v.types.len(), 2);
        assert!(!v.is_fragment());
    }

    #[test]
    fn vertex_id_equality_is_string_equality() {
        assert_eq!(VertexId::from("123"), VertexId::new("123".to_string()));
        assert_ne!(VertexId::from("123"), VertexId::from("0123"));
    }
}
