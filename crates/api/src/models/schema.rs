use super::value::ValueKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregated per-label counts.
///
/// `total` counts distinct elements (raw grouped buckets, before composite
/// labels are exploded). Per-label counts may overlap for multi-label
/// vertices, so `total >= sum(counts)` is NOT an invariant; each
/// individual count is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SchemaCounts {
    pub total: u64,
    pub counts: IndexMap<String, u64>,
}

impl SchemaCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one bucket into the per-label counts, summing on repeat.
    ///
    /// A label seen via multiple raw buckets (multi-label vertices) must
    /// accumulate, never overwrite: the final figure is the number of
    /// distinct elements carrying that label.
    pub fn add(&mut self, label: impl Into<String>, count: u64) {
        *self.counts.entry(label.into()).or_insert(0) += count;
    }

    /// Fold one raw bucket into both the per-label counts and the total.
    pub fn add_bucket(&mut self, label: impl Into<String>, count: u64) {
        self.add(label, count);
        self.total += count;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }
}

/// An observed (not necessarily exhaustive) schema edge between labels.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelConnection {
    pub source: String,
    pub edge: String,
    pub target: String,
}

impl LabelConnection {
    pub fn new(
        source: impl Into<String>,
        edge: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            edge: edge.into(),
            target: target.into(),
        }
    }
}

/// One sampled attribute of a label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AttributeSchema {
    pub name: String,
    pub value_kind: ValueKind,
}

impl AttributeSchema {
    pub fn new(name: impl Into<String>, value_kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            value_kind,
        }
    }
}

/// What is known about one vertex or edge label: how many elements carry
/// it, and which attributes a sampled element exposed. `attributes` stays
/// empty when the sampling step failed or found no instance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LabelSchema {
    pub count: u64,
    pub attributes: Vec<AttributeSchema>,
}

impl LabelSchema {
    pub fn with_count(count: u64) -> Self {
        Self {
            count,
            attributes: Vec::new(),
        }
    }
}

/// The aggregated, sampled structure of a connected graph database.
/// Built once per connection, cached for the session, invalidated only by
/// explicit refresh.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub vertex_labels: IndexMap<String, LabelSchema>,
    pub edge_labels: IndexMap<String, LabelSchema>,
    pub connections: Vec<LabelConnection>,
    pub vertex_total: u64,
    pub edge_total: u64,
}

impl Schema {
    pub fn vertex_label_names(&self) -> impl Iterator<Item = &str> {
        self.vertex_labels.keys().map(String::as_str)
    }

    pub fn edge_label_names(&self) -> impl Iterator<Item = &str> {
        self.edge_labels.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_instead_of_overwriting() {
        let mut counts = SchemaCounts::new();
        counts.add_bucket("airport", 3);
        counts.add_bucket("airport", 5);
        assert_eq!(counts.get("airport"), 8);
        assert_eq!(counts.total, 8);
    }

    #[test]
    fn total_tracks_raw_buckets_not_exploded_labels() {
        // One bucket of 5 multi-label vertices explodes into two labels;
        // the total still counts 5 distinct vertices.
        let mut counts = SchemaCounts::new();
        counts.total += 5;
        counts.add("a", 5);
        counts.add("b", 5);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.get("a"), 5);
        assert_eq!(counts.get("b"), 5);
    }

    #[test]
    fn missing_label_counts_zero() {
        let counts = SchemaCounts::new();
        assert_eq!(counts.get("nope"), 0);
    }
}
