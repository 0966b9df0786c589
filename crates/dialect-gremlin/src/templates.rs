//! Gremlin query templates.
//!
//! Pure, deterministic string builders: a request in, a literal Groovy-style
//! traversal out. No I/O, no state, no failure mode for well-formed input.

use crate::labels::split_composite;

/// Escape a string for embedding inside a double-quoted Gremlin literal.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// One `.hasLabel("x")` step per component of a possibly composite label,
/// preserving the original order.
fn has_label_chain(label: &str) -> String {
    split_composite(label)
        .iter()
        .map(|part| format!(".hasLabel(\"{}\")", escape(part)))
        .collect()
}

/// Count vertices grouped by label. Composite labels arrive packed; the
/// normalizer explodes them.
pub fn vertex_labels_query() -> String {
    "g.V().groupCount().by(label())".to_string()
}

/// Count edges grouped by label.
pub fn edge_labels_query() -> String {
    "g.E().groupCount().by(label())".to_string()
}

/// All observed (source label, edge label, target label) triples with
/// counts, aggregated server-side into a single map: one round trip
/// instead of one query per edge label.
pub fn label_connections_query() -> String {
    "g.E().groupCount().by(project('source','edge','target')\
     .by(outV().label()).by(label()).by(inV().label()))"
        .to_string()
}

/// Sample a single vertex of the given (possibly composite) label.
pub fn vertex_sample_query(label: &str) -> String {
    format!("g.V(){}.limit(1)", has_label_chain(label))
}

/// Up to `limit` vertices carrying the given label, as element maps.
pub fn vertices_with_label_query(label: &str, limit: usize) -> String {
    format!(
        "g.V(){}.limit({}).elementMap()",
        has_label_chain(label),
        limit
    )
}

/// Sample one vertex per known label in a single request: one `.by(...)`
/// projection per label, capped with an outer `.limit(1)`.
pub fn vertex_samples_query(labels: &[String]) -> String {
    let keys = labels
        .iter()
        .map(|l| format!("\"{}\"", escape(l)))
        .collect::<Vec<_>>()
        .join(",");
    let projections = labels
        .iter()
        .map(|l| format!(".by(V(){}.limit(1))", has_label_chain(l)))
        .collect::<String>();
    format!("g.V().project({keys}){projections}.limit(1)")
}

/// Sample one edge per known edge label in a single request.
pub fn edge_samples_query(labels: &[String]) -> String {
    let keys = labels
        .iter()
        .map(|l| format!("\"{}\"", escape(l)))
        .collect::<Vec<_>>()
        .join(",");
    let projections = labels
        .iter()
        .map(|l| format!(".by(V().bothE(\"{}\").limit(1))", escape(l)))
        .collect::<String>();
    format!("g.E().project({keys}){projections}.limit(1)")
}

/// Fetch one vertex with all attributes.
pub fn vertex_query(id: &str) -> String {
    format!("g.V(\"{}\").elementMap()", escape(id))
}

/// Fetch one edge with all attributes.
pub fn edge_query(id: &str) -> String {
    format!("g.E(\"{}\").elementMap()", escape(id))
}

/// Count the distinct neighbors of a vertex grouped by label, aggregated
/// into one map in a single round trip.
pub fn neighbor_counts_query(id: &str) -> String {
    format!(
        "g.V(\"{}\").both().dedup().groupCount().by(label())",
        escape(id)
    )
}

/// The incident edges of a vertex with both endpoints, capped at `limit`.
pub fn neighbors_query(id: &str, limit: usize) -> String {
    format!(
        "g.V(\"{}\").bothE().limit({}).project(\"edge\",\"source\",\"target\")\
         .by(elementMap()).by(outV().elementMap()).by(inV().elementMap())",
        escape(id),
        limit
    )
}
