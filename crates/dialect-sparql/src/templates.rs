//! SPARQL query templates.
//!
//! Pure string builders, one per operation. IRIs are embedded in angle
//! brackets; characters that would break out of the bracket form are
//! percent-escaped.

/// Escape an IRI for embedding inside `<...>`.
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '"' => out.push_str("%22"),
            '\\' => out.push_str("%5C"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}

fn iri(value: &str) -> String {
    format!("<{}>", escape_iri(value))
}

/// Count instances per class.
pub fn class_counts_query() -> String {
    "SELECT ?class (COUNT(?start) AS ?instancesCount) { ?start a ?class } GROUP BY ?class"
        .to_string()
}

/// Count edge predicates. Literal-valued predicates are attributes, not
/// edges, so they are excluded here.
pub fn predicate_counts_query() -> String {
    "SELECT ?pred (COUNT(?pred) AS ?count) \
     { ?start ?pred ?object FILTER(!isLiteral(?object)) } GROUP BY ?pred"
        .to_string()
}

/// Observed (source class, predicate, target class) triples.
pub fn class_connections_query() -> String {
    "SELECT DISTINCT ?source ?pred ?target \
     { ?s ?pred ?o . ?s a ?source . ?o a ?target }"
        .to_string()
}

/// Project the literal-valued properties of one sample instance of a
/// class. The nested subquery pins a single instance before projecting,
/// which avoids scanning the whole class.
pub fn class_sample_query(class: &str) -> String {
    format!(
        "SELECT ?p ?value {{ \
         {{ SELECT ?start {{ ?start a {} }} LIMIT 1 }} \
         ?start ?p ?value FILTER(isLiteral(?value)) }}",
        iri(class)
    )
}

/// Every predicate/object pair of one resource.
pub fn vertex_query(resource: &str) -> String {
    format!("SELECT ?p ?value {{ {} ?p ?value }}", iri(resource))
}

/// Whether one triple exists. Used to resolve synthesized edge ids.
pub fn edge_exists_query(source: &str, predicate: &str, target: &str) -> String {
    format!(
        "ASK {{ {} {} {} }}",
        iri(source),
        iri(predicate),
        iri(target)
    )
}

/// Count the distinct neighbors of a resource, grouped by class.
pub fn neighbor_counts_query(resource: &str) -> String {
    let r = iri(resource);
    format!(
        "SELECT ?class (COUNT(DISTINCT ?neighbor) AS ?count) \
         {{ {{ {r} ?p ?neighbor FILTER(!isLiteral(?neighbor)) }} \
         UNION {{ ?neighbor ?p {r} }} ?neighbor a ?class }} GROUP BY ?class"
    )
}

/// The incident triples of a resource in both directions, with the
/// (optional) classes of each endpoint.
pub fn neighbors_query(resource: &str, limit: usize) -> String {
    let r = iri(resource);
    format!(
        "SELECT ?source ?pred ?target ?sourceClass ?targetClass {{ \
         {{ {r} ?pred ?target . BIND({r} AS ?source) FILTER(!isLiteral(?target)) }} \
         UNION {{ ?source ?pred {r} . BIND({r} AS ?target) }} \
         OPTIONAL {{ ?source a ?sourceClass }} \
         OPTIONAL {{ ?target a ?targetClass }} }} LIMIT {limit}"
    )
}

/// Literal properties of up to `limit` instances of a class.
pub fn instances_of_class_query(class: &str, limit: usize) -> String {
    format!(
        "SELECT ?start ?p ?value {{ \
         {{ SELECT ?start {{ ?start a {} }} LIMIT {} }} \
         ?start ?p ?value FILTER(isLiteral(?value)) }}",
        iri(class),
        limit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_ws(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn class_counts_matches_canonical_template() {
        // Whitespace-insensitive comparison against the canonical text.
        assert_eq!(
            normalize_ws(&class_counts_query()),
            normalize_ws(
                "SELECT ?class (COUNT(?start) AS ?instancesCount) \
                 { ?start a ?class } GROUP BY ?class"
            )
        );
    }

    #[test]
    fn predicate_counts_exclude_literal_objects() {
        assert!(predicate_counts_query().contains("FILTER(!isLiteral(?object))"));
    }

    #[test]
    fn class_sample_uses_nested_limit_one_subquery() {
        let q = class_sample_query("http://example.org/airport");
        assert!(q.contains("{ SELECT ?start { ?start a <http://example.org/airport> } LIMIT 1 }"));
        assert!(q.contains("FILTER(isLiteral(?value))"));
    }

    #[test]
    fn iris_are_bracket_escaped() {
        let q = vertex_query("http://example.org/a>b");
        assert!(q.contains("<http://example.org/a%3Eb>"));
    }

    #[test]
    fn neighbors_query_binds_both_directions() {
        let q = neighbors_query("http://example.org/v", 25);
        assert!(q.contains("UNION"));
        assert!(q.contains("BIND(<http://example.org/v> AS ?source)"));
        assert!(q.contains("BIND(<http://example.org/v> AS ?target)"));
        assert!(q.ends_with("LIMIT 25"));
    }
}
