//! Normalization of SPARQL binding rows into canonical records.

use crate::RDF_TYPE;
use crate::response::{BindingCell, RdfTerm, SparqlRawResponse};
use indexmap::{IndexMap, IndexSet};
use vertiscope_api::{
    AttributeSchema, AttributeValue, ConnectorError, EdgeId, EdgeRecord, LabelConnection,
    Neighborhood, Result, SchemaCounts, VertexRecord,
};

/// The fragment of an IRI after the last `#` or `/`. Used as the display
/// name for attribute positions, where full predicate IRIs would drown the
/// data.
pub fn local_name(iri: &str) -> &str {
    iri.rsplit(['#', '/']).next().unwrap_or(iri)
}

fn is_integer_datatype(datatype: &str) -> bool {
    matches!(
        local_name(datatype),
        "integer" | "int" | "long" | "short" | "byte"
            | "nonNegativeInteger" | "positiveInteger"
            | "negativeInteger" | "nonPositiveInteger"
            | "unsignedLong" | "unsignedInt" | "unsignedShort" | "unsignedByte"
    )
}

fn is_decimal_datatype(datatype: &str) -> bool {
    matches!(local_name(datatype), "decimal" | "double" | "float")
}

/// Map a literal onto a typed attribute value.
///
/// With a declared XSD datatype the lexical form is parsed accordingly
/// (falling back to `String` when the form does not parse). Without one,
/// a numeric lexical form containing a decimal point is tagged `Decimal`,
/// otherwise `Integer`. This decimal-point heuristic is a deliberate,
/// documented approximation of XSD inference, not full datatype
/// reasoning; downstream consumers depend on it.
pub fn literal_to_value(value: &str, datatype: Option<&str>) -> AttributeValue {
    if let Some(datatype) = datatype {
        if is_integer_datatype(datatype) {
            if let Ok(n) = value.parse::<i64>() {
                return AttributeValue::Integer(n);
            }
        } else if is_decimal_datatype(datatype) {
            if let Ok(n) = value.parse::<f64>() {
                return AttributeValue::Decimal(n);
            }
        } else if local_name(datatype) == "boolean" {
            if let Ok(b) = value.parse::<bool>() {
                return AttributeValue::Boolean(b);
            }
        }
        return AttributeValue::String(value.to_string());
    }

    if let Ok(n) = value.parse::<f64>() {
        if n.is_finite() {
            if !value.contains('.') {
                if let Ok(i) = value.parse::<i64>() {
                    return AttributeValue::Integer(i);
                }
            }
            return AttributeValue::Decimal(n);
        }
    }
    AttributeValue::String(value.to_string())
}

fn count_cell(cell: &BindingCell, path: &str) -> Result<u64> {
    match cell.term(path)? {
        RdfTerm::Literal { value, .. } => value
            .parse::<u64>()
            .map_err(|_| ConnectorError::malformed(path.to_string(), "expected a count literal")),
        _ => Err(ConnectorError::malformed(
            path.to_string(),
            "expected a count literal",
        )),
    }
}

fn grouped_counts(response: &SparqlRawResponse, key_var: &str, count_var: &str) -> Result<SchemaCounts> {
    let mut counts = SchemaCounts::new();
    for (i, row) in response.rows().iter().enumerate() {
        let key = SparqlRawResponse::require(row, i, key_var)?
            .resource(&format!("results.bindings[{i}].{key_var}"))?
            .to_string();
        let count = count_cell(
            SparqlRawResponse::require(row, i, count_var)?,
            &format!("results.bindings[{i}].{count_var}"),
        )?;
        counts.add_bucket(key, count);
    }
    Ok(counts)
}

/// Fold `?class ?instancesCount` rows into per-class counts.
pub fn class_counts(response: &SparqlRawResponse) -> Result<SchemaCounts> {
    grouped_counts(response, "class", "instancesCount")
}

/// Fold `?pred ?count` rows into per-predicate counts.
pub fn predicate_counts(response: &SparqlRawResponse) -> Result<SchemaCounts> {
    grouped_counts(response, "pred", "count")
}

/// Per-class neighbor counts (`?class ?count` rows).
pub fn neighbor_counts(response: &SparqlRawResponse) -> Result<SchemaCounts> {
    grouped_counts(response, "class", "count")
}

/// `?source ?pred ?target` rows, deduplicated in row order.
pub fn connections(response: &SparqlRawResponse) -> Result<Vec<LabelConnection>> {
    let mut seen = Vec::new();
    for (i, row) in response.rows().iter().enumerate() {
        let cell = |var: &str| -> Result<String> {
            SparqlRawResponse::require(row, i, var)?
                .resource(&format!("results.bindings[{i}].{var}"))
                .map(str::to_string)
        };
        let conn = LabelConnection::new(cell("source")?, cell("pred")?, cell("target")?);
        if !seen.contains(&conn) {
            seen.push(conn);
        }
    }
    Ok(seen)
}

/// `?p ?value` rows of one sampled instance → attribute schemas.
pub fn sample_attribute_schemas(response: &SparqlRawResponse) -> Result<Vec<AttributeSchema>> {
    let mut out: Vec<AttributeSchema> = Vec::new();
    for (i, row) in response.rows().iter().enumerate() {
        let pred = SparqlRawResponse::require(row, i, "p")?
            .resource(&format!("results.bindings[{i}].p"))?;
        let value_cell = SparqlRawResponse::require(row, i, "value")?;
        let RdfTerm::Literal { value, datatype } =
            value_cell.term(&format!("results.bindings[{i}].value"))?
        else {
            // The sample query filters on isLiteral, but a lenient server
            // may still hand back resources; skip them.
            continue;
        };
        let name = local_name(pred);
        if out.iter().any(|a| a.name == name) {
            continue;
        }
        out.push(AttributeSchema::new(
            name,
            literal_to_value(value, datatype).kind(),
        ));
    }
    Ok(out)
}

/// `?p ?value` rows of one resource → a resolved vertex record.
///
/// `rdf:type` objects become type labels; literal objects become
/// attributes named by the predicate's local name; resource objects
/// become `Uri` attribute values. An empty row set means the resource is
/// absent from the remote graph.
pub fn vertex(response: &SparqlRawResponse, id: &str) -> Result<Option<VertexRecord>> {
    if response.rows().is_empty() {
        return Ok(None);
    }
    let mut types = Vec::new();
    let mut attributes: IndexMap<String, AttributeValue> = IndexMap::new();
    for (i, row) in response.rows().iter().enumerate() {
        let pred = SparqlRawResponse::require(row, i, "p")?
            .resource(&format!("results.bindings[{i}].p"))?
            .to_string();
        let value_cell = SparqlRawResponse::require(row, i, "value")?;
        match value_cell.term(&format!("results.bindings[{i}].value"))? {
            RdfTerm::Uri(object) | RdfTerm::BNode(object) => {
                if pred == RDF_TYPE {
                    types.push(object.to_string());
                } else {
                    attributes.insert(
                        local_name(&pred).to_string(),
                        AttributeValue::Uri(object.to_string()),
                    );
                }
            }
            RdfTerm::Literal { value, datatype } => {
                attributes.insert(
                    local_name(&pred).to_string(),
                    literal_to_value(value, datatype),
                );
            }
        }
    }
    let mut record = VertexRecord::resolved(id, types);
    record.attributes = attributes;
    Ok(Some(record))
}

/// Synthesize a deterministic edge id for a triple. RDF edges have no
/// intrinsic identity, so repeated fetches must produce the same id for
/// the cache to deduplicate.
pub fn synthesize_edge_id(source: &str, predicate: &str, target: &str) -> EdgeId {
    EdgeId::new(format!("{source}-[{predicate}]->{target}"))
}

/// Recover the triple from a synthesized edge id.
pub fn parse_edge_id(id: &str) -> Option<(String, String, String)> {
    let (source, rest) = id.split_once("-[")?;
    let (predicate, target) = rest.split_once("]->")?;
    if source.is_empty() || predicate.is_empty() || target.is_empty() {
        return None;
    }
    Some((source.to_string(), predicate.to_string(), target.to_string()))
}

/// `?source ?pred ?target (?sourceClass) (?targetClass)` rows → fragments
/// plus synthesized edges. Endpoint vertices come back as fragments (typed
/// but attribute-less); the cache only keeps them when no richer record
/// exists.
pub fn neighborhood(response: &SparqlRawResponse) -> Result<Neighborhood> {
    let mut vertex_types: IndexMap<String, IndexSet<String>> = IndexMap::new();
    let mut edges: IndexMap<EdgeId, EdgeRecord> = IndexMap::new();

    for (i, row) in response.rows().iter().enumerate() {
        let cell = |var: &str| -> Result<String> {
            SparqlRawResponse::require(row, i, var)?
                .resource(&format!("results.bindings[{i}].{var}"))
                .map(str::to_string)
        };
        let source = cell("source")?;
        let pred = cell("pred")?;
        let target = cell("target")?;

        for (var, endpoint) in [("sourceClass", &source), ("targetClass", &target)] {
            let classes = vertex_types.entry(endpoint.clone()).or_default();
            if let Some(class_cell) = row.get(var) {
                classes.insert(
                    class_cell
                        .resource(&format!("results.bindings[{i}].{var}"))?
                        .to_string(),
                );
            }
        }

        let id = synthesize_edge_id(&source, &pred, &target);
        edges
            .entry(id.clone())
            .or_insert_with(|| EdgeRecord::new(id, source.clone(), target.clone(), pred.clone()));
    }

    let vertices = vertex_types
        .into_iter()
        .map(|(id, types)| VertexRecord::fragment(id, types))
        .collect();
    Ok(Neighborhood::new(
        vertices,
        edges.into_values().collect(),
    ))
}

/// `?start ?p ?value` rows → one resolved record per instance of `class`.
pub fn instance_vertices(response: &SparqlRawResponse, class: &str) -> Result<Vec<VertexRecord>> {
    let mut records: IndexMap<String, VertexRecord> = IndexMap::new();
    for (i, row) in response.rows().iter().enumerate() {
        let start = SparqlRawResponse::require(row, i, "start")?
            .resource(&format!("results.bindings[{i}].start"))?
            .to_string();
        let pred = SparqlRawResponse::require(row, i, "p")?
            .resource(&format!("results.bindings[{i}].p"))?
            .to_string();
        let value_cell = SparqlRawResponse::require(row, i, "value")?;
        let record = records
            .entry(start.clone())
            .or_insert_with(|| VertexRecord::resolved(start.clone(), [class.to_string()]));
        if let RdfTerm::Literal { value, datatype } =
            value_cell.term(&format!("results.bindings[{i}].value"))?
        {
            record
                .attributes
                .insert(local_name(&pred).to_string(), literal_to_value(value, datatype));
        }
    }
    Ok(records.into_values().collect())
}
