//! Normalization of decoded GraphSON values into canonical records.
//!
//! Normalizers never partially populate a record: a shape mismatch fails
//! the whole step with [`MalformedResponse`] naming the offending field.
//!
//! [`MalformedResponse`]: vertiscope_api::ConnectorError::MalformedResponse

use crate::labels::{split_composite, split_composite_owned};
use crate::response::{GValue, GremlinRawResponse};
use indexmap::IndexMap;
use vertiscope_api::{
    AttributeSchema, AttributeValue, ConnectorError, EdgeRecord, LabelConnection, Neighborhood,
    Result, SchemaCounts, VertexRecord,
};

/// Look up a map entry whose key is the given string or token.
fn map_get<'a>(pairs: &'a [(GValue, GValue)], key: &str) -> Option<&'a GValue> {
    pairs
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

fn expect_map<'a>(value: &'a GValue, path: &str) -> Result<&'a [(GValue, GValue)]> {
    match value {
        GValue::Map(pairs) => Ok(pairs),
        _ => Err(ConnectorError::malformed(path.to_string(), "expected a map")),
    }
}

/// Fold a grouped-count map (label -> count) into [`SchemaCounts`].
///
/// The total counts raw buckets (distinct elements), while composite
/// `::` keys are exploded so each component label accumulates the bucket's
/// count. Repeated labels across buckets sum, never overwrite.
pub fn label_counts(response: &GremlinRawResponse) -> Result<SchemaCounts> {
    let item = response
        .first()
        .ok_or_else(|| ConnectorError::malformed("result.data", "empty group count result"))?;
    let pairs = expect_map(item, "result.data[0]")?;

    let mut counts = SchemaCounts::new();
    for (i, (key, value)) in pairs.iter().enumerate() {
        let path = format!("result.data[0][{i}]");
        let label = key
            .as_str()
            .ok_or_else(|| ConnectorError::malformed(path.clone(), "expected a string label key"))?;
        let count = value.as_count(&path)?;
        counts.total += count;
        for part in split_composite(label) {
            counts.add(part, count);
        }
    }
    Ok(counts)
}

/// Normalize the `(source, edge, target)` grouped-count map into observed
/// label connections. Composite source/target labels explode into one
/// connection per component pair, deduplicated in first-seen order.
pub fn label_connections(response: &GremlinRawResponse) -> Result<Vec<LabelConnection>> {
    let item = response
        .first()
        .ok_or_else(|| ConnectorError::malformed("result.data", "empty group count result"))?;
    let pairs = expect_map(item, "result.data[0]")?;

    let mut seen = Vec::new();
    for (i, (key, _count)) in pairs.iter().enumerate() {
        let path = format!("result.data[0][{i}]");
        let projection = expect_map(key, &path)?;
        let part = |name: &str| -> Result<String> {
            map_get(projection, name)
                .and_then(GValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| ConnectorError::malformed(format!("{path}.{name}"), "missing label"))
        };
        let source = part("source")?;
        let edge = part("edge")?;
        let target = part("target")?;

        for s in split_composite(&source) {
            for t in split_composite(&target) {
                let conn = LabelConnection::new(s, edge.as_str(), t);
                if !seen.contains(&conn) {
                    seen.push(conn);
                }
            }
        }
    }
    Ok(seen)
}

/// Neighbor counts share the grouped-count shape of label counts.
pub fn neighbor_counts(response: &GremlinRawResponse) -> Result<SchemaCounts> {
    label_counts(response)
}

/// Map a GraphSON scalar onto a canonical attribute value.
pub fn attribute_value(value: &GValue, path: &str) -> Result<AttributeValue> {
    match value {
        GValue::String(s) => Ok(AttributeValue::String(s.clone())),
        GValue::Int(i) => Ok(AttributeValue::Integer(*i)),
        GValue::Double(d) => Ok(AttributeValue::Decimal(*d)),
        GValue::Bool(b) => Ok(AttributeValue::Boolean(*b)),
        // Multi-valued properties sample their first value.
        GValue::List(items) => match items.first() {
            Some(first) => attribute_value(first, path),
            None => Err(ConnectorError::malformed(
                path.to_string(),
                "empty property value list",
            )),
        },
        _ => Err(ConnectorError::malformed(
            path.to_string(),
            "expected a scalar attribute value",
        )),
    }
}

/// Normalize one `elementMap()` result into a vertex record. The `label`
/// entry may be composite and is split into the ordered type set.
pub fn vertex_from_element_map(item: &GValue, path: &str) -> Result<VertexRecord> {
    let pairs = expect_map(item, path)?;
    let id = map_get(pairs, "id")
        .ok_or_else(|| ConnectorError::malformed(format!("{path}.id"), "missing"))?
        .as_id_string(&format!("{path}.id"))?;
    let label = map_get(pairs, "label")
        .and_then(GValue::as_str)
        .ok_or_else(|| ConnectorError::malformed(format!("{path}.label"), "missing"))?;

    let mut record = VertexRecord::resolved(id, split_composite_owned(label));
    for (key, value) in pairs {
        match key {
            GValue::String(name) => {
                let value = attribute_value(value, &format!("{path}.{name}"))?;
                record.attributes.insert(name.clone(), value);
            }
            // id/label tokens and direction entries are not attributes.
            _ => continue,
        }
    }
    Ok(record)
}

/// Normalize one edge `elementMap()` result. Endpoints come from the
/// `OUT` (source) and `IN` (target) direction entries.
pub fn edge_from_element_map(item: &GValue, path: &str) -> Result<EdgeRecord> {
    let pairs = expect_map(item, path)?;
    let id = map_get(pairs, "id")
        .ok_or_else(|| ConnectorError::malformed(format!("{path}.id"), "missing"))?
        .as_id_string(&format!("{path}.id"))?;
    let label = map_get(pairs, "label")
        .and_then(GValue::as_str)
        .ok_or_else(|| ConnectorError::malformed(format!("{path}.label"), "missing"))?
        .to_string();

    let endpoint = |direction: &str| -> Result<String> {
        let dir_path = format!("{path}.{direction}");
        let entry = map_get(pairs, direction)
            .ok_or_else(|| ConnectorError::malformed(dir_path.clone(), "missing endpoint"))?;
        let sub = expect_map(entry, &dir_path)?;
        map_get(sub, "id")
            .ok_or_else(|| ConnectorError::malformed(format!("{dir_path}.id"), "missing"))?
            .as_id_string(&format!("{dir_path}.id"))
    };
    let source = endpoint("OUT")?;
    let target = endpoint("IN")?;

    let mut record = EdgeRecord::new(id, source, target, label);
    for (key, value) in pairs {
        if let GValue::String(name) = key {
            let value = attribute_value(value, &format!("{path}.{name}"))?;
            record.attributes.insert(name.clone(), value);
        }
    }
    Ok(record)
}

/// Normalize a list of vertex element maps.
pub fn vertices(response: &GremlinRawResponse) -> Result<Vec<VertexRecord>> {
    response
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| vertex_from_element_map(item, &format!("result.data[{i}]")))
        .collect()
}

/// Normalize the `project("edge","source","target")` neighbor expansion.
pub fn neighborhood(response: &GremlinRawResponse) -> Result<Neighborhood> {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    for (i, item) in response.items().iter().enumerate() {
        let path = format!("result.data[{i}]");
        let pairs = expect_map(item, &path)?;
        let entry = |name: &str| -> Result<&GValue> {
            map_get(pairs, name)
                .ok_or_else(|| ConnectorError::malformed(format!("{path}.{name}"), "missing"))
        };
        edges.push(edge_from_element_map(entry("edge")?, &format!("{path}.edge"))?);
        for side in ["source", "target"] {
            let vertex = vertex_from_element_map(entry(side)?, &format!("{path}.{side}"))?;
            if !vertices.iter().any(|v: &VertexRecord| v.id == vertex.id) {
                vertices.push(vertex);
            }
        }
    }
    Ok(Neighborhood::new(vertices, edges))
}

/// Normalize a `project(label, ...)` sampling result into per-label
/// attribute schemas. Every requested label gets an entry; labels whose
/// projection is absent (no instance found) map to an empty list.
pub fn sample_attribute_schemas(
    response: &GremlinRawResponse,
    labels: &[String],
) -> Result<IndexMap<String, Vec<AttributeSchema>>> {
    let mut out: IndexMap<String, Vec<AttributeSchema>> = labels
        .iter()
        .map(|label| (label.clone(), Vec::new()))
        .collect();

    let Some(item) = response.first() else {
        return Ok(out);
    };
    let pairs = expect_map(item, "result.data[0]")?;
    for (key, value) in pairs {
        let Some(label) = key.as_str() else { continue };
        let path = format!("result.data[0].{label}");
        let schemas = element_attribute_schemas(value, &path)?;
        if let Some(slot) = out.get_mut(label) {
            *slot = schemas;
        }
    }
    Ok(out)
}

fn element_attribute_schemas(value: &GValue, path: &str) -> Result<Vec<AttributeSchema>> {
    let properties: &[(String, GValue)] = match value {
        GValue::Vertex(v) => &v.properties,
        GValue::Edge(e) => &e.properties,
        // Projections over labels with no instance come back as an empty
        // list rather than an element.
        GValue::List(items) if items.is_empty() => return Ok(Vec::new()),
        GValue::List(items) => return element_attribute_schemas(&items[0], path),
        _ => {
            return Err(ConnectorError::malformed(
                path.to_string(),
                "expected a sampled element",
            ));
        }
    };
    properties
        .iter()
        .map(|(name, value)| {
            let value = attribute_value(value, &format!("{path}.{name}"))?;
            Ok(AttributeSchema::new(name.clone(), value.kind()))
        })
        .collect()
}
