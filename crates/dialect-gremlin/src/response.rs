//! GraphSON 3 response decoding.
//!
//! The Gremlin HTTP server wraps every result in typed `{"@type", "@value"}`
//! envelopes. [`GValue`] is the tagged-union view of that wire format;
//! decoding validates shape at this boundary and reports
//! [`MalformedResponse`] with the offending field's path, so nothing
//! loosely typed leaks further in.
//!
//! [`MalformedResponse`]: vertiscope_api::ConnectorError::MalformedResponse

use serde_json::Value;
use vertiscope_api::{ConnectorError, Result};

/// A decoded GraphSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum GValue {
    Null,
    Bool(bool),
    String(String),
    Int(i64),
    Double(f64),
    List(Vec<GValue>),
    /// Key/value pairs in wire order. Keys are full values: grouped-count
    /// maps key by projection maps, not just strings.
    Map(Vec<(GValue, GValue)>),
    Vertex(GVertex),
    Edge(GEdge),
    /// `g:T` ("id", "label") and `g:Direction` ("IN", "OUT") tokens.
    Token(String),
}

/// A GraphSON vertex element.
#[derive(Debug, Clone, PartialEq)]
pub struct GVertex {
    pub id: String,
    pub label: String,
    /// First value of each vertex property, in wire order.
    pub properties: Vec<(String, GValue)>,
}

/// A GraphSON edge element.
#[derive(Debug, Clone, PartialEq)]
pub struct GEdge {
    pub id: String,
    pub label: String,
    pub out_v: String,
    pub in_v: String,
    pub properties: Vec<(String, GValue)>,
}

impl GValue {
    /// Decode a GraphSON JSON fragment. `path` names the position inside
    /// the response for error reporting.
    pub fn decode(value: &Value, path: &str) -> Result<GValue> {
        match value {
            Value::Null => Ok(GValue::Null),
            Value::Bool(b) => Ok(GValue::Bool(*b)),
            Value::String(s) => Ok(GValue::String(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(GValue::Int(i))
                } else {
                    Ok(GValue::Double(n.as_f64().unwrap_or_default()))
                }
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(GValue::decode(item, &format!("{path}[{i}]"))?);
                }
                Ok(GValue::List(out))
            }
            Value::Object(obj) => match obj.get("@type").and_then(Value::as_str) {
                Some(tag) => Self::decode_typed(tag, obj.get("@value"), path),
                // Untyped servers return plain JSON objects; keep them as
                // string-keyed maps.
                None => {
                    let mut pairs = Vec::with_capacity(obj.len());
                    for (k, v) in obj {
                        let decoded = GValue::decode(v, &format!("{path}.{k}"))?;
                        pairs.push((GValue::String(k.clone()), decoded));
                    }
                    Ok(GValue::Map(pairs))
                }
            },
        }
    }

    fn decode_typed(tag: &str, value: Option<&Value>, path: &str) -> Result<GValue> {
        let value = value
            .ok_or_else(|| ConnectorError::malformed(format!("{path}.@value"), "missing"))?;
        match tag {
            "g:Int32" | "g:Int64" => value
                .as_i64()
                .map(GValue::Int)
                .ok_or_else(|| ConnectorError::malformed(format!("{path}.@value"), "expected integer")),
            "g:Double" | "g:Float" => value
                .as_f64()
                .map(GValue::Double)
                .ok_or_else(|| ConnectorError::malformed(format!("{path}.@value"), "expected number")),
            "g:List" | "g:Set" => {
                let items = value.as_array().ok_or_else(|| {
                    ConnectorError::malformed(format!("{path}.@value"), "expected array")
                })?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(GValue::decode(item, &format!("{path}.@value[{i}]"))?);
                }
                Ok(GValue::List(out))
            }
            "g:Map" => {
                // Flat array alternating key, value, key, value, ...
                let items = value.as_array().ok_or_else(|| {
                    ConnectorError::malformed(format!("{path}.@value"), "expected array")
                })?;
                if items.len() % 2 != 0 {
                    return Err(ConnectorError::malformed(
                        format!("{path}.@value"),
                        "odd number of map entries",
                    ));
                }
                let mut pairs = Vec::with_capacity(items.len() / 2);
                for (i, chunk) in items.chunks_exact(2).enumerate() {
                    let key = GValue::decode(&chunk[0], &format!("{path}.@value[{}]", i * 2))?;
                    let val = GValue::decode(&chunk[1], &format!("{path}.@value[{}]", i * 2 + 1))?;
                    pairs.push((key, val));
                }
                Ok(GValue::Map(pairs))
            }
            "g:T" | "g:Direction" => value
                .as_str()
                .map(|s| GValue::Token(s.to_string()))
                .ok_or_else(|| ConnectorError::malformed(format!("{path}.@value"), "expected string")),
            "g:Vertex" => Ok(GValue::Vertex(GVertex::decode(value, path)?)),
            "g:Edge" => Ok(GValue::Edge(GEdge::decode(value, path)?)),
            other => Err(ConnectorError::malformed(
                format!("{path}.@type"),
                format!("unsupported GraphSON type `{other}`"),
            )),
        }
    }

    /// Stringify an id-position value. Gremlin ids may be numeric or
    /// string on the wire; the canonical model treats both as opaque text.
    pub fn as_id_string(&self, path: &str) -> Result<String> {
        match self {
            GValue::String(s) => Ok(s.clone()),
            GValue::Int(i) => Ok(i.to_string()),
            GValue::Double(d) => Ok(d.to_string()),
            _ => Err(ConnectorError::malformed(
                path.to_string(),
                "expected a string or numeric id",
            )),
        }
    }

    pub fn as_count(&self, path: &str) -> Result<u64> {
        match self {
            GValue::Int(i) if *i >= 0 => Ok(*i as u64),
            _ => Err(ConnectorError::malformed(
                path.to_string(),
                "expected a non-negative count",
            )),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GValue::String(s) => Some(s),
            GValue::Token(s) => Some(s),
            _ => None,
        }
    }
}

impl GVertex {
    fn decode(value: &Value, path: &str) -> Result<GVertex> {
        let id = value
            .get("id")
            .map(|v| GValue::decode(v, &format!("{path}.id")))
            .transpose()?
            .ok_or_else(|| ConnectorError::malformed(format!("{path}.id"), "missing"))?
            .as_id_string(&format!("{path}.id"))?;
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| ConnectorError::malformed(format!("{path}.label"), "missing"))?
            .to_string();

        // Vertex properties: name -> [g:VertexProperty, ...]; only the
        // first value of each property is sampled.
        let mut properties = Vec::new();
        if let Some(props) = value.get("properties").and_then(Value::as_object) {
            for (name, entries) in props {
                let prop_path = format!("{path}.properties.{name}");
                let first = entries
                    .as_array()
                    .and_then(|a| a.first())
                    .ok_or_else(|| ConnectorError::malformed(prop_path.clone(), "expected array"))?;
                let inner = first
                    .get("@value")
                    .and_then(|v| v.get("value"))
                    .ok_or_else(|| {
                        ConnectorError::malformed(prop_path.clone(), "missing property value")
                    })?;
                properties.push((name.clone(), GValue::decode(inner, &prop_path)?));
            }
        }

        Ok(GVertex {
            id,
            label,
            properties,
        })
    }
}

impl GEdge {
    fn decode(value: &Value, path: &str) -> Result<GEdge> {
        let field = |name: &str| -> Result<String> {
            let field_path = format!("{path}.{name}");
            value
                .get(name)
                .map(|v| GValue::decode(v, &field_path))
                .transpose()?
                .ok_or_else(|| ConnectorError::malformed(field_path.clone(), "missing"))?
                .as_id_string(&field_path)
        };
        let id = field("id")?;
        let out_v = field("outV")?;
        let in_v = field("inV")?;
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| ConnectorError::malformed(format!("{path}.label"), "missing"))?
            .to_string();

        // Edge properties: name -> g:Property with a single value.
        let mut properties = Vec::new();
        if let Some(props) = value.get("properties").and_then(Value::as_object) {
            for (name, entry) in props {
                let prop_path = format!("{path}.properties.{name}");
                let inner = entry
                    .get("@value")
                    .and_then(|v| v.get("value"))
                    .ok_or_else(|| {
                        ConnectorError::malformed(prop_path.clone(), "missing property value")
                    })?;
                properties.push((name.clone(), GValue::decode(inner, &prop_path)?));
            }
        }

        Ok(GEdge {
            id,
            label,
            out_v,
            in_v,
            properties,
        })
    }
}

/// A parsed Gremlin HTTP response: the `result.data` list, decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct GremlinRawResponse {
    items: Vec<GValue>,
}

impl GremlinRawResponse {
    pub fn parse(body: &Value) -> Result<Self> {
        let data = body
            .get("result")
            .and_then(|r| r.get("data"))
            .ok_or_else(|| ConnectorError::malformed("result.data", "missing"))?;
        match GValue::decode(data, "result.data")? {
            GValue::List(items) => Ok(Self { items }),
            // A bare scalar result is treated as a single-item list.
            other => Ok(Self { items: vec![other] }),
        }
    }

    pub fn items(&self) -> &[GValue] {
        &self.items
    }

    pub fn first(&self) -> Option<&GValue> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
