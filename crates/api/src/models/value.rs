use serde::{Deserialize, Serialize};

/// A typed attribute value attached to a vertex or edge.
///
/// Both dialects collapse their wire typing onto this enum: GraphSON
/// numeric wrappers on the Gremlin side, XSD datatypes on the SPARQL side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    /// Resource-valued attribute (a SPARQL URI object in attribute position).
    Uri(String),
}

impl AttributeValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::String(_) => ValueKind::String,
            AttributeValue::Integer(_) => ValueKind::Integer,
            AttributeValue::Decimal(_) => ValueKind::Decimal,
            AttributeValue::Boolean(_) => ValueKind::Boolean,
            AttributeValue::Uri(_) => ValueKind::Uri,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Decimal(n) => write!(f, "{}", n),
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Uri(u) => write!(f, "{}", u),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Integer(n)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Decimal(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

/// The type tag of an [`AttributeValue`], used in sampled attribute schemas.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Decimal,
    Boolean,
    Uri,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Decimal => "decimal",
            ValueKind::Boolean => "boolean",
            ValueKind::Uri => "uri",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_kind_roundtrip() {
        let v = AttributeValue::from(12i64);
        assert_eq!(v.kind(), ValueKind::Integer);
        let v = AttributeValue::from(1.5f64);
        assert_eq!(v.kind(), ValueKind::Decimal);
        let v = AttributeValue::from("LHR");
        assert_eq!(v.kind(), ValueKind::String);
    }

    #[test]
    fn serialization_is_tagged() {
        let v = AttributeValue::Integer(7);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"kind":"integer","value":7}"#);
        let parsed: AttributeValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
    }
}
