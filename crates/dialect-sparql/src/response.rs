//! SPARQL JSON results decoding.
//!
//! The wire shape is the W3C `application/sparql-results+json` format:
//! `{ head: { vars }, results: { bindings: [ { var: cell } ] } }`, where a
//! cell carries a `type` tag of `uri`, `literal`, or `bnode`. Shape is
//! validated here; anything else becomes [`MalformedResponse`] naming the
//! offending field.
//!
//! [`MalformedResponse`]: vertiscope_api::ConnectorError::MalformedResponse

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use vertiscope_api::{ConnectorError, Result};

/// One result cell: a type-tagged RDF term.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BindingCell {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default, rename = "xml:lang")]
    pub lang: Option<String>,
}

/// A validated RDF term.
#[derive(Debug, Clone, PartialEq)]
pub enum RdfTerm<'a> {
    Uri(&'a str),
    BNode(&'a str),
    Literal {
        value: &'a str,
        datatype: Option<&'a str>,
    },
}

impl BindingCell {
    /// Validate the cell's type tag. `path` names the cell for error
    /// reporting.
    pub fn term(&self, path: &str) -> Result<RdfTerm<'_>> {
        match self.kind.as_str() {
            "uri" => Ok(RdfTerm::Uri(&self.value)),
            "bnode" => Ok(RdfTerm::BNode(&self.value)),
            "literal" | "typed-literal" => Ok(RdfTerm::Literal {
                value: &self.value,
                datatype: self.datatype.as_deref(),
            }),
            other => Err(ConnectorError::malformed(
                format!("{path}.type"),
                format!("unknown binding type `{other}`"),
            )),
        }
    }

    /// The term as a vertex reference (uri or bnode).
    pub fn resource(&self, path: &str) -> Result<&str> {
        match self.term(path)? {
            RdfTerm::Uri(v) | RdfTerm::BNode(v) => Ok(v),
            RdfTerm::Literal { .. } => Err(ConnectorError::malformed(
                path.to_string(),
                "expected a resource, found a literal",
            )),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
struct Head {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
struct Results {
    #[serde(default)]
    bindings: Vec<IndexMap<String, BindingCell>>,
}

/// A parsed SPARQL JSON response: SELECT rows, or an ASK boolean.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SparqlRawResponse {
    #[serde(default)]
    head: Head,
    #[serde(default)]
    results: Results,
    #[serde(default)]
    boolean: Option<bool>,
}

impl SparqlRawResponse {
    pub fn parse(body: &Value) -> Result<Self> {
        serde_json::from_value(body.clone())
            .map_err(|e| ConnectorError::malformed("results.bindings", e.to_string()))
    }

    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    pub fn rows(&self) -> &[IndexMap<String, BindingCell>] {
        &self.results.bindings
    }

    /// The ASK result; malformed when the response was a SELECT.
    pub fn ask(&self) -> Result<bool> {
        self.boolean
            .ok_or_else(|| ConnectorError::malformed("boolean", "missing ASK result"))
    }

    /// Fetch a required variable from one row, naming the cell on failure.
    pub fn require<'a>(
        row: &'a IndexMap<String, BindingCell>,
        index: usize,
        var: &str,
    ) -> Result<&'a BindingCell> {
        row.get(var).ok_or_else(|| {
            ConnectorError::malformed(
                format!("results.bindings[{index}].{var}"),
                "missing binding",
            )
        })
    }
}
