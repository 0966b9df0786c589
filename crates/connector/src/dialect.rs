use serde::{Deserialize, Serialize};

/// The two query dialects the connector layer speaks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Gremlin,
    Sparql,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Gremlin => "gremlin",
            Dialect::Sparql => "sparql",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gremlin" => Ok(Dialect::Gremlin),
            "sparql" => Ok(Dialect::Sparql),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Gremlin".parse::<Dialect>().unwrap(), Dialect::Gremlin);
        assert_eq!("SPARQL".parse::<Dialect>().unwrap(), Dialect::Sparql);
        assert!("cypher".parse::<Dialect>().is_err());
    }
}
