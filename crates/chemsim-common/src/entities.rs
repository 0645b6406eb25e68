/// Core entity types shared by the fetch, compute and aggregate stages.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Compound
// ---------------------------------------------------------------------------

/// A compound fetched from PubChem. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    pub cid: u64,
    pub name: Option<String>,
    pub smiles: String,
    pub iupac_name: Option<String>,
}

/// Result of a property lookup for one CID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundProperties {
    pub cid: u64,
    pub smiles: Option<String>,
    pub iupac_name: Option<String>,
}

impl CompoundProperties {
    /// Promote to a `Compound`, or `None` when the lookup carried no SMILES.
    pub fn into_compound(self, name: Option<String>) -> Option<Compound> {
        let smiles = self.smiles?;
        Some(Compound {
            cid: self.cid,
            name,
            smiles,
            iupac_name: self.iupac_name,
        })
    }
}

// ---------------------------------------------------------------------------
// Descriptor record
// ---------------------------------------------------------------------------

/// Descriptor values for one successfully parsed compound.
///
/// `values` keeps the configured descriptor order; `None` marks a
/// descriptor that could not be computed for this structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorRecord {
    pub cid: u64,
    pub smiles: String,
    pub iupac_name: Option<String>,
    pub values: Vec<(String, Option<f64>)>,
}

impl DescriptorRecord {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| *value)
    }
}

// ---------------------------------------------------------------------------
// Per-candidate failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FailureKind {
    MissingSmiles,
    InvalidSmiles(String),
    Fetch(String),
    Timeout,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::MissingSmiles => "missing_smiles",
            FailureKind::InvalidSmiles(_) => "invalid_smiles",
            FailureKind::Fetch(_) => "fetch",
            FailureKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingSmiles => write!(f, "no SMILES available"),
            FailureKind::InvalidSmiles(reason) => write!(f, "invalid SMILES: {reason}"),
            FailureKind::Fetch(reason) => write!(f, "fetch failed: {reason}"),
            FailureKind::Timeout => write!(f, "timed out"),
        }
    }
}

/// A candidate that produced no record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub cid: u64,
    pub kind: FailureKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_without_smiles_do_not_promote() {
        let props = CompoundProperties { cid: 7, smiles: None, iupac_name: Some("x".into()) };
        assert!(props.into_compound(None).is_none());
    }

    #[test]
    fn test_properties_promote() {
        let props = CompoundProperties {
            cid: 2244,
            smiles: Some("CC(=O)OC1=CC=CC=C1C(=O)O".into()),
            iupac_name: Some("2-acetyloxybenzoic acid".into()),
        };
        let compound = props.into_compound(Some("Aspirin".into())).unwrap();
        assert_eq!(compound.cid, 2244);
        assert_eq!(compound.name.as_deref(), Some("Aspirin"));
    }

    #[test]
    fn test_record_lookup() {
        let record = DescriptorRecord {
            cid: 1,
            smiles: "C".into(),
            iupac_name: None,
            values: vec![("MW".into(), Some(16.0)), ("nRing".into(), None)],
        };
        assert_eq!(record.get("MW"), Some(16.0));
        assert_eq!(record.get("nRing"), None);
        assert_eq!(record.get("SLogP"), None);
    }

    #[test]
    fn test_failure_serialization() {
        let failure = CandidateFailure { cid: 5, kind: FailureKind::InvalidSmiles("bad ring".into()) };
        let json = serde_json::to_string(&failure).unwrap();
        assert!(json.contains("invalid_smiles"));
        assert!(json.contains("bad ring"));
        assert_eq!(failure.kind.label(), "invalid_smiles");
    }
}
