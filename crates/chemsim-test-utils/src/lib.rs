//! Shared testing utilities: an in-memory [`CompoundSource`] and fixtures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chemsim_common::{ChemsimError, CompoundProperties, Result};
use chemsim_pubchem::CompoundSource;

pub use pretty_assertions;

pub const ASPIRIN_CID: u64 = 2244;
pub const ASPIRIN_SMILES: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";
pub const ASPIRIN_IUPAC: &str = "2-acetyloxybenzoic acid";

/// Candidates used by the pipeline tests. Salicylic acid, methyl
/// salicylate and acetaminophen parse; 9001 carries a broken SMILES and
/// 9002 has none.
pub const SALICYLIC_ACID: (u64, &str) = (338, "C1=CC=C(C(=C1)C(=O)O)O");
pub const METHYL_SALICYLATE: (u64, &str) = (4133, "COC(=O)C1=CC=CC=C1O");
pub const ACETAMINOPHEN: (u64, &str) = (1983, "CC(=O)NC1=CC=C(C=C1)O");
pub const UNPARSEABLE: (u64, &str) = (9001, "C1CC(C");
pub const NO_SMILES_CID: u64 = 9002;

/// In-memory compound database with optional per-CID failures and delays.
#[derive(Default)]
pub struct MockCompoundSource {
    names: HashMap<String, Vec<u64>>,
    compounds: HashMap<u64, CompoundProperties>,
    similar: Vec<u64>,
    failures: HashMap<u64, String>,
    delays: HashMap<u64, Duration>,
    property_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    similarity_queries: Mutex<Vec<(String, u8, usize)>>,
}

impl MockCompoundSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: &str, cid: u64) -> Self {
        self.names.entry(name.to_lowercase()).or_default().push(cid);
        self
    }

    pub fn with_compound(mut self, cid: u64, smiles: &str, iupac_name: Option<&str>) -> Self {
        self.compounds.insert(
            cid,
            CompoundProperties {
                cid,
                smiles: Some(smiles.to_string()),
                iupac_name: iupac_name.map(String::from),
            },
        );
        self
    }

    /// A CID PubChem knows but reports no SMILES for.
    pub fn without_smiles(mut self, cid: u64) -> Self {
        self.compounds.insert(cid, CompoundProperties { cid, ..Default::default() });
        self
    }

    /// Hits returned by every similarity query, in rank order.
    pub fn with_similar(mut self, cids: &[u64]) -> Self {
        self.similar = cids.to_vec();
        self
    }

    /// Property lookups for `cid` fail with an HTTP-like error.
    pub fn failing(mut self, cid: u64, message: &str) -> Self {
        self.failures.insert(cid, message.to_string());
        self
    }

    /// Property lookups for `cid` sleep before answering.
    pub fn delayed(mut self, cid: u64, delay: Duration) -> Self {
        self.delays.insert(cid, delay);
        self
    }

    pub fn property_calls(&self) -> usize {
        self.property_calls.load(Ordering::SeqCst)
    }

    /// Highest number of property lookups that were running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn similarity_queries(&self) -> Vec<(String, u8, usize)> {
        self.similarity_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompoundSource for MockCompoundSource {
    async fn cids_for_name(&self, name: &str) -> Result<Vec<u64>> {
        self.names
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| ChemsimError::CompoundNotFound(name.to_string()))
    }

    async fn properties(&self, cid: u64) -> Result<CompoundProperties> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&cid) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(message) = self.failures.get(&cid) {
            return Err(ChemsimError::BadResponse {
                service: "mock".to_string(),
                message: message.clone(),
            });
        }
        Ok(self
            .compounds
            .get(&cid)
            .cloned()
            .unwrap_or(CompoundProperties { cid, ..Default::default() }))
    }

    async fn similar_cids(&self, smiles: &str, threshold: u8, max_records: usize) -> Result<Vec<u64>> {
        if let Ok(mut queries) = self.similarity_queries.lock() {
            queries.push((smiles.to_string(), threshold, max_records));
        }
        Ok(self.similar.iter().copied().take(max_records).collect())
    }
}

/// Aspirin seed plus three parseable neighbors, one broken SMILES and
/// one CID without SMILES, ranked in that order.
pub fn aspirin_neighborhood() -> MockCompoundSource {
    MockCompoundSource::new()
        .with_name("Aspirin", ASPIRIN_CID)
        .with_compound(ASPIRIN_CID, ASPIRIN_SMILES, Some(ASPIRIN_IUPAC))
        .with_compound(SALICYLIC_ACID.0, SALICYLIC_ACID.1, Some("2-hydroxybenzoic acid"))
        .with_compound(METHYL_SALICYLATE.0, METHYL_SALICYLATE.1, Some("methyl 2-hydroxybenzoate"))
        .with_compound(ACETAMINOPHEN.0, ACETAMINOPHEN.1, Some("N-(4-hydroxyphenyl)acetamide"))
        .with_compound(UNPARSEABLE.0, UNPARSEABLE.1, None)
        .without_smiles(NO_SMILES_CID)
        .with_similar(&[
            SALICYLIC_ACID.0,
            UNPARSEABLE.0,
            METHYL_SALICYLATE.0,
            NO_SMILES_CID,
            ACETAMINOPHEN.0,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_seed() {
        let source = aspirin_neighborhood();
        let seed = source.resolve_name("aspirin").await.unwrap();
        assert_eq!(seed.cid, ASPIRIN_CID);
        assert_eq!(seed.smiles, ASPIRIN_SMILES);
    }

    #[tokio::test]
    async fn test_unknown_name() {
        let source = MockCompoundSource::new();
        let err = source.resolve_name("nothing").await.unwrap_err();
        assert!(matches!(err, ChemsimError::CompoundNotFound(_)));
    }

    #[tokio::test]
    async fn test_similarity_respects_limit() {
        let source = aspirin_neighborhood();
        let hits = source.similar_cids(ASPIRIN_SMILES, 90, 2).await.unwrap();
        assert_eq!(hits, vec![SALICYLIC_ACID.0, UNPARSEABLE.0]);
        assert_eq!(source.similarity_queries(), vec![(ASPIRIN_SMILES.to_string(), 90, 2)]);
    }

    #[tokio::test]
    async fn test_failures_and_missing() {
        let source = MockCompoundSource::new().failing(5, "503 Service Unavailable");
        assert!(source.properties(5).await.is_err());
        let props = source.properties(6).await.unwrap();
        assert!(props.smiles.is_none());
        assert_eq!(source.property_calls(), 2);
    }
}
