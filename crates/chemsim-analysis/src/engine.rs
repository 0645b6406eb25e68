//! Descriptor engine.
//!
//! For each candidate CID, in rank order:
//!   1. Fetch SMILES and IUPAC name from the compound source
//!   2. Parse the SMILES into a molecular graph
//!   3. Compute the configured descriptors
//!   4. Attach CID, SMILES and IUPAC name to the record
//!
//! Every candidate runs in its own failure boundary. Up to `concurrency`
//! candidates are in flight at once and outcomes are delivered in input
//! order, each bounded by the per-item timeout.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chemsim_common::{
    AnalysisConfig, CandidateFailure, ChemsimError, DescriptorRecord, FailureKind, MissingSmilesPolicy,
    Result, SearchConfig,
};
use chemsim_molecules::{parse_smiles, DescriptorCalculator};
use chemsim_pubchem::CompoundSource;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Records and failures of one engine run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineOutput {
    pub records: Vec<DescriptorRecord>,
    pub failures: Vec<CandidateFailure>,
    /// Set when the `stop` policy hit a candidate without SMILES.
    pub stopped_early: bool,
}

impl EngineOutput {
    /// Failure counts keyed by kind label, sorted by label.
    pub fn failure_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for failure in &self.failures {
            let label = failure.kind.label();
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }
        counts.sort();
        counts
    }
}

/// Apply the optional seed exclusion and de-duplication to the ranked
/// candidate list. Order is preserved and the first occurrence wins.
pub fn filter_candidates(cids: Vec<u64>, seed_cid: u64, search: &SearchConfig) -> Vec<u64> {
    let mut seen = HashSet::new();
    cids.into_iter()
        .filter(|cid| !(search.exclude_seed && *cid == seed_cid))
        .filter(|cid| !search.dedupe || seen.insert(*cid))
        .collect()
}

// ── Engine ────────────────────────────────────────────────────────────────────

pub struct DescriptorEngine {
    source: Arc<dyn CompoundSource>,
    calculator: DescriptorCalculator,
    concurrency: usize,
    item_timeout: Duration,
    on_missing_smiles: MissingSmilesPolicy,
}

impl DescriptorEngine {
    pub fn new(source: Arc<dyn CompoundSource>, calculator: DescriptorCalculator) -> Self {
        Self {
            source,
            calculator,
            concurrency: 1,
            item_timeout: Duration::from_secs(60),
            on_missing_smiles: MissingSmilesPolicy::Skip,
        }
    }

    /// Engine configured from the `descriptors` and `execution` sections.
    pub fn from_config(source: Arc<dyn CompoundSource>, config: &AnalysisConfig) -> Result<Self> {
        let calculator = DescriptorCalculator::from_names(&config.descriptors)
            .map_err(|e| ChemsimError::Config(e.to_string()))?;
        Ok(Self::new(source, calculator)
            .with_concurrency(config.execution.concurrency)
            .with_item_timeout(Duration::from_secs(config.execution.item_timeout_secs))
            .with_missing_smiles_policy(config.execution.on_missing_smiles))
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = timeout;
        self
    }

    pub fn with_missing_smiles_policy(mut self, policy: MissingSmilesPolicy) -> Self {
        self.on_missing_smiles = policy;
        self
    }

    pub fn calculator(&self) -> &DescriptorCalculator {
        &self.calculator
    }

    /// Process `cids` in order and collect the outcomes.
    #[instrument(skip(self, cids), fields(candidates = cids.len(), concurrency = self.concurrency))]
    pub async fn run(&self, cids: &[u64]) -> EngineOutput {
        let mut output = EngineOutput::default();
        let mut outcomes = stream::iter(cids.iter().copied())
            .map(|cid| async move {
                let outcome = match tokio::time::timeout(self.item_timeout, self.process(cid)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(FailureKind::Timeout),
                };
                (cid, outcome)
            })
            .buffered(self.concurrency);

        while let Some((cid, outcome)) = outcomes.next().await {
            match outcome {
                Ok(record) => {
                    debug!(cid, "Descriptors computed");
                    output.records.push(record);
                }
                Err(kind) => {
                    debug!(cid, reason = %kind, "Skipping candidate");
                    let stop = kind == FailureKind::MissingSmiles
                        && self.on_missing_smiles == MissingSmilesPolicy::Stop;
                    output.failures.push(CandidateFailure { cid, kind });
                    if stop {
                        warn!(cid, "Stopping at first candidate without SMILES");
                        output.stopped_early = true;
                        break;
                    }
                }
            }
        }

        info!(
            records = output.records.len(),
            failures = output.failures.len(),
            stopped_early = output.stopped_early,
            "Descriptor computation finished"
        );
        output
    }

    /// Compute one candidate's record, or the reason it has none.
    pub async fn process(&self, cid: u64) -> std::result::Result<DescriptorRecord, FailureKind> {
        let props = self
            .source
            .properties(cid)
            .await
            .map_err(|e| FailureKind::Fetch(e.to_string()))?;
        let smiles = props.smiles.ok_or(FailureKind::MissingSmiles)?;

        let mol = parse_smiles(&smiles).map_err(|e| FailureKind::InvalidSmiles(e.to_string()))?;
        let values = self.calculator.calculate(&mol);

        Ok(DescriptorRecord {
            cid,
            smiles,
            iupac_name: props.iupac_name,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemsim_test_utils::{
        aspirin_neighborhood, MockCompoundSource, ACETAMINOPHEN, ASPIRIN_CID, ASPIRIN_SMILES,
        METHYL_SALICYLATE, NO_SMILES_CID, SALICYLIC_ACID, UNPARSEABLE,
    };
    use pretty_assertions::assert_eq;

    fn engine(source: MockCompoundSource) -> DescriptorEngine {
        DescriptorEngine::new(Arc::new(source), DescriptorCalculator::default())
    }

    fn cids(output: &EngineOutput) -> Vec<u64> {
        output.records.iter().map(|r| r.cid).collect()
    }

    #[test]
    fn test_filter_candidates() {
        let mut search = SearchConfig::default();
        let ranked = vec![2244, 338, 2244, 4133, 338];
        assert_eq!(filter_candidates(ranked.clone(), 2244, &search), ranked);

        search.exclude_seed = true;
        assert_eq!(filter_candidates(ranked.clone(), 2244, &search), vec![338, 4133, 338]);

        search.dedupe = true;
        assert_eq!(filter_candidates(ranked.clone(), 2244, &search), vec![338, 4133]);

        search.exclude_seed = false;
        assert_eq!(filter_candidates(ranked, 2244, &search), vec![2244, 338, 4133]);
    }

    #[tokio::test]
    async fn test_process_aspirin() {
        let source = MockCompoundSource::new().with_compound(ASPIRIN_CID, ASPIRIN_SMILES, Some("aspirin"));
        let record = engine(source).process(ASPIRIN_CID).await.unwrap();
        assert_eq!(record.smiles, ASPIRIN_SMILES);
        assert_eq!(record.iupac_name.as_deref(), Some("aspirin"));
        assert_eq!(record.get("nHBDon"), Some(1.0));
        assert_eq!(record.get("nHBAcc"), Some(3.0));
        assert_eq!(record.get("nRing"), Some(1.0));
        assert_eq!(record.values.len(), 8);
    }

    #[tokio::test]
    async fn test_failure_kinds() {
        let source = aspirin_neighborhood().failing(77, "503 Service Unavailable");
        let engine = engine(source);
        assert_eq!(engine.process(NO_SMILES_CID).await.unwrap_err(), FailureKind::MissingSmiles);
        assert!(matches!(engine.process(UNPARSEABLE.0).await, Err(FailureKind::InvalidSmiles(_))));
        match engine.process(77).await {
            Err(FailureKind::Fetch(reason)) => assert!(reason.contains("503")),
            other => panic!("expected fetch failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_skip_policy_isolates_failures() {
        let source = aspirin_neighborhood();
        let candidates = [SALICYLIC_ACID.0, UNPARSEABLE.0, METHYL_SALICYLATE.0, NO_SMILES_CID, ACETAMINOPHEN.0];
        let output = engine(source).run(&candidates).await;

        assert_eq!(cids(&output), vec![SALICYLIC_ACID.0, METHYL_SALICYLATE.0, ACETAMINOPHEN.0]);
        assert_eq!(output.failures.len(), 2);
        assert!(!output.stopped_early);
        assert_eq!(
            output.failure_counts(),
            vec![("invalid_smiles".to_string(), 1), ("missing_smiles".to_string(), 1)]
        );
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_skipped_candidates_are_not_warned_here() {
        // the pipeline reports each failure once
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let output = engine(aspirin_neighborhood()).run(&[UNPARSEABLE.0, NO_SMILES_CID]).await;
        assert_eq!(output.failures.len(), 2);
        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(!text.contains("WARN"), "{text}");
    }

    #[tokio::test]
    async fn test_stop_policy_truncates() {
        let source = aspirin_neighborhood();
        let candidates = [SALICYLIC_ACID.0, UNPARSEABLE.0, METHYL_SALICYLATE.0, NO_SMILES_CID, ACETAMINOPHEN.0];
        let output = engine(source)
            .with_missing_smiles_policy(MissingSmilesPolicy::Stop)
            .run(&candidates)
            .await;

        assert_eq!(cids(&output), vec![SALICYLIC_ACID.0, METHYL_SALICYLATE.0]);
        assert!(output.stopped_early);
        assert_eq!(output.failures.last().map(|f| f.cid), Some(NO_SMILES_CID));
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let output = engine(MockCompoundSource::new()).run(&[]).await;
        assert!(output.records.is_empty());
        assert!(output.failures.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_failure() {
        let source = aspirin_neighborhood().delayed(SALICYLIC_ACID.0, Duration::from_secs(30));
        let output = engine(source)
            .with_item_timeout(Duration::from_secs(5))
            .run(&[SALICYLIC_ACID.0, ACETAMINOPHEN.0])
            .await;

        assert_eq!(cids(&output), vec![ACETAMINOPHEN.0]);
        assert_eq!(output.failures, vec![CandidateFailure { cid: SALICYLIC_ACID.0, kind: FailureKind::Timeout }]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_run_keeps_order() {
        let source = Arc::new(
            aspirin_neighborhood()
                .delayed(SALICYLIC_ACID.0, Duration::from_millis(300))
                .delayed(METHYL_SALICYLATE.0, Duration::from_millis(100))
                .delayed(ACETAMINOPHEN.0, Duration::from_millis(10)),
        );
        let engine = DescriptorEngine::new(source.clone(), DescriptorCalculator::default()).with_concurrency(3);
        let output = engine
            .run(&[SALICYLIC_ACID.0, METHYL_SALICYLATE.0, ACETAMINOPHEN.0])
            .await;

        assert_eq!(cids(&output), vec![SALICYLIC_ACID.0, METHYL_SALICYLATE.0, ACETAMINOPHEN.0]);
        assert_eq!(source.max_in_flight(), 3);
    }

    #[test]
    fn test_from_config_rejects_unknown_descriptor() {
        let mut config = AnalysisConfig::default();
        config.descriptors = vec!["MW".to_string(), "Bogus".to_string()];
        let result = DescriptorEngine::from_config(Arc::new(MockCompoundSource::new()), &config);
        assert!(matches!(result, Err(ChemsimError::Config(_))));
    }
}
