//! End-to-end analysis run.
//!
//! Orchestrates one configured run:
//!   1. Resolve the seed name to a CID and SMILES
//!   2. Fetch similar CIDs, bounded by threshold and count
//!   3. Optionally drop the seed and repeated CIDs
//!   4. Compute descriptors per candidate
//!   5. Build and clean the descriptor table, log shape and correlation
//!   6. Write the CSV export, plots and run summary

use std::sync::Arc;

use chemsim_common::{AnalysisConfig, ChemsimError, Result};
use chemsim_molecules::Descriptor;
use chemsim_pubchem::{CompoundSource, PubChemClient};
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::engine::{filter_candidates, DescriptorEngine};
use crate::export;
use crate::plots::Visualizer;
use crate::report::RunSummary;
use crate::table::DescriptorTable;

pub struct AnalysisPipeline {
    source: Arc<dyn CompoundSource>,
}

impl AnalysisPipeline {
    pub fn new(source: Arc<dyn CompoundSource>) -> Self {
        Self { source }
    }

    /// Pipeline backed by the PubChem REST API.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let client = PubChemClient::from_config(&config.pubchem)?;
        Ok(Self::new(Arc::new(client)))
    }

    #[instrument(skip(self, config), fields(seed = %config.seed.name))]
    pub async fn run(&self, config: &AnalysisConfig) -> Result<RunSummary> {
        config.validate()?;
        let descriptors =
            Descriptor::parse_list(&config.descriptors).map_err(|e| ChemsimError::Config(e.to_string()))?;
        let engine = DescriptorEngine::from_config(self.source.clone(), config)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(run_id = %run_id, "Starting analysis run");

        // ── 1. Seed ───────────────────────────────────────────────────────────
        let seed = self.source.resolve_name(&config.seed.name).await?;

        // ── 2. Similar compounds ──────────────────────────────────────────────
        let similar = self
            .source
            .similar_cids(&seed.smiles, config.search.threshold, config.search.max_candidates)
            .await?;
        info!(n = similar.len(), threshold = config.search.threshold, "Similar compounds found");

        let candidates = filter_candidates(similar, seed.cid, &config.search);
        if candidates.is_empty() {
            warn!("No candidates to process");
        }

        // ── 3. Descriptors ────────────────────────────────────────────────────
        let output = engine.run(&candidates).await;
        for failure in &output.failures {
            warn!(cid = failure.cid, kind = failure.kind.label(), reason = %failure.kind, "Candidate failed");
        }

        // ── 4. Aggregate ──────────────────────────────────────────────────────
        let table = DescriptorTable::from_records(&output.records);
        let clean = table.clean(&engine.calculator().names())?;
        let (rows, cols) = clean.shape();
        info!(rows, cols, dropped = clean.dropped(), "Cleaned table shape");
        let correlation = clean.correlation();
        info!("Correlation matrix:\n{correlation}");

        let mut summary = RunSummary::new(run_id, started_at, seed, candidates.len(), &output, &clean);

        // ── 5. Outputs ────────────────────────────────────────────────────────
        if let Some(file) = &config.output.csv_path {
            let path = config.output_path(file);
            export::write_csv(&table, &path)?;
            summary.csv_path = Some(path);
        }

        if config.output.plots {
            summary.plots = Visualizer::from_config(&config.output).render(&clean, &descriptors)?;
        }

        summary.finished_at = Utc::now();
        if let Some(file) = &config.output.summary_path {
            summary.write_json(&config.output_path(file))?;
        }

        info!(
            run_id = %run_id,
            records = summary.records,
            failures = summary.failures.len(),
            plots = summary.plots.len(),
            "Analysis run complete"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemsim_test_utils::{aspirin_neighborhood, MockCompoundSource};

    #[tokio::test]
    async fn test_unknown_seed_terminates() {
        let pipeline = AnalysisPipeline::new(Arc::new(MockCompoundSource::new()));
        let mut config = AnalysisConfig::default();
        config.output.plots = false;
        config.output.csv_path = None;
        let err = pipeline.run(&config).await.unwrap_err();
        assert!(matches!(err, ChemsimError::CompoundNotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_fetch() {
        let source = Arc::new(aspirin_neighborhood());
        let pipeline = AnalysisPipeline::new(source.clone());
        let mut config = AnalysisConfig::default();
        config.descriptors = vec!["NotADescriptor".to_string()];
        let err = pipeline.run(&config).await.unwrap_err();
        assert!(matches!(err, ChemsimError::Config(_)));
        assert_eq!(source.property_calls(), 0);
    }
}
