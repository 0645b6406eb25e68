//! Run summary written at the end of a pipeline run.

use std::path::{Path, PathBuf};

use chemsim_common::{CandidateFailure, Compound, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::engine::EngineOutput;
use crate::table::{CleanTable, CorrelationMatrix};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub seed: Compound,
    /// Candidates handed to the engine after filtering
    pub candidates: usize,
    pub records: usize,
    pub failures: Vec<CandidateFailure>,
    /// Failure counts keyed by kind label
    pub failure_counts: Vec<(String, usize)>,
    pub stopped_early: bool,
    /// Cleaned table shape as (rows, columns)
    pub cleaned_shape: (usize, usize),
    pub dropped_rows: usize,
    pub correlation: CorrelationMatrix,
    pub plots: Vec<PathBuf>,
    pub csv_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn new(
        run_id: Uuid,
        started_at: DateTime<Utc>,
        seed: Compound,
        candidates: usize,
        output: &EngineOutput,
        clean: &CleanTable,
    ) -> Self {
        Self {
            run_id,
            started_at,
            finished_at: Utc::now(),
            seed,
            candidates,
            records: output.records.len(),
            failures: output.failures.clone(),
            failure_counts: output.failure_counts(),
            stopped_early: output.stopped_early,
            cleaned_shape: clean.shape(),
            dropped_rows: clean.dropped(),
            correlation: clean.correlation(),
            plots: Vec::new(),
            csv_path: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), run_id = %self.run_id, "Run summary written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DescriptorTable;
    use chemsim_common::{DescriptorRecord, FailureKind};

    #[test]
    fn test_summary_json() {
        let output = EngineOutput {
            records: vec![DescriptorRecord {
                cid: 338,
                smiles: "C1=CC=C(C(=C1)C(=O)O)O".to_string(),
                iupac_name: None,
                values: vec![("MW".to_string(), Some(138.03))],
            }],
            failures: vec![CandidateFailure { cid: 9002, kind: FailureKind::MissingSmiles }],
            stopped_early: false,
        };
        let clean = DescriptorTable::from_records(&output.records).clean(&["MW"]).unwrap();
        let seed = Compound {
            cid: 2244,
            name: Some("Aspirin".to_string()),
            smiles: "CC(=O)OC1=CC=CC=C1C(=O)O".to_string(),
            iupac_name: None,
        };
        let summary = RunSummary::new(Uuid::new_v4(), Utc::now(), seed, 2, &output, &clean);
        assert_eq!(summary.records, 1);
        assert_eq!(summary.cleaned_shape, (1, 1));
        assert!(summary.finished_at >= summary.started_at);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        summary.write_json(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["seed"]["cid"], 2244);
        assert_eq!(json["failure_counts"][0][0], "missing_smiles");
        assert_eq!(json["correlation"]["values"][0][0], serde_json::Value::Null);
    }
}
