//! Offline end-to-end runs against the in-memory compound source.

use std::sync::Arc;

use chemsim_analysis::AnalysisPipeline;
use chemsim_common::{AnalysisConfig, FailureKind, MissingSmilesPolicy};
use chemsim_test_utils::pretty_assertions::assert_eq;
use chemsim_test_utils::{
    aspirin_neighborhood, ACETAMINOPHEN, ASPIRIN_CID, ASPIRIN_SMILES, METHYL_SALICYLATE, NO_SMILES_CID,
    SALICYLIC_ACID, UNPARSEABLE,
};
use tempfile::TempDir;

fn config(dir: &TempDir) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.output.plots = false;
    config.output.plots_dir = dir.path().join("plots");
    config.output.csv_path = Some(dir.path().join("descriptors.csv"));
    config.output.summary_path = Some(dir.path().join("summary.json"));
    config
}

#[tokio::test]
async fn test_skip_policy_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(aspirin_neighborhood());
    let pipeline = AnalysisPipeline::new(source.clone());

    let summary = pipeline.run(&config(&dir)).await.unwrap();

    assert_eq!(summary.seed.cid, ASPIRIN_CID);
    assert_eq!(summary.seed.smiles, ASPIRIN_SMILES);
    assert_eq!(summary.candidates, 5);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.cleaned_shape, (3, 8));
    assert!(!summary.stopped_early);
    assert_eq!(
        summary.failures.iter().map(|f| f.cid).collect::<Vec<_>>(),
        vec![UNPARSEABLE.0, NO_SMILES_CID]
    );
    assert_eq!(source.similarity_queries(), vec![(ASPIRIN_SMILES.to_string(), 90, 1000)]);

    let csv = std::fs::read_to_string(dir.path().join("descriptors.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "CID,SMILES,IUPAC,SlogP_VSA2,SlogP_VSA8,nHBDon,nHBAcc,nRing,MW,SLogP,TopoPSA(NO)"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with(&format!("{},", SALICYLIC_ACID.0)));
    assert!(lines[2].starts_with(&format!("{},", METHYL_SALICYLATE.0)));
    assert!(lines[3].starts_with(&format!("{},", ACETAMINOPHEN.0)));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["records"], 3);
    assert_eq!(json["correlation"]["columns"].as_array().map(Vec::len), Some(8));
}

#[tokio::test]
async fn test_stop_policy_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = AnalysisPipeline::new(Arc::new(aspirin_neighborhood()));
    let mut config = config(&dir);
    config.execution.on_missing_smiles = MissingSmilesPolicy::Stop;

    let summary = pipeline.run(&config).await.unwrap();

    assert!(summary.stopped_early);
    assert_eq!(summary.records, 2);
    assert_eq!(summary.cleaned_shape, (2, 8));
    assert_eq!(summary.failures.last().map(|f| f.kind.clone()), Some(FailureKind::MissingSmiles));
}

#[tokio::test]
async fn test_record_count_independent_of_order() {
    let dir = tempfile::tempdir().unwrap();
    let source = aspirin_neighborhood().with_similar(&[
        NO_SMILES_CID,
        ACETAMINOPHEN.0,
        UNPARSEABLE.0,
        METHYL_SALICYLATE.0,
        SALICYLIC_ACID.0,
    ]);
    let mut config = config(&dir);
    config.execution.concurrency = 4;

    let summary = AnalysisPipeline::new(Arc::new(source)).run(&config).await.unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.failures.len(), 2);
}

#[tokio::test]
async fn test_seed_exclusion_and_dedupe() {
    let dir = tempfile::tempdir().unwrap();
    let source = aspirin_neighborhood().with_similar(&[
        ASPIRIN_CID,
        SALICYLIC_ACID.0,
        SALICYLIC_ACID.0,
        ACETAMINOPHEN.0,
    ]);
    let pipeline = AnalysisPipeline::new(Arc::new(source));

    let summary = pipeline.run(&config(&dir)).await.unwrap();
    assert_eq!(summary.records, 4);

    let mut config = config(&dir);
    config.search.exclude_seed = true;
    config.search.dedupe = true;
    let summary = pipeline.run(&config).await.unwrap();
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.records, 2);
}

#[tokio::test]
async fn test_no_similar_compounds() {
    let dir = tempfile::tempdir().unwrap();
    let source = aspirin_neighborhood().with_similar(&[]);
    let summary = AnalysisPipeline::new(Arc::new(source)).run(&config(&dir)).await.unwrap();

    assert_eq!(summary.records, 0);
    assert_eq!(summary.cleaned_shape, (0, 8));
    assert!(summary.plots.is_empty());
}

#[tokio::test]
async fn test_max_candidates_bounds_search() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(aspirin_neighborhood());
    let mut config = config(&dir);
    config.search.max_candidates = 2;
    config.search.threshold = 95;

    let summary = AnalysisPipeline::new(source.clone()).run(&config).await.unwrap();
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.records, 1);
    assert_eq!(source.similarity_queries(), vec![(ASPIRIN_SMILES.to_string(), 95, 2)]);
}

#[tokio::test]
#[ignore] // Requires system fonts
async fn test_plots_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir);
    config.output.plots = true;

    let summary = AnalysisPipeline::new(Arc::new(aspirin_neighborhood())).run(&config).await.unwrap();
    assert_eq!(summary.plots.len(), 8);
    assert!(dir.path().join("plots").join("MW_box_kde.png").exists());
    assert!(dir.path().join("plots").join("nRing_bar.png").exists());
}
