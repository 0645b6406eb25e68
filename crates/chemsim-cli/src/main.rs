//! `chemsim`: similarity search and descriptor EDA for a seed compound.

mod cli;

use chemsim_analysis::AnalysisPipeline;
use chemsim_common::AnalysisConfig;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chemsim=info,warn")),
        )
        .init();

    let cli = Cli::parse();
    info!("chemsim {}", env!("CARGO_PKG_VERSION"));

    let mut config = match cli.config_path(&std::env::current_dir()?) {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            AnalysisConfig::load(&path)?
        }
        None => AnalysisConfig::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let pipeline = AnalysisPipeline::from_config(&config)?;
    let summary = pipeline.run(&config).await?;

    info!(
        records = summary.records,
        failures = summary.failures.len(),
        rows = summary.cleaned_shape.0,
        cols = summary.cleaned_shape.1,
        "Done"
    );
    Ok(())
}
