//! Command-line flags and how they override the loaded configuration.

use std::path::{Path, PathBuf};

use chemsim_common::AnalysisConfig;
use clap::Parser;

pub const CONFIG_ENV: &str = "CHEMSIM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chemsim.toml";

#[derive(Debug, Parser)]
#[command(
    name = "chemsim",
    version,
    about = "Find compounds similar to a seed in PubChem, compute descriptors and plot their distributions"
)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Seed compound name
    #[arg(short, long, value_name = "NAME")]
    pub seed: Option<String>,

    /// Minimum similarity in percent
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Maximum number of similar compounds
    #[arg(short = 'n', long, value_name = "N")]
    pub max_candidates: Option<usize>,

    /// Candidates processed at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Output directory for plots and default exports
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Skip plot rendering
    #[arg(long)]
    pub no_plots: bool,
}

impl Cli {
    /// Config file to read: the flag or env var, else `chemsim.toml` when it
    /// exists in `cwd`.
    pub fn config_path(&self, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        let fallback = cwd.join(DEFAULT_CONFIG_FILE);
        fallback.is_file().then_some(fallback)
    }

    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(seed) = &self.seed {
            config.seed.name = seed.clone();
        }
        if let Some(threshold) = self.threshold {
            config.search.threshold = threshold;
        }
        if let Some(max) = self.max_candidates {
            config.search.max_candidates = max;
        }
        if let Some(concurrency) = self.concurrency {
            config.execution.concurrency = concurrency;
        }
        if let Some(dir) = &self.out_dir {
            config.output.plots_dir = dir.clone();
        }
        if self.no_plots {
            config.output.plots = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "chemsim", "--seed", "Ibuprofen", "-t", "95", "-n", "50", "-j", "4", "--out-dir", "out", "--no-plots",
        ])
        .unwrap();
        let mut config = AnalysisConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.seed.name, "Ibuprofen");
        assert_eq!(config.search.threshold, 95);
        assert_eq!(config.search.max_candidates, 50);
        assert_eq!(config.execution.concurrency, 4);
        assert_eq!(config.output.plots_dir, PathBuf::from("out"));
        assert!(!config.output.plots);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["chemsim"]).unwrap();
        let mut config = AnalysisConfig::default();
        config.seed.name = "Caffeine".to_string();
        cli.apply(&mut config);
        assert_eq!(config.seed.name, "Caffeine");
        assert!(config.output.plots);
    }

    #[test]
    fn test_threshold_range() {
        assert!(Cli::try_parse_from(["chemsim", "--threshold", "101"]).is_err());
    }

    #[test]
    fn test_config_path_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli { config: None, ..Cli::try_parse_from(["chemsim"]).unwrap() };
        assert_eq!(cli.config_path(dir.path()), None);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        assert_eq!(cli.config_path(dir.path()), Some(dir.path().join(DEFAULT_CONFIG_FILE)));

        let cli = Cli { config: Some(PathBuf::from("run.yaml")), ..cli };
        assert_eq!(cli.config_path(dir.path()), Some(PathBuf::from("run.yaml")));
    }
}
