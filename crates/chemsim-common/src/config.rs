//! Analysis configuration.
//!
//! Every parameter of a run lives here: the seed compound, the similarity
//! search bounds, the descriptor set, execution limits and output paths.
//! Configs can be written as TOML, YAML or JSON; every field has a default
//! so an empty file describes the stock Aspirin run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{ChemsimError, Result};

/// Default descriptor columns, in output order.
pub const DEFAULT_DESCRIPTORS: [&str; 8] = [
    "SlogP_VSA2",
    "SlogP_VSA8",
    "nHBDon",
    "nHBAcc",
    "nRing",
    "MW",
    "SLogP",
    "TopoPSA(NO)",
];

/// Complete analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Seed compound
    #[serde(default)]
    pub seed: SeedConfig,

    /// Similarity search bounds
    #[serde(default)]
    pub search: SearchConfig,

    /// Ordered descriptor columns to compute
    #[serde(default = "default_descriptors")]
    pub descriptors: Vec<String>,

    /// Candidate processing options
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Output options
    #[serde(default)]
    pub output: OutputConfig,

    /// PubChem endpoint options
    #[serde(default)]
    pub pubchem: PubChemConfig,
}

fn default_descriptors() -> Vec<String> {
    DEFAULT_DESCRIPTORS.iter().map(|s| s.to_string()).collect()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: SeedConfig::default(),
            search: SearchConfig::default(),
            descriptors: default_descriptors(),
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
            pubchem: PubChemConfig::default(),
        }
    }
}

// ── Seed ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Human-readable compound name resolved against PubChem (e.g., "Aspirin")
    #[serde(default = "default_seed_name")]
    pub name: String,
}

fn default_seed_name() -> String { "Aspirin".to_string() }

impl Default for SeedConfig {
    fn default() -> Self {
        Self { name: default_seed_name() }
    }
}

// ── Similarity search ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum Tanimoto similarity, in percent (0-100)
    #[serde(default = "default_threshold")]
    pub threshold: u8,

    /// Maximum number of similar compounds to process
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Drop the seed's own CID from the candidate list
    #[serde(default)]
    pub exclude_seed: bool,

    /// Drop repeated CIDs, keeping the first occurrence
    #[serde(default)]
    pub dedupe: bool,
}

fn default_threshold() -> u8 { 90 }
fn default_max_candidates() -> usize { 1000 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_candidates: default_max_candidates(),
            exclude_seed: false,
            dedupe: false,
        }
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

/// What to do when a candidate has no SMILES.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingSmilesPolicy {
    /// Record a failure for the candidate and keep going
    #[default]
    Skip,
    /// Stop at the first such candidate; earlier records are kept
    Stop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Candidates processed concurrently (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-candidate time limit in seconds
    #[serde(default = "default_item_timeout")]
    pub item_timeout_secs: u64,

    #[serde(default)]
    pub on_missing_smiles: MissingSmilesPolicy,
}

fn default_concurrency() -> usize { 1 }
fn default_item_timeout() -> u64 { 60 }

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            item_timeout_secs: default_item_timeout(),
            on_missing_smiles: MissingSmilesPolicy::default(),
        }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving plot images
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,

    /// Render plots at all
    #[serde(default = "default_true")]
    pub plots: bool,

    /// Plot image size in pixels (width, height) for box/KDE panels
    #[serde(default = "default_plot_size")]
    pub plot_size: (u32, u32),

    /// Raw descriptor records as CSV
    #[serde(default = "default_csv_path")]
    pub csv_path: Option<PathBuf>,

    /// Run summary as JSON
    #[serde(default)]
    pub summary_path: Option<PathBuf>,
}

fn default_true() -> bool { true }
fn default_plots_dir() -> PathBuf { PathBuf::from("plots") }
fn default_plot_size() -> (u32, u32) { (1500, 600) }
fn default_csv_path() -> Option<PathBuf> { Some(PathBuf::from("descriptors.csv")) }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots_dir: default_plots_dir(),
            plots: true,
            plot_size: default_plot_size(),
            csv_path: default_csv_path(),
            summary_path: None,
        }
    }
}

// ── PubChem ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubChemConfig {
    /// PUG REST root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String { "https://pubchem.ncbi.nlm.nih.gov/rest/pug".to_string() }
fn default_timeout() -> u64 { 30 }

impl Default for PubChemConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// ── Helper Methods ────────────────────────────────────────────────────────────

impl AnalysisConfig {
    /// Load from a file, choosing the format by extension (toml, yaml/yml, json).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(path),
            Some("json") => Self::from_json(path),
            Some("toml") | None => Self::from_toml(path),
            Some(other) => Err(ChemsimError::Config(format!(
                "unsupported config format '.{other}' for {}",
                path.display()
            ))),
        }
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ChemsimError::Config(e.to_string()))
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| ChemsimError::Config(e.to_string()))
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| ChemsimError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges and the descriptor list.
    pub fn validate(&self) -> Result<()> {
        if self.seed.name.trim().is_empty() {
            return Err(ChemsimError::Config("seed.name must not be empty".into()));
        }
        if self.search.threshold > 100 {
            return Err(ChemsimError::Config(format!(
                "search.threshold must be within 0-100, got {}",
                self.search.threshold
            )));
        }
        if self.search.max_candidates == 0 {
            return Err(ChemsimError::Config("search.max_candidates must be positive".into()));
        }
        if self.descriptors.is_empty() {
            return Err(ChemsimError::Config("descriptors must name at least one descriptor".into()));
        }
        let mut seen = HashSet::new();
        for name in &self.descriptors {
            if !seen.insert(name.as_str()) {
                return Err(ChemsimError::Config(format!("duplicate descriptor '{name}'")));
            }
        }
        if self.execution.concurrency == 0 {
            return Err(ChemsimError::Config("execution.concurrency must be positive".into()));
        }
        if self.execution.item_timeout_secs == 0 {
            return Err(ChemsimError::Config("execution.item_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    /// Resolve a configured output file relative to the plots directory
    /// unless it is already absolute or explicitly relative.
    pub fn output_path(&self, file: &Path) -> PathBuf {
        if file.is_absolute() || file.parent().map_or(false, |p| !p.as_os_str().is_empty()) {
            file.to_path_buf()
        } else {
            self.output.plots_dir.join(file)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
