//! chemsim-common: Shared types, errors, configuration and the sandboxed
//! HTTP client used across all chemsim crates.

pub mod config;
pub mod entities;
pub mod error;
pub mod sandbox;

// Re-export commonly used types
pub use config::{AnalysisConfig, ExecutionConfig, MissingSmilesPolicy, OutputConfig, PubChemConfig, SearchConfig, SeedConfig};
pub use entities::{CandidateFailure, Compound, CompoundProperties, DescriptorRecord, FailureKind};
pub use error::{ChemsimError, Result};
