//! chemsim-analysis: from candidate CIDs to tables and plots.
//!
//! Pipeline stages:
//!   1. `engine`: fetch each candidate's SMILES and compute descriptors
//!   2. `table`: aggregate records into a table, coerce and drop nulls
//!   3. `stats`: quartiles, whiskers, KDE, value counts, correlation
//!   4. `plots`: box + KDE panels and count bars as PNG
//!   5. `export`: CSV of raw records
//!   6. `report`: JSON run summary
//!   7. `pipeline`: orchestrates all of the above for one configuration

pub mod engine;
pub mod export;
pub mod pipeline;
pub mod plots;
pub mod report;
pub mod stats;
pub mod table;

pub use engine::{DescriptorEngine, EngineOutput};
pub use pipeline::AnalysisPipeline;
pub use report::RunSummary;
pub use table::{Cell, CleanTable, CorrelationMatrix, DescriptorTable, TableError};
