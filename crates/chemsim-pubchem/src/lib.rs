//! chemsim-pubchem: access to the PubChem compound database.
//!
//! The pipeline talks to PubChem only through [`CompoundSource`], so tests
//! can swap in an in-memory source.

pub mod client;

use async_trait::async_trait;
use chemsim_common::{ChemsimError, Compound, CompoundProperties, Result};
use tracing::info;

pub use client::PubChemClient;

/// Common interface for compound databases.
#[async_trait]
pub trait CompoundSource: Send + Sync {
    /// CIDs whose synonyms match `name`, best match first.
    async fn cids_for_name(&self, name: &str) -> Result<Vec<u64>>;

    /// SMILES and IUPAC name for one CID.
    async fn properties(&self, cid: u64) -> Result<CompoundProperties>;

    /// CIDs structurally similar to `smiles` at or above `threshold` percent,
    /// at most `max_records` of them, in the order the database ranks them.
    async fn similar_cids(&self, smiles: &str, threshold: u8, max_records: usize) -> Result<Vec<u64>>;

    /// Resolve a compound name to its first matching compound.
    async fn resolve_name(&self, name: &str) -> Result<Compound> {
        let cids = self.cids_for_name(name).await?;
        let cid = *cids
            .first()
            .ok_or_else(|| ChemsimError::CompoundNotFound(name.to_string()))?;
        info!(cid, name, "CID found");

        let props = self.properties(cid).await?;
        let compound = props
            .into_compound(Some(name.to_string()))
            .ok_or(ChemsimError::MissingSmiles(cid))?;
        info!(cid, smiles = %compound.smiles, "SMILES found");
        Ok(compound)
    }
}
