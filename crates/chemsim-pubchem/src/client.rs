//! PubChem PUG REST client.
//!
//! PubChem hosts ~120M compounds with structures and computed properties.
//! This client uses three operations:
//!   - name → CID lookup
//!   - CID → SMILES / IUPAC name property lookup
//!   - 2-D fingerprint similarity search by SMILES
//!
//! API docs: https://pubchem.ncbi.nlm.nih.gov/docs/pug-rest
//! Endpoint: https://pubchem.ncbi.nlm.nih.gov/rest/pug
//!
//! Names and SMILES are sent as form fields in POST bodies so they never
//! need escaping into the URL path.

use std::time::Duration;

use async_trait::async_trait;
use chemsim_common::sandbox::SandboxClient as Client;
use chemsim_common::{ChemsimError, CompoundProperties, PubChemConfig, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::CompoundSource;

/// Property names requested for every CID. PubChem answers the legacy
/// names with `SMILES` / `ConnectivitySMILES` keys, so all four are read.
const PROPERTY_LIST: &str = "CanonicalSMILES,IsomericSMILES,IUPACName";

#[derive(Debug, Deserialize)]
struct IdentifierListResponse {
    #[serde(rename = "IdentifierList")]
    identifier_list: IdentifierList,
}

#[derive(Debug, Deserialize)]
struct IdentifierList {
    #[serde(rename = "CID", default)]
    cids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct PropertyTableResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties", default)]
    properties: Vec<PropertyRow>,
}

#[derive(Debug, Deserialize)]
struct PropertyRow {
    #[serde(rename = "CID")]
    cid: u64,
    #[serde(rename = "SMILES")]
    smiles: Option<String>,
    #[serde(rename = "IsomericSMILES")]
    isomeric_smiles: Option<String>,
    #[serde(rename = "CanonicalSMILES")]
    canonical_smiles: Option<String>,
    #[serde(rename = "ConnectivitySMILES")]
    connectivity_smiles: Option<String>,
    #[serde(rename = "IUPACName")]
    iupac_name: Option<String>,
}

impl From<PropertyRow> for CompoundProperties {
    fn from(row: PropertyRow) -> Self {
        let smiles = row
            .smiles
            .or(row.isomeric_smiles)
            .or(row.canonical_smiles)
            .or(row.connectivity_smiles)
            .filter(|s| !s.trim().is_empty());
        CompoundProperties {
            cid: row.cid,
            smiles,
            iupac_name: row.iupac_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FaultResponse {
    #[serde(rename = "Fault")]
    fault: Fault,
}

#[derive(Debug, Deserialize)]
struct Fault {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Extract the CID list from an `IdentifierList` body.
pub fn parse_cid_list(body: &str) -> Result<Vec<u64>> {
    if let Ok(resp) = serde_json::from_str::<IdentifierListResponse>(body) {
        return Ok(resp.identifier_list.cids);
    }
    Err(bad_response(body))
}

/// Extract the property rows from a `PropertyTable` body.
pub fn parse_properties(body: &str) -> Result<Vec<CompoundProperties>> {
    let resp: PropertyTableResponse = serde_json::from_str(body).map_err(|_| bad_response(body))?;
    Ok(resp.property_table.properties.into_iter().map(Into::into).collect())
}

fn bad_response(body: &str) -> ChemsimError {
    let message = match serde_json::from_str::<FaultResponse>(body) {
        Ok(f) => format!("{}: {}", f.fault.code, f.fault.message),
        Err(_) => body.chars().take(200).collect(),
    };
    ChemsimError::BadResponse { service: "PubChem".to_string(), message }
}

/// PubChem client for compound lookups and similarity search.
pub struct PubChemClient {
    client: Client,
    base_url: String,
}

impl PubChemClient {
    pub fn new() -> Result<Self> {
        Self::from_config(&PubChemConfig::default())
    }

    pub fn from_config(config: &PubChemConfig) -> Result<Self> {
        let mut client = Client::with_timeout(Duration::from_secs(config.timeout_secs))?;
        if let Some(host) = reqwest::Url::parse(&config.base_url).ok().and_then(|u| u.host_str().map(String::from)) {
            client.allow_domain(&host);
        }
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl CompoundSource for PubChemClient {
    #[instrument(skip(self))]
    async fn cids_for_name(&self, name: &str) -> Result<Vec<u64>> {
        let url = self.url("compound/name/cids/JSON");
        debug!(name, "Resolving compound name");

        let resp = self.client
            .post(&url)?
            .form(&[("name", name)])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ChemsimError::CompoundNotFound(name.to_string()));
        }
        let body = resp.error_for_status()?.text().await?;
        let cids = parse_cid_list(&body)?;
        if cids.is_empty() {
            return Err(ChemsimError::CompoundNotFound(name.to_string()));
        }
        Ok(cids)
    }

    #[instrument(skip(self))]
    async fn properties(&self, cid: u64) -> Result<CompoundProperties> {
        let url = self.url(&format!("compound/cid/{}/property/{}/JSON", cid, PROPERTY_LIST));
        debug!(cid, "Fetching compound properties");

        let resp = self.client.get(&url)?.send().await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(CompoundProperties { cid, ..Default::default() });
        }
        let body = resp.error_for_status()?.text().await?;
        let props = parse_properties(&body)?
            .into_iter()
            .find(|p| p.cid == cid)
            .unwrap_or(CompoundProperties { cid, ..Default::default() });
        Ok(props)
    }

    #[instrument(skip(self))]
    async fn similar_cids(&self, smiles: &str, threshold: u8, max_records: usize) -> Result<Vec<u64>> {
        let url = self.url(&format!(
            "compound/fastsimilarity_2d/smiles/cids/JSON?Threshold={}&MaxRecords={}",
            threshold, max_records
        ));
        debug!(smiles, threshold, max_records, "Searching similar compounds");

        let resp = self.client
            .post(&url)?
            .form(&[("smiles", smiles)])
            .send()
            .await?;

        // PubChem answers an empty hit list with 404 PUGREST.NotFound
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let body = resp.error_for_status()?.text().await?;
        let mut cids = parse_cid_list(&body)?;
        cids.truncate(max_records);
        Ok(cids)
    }
}
