//! Live PubChem lookups.
//!
//! Run with: cargo test --package chemsim-pubchem --test test_pubchem_live -- --ignored --nocapture

use chemsim_common::ChemsimError;
use chemsim_pubchem::{CompoundSource, PubChemClient};

#[tokio::test]
#[ignore] // Requires network access
async fn test_resolve_aspirin() {
    let client = PubChemClient::new().unwrap();

    let compound = client.resolve_name("Aspirin").await.expect("Aspirin lookup failed");

    println!("CID: {}", compound.cid);
    println!("SMILES: {}", compound.smiles);
    assert_eq!(compound.cid, 2244);
    assert_eq!(compound.smiles, "CC(=O)OC1=CC=CC=C1C(=O)O");
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_similarity_is_bounded() {
    let client = PubChemClient::new().unwrap();

    let cids = client
        .similar_cids("CC(=O)OC1=CC=CC=C1C(=O)O", 90, 1000)
        .await
        .expect("similarity search failed");

    println!("Found {} similar compounds", cids.len());
    assert!(!cids.is_empty());
    assert!(cids.len() <= 1000);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_unknown_name() {
    let client = PubChemClient::new().unwrap();

    let err = client
        .resolve_name("definitely-not-a-real-compound-xyzzy")
        .await
        .unwrap_err();
    assert!(matches!(err, ChemsimError::CompoundNotFound(_)));
}
