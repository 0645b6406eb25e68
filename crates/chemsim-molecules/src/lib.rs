//! chemsim-molecules: molecular graphs and descriptors.
//!
//! 1. Parsing SMILES into a hydrogen-suppressed molecular graph
//! 2. Ring (symmetrized SSSR) and aromaticity perception
//! 3. Atom-typed contributions: Wildman-Crippen logP, Ertl TPSA, Labute ASA
//! 4. The descriptor catalogue and calculator used by the analysis engine

pub mod aromaticity;
pub mod crippen;
pub mod descriptors;
pub mod element;
pub mod error;
pub mod hbond;
pub mod molecule;
pub mod ring;
pub mod smiles;
pub mod surface;
pub mod tpsa;

pub use descriptors::{Descriptor, DescriptorCalculator, DescriptorKind, UnknownDescriptor, DEFAULT_DESCRIPTORS};
pub use error::SmilesError;
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use smiles::parse_smiles;

pub type Result<T> = std::result::Result<T, SmilesError>;
