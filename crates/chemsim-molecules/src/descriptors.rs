//! Descriptor catalogue and calculator.
//!
//! Descriptor names follow the Mordred conventions (`SlogP_VSA2`,
//! `nHBDon`, `TopoPSA(NO)`, ...) so tables and plots are labelled the way
//! cheminformatics users expect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::molecule::Molecule;
use crate::{crippen, element, hbond, surface, tpsa};

/// Whether a descriptor takes integer counts or continuous values.
/// Drives the choice of plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    Discrete,
    Continuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Descriptor {
    /// Labute surface area in Crippen logP bin k (1..=12).
    SlogPVsa(u8),
    HBondDonors,
    HBondAcceptors,
    RingCount,
    /// Monoisotopic exact mass.
    ExactMass,
    /// Wildman-Crippen logP.
    SLogP,
    /// TPSA over N and O only.
    TopoPsaNO,
    /// TPSA including S and P.
    TopoPsa,
    /// Labute approximate surface area.
    LabuteAsa,
    HeavyAtomCount,
}

/// Descriptor set used when none is configured.
pub const DEFAULT_DESCRIPTORS: [Descriptor; 8] = [
    Descriptor::SlogPVsa(2),
    Descriptor::SlogPVsa(8),
    Descriptor::HBondDonors,
    Descriptor::HBondAcceptors,
    Descriptor::RingCount,
    Descriptor::ExactMass,
    Descriptor::SLogP,
    Descriptor::TopoPsaNO,
];

impl Descriptor {
    pub fn name(&self) -> String {
        match self {
            Descriptor::SlogPVsa(k) => format!("SlogP_VSA{k}"),
            Descriptor::HBondDonors => "nHBDon".to_string(),
            Descriptor::HBondAcceptors => "nHBAcc".to_string(),
            Descriptor::RingCount => "nRing".to_string(),
            Descriptor::ExactMass => "MW".to_string(),
            Descriptor::SLogP => "SLogP".to_string(),
            Descriptor::TopoPsaNO => "TopoPSA(NO)".to_string(),
            Descriptor::TopoPsa => "TopoPSA".to_string(),
            Descriptor::LabuteAsa => "LabuteASA".to_string(),
            Descriptor::HeavyAtomCount => "nHeavyAtom".to_string(),
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::HBondDonors
            | Descriptor::HBondAcceptors
            | Descriptor::RingCount
            | Descriptor::HeavyAtomCount => DescriptorKind::Discrete,
            _ => DescriptorKind::Continuous,
        }
    }

    /// Every descriptor the calculator knows, in catalogue order.
    pub fn all() -> Vec<Descriptor> {
        let mut all: Vec<Descriptor> = (1..=surface::SLOGP_VSA_COUNT as u8).map(Descriptor::SlogPVsa).collect();
        all.extend([
            Descriptor::HBondDonors,
            Descriptor::HBondAcceptors,
            Descriptor::RingCount,
            Descriptor::ExactMass,
            Descriptor::SLogP,
            Descriptor::TopoPsaNO,
            Descriptor::TopoPsa,
            Descriptor::LabuteAsa,
            Descriptor::HeavyAtomCount,
        ]);
        all
    }

    /// Parse a list of names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Descriptor>, UnknownDescriptor> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown descriptor '{0}'")]
pub struct UnknownDescriptor(pub String);

impl FromStr for Descriptor {
    type Err = UnknownDescriptor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(k) = s.strip_prefix("SlogP_VSA") {
            return match k.parse::<u8>() {
                Ok(k) if (1..=surface::SLOGP_VSA_COUNT as u8).contains(&k) => Ok(Descriptor::SlogPVsa(k)),
                _ => Err(UnknownDescriptor(s.to_string())),
            };
        }
        match s {
            "nHBDon" => Ok(Descriptor::HBondDonors),
            "nHBAcc" => Ok(Descriptor::HBondAcceptors),
            "nRing" => Ok(Descriptor::RingCount),
            "MW" => Ok(Descriptor::ExactMass),
            "SLogP" => Ok(Descriptor::SLogP),
            "TopoPSA(NO)" => Ok(Descriptor::TopoPsaNO),
            "TopoPSA" => Ok(Descriptor::TopoPsa),
            "LabuteASA" => Ok(Descriptor::LabuteAsa),
            "nHeavyAtom" => Ok(Descriptor::HeavyAtomCount),
            _ => Err(UnknownDescriptor(s.to_string())),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl TryFrom<String> for Descriptor {
    type Error = UnknownDescriptor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Descriptor> for String {
    fn from(d: Descriptor) -> Self {
        d.name()
    }
}

/// Monoisotopic mass: most abundant isotope of every atom and implicit
/// hydrogen. Atoms with an explicit isotope use that isotope's mass.
pub fn exact_mass(mol: &Molecule) -> f64 {
    let h = element::isotope_mass(element::HYDROGEN, 1);
    mol.atoms()
        .iter()
        .map(|atom| {
            let own = match atom.isotope {
                Some(mass_number) => element::isotope_mass(atom.atomic_number, mass_number),
                None => element::element_by_number(atom.atomic_number)
                    .map(|e| e.monoisotopic_mass)
                    .unwrap_or(0.0),
            };
            own + atom.hydrogens as f64 * h
        })
        .sum()
}

/// Computes a fixed, ordered set of descriptors for molecules.
#[derive(Debug, Clone)]
pub struct DescriptorCalculator {
    descriptors: Vec<Descriptor>,
}

impl Default for DescriptorCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTORS.to_vec())
    }
}

impl DescriptorCalculator {
    pub fn new(descriptors: Vec<Descriptor>) -> Self {
        Self { descriptors }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownDescriptor> {
        Ok(Self::new(Descriptor::parse_list(names)?))
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn names(&self) -> Vec<String> {
        self.descriptors.iter().map(Descriptor::name).collect()
    }

    /// Compute every configured descriptor, in order. Non-finite results
    /// come back as `None`.
    pub fn calculate(&self, mol: &Molecule) -> Vec<(String, Option<f64>)> {
        let needs_vsa = self.descriptors.iter().any(|d| matches!(d, Descriptor::SlogPVsa(_)));
        let vsa = needs_vsa.then(|| surface::slogp_vsa(mol));

        self.descriptors
            .iter()
            .map(|d| {
                let value = match d {
                    Descriptor::SlogPVsa(k) => vsa.map(|bins| bins[(*k as usize).saturating_sub(1)]),
                    Descriptor::HBondDonors => Some(hbond::donor_count(mol) as f64),
                    Descriptor::HBondAcceptors => Some(hbond::acceptor_count(mol) as f64),
                    Descriptor::RingCount => Some(mol.ring_count() as f64),
                    Descriptor::ExactMass => Some(exact_mass(mol)),
                    Descriptor::SLogP => Some(crippen::logp(mol)),
                    Descriptor::TopoPsaNO => Some(tpsa::tpsa(mol, false)),
                    Descriptor::TopoPsa => Some(tpsa::tpsa(mol, true)),
                    Descriptor::LabuteAsa => Some(surface::labute_asa(mol)),
                    Descriptor::HeavyAtomCount => Some(mol.heavy_atom_count() as f64),
                };
                (d.name(), value.filter(|v| v.is_finite()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;
    use pretty_assertions::assert_eq;

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";

    fn value(values: &[(String, Option<f64>)], name: &str) -> f64 {
        values
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| *v)
            .unwrap()
    }

    #[test]
    fn default_names_and_order() {
        let calc = DescriptorCalculator::default();
        assert_eq!(
            calc.names(),
            vec!["SlogP_VSA2", "SlogP_VSA8", "nHBDon", "nHBAcc", "nRing", "MW", "SLogP", "TopoPSA(NO)"]
        );
    }

    fn assert_close(values: &[(String, Option<f64>)], name: &str, expected: f64, tol: f64) {
        let got = value(values, name);
        assert!((got - expected).abs() < tol, "{name}: {got} vs {expected}");
    }

    #[test]
    fn aspirin_values() {
        let mol = parse_smiles(ASPIRIN).unwrap();
        let values = DescriptorCalculator::default().calculate(&mol);
        assert_eq!(value(&values, "nHBDon"), 1.0);
        assert_eq!(value(&values, "nHBAcc"), 3.0);
        assert_eq!(value(&values, "nRing"), 1.0);
        assert_close(&values, "MW", 180.0423, 1e-3);
        assert_close(&values, "SLogP", 1.3101, 1e-3);
        assert_close(&values, "TopoPSA(NO)", 63.6, 0.01);
        assert_close(&values, "SlogP_VSA2", 11.9386, 1e-3);
        assert_close(&values, "SlogP_VSA8", 24.2655, 1e-3);

        let all = DescriptorCalculator::new(Descriptor::all()).calculate(&mol);
        assert_close(&all, "LabuteASA", 74.757, 1e-3);
        assert_close(&all, "TopoPSA", 63.6, 0.01);
        assert_eq!(value(&all, "nHeavyAtom"), 13.0);
    }

    #[test]
    fn deuterated_aspirin_matches_aspirin() {
        let calc = DescriptorCalculator::default();
        let d3 = calc.calculate(&parse_smiles("[2H]C([2H])([2H])C(=O)OC1=CC=CC=C1C(=O)O").unwrap());
        assert_close(&d3, "MW", 183.0611, 1e-3);
        assert_close(&d3, "SLogP", 1.3101, 1e-3);
        assert_close(&d3, "SlogP_VSA2", 11.9386, 1e-3);
        assert_close(&d3, "SlogP_VSA8", 24.2655, 1e-3);
        assert_eq!(value(&d3, "nHBDon"), 1.0);
        assert_eq!(value(&d3, "nHBAcc"), 3.0);

        let od = calc.calculate(&parse_smiles("[2H]OC(=O)C1=CC=CC=C1OC(=O)C").unwrap());
        assert_eq!(value(&od, "nHBDon"), 1.0);
        assert_eq!(value(&od, "nHBAcc"), 3.0);
        assert_close(&od, "TopoPSA(NO)", 63.6, 0.01);
        assert_close(&od, "MW", 181.0486, 1e-3);
        assert_close(&od, "SLogP", 1.3101, 1e-3);
    }

    #[test]
    fn heavy_elements_and_dummy_atoms_compute() {
        let calc = DescriptorCalculator::new(Descriptor::all());
        for smiles in ["CC(=O)O[Pt]", "OC(=O)c1ccccc1O[Bi]", "*C"] {
            let values = calc.calculate(&parse_smiles(smiles).unwrap());
            assert!(values.iter().all(|(_, v)| v.is_some()), "{smiles}");
        }
        let pt = calc.calculate(&parse_smiles("CC(=O)O[Pt]").unwrap());
        assert_close(&pt, "MW", 253.9781, 1e-3);
        assert_eq!(value(&pt, "nHeavyAtom"), 5.0);
        let dummy = calc.calculate(&parse_smiles("*C").unwrap());
        assert_close(&dummy, "MW", 15.0235, 1e-3);
    }

    #[test]
    fn calculation_is_deterministic() {
        let mol = parse_smiles(ASPIRIN).unwrap();
        let calc = DescriptorCalculator::new(Descriptor::all());
        assert_eq!(calc.calculate(&mol), calc.calculate(&mol));
    }

    #[test]
    fn kekule_and_aromatic_forms_agree() {
        let calc = DescriptorCalculator::new(Descriptor::all());
        let a = calc.calculate(&parse_smiles(ASPIRIN).unwrap());
        let b = calc.calculate(&parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap());
        for ((na, va), (nb, vb)) in a.iter().zip(&b) {
            assert_eq!(na, nb);
            assert!((va.unwrap() - vb.unwrap()).abs() < 1e-9, "{na} differs");
        }
    }

    #[test]
    fn names_round_trip() {
        for d in Descriptor::all() {
            assert_eq!(d.name().parse::<Descriptor>().unwrap(), d);
        }
        assert!("SlogP_VSA13".parse::<Descriptor>().is_err());
        assert!("Volume".parse::<Descriptor>().is_err());
    }

    #[test]
    fn kinds() {
        assert_eq!(Descriptor::RingCount.kind(), DescriptorKind::Discrete);
        assert_eq!(Descriptor::HBondAcceptors.kind(), DescriptorKind::Discrete);
        assert_eq!(Descriptor::ExactMass.kind(), DescriptorKind::Continuous);
        assert_eq!(Descriptor::SlogPVsa(2).kind(), DescriptorKind::Continuous);
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Descriptor::TopoPsaNO).unwrap();
        assert_eq!(json, "\"TopoPSA(NO)\"");
        let parsed: Vec<Descriptor> = serde_json::from_str(r#"["MW", "SlogP_VSA2"]"#).unwrap();
        assert_eq!(parsed, vec![Descriptor::ExactMass, Descriptor::SlogPVsa(2)]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = DescriptorCalculator::from_names(&["MW", "Bogus"]).unwrap_err();
        assert_eq!(err, UnknownDescriptor("Bogus".to_string()));
    }

    #[test]
    fn salicylate_family_masses() {
        let calc = DescriptorCalculator::default();
        for (smiles, mass) in [
            ("C1=CC=C(C(=C1)C(=O)O)O", 138.0317),
            ("COC(=O)C1=CC=CC=C1O", 152.0473),
            ("CC(=O)NC1=CC=C(C=C1)O", 151.0633),
        ] {
            let values = calc.calculate(&parse_smiles(smiles).unwrap());
            assert!((value(&values, "MW") - mass).abs() < 1e-3, "{smiles}");
            assert_eq!(value(&values, "nRing"), 1.0);
            assert!(values.iter().all(|(_, v)| v.is_some()));
        }
    }
}
