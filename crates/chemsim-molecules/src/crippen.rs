//! Wildman-Crippen atom-typed logP.
//!
//! Every heavy atom and every attached hydrogen is assigned one of the
//! Wildman & Crippen (J. Chem. Inf. Comput. Sci. 1999, 39, 868) atom
//! types; logP is the sum of the per-type contributions. Types are tried
//! in table order and the first match wins.

use crate::element::{self, is_halogen};
use crate::molecule::{Atom, BondOrder, Molecule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrippenType {
    C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, C12, C13, C14,
    C15, C16, C17, C18, C19, C20, C21, C22, C23, C24, C25, C26, C27, CS,
    H1, H2, H3, H4, HS,
    N1, N2, N3, N4, N5, N6, N7, N8, N9, N10, N11, N12, N13, N14, NS,
    O1, O2, O3, O4, O5, O6, O7, O8, O9, O10, O11, O12, OS,
    F, Cl, Br, I, Hal,
    P,
    S1, S2, S3,
    Me1, Me2,
    /// Elements with no parameterized type; contributes nothing.
    Unknown,
}

impl CrippenType {
    pub fn logp(self) -> f64 {
        use CrippenType::*;
        match self {
            C1 => 0.1441,
            C2 => 0.0,
            C3 => -0.2035,
            C4 => -0.2051,
            C5 => -0.2783,
            C6 => 0.1551,
            C7 => 0.0017,
            C8 => 0.08452,
            C9 => -0.1444,
            C10 => -0.0516,
            C11 => 0.1193,
            C12 => -0.0967,
            C13 => -0.5443,
            C14 => 0.0,
            C15 => 0.245,
            C16 => 0.198,
            C17 => 0.0,
            C18 => 0.1581,
            C19 => 0.2955,
            C20 => 0.2713,
            C21 => 0.136,
            C22 => 0.4619,
            C23 => 0.5437,
            C24 => 0.1893,
            C25 => -0.8186,
            C26 => 0.264,
            C27 => 0.2148,
            CS => 0.08129,
            H1 => 0.123,
            H2 => -0.2677,
            H3 => 0.2142,
            H4 => 0.298,
            HS => 0.1125,
            N1 => -1.019,
            N2 => -0.7096,
            N3 => -1.027,
            N4 => -0.5188,
            N5 => 0.08387,
            N6 => 0.1836,
            N7 => -0.3187,
            N8 => -0.4458,
            N9 => 0.01508,
            N10 => -1.95,
            N11 => -0.3239,
            N12 => -1.119,
            N13 => -0.3396,
            N14 => 0.2887,
            NS => -0.4806,
            O1 => 0.1552,
            O2 => -0.2893,
            O3 => -0.0684,
            O4 => -0.4195,
            O5 => 0.0335,
            O6 => -0.3339,
            O7 => -1.189,
            O8 => 0.1788,
            O9 => -0.1526,
            O10 => 0.1129,
            O11 => 0.4833,
            O12 => -1.326,
            OS => -0.1188,
            F => 0.4202,
            Cl => 0.6895,
            Br => 0.8456,
            I => 0.8857,
            Hal => -2.996,
            P => 0.8612,
            S1 => 0.6482,
            S2 => -0.0024,
            S3 => 0.6237,
            Me1 => -0.3808,
            Me2 => -0.0025,
            Unknown => 0.0,
        }
    }
}

/// Crippen logP of the whole molecule.
pub fn logp(mol: &Molecule) -> f64 {
    atom_contributions(mol).iter().sum()
}

/// Per-atom logP contributions with each atom's implicit hydrogens
/// folded into its heavy atom, indexed like `mol.atoms()`. Explicit
/// hydrogen atoms (isotope labels) carry their own contribution.
pub fn atom_contributions(mol: &Molecule) -> Vec<f64> {
    (0..mol.atom_count())
        .map(|idx| {
            let heavy = atom_type(mol, idx).logp();
            let h = mol.atom(idx).hydrogens as f64;
            heavy + h * hydrogen_type(mol, idx).logp()
        })
        .collect()
}

/// Neighbor view used by the typing rules.
struct Nbr<'a> {
    atom: &'a Atom,
    order: BondOrder,
    idx: usize,
}

impl Nbr<'_> {
    /// SMARTS implicit bond: single or aromatic.
    fn plain(&self) -> bool {
        matches!(self.order, BondOrder::Single | BondOrder::Aromatic)
    }

    fn aliphatic_heavy(&self) -> bool {
        !self.atom.is_aromatic && self.atom.atomic_number != element::HYDROGEN
    }
}

/// Heavy neighbors only; explicit hydrogens are counted by
/// `Molecule::total_hydrogens`.
fn neighbors(mol: &Molecule, idx: usize) -> Vec<Nbr<'_>> {
    mol.neighbors(idx)
        .filter(|&(nb, _)| !mol.is_hydrogen(nb))
        .map(|(nb, order)| Nbr { atom: mol.atom(nb), order, idx: nb })
        .collect()
}

/// `[N,O,P,S,F,Cl,Br,I]` in aliphatic form.
fn is_polar_aliphatic(atom: &Atom) -> bool {
    !atom.is_aromatic
        && matches!(
            atom.atomic_number,
            element::NITROGEN | element::OXYGEN | element::PHOSPHORUS | element::SULFUR
        )
        || is_halogen(atom.atomic_number)
}

/// Aliphatic substituent that makes an aromatic carbon C13: anything
/// outside C, N, O, S and the halogens.
fn is_c13_substituent(atom: &Atom) -> bool {
    !atom.is_aromatic
        && !matches!(
            atom.atomic_number,
            element::HYDROGEN | element::CARBON | element::NITROGEN | element::OXYGEN | element::SULFUR
        )
        && !is_halogen(atom.atomic_number)
}

/// Elements outside C, N, O, P, S and the halogens.
fn is_other_element(atom: &Atom) -> bool {
    !matches!(
        atom.atomic_number,
        element::HYDROGEN | element::CARBON | element::NITROGEN | element::OXYGEN | element::PHOSPHORUS
            | element::SULFUR
    ) && !is_halogen(atom.atomic_number)
}

pub fn atom_type(mol: &Molecule, idx: usize) -> CrippenType {
    let atom = mol.atom(idx);
    match atom.atomic_number {
        element::CARBON if atom.is_aromatic => aromatic_carbon_type(mol, idx),
        element::CARBON => aliphatic_carbon_type(mol, idx),
        element::NITROGEN => nitrogen_type(mol, idx),
        element::OXYGEN => oxygen_type(mol, idx),
        element::FLUORINE | element::CHLORINE | element::BROMINE | element::IODINE => {
            if atom.formal_charge < 0 {
                CrippenType::Hal
            } else {
                match atom.atomic_number {
                    element::FLUORINE => CrippenType::F,
                    element::CHLORINE => CrippenType::Cl,
                    element::BROMINE => CrippenType::Br,
                    _ => CrippenType::I,
                }
            }
        }
        element::PHOSPHORUS => CrippenType::P,
        element::SULFUR if atom.is_aromatic => CrippenType::S3,
        element::SULFUR if atom.formal_charge == 0 => CrippenType::S1,
        element::SULFUR => CrippenType::S2,
        element::HYDROGEN => match mol.neighbors(idx).next() {
            Some((nb, _)) if mol.is_hydrogen(nb) => CrippenType::H1,
            Some((nb, _)) => hydrogen_type(mol, nb),
            None => CrippenType::HS,
        },
        // Li Na Mg Al K Ca Ga Rb Sr In Cs Ba Tl Pb
        3 | 11 | 12 | 13 | 19 | 20 | 31 | 37 | 38 | 49 | 55 | 56 | 81 | 82 => CrippenType::Me1,
        21..=30 | 39..=48 | 57..=80 => CrippenType::Me2,
        _ => CrippenType::Unknown,
    }
}

fn aliphatic_carbon_type(mol: &Molecule, idx: usize) -> CrippenType {
    use CrippenType::*;
    let h = mol.total_hydrogens(idx);
    let x = mol.total_degree(idx);
    let nbrs = neighbors(mol, idx);

    let single: Vec<&Nbr> = nbrs.iter().filter(|n| n.plain()).collect();
    let aliphatic_c = single.iter().filter(|n| n.atom.is_aliphatic(element::CARBON)).count();
    let aliphatic_heavy = single.iter().filter(|n| n.aliphatic_heavy()).count();
    let polar = single.iter().any(|n| is_polar_aliphatic(n.atom));
    let aromatic_nbr = single.iter().find(|n| n.atom.is_aromatic);

    if (h == 4 && nbrs.is_empty()) || (h == 3 && aliphatic_c >= 1) || (h == 2 && aliphatic_c >= 2) {
        return C1;
    }
    if (h == 1 && aliphatic_c >= 3) || (h == 0 && aliphatic_c >= 4) {
        return C2;
    }
    if polar && ((h == 3) || (h == 2 && x == 4 && aliphatic_heavy >= 2)) {
        return C3;
    }
    if polar && x == 4 && ((h == 1 && aliphatic_heavy >= 3) || (h == 0 && aliphatic_heavy >= 4)) {
        return C4;
    }

    let doubles: Vec<&Nbr> = nbrs.iter().filter(|n| n.order == BondOrder::Double).collect();
    if doubles.iter().any(|n| n.aliphatic_heavy() && !n.atom.is(element::CARBON)) {
        return C5;
    }
    let double_aliphatic_c = doubles.iter().filter(|n| n.atom.is_aliphatic(element::CARBON)).count();
    if double_aliphatic_c > 0
        && ((h == 2)
            || (h == 1 && aliphatic_heavy >= 1)
            || (h == 0 && aliphatic_heavy >= 2)
            || double_aliphatic_c == 2)
    {
        return C6;
    }
    if x == 2
        && nbrs
            .iter()
            .any(|n| n.order == BondOrder::Triple && n.aliphatic_heavy())
    {
        return C7;
    }

    if let Some(ar) = aromatic_nbr {
        if h == 3 {
            return if ar.atom.is(element::CARBON) { C8 } else { C9 };
        }
        if x == 4 {
            return match h {
                2 => C10,
                1 => C11,
                _ => C12,
            };
        }
    }

    let double_c = doubles.iter().any(|n| n.atom.is(element::CARBON));
    let double_aromatic_c = doubles.iter().any(|n| n.atom.is_aromatic_of(element::CARBON));
    if (double_c && aromatic_nbr.is_some()) || double_aromatic_c {
        return C26;
    }
    if x == 4 && single.iter().any(|n| !n.atom.is_aromatic && is_other_element(n.atom)) {
        return C27;
    }
    CS
}

fn aromatic_carbon_type(mol: &Molecule, idx: usize) -> CrippenType {
    use CrippenType::*;
    let h = mol.total_hydrogens(idx);
    let nbrs = neighbors(mol, idx);

    if h == 0 && nbrs.iter().any(|n| n.order == BondOrder::Single && is_c13_substituent(n.atom)) {
        return C13;
    }
    for n in &nbrs {
        match n.atom.atomic_number {
            element::FLUORINE => return C14,
            element::CHLORINE => return C15,
            element::BROMINE => return C16,
            element::IODINE => return C17,
            _ => {}
        }
    }
    if h == 1 {
        return C18;
    }

    let aromatic_bonds = nbrs
        .iter()
        .filter(|n| n.order == BondOrder::Aromatic && n.atom.is_aromatic)
        .count();
    if aromatic_bonds >= 3 {
        return C19;
    }
    if aromatic_bonds == 2 {
        for n in &nbrs {
            match n.order {
                BondOrder::Single if n.atom.is_aromatic => return C20,
                BondOrder::Single => match n.atom.atomic_number {
                    element::CARBON => return C21,
                    element::NITROGEN => return C22,
                    element::OXYGEN => return C23,
                    element::SULFUR => return C24,
                    _ => {}
                },
                BondOrder::Double
                    if !n.atom.is_aromatic
                        && matches!(n.atom.atomic_number, element::CARBON | element::NITROGEN | element::OXYGEN) =>
                {
                    return C25
                }
                _ => {}
            }
        }
    }
    CS
}

fn nitrogen_type(mol: &Molecule, idx: usize) -> CrippenType {
    use CrippenType::*;
    let atom = mol.atom(idx);
    let q = atom.formal_charge;
    let h = mol.total_hydrogens(idx);
    let nbrs = neighbors(mol, idx);

    if atom.is_aromatic {
        return if q == 0 {
            N11
        } else if q > 0 {
            N12
        } else {
            NS
        };
    }

    let single: Vec<&Nbr> = nbrs.iter().filter(|n| n.plain()).collect();
    let aliphatic = single.iter().filter(|n| n.aliphatic_heavy()).count();
    let aromatic = single.iter().filter(|n| n.atom.is_aromatic).count();
    let double = nbrs.iter().any(|n| n.order == BondOrder::Double);
    let triple = nbrs.iter().any(|n| n.order == BondOrder::Triple);

    if q == 0 {
        match h {
            2 if aliphatic >= 1 => return N1,
            1 if aliphatic >= 2 => return N2,
            2 if aromatic >= 1 => return N3,
            1 if aromatic >= 1 && aromatic + aliphatic >= 2 => return N4,
            1 if double => return N5,
            0 if double && !single.is_empty() => return N6,
            0 if aliphatic >= 3 => return N7,
            0 if aromatic >= 1 && single.len() >= 3 => return N8,
            _ => {}
        }
        if triple {
            return N9;
        }
    }
    if q > 0 && h >= 1 {
        return N10;
    }
    if q > 0 && h == 0 && (single.len() >= 4 || double) {
        return N13;
    }
    if (q > 0 && triple) || q < 0 {
        return N14;
    }
    NS
}

fn oxygen_type(mol: &Molecule, idx: usize) -> CrippenType {
    use CrippenType::*;
    let atom = mol.atom(idx);
    if atom.is_aromatic {
        return O1;
    }
    let q = atom.formal_charge;
    let nbrs = neighbors(mol, idx);

    if mol.total_hydrogens(idx) >= 1 {
        return O2;
    }
    let single: Vec<&Nbr> = nbrs.iter().filter(|n| n.plain()).collect();
    if single.len() == 2 && single.iter().all(|n| n.aliphatic_heavy()) {
        return O3;
    }
    if single.len() == 2 && single.iter().any(|n| n.atom.is_aromatic) {
        return O4;
    }

    let double = nbrs.iter().find(|n| n.order == BondOrder::Double);
    if let Some(d) = double {
        if matches!(d.atom.atomic_number, element::NITROGEN | element::OXYGEN) {
            return O5;
        }
    }
    if q == -1 {
        if let Some(n) = single.first() {
            match n.atom.atomic_number {
                element::NITROGEN => return O5,
                element::SULFUR => return O6,
                element::CARBON
                    if !n.atom.is_aromatic
                        && mol.has_bond_to(n.idx, BondOrder::Double, |a| a.is(element::OXYGEN)) =>
                {
                    return O12
                }
                _ => {}
            }
        }
        return O7;
    }

    match double {
        Some(d) if d.atom.is(element::CARBON) => carbonyl_oxygen_type(mol, idx, d.idx),
        _ => OS,
    }
}

/// Type of a carbonyl oxygen from the substituents of its carbon.
fn carbonyl_oxygen_type(mol: &Molecule, oxygen: usize, carbon: usize) -> CrippenType {
    use CrippenType::*;
    let c = mol.atom(carbon);
    if c.is_aromatic {
        return O8;
    }
    let others: Vec<Nbr> = neighbors(mol, carbon).into_iter().filter(|n| n.idx != oxygen).collect();
    let has_aliphatic_c = others.iter().any(|n| n.atom.is_aliphatic(element::CARBON));
    let has_aromatic_c = others.iter().any(|n| n.atom.is_aromatic_of(element::CARBON));
    let has_aromatic = others.iter().any(|n| n.atom.is_aromatic);
    let heavy_non_carbon = others
        .iter()
        .filter(|n| !n.atom.is(element::CARBON) && !n.atom.is(element::HYDROGEN))
        .count();

    let h = mol.total_hydrogens(carbon);
    let o9 = (h == 1 && has_aliphatic_c)
        || (has_aliphatic_c && others.iter().filter(|n| n.aliphatic_heavy()).count() >= 2)
        || (h == 1 && others.iter().any(|n| n.atom.is_aliphatic(element::NITROGEN) || n.atom.is_aliphatic(element::OXYGEN)))
        || h == 2
        || (others.len() == 1 && others[0].order == BondOrder::Double && others[0].atom.is(element::OXYGEN));
    if o9 {
        return O9;
    }
    let o10 = (h == 1 && has_aromatic_c)
        || ((has_aliphatic_c || has_aromatic_c) && has_aromatic && others.len() >= 2)
        || (has_aromatic_c && others.iter().any(|n| n.aliphatic_heavy()));
    if o10 {
        return O10;
    }
    if heavy_non_carbon >= 2 {
        return O11;
    }
    OS
}

/// Type shared by the hydrogens attached to heavy atom `idx`.
pub fn hydrogen_type(mol: &Molecule, idx: usize) -> CrippenType {
    use CrippenType::*;
    let atom = mol.atom(idx);
    match atom.atomic_number {
        element::CARBON => H1,
        element::NITROGEN => H3,
        element::OXYGEN => {
            let Some((nb, _)) = mol.neighbors(idx).find(|&(nb, _)| !mol.is_hydrogen(nb)) else {
                return HS;
            };
            let n = mol.atom(nb);
            match n.atomic_number {
                element::NITROGEN => H3,
                element::CARBON if n.is_aromatic => H2,
                element::CARBON if mol.total_degree(nb) == 4 => H2,
                element::CARBON => {
                    let acidic = mol.neighbors(nb).any(|(nn, order)| {
                        nn != idx
                            && order == BondOrder::Double
                            && matches!(
                                mol.atom(nn).atomic_number,
                                element::CARBON | element::NITROGEN | element::OXYGEN | element::SULFUR
                            )
                    });
                    if acidic {
                        H4
                    } else {
                        HS
                    }
                }
                element::OXYGEN | element::SULFUR => H4,
                _ => H2,
            }
        }
        _ => H2,
    }
}
