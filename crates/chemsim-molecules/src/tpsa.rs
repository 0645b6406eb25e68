//! Topological polar surface area (Ertl, Rohde & Selzer 2000).
//!
//! Fragment contributions are looked up from the atom's heavy-neighbor
//! count, hydrogen count, charge and bond orders. Atoms matching no
//! tabulated fragment fall back to a linear estimate for N and O and to
//! zero for S and P.

use crate::element;
use crate::molecule::Molecule;

/// TPSA over N and O atoms, or over N, O, S and P when `include_s_and_p`.
pub fn tpsa(mol: &Molecule, include_s_and_p: bool) -> f64 {
    atom_contributions(mol, include_s_and_p).iter().sum()
}

pub fn atom_contributions(mol: &Molecule, include_s_and_p: bool) -> Vec<f64> {
    (0..mol.atom_count())
        .map(|idx| match mol.atom(idx).atomic_number {
            element::NITROGEN => nitrogen(mol, idx),
            element::OXYGEN => oxygen(mol, idx),
            element::SULFUR if include_s_and_p => sulfur(mol, idx),
            element::PHOSPHORUS if include_s_and_p => phosphorus(mol, idx),
            _ => 0.0,
        })
        .collect()
}

struct Env {
    nbrs: usize,
    hs: usize,
    chg: i8,
    single: usize,
    double: usize,
    triple: usize,
    aromatic: usize,
    in_3_ring: bool,
}

/// Bonds to explicit hydrogen atoms count as hydrogens, not neighbors.
fn env(mol: &Molecule, idx: usize) -> Env {
    let atom = mol.atom(idx);
    let counts = mol.bond_counts(idx);
    let explicit_h = mol.degree(idx) - mol.heavy_degree(idx);
    Env {
        nbrs: mol.heavy_degree(idx),
        hs: mol.total_hydrogens(idx),
        chg: atom.formal_charge,
        single: counts.single.saturating_sub(explicit_h),
        double: counts.double,
        triple: counts.triple,
        aromatic: counts.aromatic,
        in_3_ring: mol.is_in_ring_of_size(idx, 3),
    }
}

fn nitrogen(mol: &Molecule, idx: usize) -> f64 {
    let e = env(mol, idx);
    let value = match (e.nbrs, e.hs, e.chg) {
        (1, 0, 0) if e.triple == 1 => Some(23.79),
        (1, 1, 0) if e.double == 1 => Some(23.85),
        (1, 2, 0) if e.single == 1 => Some(26.02),
        (1, 2, 1) if e.double == 1 => Some(25.59),
        (1, 3, 1) if e.single == 1 => Some(27.64),

        (2, 0, 0) if e.single == 1 && e.double == 1 => Some(12.36),
        (2, 0, 0) if e.triple == 1 && e.double == 1 => Some(13.60),
        (2, 1, 0) if e.single == 2 && e.in_3_ring => Some(21.94),
        (2, 1, 0) if e.single == 2 => Some(12.03),
        (2, 0, 1) if e.triple == 1 && e.single == 1 => Some(4.36),
        (2, 1, 1) if e.double == 1 && e.single == 1 => Some(13.97),
        (2, 2, 1) if e.single == 2 => Some(16.61),
        (2, 0, 0) if e.aromatic == 2 => Some(12.89),
        (2, 1, 0) if e.aromatic == 2 => Some(15.79),
        (2, 1, 1) if e.aromatic == 2 => Some(14.14),

        (3, 0, 0) if e.single == 3 && e.in_3_ring => Some(3.01),
        (3, 0, 0) if e.single == 3 => Some(3.24),
        (3, 0, 0) if e.single == 1 && e.double == 2 => Some(11.68),
        (3, 0, 1) if e.single == 2 && e.double == 1 => Some(3.01),
        (3, 1, 1) if e.single == 3 => Some(4.44),
        (3, 0, 0) if e.aromatic == 3 => Some(4.41),
        (3, 0, 0) if e.single == 1 && e.aromatic == 2 => Some(4.93),
        (3, 0, 0) if e.double == 1 && e.aromatic == 2 => Some(8.39),
        (3, 0, 1) if e.aromatic == 3 => Some(4.10),
        (3, 0, 1) if e.single == 1 && e.aromatic == 2 => Some(3.88),

        (4, 0, 1) if e.single == 4 => Some(0.0),
        _ => None,
    };
    value.unwrap_or_else(|| (30.5 - e.nbrs as f64 * 8.2 + e.hs as f64 * 1.5).max(0.0))
}

fn oxygen(mol: &Molecule, idx: usize) -> f64 {
    let e = env(mol, idx);
    let value = match (e.nbrs, e.hs, e.chg) {
        (1, 0, 0) if e.double == 1 => Some(17.07),
        (1, 1, 0) if e.single == 1 => Some(20.23),
        (1, 0, -1) if e.single == 1 => Some(23.06),
        (2, 0, 0) if e.single == 2 && e.in_3_ring => Some(12.53),
        (2, 0, 0) if e.single == 2 => Some(9.23),
        (2, 0, 0) if e.aromatic == 2 => Some(13.14),
        _ => None,
    };
    value.unwrap_or_else(|| (28.5 - e.nbrs as f64 * 8.6 + e.hs as f64 * 1.5).max(0.0))
}

fn sulfur(mol: &Molecule, idx: usize) -> f64 {
    let e = env(mol, idx);
    match (e.nbrs, e.hs, e.chg) {
        (1, 0, 0) if e.double == 1 => 32.09,
        (1, 1, 0) if e.single == 1 => 38.80,
        (2, 0, 0) if e.single == 2 => 25.30,
        (2, 0, 0) if e.aromatic == 2 => 28.24,
        (3, 0, 0) if e.aromatic == 2 && e.double == 1 => 21.70,
        (3, 0, 0) if e.single == 2 && e.double == 1 => 19.21,
        (4, 0, 0) if e.single == 2 && e.double == 2 => 8.38,
        _ => 0.0,
    }
}

fn phosphorus(mol: &Molecule, idx: usize) -> f64 {
    let e = env(mol, idx);
    match (e.nbrs, e.hs, e.chg) {
        (2, 0, 0) if e.single == 1 && e.double == 1 => 34.14,
        (3, 0, 0) if e.single == 3 => 13.59,
        (3, 1, 0) if e.single == 2 && e.double == 1 => 23.47,
        (4, 0, 0) if e.single == 3 && e.double == 1 => 9.81,
        _ => 0.0,
    }
}
