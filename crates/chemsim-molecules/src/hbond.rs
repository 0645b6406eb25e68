//! Hydrogen-bond donor and acceptor counts.
//!
//! Donors: N bearing H (neutral trivalent or cationic tetravalent), O/S
//! with exactly one H, and aromatic `[nH]`.
//!
//! Acceptors: divalent O/S that are not acidic OH/SH, anionic O/S,
//! trivalent N not bonded to a carbonyl-like centre, pyridine-type `n`,
//! and aromatic `o`/`s` not next to a ring nitrogen.

use crate::element;
use crate::molecule::{BondOrder, Molecule};

pub fn donor_count(mol: &Molecule) -> usize {
    (0..mol.atom_count()).filter(|&i| is_donor(mol, i)).count()
}

pub fn acceptor_count(mol: &Molecule) -> usize {
    (0..mol.atom_count()).filter(|&i| is_acceptor(mol, i)).count()
}

pub fn is_donor(mol: &Molecule, idx: usize) -> bool {
    let atom = mol.atom(idx);
    let h = mol.total_hydrogens(idx);
    let q = atom.formal_charge;
    match atom.atomic_number {
        element::NITROGEN if atom.is_aromatic => h == 1 && q == 0,
        element::NITROGEN => {
            let v = mol.valence(idx);
            h > 0 && (v == 3 || (v == 4 && q == 1))
        }
        element::OXYGEN | element::SULFUR if !atom.is_aromatic => h == 1 && q == 0,
        _ => false,
    }
}

/// `*-*=[O,N,P,S]`: singly bonded to an atom carrying a double bond to
/// an aliphatic O, N, P or S.
fn next_to_polar_double(mol: &Molecule, idx: usize) -> bool {
    mol.neighbors(idx)
        .filter(|&(_, order)| order == BondOrder::Single)
        .any(|(nb, _)| {
            mol.neighbors(nb).any(|(nn, order)| {
                let other = mol.atom(nn);
                nn != idx
                    && order == BondOrder::Double
                    && !other.is_aromatic
                    && matches!(
                        other.atomic_number,
                        element::OXYGEN | element::NITROGEN | element::PHOSPHORUS | element::SULFUR
                    )
            })
        })
}

pub fn is_acceptor(mol: &Molecule, idx: usize) -> bool {
    let atom = mol.atom(idx);
    let h = mol.total_hydrogens(idx);
    let q = atom.formal_charge;
    match atom.atomic_number {
        element::OXYGEN | element::SULFUR if atom.is_aromatic => {
            q == 0 && !aromatic_ring_nitrogen_nearby(mol, idx)
        }
        element::OXYGEN | element::SULFUR => {
            let v = mol.valence(idx);
            (h == 1 && v == 2 && !next_to_polar_double(mol, idx)) || (h == 0 && v == 2) || q < 0
        }
        element::NITROGEN if atom.is_aromatic => h == 0 && q == 0,
        element::NITROGEN => mol.valence(idx) == 3 && !next_to_polar_double(mol, idx),
        _ => false,
    }
}

/// `[o,s]:n` or `[o,s]:c:n`.
fn aromatic_ring_nitrogen_nearby(mol: &Molecule, idx: usize) -> bool {
    let is_n = |i: usize| mol.atom(i).is_aromatic_of(element::NITROGEN);
    mol.neighbors(idx)
        .filter(|&(_, order)| order == BondOrder::Aromatic)
        .any(|(nb, _)| {
            is_n(nb)
                || (mol.atom(nb).is_aromatic_of(element::CARBON)
                    && mol
                        .neighbors(nb)
                        .any(|(nn, order)| nn != idx && order == BondOrder::Aromatic && is_n(nn)))
        })
}
