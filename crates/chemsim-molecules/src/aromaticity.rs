//! Hückel aromaticity perception for Kekulé input.
//!
//! Each SSSR ring is scored by counting the pi electrons its atoms donate;
//! a ring with 4n+2 electrons is aromatic. Rings are re-examined until
//! nothing changes so that fused systems written in Kekulé form resolve,
//! and pairs of rings sharing one bond are scored together (azulene).

use tracing::trace;

use crate::element;
use crate::molecule::{BondOrder, Molecule};

/// Mark aromatic atoms and bonds in place.
pub fn perceive(mol: &mut Molecule) {
    let rings: Vec<Vec<usize>> = mol.rings().to_vec();
    let mut aromatic: Vec<bool> = rings
        .iter()
        .map(|ring| ring.iter().all(|&a| mol.atom(a).is_aromatic))
        .collect();

    loop {
        let mut changed = false;

        for (ri, ring) in rings.iter().enumerate() {
            if aromatic[ri] {
                continue;
            }
            if pi_electrons(mol, ring).is_some_and(is_huckel) {
                mark_aromatic(mol, ring);
                aromatic[ri] = true;
                changed = true;
            }
        }

        if !changed {
            'pairs: for i in 0..rings.len() {
                for j in (i + 1)..rings.len() {
                    if aromatic[i] || aromatic[j] {
                        continue;
                    }
                    let shared = rings[i].iter().filter(|a| rings[j].contains(a)).count();
                    if shared != 2 {
                        continue;
                    }
                    let mut union = rings[i].clone();
                    union.extend(rings[j].iter().filter(|a| !rings[i].contains(a)));
                    if pi_electrons(mol, &union).is_some_and(is_huckel) {
                        mark_aromatic(mol, &rings[i]);
                        mark_aromatic(mol, &rings[j]);
                        aromatic[i] = true;
                        aromatic[j] = true;
                        changed = true;
                        break 'pairs;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }
}

fn is_huckel(electrons: u32) -> bool {
    electrons >= 2 && (electrons - 2) % 4 == 0
}

/// Total pi electrons donated by `atoms`, or `None` if any atom cannot
/// take part in an aromatic system.
fn pi_electrons(mol: &Molecule, atoms: &[usize]) -> Option<u32> {
    atoms
        .iter()
        .map(|&a| atom_electrons(mol, a, atoms))
        .sum()
}

fn atom_electrons(mol: &Molecule, idx: usize, ring: &[usize]) -> Option<u32> {
    let atom = mol.atom(idx);
    if !matches!(
        atom.atomic_number,
        element::BORON | element::CARBON | element::NITROGEN | element::OXYGEN | element::PHOSPHORUS
            | element::SULFUR | element::SELENIUM
    ) {
        return None;
    }

    let mut ring_double = false;
    let mut exo_hetero_double = false;
    let mut aromatic_bond = false;
    for (nb, order) in mol.neighbors(idx) {
        match order {
            BondOrder::Double => {
                if ring.contains(&nb) || mol.is_in_ring(nb) {
                    ring_double = true;
                } else if mol.atom(nb).atomic_number != element::CARBON {
                    exo_hetero_double = true;
                } else {
                    return None;
                }
            }
            BondOrder::Triple => return None,
            BondOrder::Aromatic => aromatic_bond = true,
            BondOrder::Single => {}
        }
    }

    let charge = atom.formal_charge;
    let pi = match atom.atomic_number {
        _ if ring_double => 1,
        _ if exo_hetero_double => 0,
        element::NITROGEN | element::PHOSPHORUS if atom.is_aromatic && aromatic_bond => {
            if charge == 0 && (atom.hydrogens > 0 || mol.degree(idx) == 3) {
                2
            } else {
                1
            }
        }
        element::CARBON if atom.is_aromatic && aromatic_bond => match charge {
            -1 => 2,
            1 => 0,
            _ => 1,
        },
        element::OXYGEN | element::SULFUR | element::SELENIUM if charge == 0 && mol.total_degree(idx) == 2 => 2,
        element::OXYGEN | element::SULFUR | element::SELENIUM if charge == 1 && atom.is_aromatic => 1,
        element::NITROGEN | element::PHOSPHORUS if charge == 0 && mol.total_degree(idx) == 3 => 2,
        element::NITROGEN if charge == -1 && mol.total_degree(idx) == 2 => 2,
        element::CARBON if charge == -1 => 2,
        element::CARBON if charge == 1 => 0,
        element::BORON if charge == 0 && mol.total_degree(idx) == 3 => 0,
        _ => {
            trace!(atom = idx, "Atom breaks ring conjugation");
            return None;
        }
    };
    Some(pi)
}

fn mark_aromatic(mol: &mut Molecule, ring: &[usize]) {
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        mol.atom_mut(a).is_aromatic = true;
        mol.set_bond_order(a, b, BondOrder::Aromatic);
    }
}

#[cfg(test)]
mod tests {
    use crate::smiles::parse_smiles;

    fn aromatic_atoms(smiles: &str) -> usize {
        parse_smiles(smiles)
            .unwrap()
            .atoms()
            .iter()
            .filter(|a| a.is_aromatic)
            .count()
    }

    #[test]
    fn kekule_benzene_and_heterocycles() {
        assert_eq!(aromatic_atoms("C1=CC=CC=C1"), 6);
        assert_eq!(aromatic_atoms("C1=CC=NC=C1"), 6);
        assert_eq!(aromatic_atoms("C1=CNC=C1"), 5);
        assert_eq!(aromatic_atoms("C1=COC=C1"), 5);
        assert_eq!(aromatic_atoms("C1=CSC=C1"), 5);
    }

    #[test]
    fn non_aromatic_rings() {
        assert_eq!(aromatic_atoms("C1=CCCCC1"), 0);
        assert_eq!(aromatic_atoms("C1=CCC=C1"), 0);
        assert_eq!(aromatic_atoms("O=C1C=CC(=O)C=C1"), 0);
        assert_eq!(aromatic_atoms("C1CCCCC1"), 0);
    }

    #[test]
    fn fused_kekule_systems() {
        assert_eq!(aromatic_atoms("C1=CC=C2C=CC=CC2=C1"), 10);
        assert_eq!(aromatic_atoms("C1=CC=C2C(=C1)C=CN2"), 9);
        assert_eq!(aromatic_atoms("C1=CC2=CC=CC=CC2=C1"), 10);
    }

    #[test]
    fn pyridone_is_aromatic() {
        assert_eq!(aromatic_atoms("O=C1C=CC=CN1"), 6);
    }

    #[test]
    fn aromatic_input_is_kept() {
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert!(mol.atoms().iter().all(|a| a.is_aromatic));
        assert_eq!(mol.bond_count(), 11);
    }
}
