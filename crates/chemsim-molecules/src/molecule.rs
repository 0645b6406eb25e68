//! Hydrogen-suppressed molecular graph.
//!
//! Hydrogens live as counts on their heavy atom; explicit `[H]` atoms in
//! SMILES are folded in by the parser. Isotope-labelled hydrogens such as
//! `[2H]` stay in the graph as atoms, so typing code asks for
//! `total_hydrogens` and `heavy_degree` rather than reading the raw
//! fields. Rings are perceived once, when the molecule is built, and
//! never change afterwards.

use crate::element;
use crate::ring;

/// Bond order classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric bond order for valence calculations.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

/// A heavy atom together with its attached hydrogen count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub isotope: Option<u16>,
    pub is_aromatic: bool,
    /// Implicit plus folded explicit hydrogens.
    pub hydrogens: u8,
}

impl Atom {
    pub fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            formal_charge: 0,
            isotope: None,
            is_aromatic: false,
            hydrogens: 0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        element::symbol(self.atomic_number)
    }

    pub fn is(&self, atomic_number: u8) -> bool {
        self.atomic_number == atomic_number
    }

    /// Aliphatic atom of the given element (uppercase in SMILES/SMARTS).
    pub fn is_aliphatic(&self, atomic_number: u8) -> bool {
        self.atomic_number == atomic_number && !self.is_aromatic
    }

    /// Aromatic atom of the given element (lowercase in SMILES/SMARTS).
    pub fn is_aromatic_of(&self, atomic_number: u8) -> bool {
        self.atomic_number == atomic_number && self.is_aromatic
    }
}

/// A bond between two atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(a: usize, b: usize, order: BondOrder) -> Self {
        Self { a, b, order }
    }

    /// The atom on the other end of this bond from `atom`.
    pub fn other(&self, atom: usize) -> usize {
        if self.a == atom {
            self.b
        } else {
            self.a
        }
    }
}

/// Per-atom counts of bonds by order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondCounts {
    pub single: usize,
    pub double: usize,
    pub triple: usize,
    pub aromatic: usize,
}

#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// adjacency[atom] = Vec<(neighbor, bond index)>
    adjacency: Vec<Vec<(usize, usize)>>,
    rings: Vec<Vec<usize>>,
    ring_membership: Vec<bool>,
}

impl Molecule {
    /// Build a molecule and perceive its symmetrized smallest set of
    /// smallest rings.
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, bi));
            adjacency[bond.b].push((bond.a, bi));
        }
        let rings = ring::find_symmetrized_sssr(atoms.len(), &bonds, &adjacency);
        let mut ring_membership = vec![false; atoms.len()];
        for ring in &rings {
            for &atom in ring {
                ring_membership[atom] = true;
            }
        }
        Self { atoms, bonds, adjacency, rings, ring_membership }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Neighbors of an atom with the order of the connecting bond.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = (usize, BondOrder)> + '_ {
        self.adjacency[idx]
            .iter()
            .map(move |&(nb, bi)| (nb, self.bonds[bi].order))
    }

    /// Number of explicit neighbors, hydrogen atoms included.
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    pub fn is_hydrogen(&self, idx: usize) -> bool {
        self.atoms[idx].atomic_number == element::HYDROGEN
    }

    /// Number of neighbors that are not hydrogen atoms.
    pub fn heavy_degree(&self, idx: usize) -> usize {
        self.adjacency[idx].iter().filter(|&&(nb, _)| !self.is_hydrogen(nb)).count()
    }

    /// Attached hydrogens: the implicit count plus explicit hydrogen
    /// neighbors of any isotope (SMARTS `H`).
    pub fn total_hydrogens(&self, idx: usize) -> usize {
        self.atoms[idx].hydrogens as usize + self.degree(idx) - self.heavy_degree(idx)
    }

    /// Total connections including hydrogens (SMARTS `X`).
    pub fn total_degree(&self, idx: usize) -> usize {
        self.degree(idx) + self.atoms[idx].hydrogens as usize
    }

    /// Sum of bond orders plus hydrogens (SMARTS `v`).
    pub fn valence(&self, idx: usize) -> u8 {
        let bonds: f64 = self.neighbors(idx).map(|(_, order)| order.as_f64()).sum();
        (bonds + self.atoms[idx].hydrogens as f64).round() as u8
    }

    pub fn bond_counts(&self, idx: usize) -> BondCounts {
        let mut counts = BondCounts::default();
        for (_, order) in self.neighbors(idx) {
            match order {
                BondOrder::Single => counts.single += 1,
                BondOrder::Double => counts.double += 1,
                BondOrder::Triple => counts.triple += 1,
                BondOrder::Aromatic => counts.aromatic += 1,
            }
        }
        counts
    }

    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.adjacency[a]
            .iter()
            .find(|&&(nb, _)| nb == b)
            .map(|&(_, bi)| &self.bonds[bi])
    }

    /// True if `idx` has a bond of `order` to a neighbor matching `pred`.
    pub fn has_bond_to(&self, idx: usize, order: BondOrder, pred: impl Fn(&Atom) -> bool) -> bool {
        self.neighbors(idx)
            .any(|(nb, o)| o == order && pred(&self.atoms[nb]))
    }

    /// Atoms heavier than hydrogen; dummy atoms do not count.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.atomic_number > element::HYDROGEN).count()
    }

    pub fn hydrogen_count(&self) -> usize {
        let explicit = self.atoms.iter().filter(|a| a.atomic_number == element::HYDROGEN).count();
        explicit + self.atoms.iter().map(|a| a.hydrogens as usize).sum::<usize>()
    }

    /// Symmetrized smallest set of smallest rings, each as a cycle of
    /// atom indices.
    pub fn rings(&self) -> &[Vec<usize>] {
        &self.rings
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn is_in_ring(&self, idx: usize) -> bool {
        self.ring_membership[idx]
    }

    pub fn is_in_ring_of_size(&self, idx: usize, size: usize) -> bool {
        self.rings.iter().any(|r| r.len() == size && r.contains(&idx))
    }

    pub(crate) fn atom_mut(&mut self, idx: usize) -> &mut Atom {
        &mut self.atoms[idx]
    }

    pub(crate) fn set_bond_order(&mut self, a: usize, b: usize, order: BondOrder) {
        if let Some(&(_, bi)) = self.adjacency[a].iter().find(|&&(nb, _)| nb == b) {
            self.bonds[bi].order = order;
        }
    }
}
