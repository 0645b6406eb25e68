//! SMILES string parser.
//!
//! Accepts OpenSMILES: organic-subset and bracket atoms, branches, ring
//! bonds (`1`, `%12`, `%(123)`), explicit bond symbols, disconnected
//! components, `*` dummy atoms and stereo markers (which are read and
//! dropped). Both
//! aromatic (lowercase) and Kekulé input are supported; Kekulé rings are
//! aromatized after parsing.

use std::collections::BTreeMap;

use crate::aromaticity;
use crate::element::{self, element_by_symbol};
use crate::error::SmilesError;
use crate::molecule::{Atom, Bond, BondOrder, Molecule};
use crate::Result;

/// Parse a SMILES string into a `Molecule`.
pub fn parse_smiles(smiles: &str) -> Result<Molecule> {
    let smiles = smiles.trim();
    if smiles.is_empty() {
        return Err(SmilesError::Empty);
    }

    let mut parser = SmilesParser::new(smiles);
    parser.parse()?;
    parser.finish()?;
    let (atoms, bonds) = parser.into_graph()?;

    let mut mol = Molecule::new(atoms, bonds);
    for (index, atom) in mol.atoms().iter().enumerate() {
        if atom.is_aromatic && !mol.is_in_ring(index) {
            return Err(SmilesError::NonRingAromatic { index, symbol: atom.symbol().to_string() });
        }
    }
    aromaticity::perceive(&mut mol);
    Ok(mol)
}

struct ParsedAtom {
    atom: Atom,
    /// Bracket atoms carry an explicit hydrogen count and never get implicit ones.
    bracket: bool,
}

struct SmilesParser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<ParsedAtom>,
    /// (a, b, explicit order); `None` is resolved from aromaticity later.
    bonds: Vec<(usize, usize, Option<BondOrder>)>,
    /// ring_bonds[number] = (atom, order written at the opening digit)
    ring_bonds: BTreeMap<u16, (usize, Option<BondOrder>)>,
    /// Branch stack of atom indices
    stack: Vec<usize>,
    prev_atom: Option<usize>,
    /// Pending explicit bond and the position it was written at
    pending_bond: Option<(BondOrder, usize)>,
}

impl<'a> SmilesParser<'a> {
    fn new(input: &'a str) -> Self {
        SmilesParser {
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            ring_bonds: BTreeMap::new(),
            stack: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn unexpected(&self) -> SmilesError {
        match self.peek() {
            Some(ch) => SmilesError::UnexpectedChar { ch: ch as char, pos: self.pos },
            None => SmilesError::UnexpectedEnd,
        }
    }

    fn parse(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    let prev = self.prev_atom.ok_or_else(|| self.unexpected())?;
                    if let Some((_, pos)) = self.pending_bond {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    self.stack.push(prev);
                    self.pos += 1;
                }
                b')' => {
                    if let Some((_, pos)) = self.pending_bond {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    self.prev_atom = Some(self.stack.pop().ok_or(SmilesError::UnbalancedParens)?);
                    self.pos += 1;
                }
                b'-' | b'/' | b'\\' => self.set_bond(BondOrder::Single)?,
                b'=' => self.set_bond(BondOrder::Double)?,
                b'#' => self.set_bond(BondOrder::Triple)?,
                b':' => self.set_bond(BondOrder::Aromatic)?,
                b'.' => {
                    if let Some((_, pos)) = self.pending_bond {
                        return Err(SmilesError::DanglingBond(pos));
                    }
                    self.prev_atom = None;
                    self.pos += 1;
                }
                b'0'..=b'9' | b'%' => self.parse_ring_bond()?,
                b'[' => {
                    let atom = self.parse_bracket_atom()?;
                    self.add_atom(atom, true)?;
                }
                b'*' => {
                    self.pos += 1;
                    self.add_atom(Atom::new(element::DUMMY), false)?;
                }
                _ if ch.is_ascii_alphabetic() => {
                    let atom = self.parse_organic_atom()?;
                    self.add_atom(atom, false)?;
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(())
    }

    fn set_bond(&mut self, order: BondOrder) -> Result<()> {
        if self.pending_bond.is_some() || self.prev_atom.is_none() {
            return Err(self.unexpected());
        }
        self.pending_bond = Some((order, self.pos));
        self.pos += 1;
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom, bracket: bool) -> Result<()> {
        let idx = self.atoms.len();
        self.atoms.push(ParsedAtom { atom, bracket });
        match self.prev_atom {
            Some(prev) => {
                let order = self.pending_bond.take().map(|(o, _)| o);
                self.bonds.push((prev, idx, order));
            }
            None => {
                if let Some((_, pos)) = self.pending_bond {
                    return Err(SmilesError::DanglingBond(pos));
                }
            }
        }
        self.prev_atom = Some(idx);
        Ok(())
    }

    fn parse_ring_bond(&mut self) -> Result<()> {
        let current = self.prev_atom.ok_or_else(|| self.unexpected())?;
        let number = if self.peek() == Some(b'%') {
            self.pos += 1;
            if self.peek() == Some(b'(') {
                self.pos += 1;
                let n = self.parse_number().ok_or_else(|| self.unexpected())?;
                if self.peek() != Some(b')') {
                    return Err(self.unexpected());
                }
                self.pos += 1;
                n
            } else {
                let (Some(d1), Some(d2)) = (self.peek(), self.peek_at(1)) else {
                    return Err(SmilesError::UnexpectedEnd);
                };
                if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
                    return Err(self.unexpected());
                }
                self.pos += 2;
                ((d1 - b'0') * 10 + (d2 - b'0')) as u16
            }
        } else {
            let d = self.peek().ok_or(SmilesError::UnexpectedEnd)?;
            self.pos += 1;
            (d - b'0') as u16
        };

        let order = self.pending_bond.take().map(|(o, _)| o);
        match self.ring_bonds.remove(&number) {
            Some((partner, opening_order)) => {
                let exists = self
                    .bonds
                    .iter()
                    .any(|&(a, b, _)| (a == partner && b == current) || (a == current && b == partner));
                if partner == current || exists {
                    return Err(SmilesError::DuplicateBond(number));
                }
                self.bonds.push((partner, current, order.or(opening_order)));
            }
            None => {
                self.ring_bonds.insert(number, (current, order));
            }
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Option<u16> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos]).ok()?.parse().ok()
    }

    fn parse_organic_atom(&mut self) -> Result<Atom> {
        let start = self.pos;
        let ch = self.input[start];
        let (symbol, aromatic, len) = match (ch, self.peek_at(1)) {
            (b'C', Some(b'l')) => ("Cl", false, 2),
            (b'B', Some(b'r')) => ("Br", false, 2),
            (b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I', _) => (upper_symbol(ch), false, 1),
            (b'b' | b'c' | b'n' | b'o' | b'p' | b's', _) => (upper_symbol(ch.to_ascii_uppercase()), true, 1),
            _ => return Err(self.unexpected()),
        };
        let element = element_by_symbol(symbol)
            .ok_or_else(|| SmilesError::UnknownElement(symbol.to_string()))?;
        self.pos += len;

        let mut atom = Atom::new(element.atomic_number);
        atom.is_aromatic = aromatic;
        Ok(atom)
    }

    fn parse_bracket_atom(&mut self) -> Result<Atom> {
        let start = self.pos;
        self.pos += 1;

        let digits = self.pos;
        let isotope = self.parse_number();
        if isotope.is_none() && self.pos > digits {
            return Err(SmilesError::IsotopeOutOfRange(digits));
        }

        let (atomic_number, aromatic) = self.parse_bracket_symbol(start)?;
        let mut atom = Atom::new(atomic_number);
        atom.is_aromatic = aromatic;
        atom.isotope = isotope;

        // Chirality: @, @@, @TH1, @SP2, @OH12 ...
        if self.peek() == Some(b'@') {
            self.pos += 1;
            if self.peek() == Some(b'@') {
                self.pos += 1;
            } else if let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) {
                if matches!(&[a, b], b"TH" | b"AL" | b"SP" | b"TB" | b"OH") {
                    self.pos += 2;
                    self.parse_number();
                }
            }
        }

        if self.peek() == Some(b'H') {
            self.pos += 1;
            atom.hydrogens = match self.peek() {
                Some(d @ b'0'..=b'9') => {
                    self.pos += 1;
                    d - b'0'
                }
                _ => 1,
            };
        }

        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let unit: i8 = if sign == b'+' { 1 } else { -1 };
            let mut magnitude: i8 = 1;
            if let Some(n) = self.parse_number() {
                magnitude = n.min(15) as i8;
            } else {
                while self.peek() == Some(sign) {
                    self.pos += 1;
                    magnitude += 1;
                }
            }
            atom.formal_charge = unit * magnitude;
        }

        // Atom class is read and ignored
        if self.peek() == Some(b':') {
            self.pos += 1;
            self.parse_number().ok_or_else(|| self.unexpected())?;
        }

        match self.peek() {
            Some(b']') => {
                self.pos += 1;
                Ok(atom)
            }
            Some(_) => Err(self.unexpected()),
            None => Err(SmilesError::UnterminatedBracket(start)),
        }
    }

    fn parse_bracket_symbol(&mut self, start: usize) -> Result<(u8, bool)> {
        let first = self.peek().ok_or(SmilesError::UnterminatedBracket(start))?;
        if first == b'*' {
            self.pos += 1;
            return Ok((element::DUMMY, false));
        }
        if first.is_ascii_lowercase() {
            for candidate in ["se", "as", "te"] {
                if self.input[self.pos..].starts_with(candidate.as_bytes()) {
                    self.pos += 2;
                    let symbol = capitalize(candidate);
                    let element = element_by_symbol(&symbol).ok_or(SmilesError::UnknownElement(symbol))?;
                    return Ok((element.atomic_number, true));
                }
            }
            if matches!(first, b'b' | b'c' | b'n' | b'o' | b'p' | b's') {
                self.pos += 1;
                let element = element_by_symbol(upper_symbol(first.to_ascii_uppercase()))
                    .ok_or_else(|| SmilesError::UnknownElement((first as char).to_string()))?;
                return Ok((element.atomic_number, true));
            }
            return Err(self.unexpected());
        }
        if !first.is_ascii_uppercase() {
            return Err(self.unexpected());
        }

        if let Some(second) = self.peek_at(1).filter(u8::is_ascii_lowercase) {
            let two = format!("{}{}", first as char, second as char);
            if let Some(element) = element_by_symbol(&two) {
                self.pos += 2;
                return Ok((element.atomic_number, false));
            }
        }
        let one = (first as char).to_string();
        let element = element_by_symbol(&one).ok_or(SmilesError::UnknownElement(one))?;
        self.pos += 1;
        Ok((element.atomic_number, false))
    }

    fn finish(&mut self) -> Result<()> {
        if let Some((_, pos)) = self.pending_bond {
            return Err(SmilesError::DanglingBond(pos));
        }
        if !self.stack.is_empty() {
            return Err(SmilesError::UnbalancedParens);
        }
        if let Some((&number, _)) = self.ring_bonds.iter().next() {
            return Err(SmilesError::UnclosedRing(number));
        }
        if self.atoms.is_empty() {
            return Err(SmilesError::Empty);
        }
        Ok(())
    }

    /// Resolve implicit bond orders, assign implicit hydrogens, check
    /// valences and fold explicit hydrogen atoms into their neighbors.
    fn into_graph(self) -> Result<(Vec<Atom>, Vec<Bond>)> {
        let SmilesParser { atoms: parsed, bonds: raw_bonds, .. } = self;

        let bonds: Vec<Bond> = raw_bonds
            .into_iter()
            .map(|(a, b, order)| {
                let order = order.unwrap_or(
                    if parsed[a].atom.is_aromatic && parsed[b].atom.is_aromatic {
                        BondOrder::Aromatic
                    } else {
                        BondOrder::Single
                    },
                );
                Bond::new(a, b, order)
            })
            .collect();

        let mut atoms: Vec<Atom> = Vec::with_capacity(parsed.len());
        for (index, p) in parsed.iter().enumerate() {
            let mut atom = p.atom.clone();
            let incident = bonds.iter().filter(|b| b.a == index || b.b == index);
            if p.bracket {
                let used: f64 = incident.map(|b| b.order.as_f64()).sum();
                check_valence(index, &atom, used + atom.hydrogens as f64)?;
            } else {
                let used: u8 = incident
                    .map(|b| match b.order {
                        BondOrder::Aromatic => 1,
                        other => other.as_f64() as u8,
                    })
                    .sum();
                atom.hydrogens = implicit_hydrogens(index, &atom, used)?;
            }
            atoms.push(atom);
        }

        // Fold plain [H] atoms hanging off a heavy atom
        let foldable: Vec<bool> = atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| {
                if atom.atomic_number != element::HYDROGEN || atom.isotope.is_some() || atom.formal_charge != 0 {
                    return false;
                }
                let mut incident = bonds.iter().filter(|b| b.a == i || b.b == i);
                match (incident.next(), incident.next()) {
                    (Some(b), None) => {
                        b.order == BondOrder::Single && atoms[b.other(i)].atomic_number != element::HYDROGEN
                    }
                    _ => false,
                }
            })
            .collect();

        let mut remap = vec![usize::MAX; atoms.len()];
        let mut kept = Vec::with_capacity(atoms.len());
        for (i, atom) in atoms.iter().enumerate() {
            if !foldable[i] {
                remap[i] = kept.len();
                kept.push(atom.clone());
            }
        }
        let mut kept_bonds = Vec::with_capacity(bonds.len());
        for bond in &bonds {
            match (foldable[bond.a], foldable[bond.b]) {
                (false, false) => kept_bonds.push(Bond::new(remap[bond.a], remap[bond.b], bond.order)),
                (true, false) => add_hydrogen(&mut kept[remap[bond.b]], bond.b)?,
                (false, true) => add_hydrogen(&mut kept[remap[bond.a]], bond.a)?,
                (true, true) => {}
            }
        }
        Ok((kept, kept_bonds))
    }
}

fn add_hydrogen(atom: &mut Atom, index: usize) -> Result<()> {
    atom.hydrogens = atom
        .hydrogens
        .checked_add(1)
        .ok_or_else(|| SmilesError::TooManyHydrogens { index, symbol: atom.symbol().to_string() })?;
    Ok(())
}

fn upper_symbol(ch: u8) -> &'static str {
    match ch {
        b'B' => "B",
        b'C' => "C",
        b'N' => "N",
        b'O' => "O",
        b'P' => "P",
        b'S' => "S",
        b'F' => "F",
        _ => "I",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Implicit hydrogens for an organic-subset atom with `used` bond valence.
fn implicit_hydrogens(index: usize, atom: &Atom, used: u8) -> Result<u8> {
    let valences = element::default_valences(atom.atomic_number);
    if valences.is_empty() {
        return Ok(0);
    }
    let Some(&target) = valences.iter().find(|&&v| v >= used) else {
        if atom.is_aromatic {
            return Ok(0);
        }
        return Err(SmilesError::Valence { index, symbol: atom.symbol().to_string() });
    };
    if atom.is_aromatic {
        // One valence unit goes to the delocalized pi system
        Ok(target.saturating_sub(used).saturating_sub(1))
    } else {
        Ok(target - used)
    }
}

/// Reject bracket atoms that exceed the valence their element and charge allow.
fn check_valence(index: usize, atom: &Atom, valence: f64) -> Result<()> {
    if atom.is_aromatic {
        return Ok(());
    }
    let q = atom.formal_charge as f64;
    let max = match atom.atomic_number {
        element::CARBON => 4.0 - q.abs(),
        element::NITROGEN => 3.0 + q,
        element::OXYGEN => 2.0 + q,
        element::FLUORINE => 1.0 + q.max(0.0),
        _ => return Ok(()),
    };
    if valence > max + 1e-6 {
        return Err(SmilesError::Valence { index, symbol: atom.symbol().to_string() });
    }
    Ok(())
}
