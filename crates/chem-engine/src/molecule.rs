//! Grafo molecular en memoria producido por el parser SMILES.

use std::fmt;

/// Orden de enlace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single = 1,
    Double = 2,
    Triple = 3,
    Aromatic = 4,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub atomic_number: u8,
    pub charge: i8,
    pub isotope: Option<u16>,
    pub aromatic: bool,
    /// Hidrógenos implícitos (o declarados, en átomos entre corchetes).
    pub hydrogens: u8,
    /// `true` si el átomo se escribió entre corchetes (`[NH4+]`).
    pub bracket: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub begin: usize,
    pub end: usize,
    pub order: BondOrder,
}

#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// adjacency[i] = [(vecino, índice de enlace)]
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (idx, bond) in bonds.iter().enumerate() {
            adjacency[bond.begin].push((bond.end, idx));
            adjacency[bond.end].push((bond.begin, idx));
        }
        Self { atoms, bonds, adjacency }
    }

    pub fn atoms(&self) -> &[Atom] { &self.atoms }
    pub fn bonds(&self) -> &[Bond] { &self.bonds }
    pub fn atom_count(&self) -> usize { self.atoms.len() }
    pub fn bond_count(&self) -> usize { self.bonds.len() }

    /// Vecinos de un átomo junto con el índice del enlace que los une.
    pub fn neighbors(&self, atom: usize) -> &[(usize, usize)] {
        &self.adjacency[atom]
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    pub(crate) fn into_parts(self) -> (Vec<Atom>, Vec<Bond>) {
        (self.atoms, self.bonds)
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<molecule: {} atoms, {} bonds>", self.atom_count(), self.bond_count())
    }
}
