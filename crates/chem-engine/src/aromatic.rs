//! Percepción de aromaticidad.
//!
//! Un mismo anillo puede escribirse en minúsculas (`c1ccccc1`) o con dobles
//! enlaces alternados (`C1=CC=CC=C1`). Tras el parseo se recalcula la
//! aromaticidad sobre los anillos mínimos de 5 a 7 átomos: el anillo es
//! aromático si todos sus átomos aportan electrones pi y el total es 4n+2
//! (Hückel). Sus átomos y enlaces quedan marcados como aromáticos, de modo que
//! ambas escrituras producen el mismo grafo y el mismo fingerprint.
//!
//! Un enlace aromático implícito entre dos átomos en minúscula que no forma
//! parte de ningún anillo (el enlace entre los dos fenilos del bifenilo) pasa
//! a simple.

use crate::molecule::{BondOrder, Molecule};
use crate::ring::{self, Ring};

const AROMATIC_RING_SIZES: std::ops::RangeInclusive<usize> = 5..=7;

pub fn perceive(mol: Molecule) -> Molecule {
    let in_ring = ring::ring_bonds(&mol);
    let mut aromatic_atoms = vec![false; mol.atom_count()];
    let mut aromatic_bonds = vec![false; mol.bond_count()];
    for ring in ring::smallest_rings(&mol).iter().filter(|r| is_aromatic(&mol, r, &in_ring)) {
        for &atom in &ring.atoms {
            aromatic_atoms[atom] = true;
        }
        for &bond in &ring.bonds {
            aromatic_bonds[bond] = true;
        }
    }

    let (mut atoms, mut bonds) = mol.into_parts();
    for (atom, aromatic) in atoms.iter_mut().zip(&aromatic_atoms) {
        atom.aromatic |= *aromatic;
    }
    for (idx, bond) in bonds.iter_mut().enumerate() {
        if aromatic_bonds[idx] {
            bond.order = BondOrder::Aromatic;
        } else if bond.order == BondOrder::Aromatic && !in_ring[idx] {
            bond.order = BondOrder::Single;
        }
    }
    Molecule::new(atoms, bonds)
}

fn is_aromatic(mol: &Molecule, ring: &Ring, in_ring: &[bool]) -> bool {
    if !AROMATIC_RING_SIZES.contains(&ring.size()) {
        return false;
    }
    let mut electrons = 0u32;
    for &atom in &ring.atoms {
        match pi_electrons(mol, atom, in_ring) {
            Some(e) => electrons += e as u32,
            None => return false,
        }
    }
    electrons % 4 == 2
}

/// Electrones pi que aporta un átomo de anillo, o `None` si el átomo impide
/// la aromaticidad (carbono sp3, triple enlace, heteroátomo oxidado).
fn pi_electrons(mol: &Molecule, idx: usize, in_ring: &[bool]) -> Option<u8> {
    let atom = &mol.atoms()[idx];
    let mut endocyclic_double = false;
    let mut exocyclic_double = false;
    for &(_, bond) in mol.neighbors(idx) {
        match mol.bonds()[bond].order {
            BondOrder::Double if in_ring[bond] => endocyclic_double = true,
            BondOrder::Double => exocyclic_double = true,
            BondOrder::Triple => return None,
            BondOrder::Single | BondOrder::Aromatic => {}
        }
    }
    let connections = mol.degree(idx) + atom.hydrogens as usize;

    if endocyclic_double {
        return Some(1);
    }
    if exocyclic_double {
        // c(=O), C(=O): el carbono cede su electrón al heteroátomo.
        return (atom.atomic_number == 6).then_some(0);
    }
    match (atom.atomic_number, atom.aromatic) {
        (6, true) => Some(match atom.charge {
            -1 => 2,
            1 => 0,
            _ => 1,
        }),
        (6, false) => (atom.charge == -1).then_some(2),
        (5, true) => Some(0),
        (7 | 15, true) if atom.charge > 0 => Some(1),
        (7 | 15, true) => Some(if connections >= 3 { 2 } else { 1 }),
        (7 | 15, false) => (atom.charge == 0 && connections == 3).then_some(2),
        (8 | 16 | 34, true) => Some(if atom.charge > 0 { 1 } else { 2 }),
        (8 | 16 | 34, false) => (atom.charge == 0 && mol.degree(idx) == 2).then_some(2),
        _ => None,
    }
}
