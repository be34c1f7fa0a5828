//! Percepción de anillos: pertenencia de cada átomo a algún ciclo.
//!
//! Un enlace está en un anillo si no es un puente del grafo; un átomo está en
//! un anillo si es extremo de algún enlace de anillo. Los puentes se detectan
//! con un DFS iterativo (tiempos de descubrimiento y `low-link`).
//!
//! `smallest_rings` reconstruye, para cada enlace de anillo, el ciclo más
//! corto que lo contiene; es la base de la percepción de aromaticidad.

use std::collections::VecDeque;

use crate::molecule::Molecule;

/// Anillo como lista de átomos y de los enlaces que los unen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    pub atoms: Vec<usize>,
    pub bonds: Vec<usize>,
}

impl Ring {
    pub fn size(&self) -> usize {
        self.atoms.len()
    }
}

/// `result[i] == true` si el átomo `i` pertenece a algún anillo.
pub fn ring_atoms(mol: &Molecule) -> Vec<bool> {
    let bridges = bridge_bonds(mol);
    let mut in_ring = vec![false; mol.atom_count()];
    for (idx, bond) in mol.bonds().iter().enumerate() {
        if !bridges[idx] {
            in_ring[bond.begin] = true;
            in_ring[bond.end] = true;
        }
    }
    in_ring
}

/// `result[b] == true` si el enlace `b` pertenece a algún anillo.
pub fn ring_bonds(mol: &Molecule) -> Vec<bool> {
    bridge_bonds(mol).into_iter().map(|bridge| !bridge).collect()
}

/// Anillos mínimos sin duplicados, de menor a mayor, limitados al número de
/// anillos independientes.
pub fn smallest_rings(mol: &Molecule) -> Vec<Ring> {
    let in_ring = ring_bonds(mol);
    let mut rings: Vec<Ring> = Vec::new();
    let mut seen: Vec<Vec<usize>> = Vec::new();
    for bond in (0..mol.bond_count()).filter(|b| in_ring[*b]) {
        let Some(ring) = shortest_cycle(mol, bond, &in_ring) else { continue };
        let mut key = ring.bonds.clone();
        key.sort_unstable();
        if !seen.contains(&key) {
            seen.push(key);
            rings.push(ring);
        }
    }
    rings.sort_by_key(Ring::size);
    rings.truncate(ring_count(mol));
    rings
}

/// BFS de un extremo a otro de `closing` sin usar ese enlace, sólo por
/// enlaces de anillo.
fn shortest_cycle(mol: &Molecule, closing: usize, in_ring: &[bool]) -> Option<Ring> {
    let bond = &mol.bonds()[closing];
    let (start, end) = (bond.begin, bond.end);
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; mol.atom_count()];
    let mut visited = vec![false; mol.atom_count()];
    visited[start] = true;
    let mut queue = VecDeque::from([start]);

    while let Some(atom) = queue.pop_front() {
        if atom == end {
            let mut ring = Ring { atoms: vec![end], bonds: vec![closing] };
            let mut cursor = end;
            while let Some((prev, via)) = parent[cursor] {
                ring.atoms.push(prev);
                ring.bonds.push(via);
                cursor = prev;
            }
            return Some(ring);
        }
        for &(neighbor, via) in mol.neighbors(atom) {
            if via == closing || !in_ring[via] || visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            parent[neighbor] = Some((atom, via));
            queue.push_back(neighbor);
        }
    }
    None
}

/// Número de anillos independientes (enlaces - átomos + componentes).
pub fn ring_count(mol: &Molecule) -> usize {
    let components = component_count(mol);
    (mol.bond_count() + components).saturating_sub(mol.atom_count())
}

fn bridge_bonds(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut bridges = vec![false; mol.bond_count()];
    let mut disc = vec![usize::MAX; n];
    let mut low = vec![0usize; n];
    let mut timer = 0usize;

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        // (átomo, enlace por el que se llegó, siguiente vecino a visitar)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
        disc[root] = timer;
        low[root] = timer;
        timer += 1;

        while let Some(top) = stack.last_mut() {
            let (atom, via, cursor) = *top;
            if let Some(&(neighbor, bond)) = mol.neighbors(atom).get(cursor) {
                top.2 += 1;
                if Some(bond) == via {
                    continue;
                }
                if disc[neighbor] == usize::MAX {
                    disc[neighbor] = timer;
                    low[neighbor] = timer;
                    timer += 1;
                    stack.push((neighbor, Some(bond), 0));
                } else {
                    low[atom] = low[atom].min(disc[neighbor]);
                }
            } else {
                stack.pop();
                if let (Some(bond), Some(&(parent, _, _))) = (via, stack.last()) {
                    low[parent] = low[parent].min(low[atom]);
                    if low[atom] > disc[parent] {
                        bridges[bond] = true;
                    }
                }
            }
        }
    }
    bridges
}

fn component_count(mol: &Molecule) -> usize {
    let n = mol.atom_count();
    let mut seen = vec![false; n];
    let mut components = 0;
    for start in 0..n {
        if seen[start] {
            continue;
        }
        components += 1;
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(atom) = stack.pop() {
            for &(neighbor, _) in mol.neighbors(atom) {
                if !seen[neighbor] {
                    seen[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
    }
    components
}
