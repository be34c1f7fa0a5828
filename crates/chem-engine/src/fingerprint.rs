//! Fingerprint circular tipo Morgan/ECFP y coeficiente de Tanimoto.
//!
//! Cada átomo parte de un identificador derivado de sus invariantes locales y
//! en cada iteración lo combina con los identificadores de sus vecinos
//! (ordenados, junto con el orden de enlace). Todos los identificadores de
//! todas las iteraciones se pliegan sobre `nbits` posiciones.

use sha2::{Digest, Sha256};

use crate::molecule::Molecule;
use crate::ring;

/// Vector de bits de longitud fija. Conserva los parámetros con los que se
/// generó: dos fingerprints sólo son comparables si coinciden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    words: Vec<u64>,
    nbits: usize,
    radius: usize,
}

impl Fingerprint {
    /// Fingerprint vacío. Una longitud 0 se eleva a 1 bit.
    pub fn new(radius: usize, nbits: usize) -> Self {
        let nbits = nbits.max(1);
        Self { words: vec![0u64; nbits.div_ceil(64)], nbits, radius }
    }

    pub fn nbits(&self) -> usize { self.nbits }
    pub fn radius(&self) -> usize { self.radius }

    pub fn set_bit(&mut self, pos: usize) {
        let pos = pos % self.nbits;
        self.words[pos / 64] |= 1u64 << (pos % 64);
    }

    pub fn get_bit(&self, pos: usize) -> bool {
        pos < self.nbits && (self.words[pos / 64] >> (pos % 64)) & 1 == 1
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// `true` si ambos fingerprints se generaron con el mismo radio y longitud.
    pub fn is_comparable(&self, other: &Fingerprint) -> bool {
        self.radius == other.radius && self.nbits == other.nbits
    }

    /// Huella SHA-256 (hex) de los bits y parámetros; útil para trazas.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.radius as u64).to_le_bytes());
        hasher.update((self.nbits as u64).to_le_bytes());
        for word in &self.words {
            hasher.update(word.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    fn intersection_and_union(&self, other: &Fingerprint) -> (u32, u32) {
        self.words.iter().zip(&other.words).fold((0, 0), |(and, or), (a, b)| {
                                                 (and + (a & b).count_ones(), or + (a | b).count_ones())
                                             })
    }
}

/// Genera el fingerprint circular de `mol` con el radio y longitud dados.
pub fn morgan_fingerprint(mol: &Molecule, radius: usize, nbits: usize) -> Fingerprint {
    let mut fp = Fingerprint::new(radius, nbits);
    let n = mol.atom_count();
    if n == 0 {
        return fp;
    }
    let in_ring = ring::ring_atoms(mol);

    let mut ids: Vec<u64> = mol.atoms()
                               .iter()
                               .enumerate()
                               .map(|(i, atom)| {
                                   [atom.atomic_number as u64,
                                    mol.degree(i) as u64,
                                    atom.hydrogens as u64,
                                    atom.charge as i64 as u64,
                                    in_ring[i] as u64,
                                    atom.aromatic as u64].into_iter()
                                                          .fold(FNV_OFFSET, fnv1a)
                               })
                               .collect();
    for id in &ids {
        fp.set_bit(fold(*id, fp.nbits));
    }

    for layer in 1..=radius {
        let next: Vec<u64> = (0..n).map(|i| {
                                       let mut env: Vec<(u64, u64)> = mol.neighbors(i)
                                                                         .iter()
                                                                         .map(|&(nb, bond)| (mol.bonds()[bond].order as u64, ids[nb]))
                                                                         .collect();
                                       env.sort_unstable();
                                       let seed = fnv1a(fnv1a(FNV_OFFSET, layer as u64), ids[i]);
                                       env.into_iter().fold(seed, |h, (order, id)| fnv1a(fnv1a(h, order), id))
                                   })
                                   .collect();
        for id in &next {
            fp.set_bit(fold(*id, fp.nbits));
        }
        ids = next;
    }
    fp
}

/// Coeficiente de Tanimoto |A∧B| / |A∨B|. Se define 0.0 cuando ambos
/// fingerprints están vacíos. Devuelve `None` si no son comparables.
pub fn tanimoto(a: &Fingerprint, b: &Fingerprint) -> Option<f64> {
    if !a.is_comparable(b) {
        return None;
    }
    let (and, or) = a.intersection_and_union(b);
    if or == 0 {
        return Some(0.0);
    }
    Some(and as f64 / or as f64)
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

fn fnv1a(hash: u64, value: u64) -> u64 {
    value.to_le_bytes().iter().fold(hash, |h, b| (h ^ *b as u64).wrapping_mul(FNV_PRIME))
}

fn fold(hash: u64, nbits: usize) -> usize {
    (hash % nbits as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    fn fp(smiles: &str) -> Fingerprint {
        morgan_fingerprint(&parse_smiles(smiles).unwrap(), 2, 2048)
    }

    #[test]
    fn bits_can_be_set_and_counted() {
        let mut fp = Fingerprint::new(2, 128);
        assert!(fp.is_empty());
        fp.set_bit(5);
        fp.set_bit(127);
        fp.set_bit(5);
        assert!(fp.get_bit(5) && fp.get_bit(127));
        assert!(!fp.get_bit(6));
        assert!(!fp.get_bit(500));
        assert_eq!(fp.count_ones(), 2);
    }

    #[test]
    fn zero_length_is_raised_to_one_bit() {
        let mut fp = Fingerprint::new(2, 0);
        assert_eq!(fp.nbits(), 1);
        fp.set_bit(7);
        assert!(fp.get_bit(0));
        assert_eq!(fp.count_ones(), 1);
    }

    #[test]
    fn kekule_and_aromatic_spellings_match() {
        assert_eq!(tanimoto(&fp("c1ccccc1"), &fp("C1=CC=CC=C1")), Some(1.0));
        assert_eq!(tanimoto(&fp("CC(=O)Oc1ccccc1C(=O)O"), &fp("CC(=O)OC1=CC=CC=C1C(=O)O")), Some(1.0));
        assert_eq!(fp("Cn1cnc2c1c(=O)n(C)c(=O)n2C"), fp("CN1C=NC2=C1C(=O)N(C)C(=O)N2C"));
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = fp("CC(=O)Oc1ccccc1C(=O)O");
        let b = fp("CC(=O)Oc1ccccc1C(=O)O");
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
        assert!(a.count_ones() > 0);
    }

    #[test]
    fn self_similarity_is_one() {
        let a = fp("c1ccccc1O");
        assert_eq!(tanimoto(&a, &a), Some(1.0));
    }

    #[test]
    fn related_molecules_score_between_zero_and_one() {
        let ethanol = fp("CCO");
        let propanol = fp("CCCO");
        let sim = tanimoto(&ethanol, &propanol).unwrap();
        assert!(sim > 0.0 && sim < 1.0, "tanimoto = {sim}");
        assert_eq!(tanimoto(&propanol, &ethanol), Some(sim));
    }

    #[test]
    fn empty_fingerprints_score_zero() {
        let a = Fingerprint::new(2, 2048);
        let b = Fingerprint::new(2, 2048);
        assert_eq!(tanimoto(&a, &b), Some(0.0));
    }

    #[test]
    fn incompatible_parameters_are_not_compared() {
        let mol = parse_smiles("CCO").unwrap();
        let a = morgan_fingerprint(&mol, 2, 2048);
        let b = morgan_fingerprint(&mol, 3, 2048);
        let c = morgan_fingerprint(&mol, 2, 1024);
        assert_eq!(tanimoto(&a, &b), None);
        assert_eq!(tanimoto(&a, &c), None);
    }

    #[test]
    fn charge_changes_the_fingerprint() {
        assert_ne!(fp("CC(=O)O"), fp("CC(=O)[O-]"));
    }
}
