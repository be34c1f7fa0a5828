//! chemengine
//!
//! Toolkit estructural nativo: parser SMILES, grafo molecular, percepción de
//! anillos y aromaticidad, fingerprint circular (Morgan), similitud de Tanimoto y depicción
//! 2D en SVG. `ChemEngine` fija los parámetros del fingerprint para que la
//! consulta y los candidatos se comparen siempre con los mismos.

use thiserror::Error;

pub mod aromatic;
pub mod depict;
pub mod element;
pub mod fingerprint;
pub mod molecule;
pub mod ring;
pub mod smiles;

pub use fingerprint::{morgan_fingerprint, tanimoto, Fingerprint};
pub use molecule::{Atom, Bond, BondOrder, Molecule};
pub use smiles::{parse_smiles, SmilesError};

/// Radio por defecto del fingerprint circular (equivalente a ECFP4).
pub const DEFAULT_RADIUS: usize = 2;
/// Longitud por defecto del fingerprint.
pub const DEFAULT_NBITS: usize = 2048;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Estructura inválida '{smiles}': {source}")]
    InvalidStructure {
        smiles: String,
        #[source]
        source: SmilesError,
    },
    #[error("Fingerprints incompatibles: radio {left_radius}/{right_radius}, bits {left_bits}/{right_bits}")]
    IncompatibleFingerprints {
        left_radius: usize,
        right_radius: usize,
        left_bits: usize,
        right_bits: usize,
    },
    #[error("Parámetros de fingerprint inválidos: radio {radius}, bits {nbits}")]
    InvalidParameters { radius: usize, nbits: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChemEngine {
    radius: usize,
    nbits: usize,
}

impl Default for ChemEngine {
    fn default() -> Self {
        Self { radius: DEFAULT_RADIUS, nbits: DEFAULT_NBITS }
    }
}

impl ChemEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fingerprint(radius: usize, nbits: usize) -> Result<Self, EngineError> {
        if nbits == 0 {
            return Err(EngineError::InvalidParameters { radius, nbits });
        }
        Ok(Self { radius, nbits })
    }

    pub fn radius(&self) -> usize { self.radius }
    pub fn nbits(&self) -> usize { self.nbits }

    pub fn parse(&self, smiles: &str) -> Result<Molecule, EngineError> {
        parse_smiles(smiles).map_err(|source| EngineError::InvalidStructure { smiles: smiles.to_string(), source })
    }

    pub fn fingerprint(&self, mol: &Molecule) -> Fingerprint {
        morgan_fingerprint(mol, self.radius, self.nbits)
    }

    pub fn similarity(&self, a: &Fingerprint, b: &Fingerprint) -> Result<f64, EngineError> {
        tanimoto(a, b).ok_or(EngineError::IncompatibleFingerprints { left_radius: a.radius(),
                                                                     right_radius: b.radius(),
                                                                     left_bits: a.nbits(),
                                                                     right_bits: b.nbits() })
    }

    /// Parsea y genera el fingerprint en un paso.
    pub fn fingerprint_smiles(&self, smiles: &str) -> Result<Fingerprint, EngineError> {
        Ok(self.fingerprint(&self.parse(smiles)?))
    }

    pub fn depict_svg(&self, mol: &Molecule, size: u32) -> String {
        depict::depict_svg(mol, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_uses_radius_two_and_2048_bits() {
        let engine = ChemEngine::new();
        assert_eq!(engine.radius(), 2);
        assert_eq!(engine.nbits(), 2048);
        let fp = engine.fingerprint_smiles("CCO").unwrap();
        assert_eq!(fp.nbits(), 2048);
        assert_eq!(fp.radius(), 2);
    }

    #[test]
    fn invalid_structure_carries_the_input() {
        let err = ChemEngine::new().parse("C1CC").unwrap_err();
        match &err {
            EngineError::InvalidStructure { smiles, source } => {
                assert_eq!(smiles, "C1CC");
                assert_eq!(*source, SmilesError::UnmatchedRingClosure(1));
            }
            other => panic!("error inesperado: {other}"),
        }
        assert!(err.to_string().starts_with("Estructura inválida 'C1CC'"));
    }

    #[test]
    fn similarity_rejects_mismatched_parameters() {
        let a = ChemEngine::new().fingerprint_smiles("CCO").unwrap();
        let b = ChemEngine::with_fingerprint(3, 1024).unwrap().fingerprint_smiles("CCO").unwrap();
        let err = ChemEngine::new().similarity(&a, &b).unwrap_err();
        assert!(matches!(err, EngineError::IncompatibleFingerprints { left_radius: 2, right_radius: 3, .. }));
    }

    #[test]
    fn zero_bits_is_rejected() {
        assert!(ChemEngine::with_fingerprint(2, 0).is_err());
    }
}
