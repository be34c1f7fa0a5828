//! Candidatos de similitud y resultados del ranking.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Conjunto de referencia por defecto del panel de similitud.
pub const DEFAULT_CANDIDATES: [&str; 5] = ["aspirin", "ibuprofen", "acetaminophen", "caffeine", "acetone"];

/// De dónde sale la estructura de un candidato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CandidateSource {
    /// Se consulta al proveedor por nombre exacto.
    Lookup(String),
    /// Notación SMILES literal; no requiere red.
    Notation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn lookup(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { source: CandidateSource::Lookup(name.clone()), name }
    }

    pub fn notation(name: impl Into<String>, smiles: impl Into<String>) -> Self {
        Self { name: name.into(), source: CandidateSource::Notation(smiles.into()) }
    }
}

/// Lista inyectable de candidatos. El orden de entrada define el desempate
/// del ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateSet(Vec<Candidate>);

impl CandidateSet {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }

    pub fn reference() -> Self {
        DEFAULT_CANDIDATES.iter().map(|n| Candidate::lookup(*n)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> { self.0.iter() }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.name.as_str()).collect()
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lista separada por comas: `aspirin, caffeine, etanol=CCO`. Las entradas
/// `nombre=SMILES` son notaciones literales; las demás se consultan por nombre.
impl FromStr for CandidateSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((name, smiles)) => {
                    let (name, smiles) = (name.trim(), smiles.trim());
                    if name.is_empty() || smiles.is_empty() {
                        return Err(DomainError::ValidationError(format!("candidato mal formado: '{entry}'")));
                    }
                    out.push(Candidate::notation(name, smiles));
                }
                None => out.push(Candidate::lookup(entry)),
            }
        }
        if out.is_empty() {
            return Err(DomainError::ValidationError("lista de candidatos vacía".into()));
        }
        Ok(Self(out))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub name: String,
    pub smiles: String,
    /// Tanimoto en [0, 1], sin redondear.
    pub score: f64,
}

impl SimilarityResult {
    /// Puntuación a tres decimales, como se muestra en la tabla.
    pub fn display_score(&self) -> f64 {
        (self.score * 1000.0).round() / 1000.0
    }
}

/// Motivo por el que un candidato no entra en la tabla. Nunca aborta la
/// operación completa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    NotFound,
    NoStructure,
    InvalidStructure(String),
    ProviderUnavailable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "sin coincidencia en el proveedor"),
            SkipReason::NoStructure => write!(f, "el registro no tiene estructura"),
            SkipReason::InvalidStructure(e) => write!(f, "estructura no parseable: {e}"),
            SkipReason::ProviderUnavailable(e) => write!(f, "proveedor no disponible: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub name: String,
    pub reason: SkipReason,
}
