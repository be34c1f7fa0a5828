//! Registro de compuesto tal como lo entrega el proveedor (identificador,
//! nombre preferido, estructura canónica y bolsa de propiedades).
use std::cmp::Ordering;
use std::fmt;

use chemengine::{ChemEngine, EngineError, Molecule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const FULL_MWT: &str = "full_mwt";
pub const ALOGP: &str = "alogp";
pub const HBA: &str = "hba";
pub const HBD: &str = "hbd";
pub const RO5_VIOLATIONS: &str = "num_ro5_violations";

/// Propiedades que se proyectan desde el proveedor, en orden de presentación.
pub const STANDARD_PROPERTIES: [&str; 5] = [FULL_MWT, ALOGP, HBA, HBD, RO5_VIOLATIONS];

/// Mapa ordenado nombre -> valor numérico o ausente.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag(IndexMap<String, Option<f64>>);

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<f64>) {
        self.0.insert(name.into(), value);
    }

    /// Valor de una propiedad; `None` si falta o si el proveedor la dejó vacía.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn molecular_weight(&self) -> Option<f64> { self.get(FULL_MWT) }
    pub fn alogp(&self) -> Option<f64> { self.get(ALOGP) }
    pub fn hba(&self) -> Option<f64> { self.get(HBA) }
    pub fn hbd(&self) -> Option<f64> { self.get(HBD) }
    pub fn ro5_violations(&self) -> Option<f64> { self.get(RO5_VIOLATIONS) }
}

impl<K: Into<String>> FromIterator<(K, Option<f64>)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, Option<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub chembl_id: String,
    pub preferred_name: Option<String>,
    /// SMILES canónico; ausente si el proveedor no tiene estructura.
    pub smiles: Option<String>,
    pub properties: PropertyBag,
}

impl CompoundRecord {
    pub fn new(chembl_id: impl Into<String>) -> Self {
        Self { chembl_id: chembl_id.into(), preferred_name: None, smiles: None, properties: PropertyBag::new() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.preferred_name = Some(name.into());
        self
    }

    pub fn with_smiles(mut self, smiles: impl Into<String>) -> Self {
        self.smiles = Some(smiles.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        self.properties.insert(name, value);
        self
    }

    /// Parsea la estructura del registro, si la tiene.
    pub fn molecule(&self, engine: &ChemEngine) -> Option<Result<Molecule, EngineError>> {
        self.smiles.as_deref().map(|s| engine.parse(s))
    }

    /// Compara nombres sin distinguir mayúsculas (filtro `iexact`).
    pub fn matches_name(&self, name: &str) -> bool {
        self.preferred_name.as_deref().is_some_and(|p| p.to_lowercase() == name.trim().to_lowercase())
    }
}

impl fmt::Display for CompoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {}>", self.chembl_id, self.preferred_name.as_deref().unwrap_or("sin nombre"))
    }
}

/// Orden determinista de identificadores ChEMBL: prefijo alfabético y luego
/// sufijo numérico (`CHEMBL25` < `CHEMBL1000`). Si no hay sufijo numérico se
/// compara el texto completo.
pub fn compare_identifiers(a: &str, b: &str) -> Ordering {
    fn split(id: &str) -> (&str, Option<u64>) {
        let digits_at = id.find(|c: char| c.is_ascii_digit()).unwrap_or(id.len());
        let (prefix, digits) = id.split_at(digits_at);
        (prefix, digits.parse().ok())
    }
    match (split(a), split(b)) {
        ((pa, Some(na)), (pb, Some(nb))) => pa.cmp(pb).then(na.cmp(&nb)),
        _ => a.cmp(b),
    }
}
