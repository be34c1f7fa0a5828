//! Búsqueda de compuestos por nombre.
//!
//! Cada nombre es independiente: un nombre sin coincidencia o un fallo del
//! proveedor queda registrado en su propia entrada y el lote continúa. Una
//! estructura que no se puede dibujar no impide mostrar las propiedades.

use chem_domain::{compare_identifiers, CompoundRecord, DomainError};
use chem_providers::ChemDataProvider;
use chemengine::ChemEngine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompoundOutcome {
    Found {
        record: CompoundRecord,
        /// SVG de la estructura, si existe y se pudo interpretar.
        depiction: Option<String>,
        /// Motivo por el que no hay depicción teniendo SMILES.
        structure_error: Option<String>,
        /// Otros identificadores que coincidían con el mismo nombre.
        alternatives: Vec<String>,
    },
    NotFound,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundLookup {
    pub name: String,
    pub outcome: CompoundOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompoundLookupReport {
    pub id: Uuid,
    pub entries: Vec<CompoundLookup>,
    pub generated_at: DateTime<Utc>,
}

impl CompoundLookupReport {
    /// Registros encontrados, en el orden de entrada.
    pub fn found(&self) -> impl Iterator<Item = &CompoundRecord> {
        self.entries.iter().filter_map(|e| match &e.outcome {
                               CompoundOutcome::Found { record, .. } => Some(record),
                               _ => None,
                           })
    }

    pub fn not_found(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, CompoundOutcome::NotFound))
            .map(|e| e.name.as_str())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
                               CompoundOutcome::Failed { reason } => Some((e.name.as_str(), reason.as_str())),
                               _ => None,
                           })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Nombres de una entrada multilínea: recorta cada línea e ignora las vacías.
pub fn parse_names(input: &str) -> Vec<String> {
    input.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect()
}

/// Elige el registro de identificador más bajo (orden por sufijo numérico)
/// y devuelve el resto de identificadores como alternativas.
pub fn select_preferred(mut records: Vec<CompoundRecord>) -> Option<(CompoundRecord, Vec<String>)> {
    records.sort_by(|a, b| compare_identifiers(&a.chembl_id, &b.chembl_id));
    let mut iter = records.into_iter();
    let first = iter.next()?;
    Some((first, iter.map(|r| r.chembl_id).collect()))
}

pub async fn lookup_compounds<P, S>(provider: &P,
                                    engine: &ChemEngine,
                                    names: &[S],
                                    depiction_size: u32)
                                    -> Result<CompoundLookupReport, DomainError>
    where P: ChemDataProvider + ?Sized,
          S: AsRef<str>
{
    let names: Vec<&str> = names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        return Err(DomainError::ValidationError("no se indicó ningún nombre de compuesto".into()));
    }

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let outcome = match provider.find_compounds_by_name(name).await {
            Err(err) => {
                log::warn!("búsqueda de '{}' falló: {}", name, err);
                CompoundOutcome::Failed { reason: DomainError::from(err).to_string() }
            }
            Ok(records) => match select_preferred(records) {
                None => CompoundOutcome::NotFound,
                Some((record, alternatives)) => {
                    if !alternatives.is_empty() {
                        log::info!("'{}' es ambiguo: se usa {} (también {:?})", name, record.chembl_id, alternatives);
                    }
                    let (depiction, structure_error) = match record.molecule(engine) {
                        None => (None, None),
                        Some(Ok(mol)) => (Some(engine.depict_svg(&mol, depiction_size)), None),
                        Some(Err(err)) => (None, Some(err.to_string())),
                    };
                    CompoundOutcome::Found { record, depiction, structure_error, alternatives }
                }
            },
        };
        entries.push(CompoundLookup { name: name.to_string(), outcome });
    }

    Ok(CompoundLookupReport { id: Uuid::new_v4(), entries, generated_at: Utc::now() })
}
