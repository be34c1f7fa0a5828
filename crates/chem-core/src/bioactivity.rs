//! Bioactividad de un compuesto por identificador exacto.
//! Un resultado vacío no es un error: el informe queda vacío y la interfaz lo
//! presenta como "no encontrado".

use chem_domain::{BioactivityRecord, DomainError};
use chem_providers::ChemDataProvider;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct BioactivityReport {
    pub id: Uuid,
    pub chembl_id: String,
    pub records: Vec<BioactivityRecord>,
    pub generated_at: DateTime<Utc>,
}

impl BioactivityReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

pub async fn lookup_bioactivity<P>(provider: &P, chembl_id: &str) -> Result<BioactivityReport, DomainError>
    where P: ChemDataProvider + ?Sized
{
    let chembl_id = chembl_id.trim();
    if chembl_id.is_empty() {
        return Err(DomainError::ValidationError("identificador ChEMBL vacío".into()));
    }
    let records = provider.find_activities(chembl_id).await?;
    if records.is_empty() {
        log::info!("sin bioactividad registrada para {}", chembl_id);
    }
    Ok(BioactivityReport { id: Uuid::new_v4(), chembl_id: chembl_id.to_string(), records, generated_at: Utc::now() })
}
