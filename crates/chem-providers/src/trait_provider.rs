//! Contrato del proveedor de datos químicos (ChEMBL u otro equivalente).
//!
//! Ambas consultas son de sólo lectura y pueden devolver cero, uno o muchos
//! registros. Un resultado vacío no es un error: la decisión de reportarlo
//! como "no encontrado" corresponde a la operación que consulta.
use std::sync::Arc;

use async_trait::async_trait;
use chem_domain::{BioactivityRecord, CompoundRecord};

use crate::ProviderError;

#[async_trait]
pub trait ChemDataProvider: Send + Sync {
    fn get_name(&self) -> &str;
    fn get_version(&self) -> &str;

    /// Compuestos cuyo nombre preferido coincide exactamente con `name`, sin
    /// distinguir mayúsculas. Proyección: identificador, estructura y
    /// propiedades.
    async fn find_compounds_by_name(&self, name: &str) -> Result<Vec<CompoundRecord>, ProviderError>;

    /// Registros de bioactividad del compuesto con identificador exacto.
    async fn find_activities(&self, molecule_chembl_id: &str) -> Result<Vec<BioactivityRecord>, ProviderError>;
}

#[async_trait]
impl<P: ChemDataProvider + ?Sized> ChemDataProvider for Arc<P> {
    fn get_name(&self) -> &str {
        (**self).get_name()
    }

    fn get_version(&self) -> &str {
        (**self).get_version()
    }

    async fn find_compounds_by_name(&self, name: &str) -> Result<Vec<CompoundRecord>, ProviderError> {
        (**self).find_compounds_by_name(name).await
    }

    async fn find_activities(&self, molecule_chembl_id: &str) -> Result<Vec<BioactivityRecord>, ProviderError> {
        (**self).find_activities(molecule_chembl_id).await
    }
}
