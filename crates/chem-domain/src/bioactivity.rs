//! Registro de bioactividad: una fila de la tabla `activity` de ChEMBL
//! proyectada a diana, organismo, tipo de ensayo, valor y unidad.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioactivityRecord {
    pub target_chembl_id: Option<String>,
    pub target_organism: Option<String>,
    pub standard_type: Option<String>,
    pub standard_value: Option<f64>,
    pub standard_units: Option<String>,
}

impl BioactivityRecord {
    pub fn new(target_chembl_id: impl Into<String>, standard_type: impl Into<String>) -> Self {
        Self { target_chembl_id: Some(target_chembl_id.into()),
               standard_type: Some(standard_type.into()),
               ..Self::default() }
    }

    pub fn with_organism(mut self, organism: impl Into<String>) -> Self {
        self.target_organism = Some(organism.into());
        self
    }

    pub fn with_value(mut self, value: f64, units: impl Into<String>) -> Self {
        self.standard_value = Some(value);
        self.standard_units = Some(units.into());
        self
    }
}
