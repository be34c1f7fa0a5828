//! Proveedor en memoria: datos fijos, sin red.
//!
//! Sirve al modo `--offline` de la CLI y a las pruebas. La búsqueda por nombre
//! sigue la misma regla que ChEMBL (igualdad exacta sin distinguir
//! mayúsculas).

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chem_domain::compound::{ALOGP, FULL_MWT, HBA, HBD, RO5_VIOLATIONS};
use chem_domain::{BioactivityRecord, CompoundRecord};

use crate::{ChemDataProvider, ProviderError};

#[derive(Default)]
pub struct InMemoryProvider {
    compounds: Vec<CompoundRecord>,
    activities: HashMap<String, Vec<BioactivityRecord>>,
    unavailable: HashSet<String>,
    queries: AtomicUsize,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compound(mut self, record: CompoundRecord) -> Self {
        self.compounds.push(record);
        self
    }

    pub fn with_activities(mut self, chembl_id: impl Into<String>, records: Vec<BioactivityRecord>) -> Self {
        self.activities.entry(chembl_id.into()).or_default().extend(records);
        self
    }

    /// Simula una caída del servicio para un nombre o identificador concreto.
    pub fn with_unavailable(mut self, key: impl Into<String>) -> Self {
        self.unavailable.insert(key.into().trim().to_lowercase());
        self
    }

    /// Número de consultas atendidas (incluidas las fallidas).
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check_available(&self, key: &str) -> Result<(), ProviderError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.contains(&key.trim().to_lowercase()) {
            return Err(ProviderError::Transport(format!("servicio simulado caído para '{key}'")));
        }
        Ok(())
    }

    /// Los cinco compuestos del conjunto de referencia, con propiedades
    /// aproximadas a las publicadas por ChEMBL, y algunas actividades de
    /// ejemplo para la aspirina.
    pub fn with_reference_compounds() -> Self {
        fn compound(id: &str, name: &str, smiles: &str, props: [f64; 5]) -> CompoundRecord {
            CompoundRecord::new(id).with_name(name)
                                   .with_smiles(smiles)
                                   .with_property(FULL_MWT, Some(props[0]))
                                   .with_property(ALOGP, Some(props[1]))
                                   .with_property(HBA, Some(props[2]))
                                   .with_property(HBD, Some(props[3]))
                                   .with_property(RO5_VIOLATIONS, Some(props[4]))
        }

        Self::new().with_compound(compound("CHEMBL25", "ASPIRIN", "CC(=O)Oc1ccccc1C(=O)O", [180.16, 1.31, 3.0, 1.0, 0.0]))
                   .with_compound(compound("CHEMBL521", "IBUPROFEN", "CC(C)Cc1ccc(C(C)C(=O)O)cc1", [206.28, 3.07, 1.0, 1.0, 0.0]))
                   .with_compound(compound("CHEMBL112", "ACETAMINOPHEN", "CC(=O)Nc1ccc(O)cc1", [151.16, 1.35, 2.0, 2.0, 0.0]))
                   .with_compound(compound("CHEMBL113", "CAFFEINE", "Cn1c(=O)c2c(ncn2C)n(C)c1=O", [194.19, -1.03, 6.0, 0.0, 0.0]))
                   .with_compound(compound("CHEMBL14253", "ACETONE", "CC(C)=O", [58.08, 0.58, 1.0, 0.0, 0.0]))
                   .with_activities("CHEMBL25",
                                    vec![BioactivityRecord::new("CHEMBL221", "IC50").with_organism("Homo sapiens")
                                                                                     .with_value(1670.0, "nM"),
                                         BioactivityRecord::new("CHEMBL230", "IC50").with_organism("Homo sapiens")
                                                                                     .with_value(24000.0, "nM"),
                                         BioactivityRecord::new("CHEMBL2094253", "Inhibition").with_organism("Homo sapiens")
                                                                                             .with_value(50.0, "%"),
                                         BioactivityRecord { target_chembl_id: Some("CHEMBL612545".into()),
                                                             target_organism: None,
                                                             standard_type: Some("Activity".into()),
                                                             standard_value: None,
                                                             standard_units: None }])
    }
}

#[async_trait]
impl ChemDataProvider for InMemoryProvider {
    fn get_name(&self) -> &str {
        "in-memory"
    }

    fn get_version(&self) -> &str {
        "1"
    }

    async fn find_compounds_by_name(&self, name: &str) -> Result<Vec<CompoundRecord>, ProviderError> {
        self.check_available(name)?;
        Ok(self.compounds.iter().filter(|c| c.matches_name(name)).cloned().collect())
    }

    async fn find_activities(&self, molecule_chembl_id: &str) -> Result<Vec<BioactivityRecord>, ProviderError> {
        self.check_available(molecule_chembl_id)?;
        Ok(self.activities.get(molecule_chembl_id.trim()).cloned().unwrap_or_default())
    }
}
