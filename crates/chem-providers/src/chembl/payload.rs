//! Estructuras de respuesta de la API REST de ChEMBL.
//!
//! ChEMBL publica muchas magnitudes numéricas como cadenas ("180.16") y omite
//! o anula secciones completas cuando no hay datos; la decodificación es
//! tolerante con ambas cosas.

use chem_domain::compound::STANDARD_PROPERTIES;
use chem_domain::{BioactivityRecord, CompoundRecord, PropertyBag};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct MoleculePage {
    #[serde(default)]
    pub molecules: Vec<MoleculeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MoleculeEntry {
    pub molecule_chembl_id: String,
    #[serde(default)]
    pub pref_name: Option<String>,
    #[serde(default)]
    pub molecule_structures: Option<MoleculeStructures>,
    #[serde(default)]
    pub molecule_properties: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct MoleculeStructures {
    #[serde(default)]
    pub canonical_smiles: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityPage {
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub target_chembl_id: Option<String>,
    #[serde(default)]
    pub target_organism: Option<String>,
    #[serde(default)]
    pub standard_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub standard_value: Option<f64>,
    #[serde(default)]
    pub standard_units: Option<String>,
}

/// Número, cadena numérica o nulo. Cualquier otra cosa se trata como ausente.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where D: Deserializer<'de>
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

impl From<MoleculeEntry> for CompoundRecord {
    fn from(entry: MoleculeEntry) -> Self {
        let props = entry.molecule_properties.unwrap_or_default();
        // Las cinco propiedades estándar siempre presentes, aunque sea sin valor.
        let properties: PropertyBag =
            STANDARD_PROPERTIES.iter()
                               .map(|key| (*key, props.get(*key).and_then(number_from_value)))
                               .collect();
        CompoundRecord { chembl_id: entry.molecule_chembl_id,
                         preferred_name: entry.pref_name.filter(|n| !n.trim().is_empty()),
                         smiles: entry.molecule_structures
                                      .and_then(|s| s.canonical_smiles)
                                      .filter(|s| !s.trim().is_empty()),
                         properties }
    }
}

impl From<ActivityEntry> for BioactivityRecord {
    fn from(entry: ActivityEntry) -> Self {
        BioactivityRecord { target_chembl_id: entry.target_chembl_id,
                            target_organism: entry.target_organism,
                            standard_type: entry.standard_type,
                            standard_value: entry.standard_value,
                            standard_units: entry.standard_units }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_with_string_properties_is_decoded() {
        let json = r#"{
            "molecules": [{
                "molecule_chembl_id": "CHEMBL25",
                "pref_name": "ASPIRIN",
                "molecule_structures": {"canonical_smiles": "CC(=O)Oc1ccccc1C(=O)O"},
                "molecule_properties": {"full_mwt": "180.16", "alogp": "1.31", "hba": 3, "hbd": "1", "num_ro5_violations": 0}
            }],
            "page_meta": {"total_count": 1}
        }"#;
        let page: MoleculePage = serde_json::from_str(json).unwrap();
        let record = CompoundRecord::from(page.molecules.into_iter().next().unwrap());
        assert_eq!(record.chembl_id, "CHEMBL25");
        assert_eq!(record.preferred_name.as_deref(), Some("ASPIRIN"));
        assert_eq!(record.properties.molecular_weight(), Some(180.16));
        assert_eq!(record.properties.alogp(), Some(1.31));
        assert_eq!(record.properties.hba(), Some(3.0));
        assert_eq!(record.properties.hbd(), Some(1.0));
        assert_eq!(record.properties.ro5_violations(), Some(0.0));
    }

    #[test]
    fn missing_sections_yield_absent_values() {
        let json = r#"{"molecules": [{"molecule_chembl_id": "CHEMBL1", "pref_name": null,
                       "molecule_structures": null, "molecule_properties": null}]}"#;
        let page: MoleculePage = serde_json::from_str(json).unwrap();
        let record = CompoundRecord::from(page.molecules.into_iter().next().unwrap());
        assert!(record.smiles.is_none());
        assert!(record.preferred_name.is_none());
        assert_eq!(record.properties.len(), STANDARD_PROPERTIES.len());
        assert!(record.properties.iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn activity_value_accepts_number_string_and_null() {
        let json = r#"{"activities": [
            {"target_chembl_id": "CHEMBL204", "target_organism": "Homo sapiens", "standard_type": "IC50", "standard_value": "12.5", "standard_units": "nM"},
            {"target_chembl_id": "CHEMBL205", "standard_type": "Ki", "standard_value": 3},
            {"target_chembl_id": "CHEMBL206", "standard_value": null},
            {"standard_value": "n/a"}
        ]}"#;
        let page: ActivityPage = serde_json::from_str(json).unwrap();
        let values: Vec<Option<f64>> = page.activities.iter().map(|a| a.standard_value).collect();
        assert_eq!(values, vec![Some(12.5), Some(3.0), None, None]);
        let record = BioactivityRecord::from(page.activities.into_iter().next().unwrap());
        assert_eq!(record.target_organism.as_deref(), Some("Homo sapiens"));
        assert_eq!(record.standard_units.as_deref(), Some("nM"));
    }

    #[test]
    fn empty_pages_decode_to_empty_lists() {
        let page: MoleculePage = serde_json::from_str(r#"{"page_meta": {}}"#).unwrap();
        assert!(page.molecules.is_empty());
        let page: ActivityPage = serde_json::from_str(r#"{"activities": []}"#).unwrap();
        assert!(page.activities.is_empty());
    }
}
