//! Proyección tabular de los informes.
//!
//! Las tres vistas del panel (compuestos, bioactividad y similitud) se reducen
//! a una `Table` con nombre de hoja, cabeceras y filas de celdas. La misma
//! tabla alimenta la vista en pantalla, la salida de texto y la exportación.

use chem_core::{BioactivityReport, CompoundLookupReport, CompoundOutcome, SimilarityReport};
use serde::Serialize;

/// Texto mostrado para cualquier valor ausente.
pub const MISSING: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Missing, |v| Cell::Text(v.to_string()))
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Number)
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(t) => t.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Missing => MISSING.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet_name: &str, headers: &[&str]) -> Self {
        Self { sheet_name: sheet_name.to_string(),
               headers: headers.iter().map(|h| h.to_string()).collect(),
               rows: Vec::new() }
    }

    /// Añade una fila; debe tener tantas celdas como cabeceras.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Informe que puede mostrarse como tabla y descargarse como hoja de cálculo.
pub trait Tabular {
    fn to_table(&self) -> Table;
    /// Nombre de fichero sugerido para la descarga.
    fn export_file_name(&self) -> String;
}

pub const COMPOUND_SHEET: &str = "Compound Properties";
pub const COMPOUND_HEADERS: [&str; 8] =
    ["Compound Name", "ChEMBL ID", "SMILES", "Molecular Weight", "AlogP", "HBA", "HBD", "RO5 Violations"];
pub const COMPOUND_FILE_NAME: &str = "chembl_compound_data.xlsx";

pub const BIOACTIVITY_SHEET: &str = "Bioactivity";
pub const BIOACTIVITY_HEADERS: [&str; 5] =
    ["target_chembl_id", "target_organism", "standard_type", "standard_value", "standard_units"];

pub const SIMILARITY_SHEET: &str = "Similar Compounds";
pub const SIMILARITY_HEADERS: [&str; 3] = ["Name", "SMILES", "Similarity"];
pub const SIMILARITY_FILE_NAME: &str = "similar_compounds.xlsx";

pub fn bioactivity_file_name(chembl_id: &str) -> String {
    let safe: String = chembl_id.trim()
                                .chars()
                                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                                .collect();
    format!("{safe}_bioactivity.xlsx")
}

impl Tabular for CompoundLookupReport {
    /// Sólo entran los nombres encontrados; los no encontrados se avisan aparte.
    fn to_table(&self) -> Table {
        let mut table = Table::new(COMPOUND_SHEET, &COMPOUND_HEADERS);
        for entry in &self.entries {
            let CompoundOutcome::Found { record, .. } = &entry.outcome else { continue };
            let props = &record.properties;
            table.push_row(vec![Cell::Text(entry.name.clone()),
                                Cell::Text(record.chembl_id.clone()),
                                Cell::text(record.smiles.as_deref()),
                                Cell::number(props.molecular_weight()),
                                Cell::number(props.alogp()),
                                Cell::number(props.hba()),
                                Cell::number(props.hbd()),
                                Cell::number(props.ro5_violations())]);
        }
        table
    }

    fn export_file_name(&self) -> String {
        COMPOUND_FILE_NAME.to_string()
    }
}

impl Tabular for BioactivityReport {
    fn to_table(&self) -> Table {
        let mut table = Table::new(BIOACTIVITY_SHEET, &BIOACTIVITY_HEADERS);
        for r in &self.records {
            table.push_row(vec![Cell::text(r.target_chembl_id.as_deref()),
                                Cell::text(r.target_organism.as_deref()),
                                Cell::text(r.standard_type.as_deref()),
                                Cell::number(r.standard_value),
                                Cell::text(r.standard_units.as_deref())]);
        }
        table
    }

    fn export_file_name(&self) -> String {
        bioactivity_file_name(&self.chembl_id)
    }
}

impl Tabular for SimilarityReport {
    fn to_table(&self) -> Table {
        let mut table = Table::new(SIMILARITY_SHEET, &SIMILARITY_HEADERS);
        for r in &self.results {
            table.push_row(vec![Cell::Text(r.name.clone()), Cell::Text(r.smiles.clone()), Cell::Number(r.display_score())]);
        }
        table
    }

    fn export_file_name(&self) -> String {
        SIMILARITY_FILE_NAME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_display_as_na() {
        assert_eq!(Cell::number(None).display(), "N/A");
        assert_eq!(Cell::text(None).display(), "N/A");
        assert_eq!(Cell::number(Some(180.16)).display(), "180.16");
        assert_eq!(Cell::number(Some(3.0)).display(), "3");
    }

    #[test]
    fn cells_serialize_as_plain_json_values() {
        let row = vec![Cell::Text("a".into()), Cell::Number(1.5), Cell::Missing];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"["a",1.5,null]"#);
    }

    #[test]
    fn bioactivity_file_name_is_sanitized() {
        assert_eq!(bioactivity_file_name(" CHEMBL25 "), "CHEMBL25_bioactivity.xlsx");
        assert_eq!(bioactivity_file_name("../x"), "___x_bioactivity.xlsx");
    }
}
