//! Exportación a hoja de cálculo Office Open XML (una sola hoja, cabecera en
//! negrita, celdas numéricas como números).

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::table::{Cell, Table, MISSING};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// Límite de Excel para nombres de hoja.
const MAX_SHEET_NAME: usize = 31;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Error al generar la hoja de cálculo: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("La tabla excede el tamaño de una hoja: {0}")]
    TooLarge(String),
}

pub fn to_xlsx(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet_name: String = table.sheet_name.chars().take(MAX_SHEET_NAME).collect();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name.as_str())?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, column(col)?, header.as_str(), &bold)?;
    }
    for (i, row) in table.rows.iter().enumerate() {
        let r = u32::try_from(i + 1).map_err(|_| ExportError::TooLarge(format!("{} filas", table.rows.len())))?;
        for (col, cell) in row.iter().enumerate() {
            let c = column(col)?;
            match cell {
                Cell::Text(text) => sheet.write_string(r, c, text.as_str())?,
                Cell::Number(n) => sheet.write_number(r, c, *n)?,
                Cell::Missing => sheet.write_string(r, c, MISSING)?,
            };
        }
    }
    sheet.autofit();

    let bytes = workbook.save_to_buffer()?;
    log::debug!("hoja '{}' exportada: {} filas, {} bytes", sheet_name, table.rows.len(), bytes.len());
    Ok(bytes)
}

fn column(index: usize) -> Result<u16, ExportError> {
    u16::try_from(index).map_err(|_| ExportError::TooLarge(format!("columna {index}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new("Bioactivity", &["target_chembl_id", "standard_value"]);
        table.push_row(vec![Cell::Text("CHEMBL221".into()), Cell::Number(1670.0)]);
        table.push_row(vec![Cell::Text("CHEMBL230".into()), Cell::Missing]);
        table
    }

    #[test]
    fn produces_a_zip_container() {
        let bytes = to_xlsx(&sample()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_tables_still_export_headers() {
        let table = Table::new("Similar Compounds", &["Name", "SMILES", "Similarity"]);
        assert!(to_xlsx(&table).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn long_sheet_names_are_truncated() {
        let table = Table::new("A sheet name that is far longer than Excel allows", &["x"]);
        assert!(to_xlsx(&table).is_ok());
    }
}
