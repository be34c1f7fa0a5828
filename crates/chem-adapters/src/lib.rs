//! chem-adapters: presentación y exportación de los informes.
//!
//! - `table`: proyección de cada informe a filas y columnas (`Tabular`).
//! - `text`: tabla alineada para la CLI.
//! - `xlsx`: hoja de cálculo descargable.

pub mod table;
pub mod text;
pub mod xlsx;

pub use table::{Cell, Table, Tabular};
pub use text::render_text;
pub use xlsx::{to_xlsx, ExportError, XLSX_MIME};
