//! Ejecución de los subcomandos sobre una sesión ya construida. La salida se
//! escribe en `out` para poder probarla; los avisos van al log.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chem_adapters::{render_text, to_xlsx, Tabular};
use chem_core::{CompoundLookupReport, CompoundOutcome};
use chem_domain::CandidateSet;
use chembl_dashboard::{CoreError, DashboardSession};
use clap::Subcommand;

pub const EXIT_OK: i32 = 0;
pub const EXIT_NOT_FOUND: i32 = 4;
pub const EXIT_FAILURE: i32 = 5;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Busca compuestos por nombre y muestra sus propiedades
    Compounds {
        /// Nombres de compuesto (también se aceptan desde --input)
        names: Vec<String>,
        /// Fichero con un nombre por línea
        #[arg(long)]
        input: Option<PathBuf>,
        /// Exporta la tabla de propiedades a xlsx
        #[arg(long)]
        export: Option<PathBuf>,
        /// Guarda la depicción SVG de cada compuesto en este directorio
        #[arg(long)]
        depict_dir: Option<PathBuf>,
    },
    /// Registros de bioactividad de un identificador ChEMBL
    Bioactivity {
        chembl_id: String,
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Ordena el conjunto de referencia por similitud con un SMILES
    Similar {
        smiles: String,
        /// Lista separada por comas; `nombre=SMILES` para estructuras literales
        #[arg(long)]
        candidates: Option<String>,
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

pub async fn run(command: Command, session: &DashboardSession, out: &mut dyn Write) -> Result<i32, CoreError> {
    match command {
        Command::Compounds { names, input, export, depict_dir } => {
            let mut all = names;
            if let Some(path) = input {
                all.extend(chem_core::parse_names(&fs::read_to_string(path)?));
            }
            let report = session.compounds(&all).await?;
            write_compounds(&report, out)?;
            if let Some(dir) = depict_dir {
                save_depictions(&report, &dir)?;
            }
            if let Some(path) = export {
                export_table(&report, &path)?;
            }
            Ok(if report.has_failures() {
                EXIT_FAILURE
            } else if report.found().next().is_none() {
                EXIT_NOT_FOUND
            } else {
                EXIT_OK
            })
        }
        Command::Bioactivity { chembl_id, export } => {
            let report = session.bioactivity(&chembl_id).await?;
            if report.is_empty() {
                writeln!(out, "No bioactivity data found.")?;
                return Ok(EXIT_NOT_FOUND);
            }
            writeln!(out, "Bioactivity Data for {}", report.chembl_id)?;
            write!(out, "{}", render_text(&report.to_table()))?;
            if let Some(path) = export {
                export_table(&report, &path)?;
            }
            Ok(EXIT_OK)
        }
        Command::Similar { smiles, candidates, export } => {
            let report = match candidates {
                Some(list) => {
                    let set: CandidateSet = list.parse()?;
                    session.with_candidates(set).similar(&smiles).await?
                }
                None => session.similar(&smiles).await?,
            };
            for skip in &report.skipped {
                log::warn!("{} omitido: {}", skip.name, skip.reason);
            }
            write!(out, "{}", render_text(&report.to_table()))?;
            if let Some(path) = export {
                export_table(&report, &path)?;
            }
            Ok(EXIT_OK)
        }
    }
}

fn write_compounds(report: &CompoundLookupReport, out: &mut dyn Write) -> std::io::Result<()> {
    for entry in &report.entries {
        match &entry.outcome {
            CompoundOutcome::Found { record, structure_error, alternatives, .. } => {
                writeln!(out, "{}: {}", entry.name, record.chembl_id)?;
                if !alternatives.is_empty() {
                    writeln!(out, "  también: {}", alternatives.join(", "))?;
                }
                if let Some(err) = structure_error {
                    writeln!(out, "  sin depicción: {err}")?;
                }
            }
            CompoundOutcome::NotFound => writeln!(out, "No compound found for '{}'.", entry.name)?,
            CompoundOutcome::Failed { reason } => writeln!(out, "{}: {reason}", entry.name)?,
        }
    }
    let table = report.to_table();
    if !table.is_empty() {
        writeln!(out)?;
        write!(out, "{}", render_text(&table))?;
    }
    Ok(())
}

fn save_depictions(report: &CompoundLookupReport, dir: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(dir)?;
    for entry in &report.entries {
        if let CompoundOutcome::Found { record, depiction: Some(svg), .. } = &entry.outcome {
            let path = dir.join(format!("{}.svg", record.chembl_id));
            fs::write(&path, svg)?;
            log::info!("depicción guardada en {}", path.display());
        }
    }
    Ok(())
}

fn export_table<T: Tabular>(report: &T, path: &Path) -> Result<(), CoreError> {
    let table = report.to_table();
    if table.is_empty() {
        log::warn!("nada que exportar a {}", path.display());
        return Ok(());
    }
    fs::write(path, to_xlsx(&table)?)?;
    log::info!("{} filas exportadas a {}", table.rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use chembl_dashboard::AppConfig;

    use super::*;

    fn session() -> DashboardSession {
        DashboardSession::offline(&AppConfig::default()).unwrap()
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("chem-cli-{}", uuid::Uuid::new_v4()))
    }

    async fn run_capture(command: Command) -> (Result<i32, CoreError>, String) {
        let mut out = Vec::new();
        let code = run(command, &session(), &mut out).await;
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn compounds_print_table_and_missing_names() {
        let (code, out) = run_capture(Command::Compounds { names: vec!["aspirin".into(), "nothing".into()],
                                                           input: None,
                                                           export: None,
                                                           depict_dir: None }).await;
        assert_eq!(code.unwrap(), EXIT_OK);
        assert!(out.contains("aspirin: CHEMBL25"));
        assert!(out.contains("No compound found for 'nothing'."));
        assert!(out.contains("Compound Name"));
    }

    #[tokio::test]
    async fn compounds_read_input_file_and_write_depictions_and_export() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("names.txt");
        fs::write(&input, "caffeine\n\n acetone \n").unwrap();
        let export = dir.join("out.xlsx");
        let svgs = dir.join("svg");
        let (code, _) = run_capture(Command::Compounds { names: vec![],
                                                         input: Some(input),
                                                         export: Some(export.clone()),
                                                         depict_dir: Some(svgs.clone()) }).await;
        assert_eq!(code.unwrap(), EXIT_OK);
        assert!(fs::read(&export).unwrap().starts_with(b"PK"));
        assert!(svgs.join("CHEMBL113.svg").exists());
        assert!(svgs.join("CHEMBL14253.svg").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn no_compound_found_exits_with_not_found() {
        let (code, _) = run_capture(Command::Compounds { names: vec!["nothing".into()],
                                                         input: None,
                                                         export: None,
                                                         depict_dir: None }).await;
        assert_eq!(code.unwrap(), EXIT_NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_bioactivity_exits_with_not_found() {
        let (code, out) = run_capture(Command::Bioactivity { chembl_id: "CHEMBL113".into(), export: None }).await;
        assert_eq!(code.unwrap(), EXIT_NOT_FOUND);
        assert_eq!(out.trim(), "No bioactivity data found.");
    }

    #[tokio::test]
    async fn similar_accepts_custom_candidates() {
        let (code, out) = run_capture(Command::Similar { smiles: "CCO".into(),
                                                         candidates: Some("ethanol=CCO, methane=C".into()),
                                                         export: None }).await;
        assert_eq!(code.unwrap(), EXIT_OK);
        let rows: Vec<&str> = out.lines().skip(2).collect();
        assert!(rows[0].starts_with("ethanol"));
        assert!(rows[1].starts_with("methane"));
    }

    #[tokio::test]
    async fn invalid_query_maps_to_exit_code_four() {
        let (code, _) = run_capture(Command::Similar { smiles: "C1CC(".into(), candidates: None, export: None }).await;
        assert_eq!(code.unwrap_err().exit_code(), 4);
    }
}
