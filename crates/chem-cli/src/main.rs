mod commands;

use clap::Parser;

use chembl_dashboard::{init_logging, DashboardSession, CONFIG};
use commands::Command;

#[derive(Parser)]
#[command(name = "chem-cli")]
#[command(about = "Consultas ChEMBL desde la terminal: compuestos, bioactividad y similitud")]
struct Cli {
    /// Usa los compuestos de referencia incluidos, sin red
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let label = match &cli.command {
        Command::Compounds { .. } => "compounds",
        Command::Bioactivity { .. } => "bioactivity",
        Command::Similar { .. } => "similar",
    };
    let session = if cli.offline { DashboardSession::offline(&CONFIG) } else { DashboardSession::from_config(&CONFIG) };
    let result = match session {
        Ok(session) => commands::run(cli.command, &session, &mut std::io::stdout()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("[chem {label}] {e}");
            std::process::exit(e.exit_code());
        }
    }
}
