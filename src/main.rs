use std::net::SocketAddr;

use clap::Parser;

use chembl_dashboard::{dashboard, init_logging, DashboardSession, CONFIG};

#[derive(Parser, Debug)]
#[command(name = "chem-dashboard")]
#[command(about = "Panel web de ChEMBL: compuestos, bioactividad y similitud")]
struct Args {
    /// Usa los compuestos de referencia incluidos, sin red
    #[arg(long)]
    offline: bool,

    /// Dirección de escucha; por defecto CHEM_DASHBOARD_ADDR
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();
    let session = if args.offline { DashboardSession::offline(&CONFIG) } else { DashboardSession::from_config(&CONFIG) };
    let session = match session {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[chem-dashboard] {e}");
            std::process::exit(e.exit_code());
        }
    };
    let addr = args.addr.unwrap_or(CONFIG.dashboard_addr);
    if let Err(e) = dashboard::serve(addr, session).await {
        eprintln!("[chem-dashboard] {e}");
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_flag_and_address_override() {
        let args = Args::try_parse_from(["chem-dashboard", "--offline", "--addr", "0.0.0.0:9000"]).unwrap();
        assert!(args.offline);
        assert_eq!(args.addr, Some("0.0.0.0:9000".parse().unwrap()));

        let args = Args::try_parse_from(["chem-dashboard"]).unwrap();
        assert!(!args.offline && args.addr.is_none());
        assert!(Args::try_parse_from(["chem-dashboard", "--addr", "nowhere"]).is_err());
    }
}
