//! ChEMBL Dashboard
//!
//! Librería de la aplicación:
//! - `config`: configuración desde variables de entorno (.env).
//! - `session`: proveedor y motor químico compartidos por los tres paneles.
//! - `dashboard`: servidor HTTP con los paneles y las descargas.
//! - `errors`: errores de la aplicación y su código de salida.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod session;

pub use config::{AppConfig, CONFIG};
pub use errors::CoreError;
pub use session::DashboardSession;

/// Inicializa `env_logger` con nivel `info` salvo que `RUST_LOG` diga otra
/// cosa. Se puede llamar más de una vez.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}
