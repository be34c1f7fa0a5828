//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`). Todas las variables son opcionales; un valor que no se puede
//! interpretar se ignora con un aviso y se usa el valor por defecto.
use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use chem_domain::CandidateSet;
use chem_providers::chembl::{DEFAULT_ACTIVITY_LIMIT, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use chem_providers::ChemblConfig;
use chemengine::{DEFAULT_NBITS, DEFAULT_RADIUS};
use once_cell::sync::Lazy;

pub const DEFAULT_DEPICTION_SIZE: u32 = 250;
pub const DEFAULT_DASHBOARD_ADDR: &str = "127.0.0.1:8501";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub chembl: ChemblConfig,
    /// Caducidad de la caché de consultas; cero la desactiva.
    pub cache_ttl: Duration,
    pub fp_radius: usize,
    pub fp_bits: usize,
    pub candidates: CandidateSet,
    pub depiction_size: u32,
    pub dashboard_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables; permite probar sin tocar el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let base_url = lookup("CHEMBL_BASE_URL").map(|v| v.trim().to_string())
                                                .filter(|v| !v.is_empty())
                                                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = parse_var(&lookup, "CHEMBL_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS, |v: &u64| *v > 0);
        let activity_limit = parse_var(&lookup, "CHEMBL_ACTIVITY_LIMIT", DEFAULT_ACTIVITY_LIMIT, |v: &u32| *v > 0);
        let cache_ttl = parse_var(&lookup, "CHEM_CACHE_TTL_SECS", 0u64, |_| true);
        let fp_radius = parse_var(&lookup, "CHEM_FP_RADIUS", DEFAULT_RADIUS, |_| true);
        let fp_bits = parse_var(&lookup, "CHEM_FP_BITS", DEFAULT_NBITS, |v: &usize| *v > 0);
        let depiction_size = parse_var(&lookup, "CHEM_DEPICTION_SIZE", DEFAULT_DEPICTION_SIZE, |v: &u32| *v >= 32);
        let dashboard_addr = parse_var(&lookup,
                                       "CHEM_DASHBOARD_ADDR",
                                       SocketAddr::from(([127, 0, 0, 1], 8501)),
                                       |_| true);
        let candidates = parse_var(&lookup, "CHEM_SIMILARITY_CANDIDATES", CandidateSet::reference(), |_| true);

        Self { chembl: ChemblConfig { base_url, timeout: Duration::from_secs(timeout_secs), activity_limit },
               cache_ttl: Duration::from_secs(cache_ttl),
               fp_radius,
               fp_bits,
               candidates,
               depiction_size,
               dashboard_addr }
    }
}

fn parse_var<F, T, V>(lookup: &F, key: &str, default: T, valid: V) -> T
    where F: Fn(&str) -> Option<String>,
          T: FromStr,
          T::Err: Display,
          V: Fn(&T) -> bool
{
    let Some(raw) = lookup(key) else { return default };
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        Ok(_) => {
            log::warn!("{key}='{raw}' fuera de rango; se usa el valor por defecto");
            default
        }
        Err(e) => {
            log::warn!("{key}='{raw}' no es válido ({e}); se usa el valor por defecto");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_match_the_public_service() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.chembl.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.chembl.timeout, Duration::from_secs(30));
        assert_eq!(cfg.chembl.activity_limit, 1000);
        assert_eq!(cfg.cache_ttl, Duration::ZERO);
        assert_eq!((cfg.fp_radius, cfg.fp_bits), (2, 2048));
        assert_eq!(cfg.depiction_size, 250);
        assert_eq!(cfg.dashboard_addr.to_string(), DEFAULT_DASHBOARD_ADDR);
        assert_eq!(cfg.candidates, CandidateSet::reference());
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = config(&[("CHEMBL_BASE_URL", "http://localhost:9000/api"),
                           ("CHEM_CACHE_TTL_SECS", "120"),
                           ("CHEM_FP_BITS", "1024"),
                           ("CHEM_SIMILARITY_CANDIDATES", "aspirin, ethanol=CCO"),
                           ("CHEM_DASHBOARD_ADDR", "0.0.0.0:9000")]);
        assert_eq!(cfg.chembl.base_url, "http://localhost:9000/api");
        assert_eq!(cfg.cache_ttl, Duration::from_secs(120));
        assert_eq!(cfg.fp_bits, 1024);
        assert_eq!(cfg.candidates.names(), vec!["aspirin", "ethanol"]);
        assert_eq!(cfg.dashboard_addr.port(), 9000);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let cfg = config(&[("CHEMBL_TIMEOUT_SECS", "0"),
                           ("CHEM_FP_BITS", "lots"),
                           ("CHEM_DEPICTION_SIZE", "8"),
                           ("CHEM_SIMILARITY_CANDIDATES", " , "),
                           ("CHEMBL_BASE_URL", "  ")]);
        assert_eq!(cfg.chembl.timeout, Duration::from_secs(30));
        assert_eq!(cfg.fp_bits, 2048);
        assert_eq!(cfg.depiction_size, 250);
        assert_eq!(cfg.candidates, CandidateSet::reference());
        assert_eq!(cfg.chembl.base_url, DEFAULT_BASE_URL);
    }
}
