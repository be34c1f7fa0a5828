//! Cliente HTTP de la API REST pública de ChEMBL.
//!
//! Dos consultas de sólo lectura:
//! `molecule.json?pref_name__iexact=<nombre>` y
//! `activity.json?molecule_chembl_id=<id>`, ambas con proyección `only=`
//! para no descargar el registro completo.

pub mod payload;

use std::time::Duration;

use async_trait::async_trait;
use chem_domain::{BioactivityRecord, CompoundRecord};
use serde::de::DeserializeOwned;

use crate::{ChemDataProvider, ProviderError};
use payload::{ActivityPage, MoleculePage};

pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 1000;

const MOLECULE_FIELDS: &str = "molecule_chembl_id,pref_name,molecule_structures,molecule_properties";
const ACTIVITY_FIELDS: &str = "target_chembl_id,target_organism,standard_type,standard_value,standard_units";

#[derive(Debug, Clone, PartialEq)]
pub struct ChemblConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Máximo de actividades por compuesto (una sola página).
    pub activity_limit: u32,
}

impl Default for ChemblConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(),
               timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
               activity_limit: DEFAULT_ACTIVITY_LIMIT }
    }
}

pub struct ChemblClient {
    http: reqwest::Client,
    config: ChemblConfig,
}

impl ChemblClient {
    pub fn new(config: ChemblConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(config.timeout)
                                             .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                                             .build()
                                             .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource)
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, &str)]) -> Result<T, ProviderError> {
        let url = self.endpoint(resource);
        log::debug!("GET {} {:?}", url, query);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("ChEMBL respondió {} para {}", status, url);
            return Err(ProviderError::Status { status: status.as_u16(), url });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ChemDataProvider for ChemblClient {
    fn get_name(&self) -> &str {
        "chembl"
    }

    fn get_version(&self) -> &str {
        "rest-v1"
    }

    async fn find_compounds_by_name(&self, name: &str) -> Result<Vec<CompoundRecord>, ProviderError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProviderError::InvalidRequest("nombre de compuesto vacío".into()));
        }
        let page: MoleculePage = self.get_json("molecule.json",
                                               &[("pref_name__iexact", name), ("only", MOLECULE_FIELDS), ("format", "json")])
                                     .await?;
        log::info!("ChEMBL: {} molécula(s) para '{}'", page.molecules.len(), name);
        Ok(page.molecules.into_iter().map(CompoundRecord::from).collect())
    }

    async fn find_activities(&self, molecule_chembl_id: &str) -> Result<Vec<BioactivityRecord>, ProviderError> {
        let id = molecule_chembl_id.trim();
        if id.is_empty() {
            return Err(ProviderError::InvalidRequest("identificador ChEMBL vacío".into()));
        }
        let limit = self.config.activity_limit.to_string();
        let page: ActivityPage = self.get_json("activity.json",
                                               &[("molecule_chembl_id", id),
                                                 ("only", ACTIVITY_FIELDS),
                                                 ("limit", limit.as_str()),
                                                 ("format", "json")])
                                     .await?;
        log::info!("ChEMBL: {} actividad(es) para {}", page.activities.len(), id);
        Ok(page.activities.into_iter().map(BioactivityRecord::from).collect())
    }
}
