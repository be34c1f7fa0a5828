//! Contexto de sesión: el proveedor, el motor químico y los parámetros que
//! comparten las tres operaciones. Se construye una vez al arrancar y se pasa
//! explícitamente a cada petición; no guarda estado entre peticiones.
use std::sync::Arc;

use chem_core::{BioactivityReport, CompoundLookupReport, SimilarityReport};
use chem_domain::{CandidateSet, DomainError};
use chem_providers::{CachedProvider, ChemDataProvider, ChemblClient, InMemoryProvider};
use chemengine::ChemEngine;

use crate::config::AppConfig;
use crate::errors::CoreError;

#[derive(Clone)]
pub struct DashboardSession {
    provider: Arc<dyn ChemDataProvider>,
    engine: ChemEngine,
    candidates: CandidateSet,
    depiction_size: u32,
}

impl DashboardSession {
    pub fn new(provider: Arc<dyn ChemDataProvider>, engine: ChemEngine, candidates: CandidateSet, depiction_size: u32) -> Self {
        Self { provider, engine, candidates, depiction_size }
    }

    /// Sesión contra el servicio ChEMBL configurado, con caché si el TTL no
    /// es cero.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let client = ChemblClient::new(config.chembl.clone())?;
        let provider: Arc<dyn ChemDataProvider> = if config.cache_ttl.is_zero() {
            Arc::new(client)
        } else {
            log::info!("caché de consultas activa (TTL {:?})", config.cache_ttl);
            Arc::new(CachedProvider::new(client, config.cache_ttl))
        };
        Self::with_provider(config, provider)
    }

    /// Sesión sin red con el conjunto de compuestos de referencia.
    pub fn offline(config: &AppConfig) -> Result<Self, CoreError> {
        Self::with_provider(config, Arc::new(InMemoryProvider::with_reference_compounds()))
    }

    pub fn with_provider(config: &AppConfig, provider: Arc<dyn ChemDataProvider>) -> Result<Self, CoreError> {
        let engine = ChemEngine::with_fingerprint(config.fp_radius, config.fp_bits).map_err(|e| CoreError::Config(e.to_string()))?;
        log::info!("proveedor {} {} (fingerprint r={} bits={})",
                   provider.get_name(),
                   provider.get_version(),
                   engine.radius(),
                   engine.nbits());
        Ok(Self::new(provider, engine, config.candidates.clone(), config.depiction_size))
    }

    /// Copia de la sesión con otro conjunto de candidatos.
    pub fn with_candidates(&self, candidates: CandidateSet) -> Self {
        Self { candidates, ..self.clone() }
    }

    pub fn provider(&self) -> &dyn ChemDataProvider {
        self.provider.as_ref()
    }

    pub fn engine(&self) -> &ChemEngine {
        &self.engine
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn depiction_size(&self) -> u32 {
        self.depiction_size
    }

    pub async fn compounds<S: AsRef<str>>(&self, names: &[S]) -> Result<CompoundLookupReport, DomainError> {
        chem_core::lookup_compounds(self.provider(), &self.engine, names, self.depiction_size).await
    }

    pub async fn bioactivity(&self, chembl_id: &str) -> Result<BioactivityReport, DomainError> {
        chem_core::lookup_bioactivity(self.provider(), chembl_id).await
    }

    pub async fn similar(&self, query: &str) -> Result<SimilarityReport, DomainError> {
        chem_core::rank_similar(self.provider(), &self.engine, query, &self.candidates).await
    }
}
