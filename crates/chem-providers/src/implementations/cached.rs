//! Caché con caducidad delante de cualquier proveedor.
//!
//! Sólo se guardan respuestas correctas (incluidas las vacías). Un TTL cero
//! desactiva la caché y cada consulta va al proveedor interno.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chem_domain::{BioactivityRecord, CompoundRecord};
use dashmap::DashMap;

use crate::{ChemDataProvider, ProviderError};

struct Entry<T> {
    stored_at: Instant,
    value: T,
}

pub struct CachedProvider<P> {
    inner: P,
    ttl: Duration,
    compounds: DashMap<String, Entry<Vec<CompoundRecord>>>,
    activities: DashMap<String, Entry<Vec<BioactivityRecord>>>,
}

impl<P: ChemDataProvider> CachedProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self { inner, ttl, compounds: DashMap::new(), activities: DashMap::new() }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn fresh<T: Clone>(&self, map: &DashMap<String, Entry<T>>, key: &str) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }
        let hit = map.get(key).filter(|e| e.stored_at.elapsed() < self.ttl).map(|e| e.value.clone());
        if hit.is_none() {
            map.remove(key);
        }
        hit
    }

    fn store<T>(&self, map: &DashMap<String, Entry<T>>, key: String, value: T) {
        if self.is_enabled() {
            map.insert(key, Entry { stored_at: Instant::now(), value });
        }
    }
}

#[async_trait]
impl<P: ChemDataProvider> ChemDataProvider for CachedProvider<P> {
    fn get_name(&self) -> &str {
        self.inner.get_name()
    }

    fn get_version(&self) -> &str {
        self.inner.get_version()
    }

    async fn find_compounds_by_name(&self, name: &str) -> Result<Vec<CompoundRecord>, ProviderError> {
        let key = name.trim().to_lowercase();
        if let Some(hit) = self.fresh(&self.compounds, &key) {
            log::debug!("caché: compuestos '{}'", key);
            return Ok(hit);
        }
        let records = self.inner.find_compounds_by_name(name).await?;
        self.store(&self.compounds, key, records.clone());
        Ok(records)
    }

    async fn find_activities(&self, molecule_chembl_id: &str) -> Result<Vec<BioactivityRecord>, ProviderError> {
        let key = molecule_chembl_id.trim().to_string();
        if let Some(hit) = self.fresh(&self.activities, &key) {
            log::debug!("caché: actividades {}", key);
            return Ok(hit);
        }
        let records = self.inner.find_activities(molecule_chembl_id).await?;
        self.store(&self.activities, key, records.clone());
        Ok(records)
    }
}
