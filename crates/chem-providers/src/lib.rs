//! Proveedores de datos químicos: el contrato `ChemDataProvider`, el cliente
//! REST de ChEMBL y las implementaciones en memoria y con caché.
pub mod chembl;
pub mod error;
pub mod implementations;
pub mod trait_provider;

pub use chembl::{ChemblClient, ChemblConfig};
pub use error::ProviderError;
pub use implementations::{CachedProvider, InMemoryProvider};
pub use trait_provider::ChemDataProvider;
