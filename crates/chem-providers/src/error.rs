//! Errores del proveedor de datos químicos.
//! Todos se reportan hacia arriba como `DomainError::ProviderUnavailable`:
//! para el usuario la causa concreta (red, estado HTTP, JSON) es un detalle.

use chem_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("undecodable response: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => Self::Status { status: status.as_u16(),
                                           url: err.url().map(|u| u.to_string()).unwrap_or_default() },
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ProviderError> for DomainError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidRequest(msg) => DomainError::ValidationError(msg),
            other => DomainError::ProviderUnavailable(other.to_string()),
        }
    }
}
