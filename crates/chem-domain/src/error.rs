//! Errores del dominio: la taxonomía que ven los paneles y la CLI.
use chemengine::EngineError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Nombre o identificador sin registro en el proveedor. No es fatal:
    /// se reporta en línea y el lote continúa.
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Notación que el toolkit no puede parsear.
    #[error("Estructura inválida: {0}")]
    InvalidStructure(String),
    /// Fallo de transporte o respuesta inutilizable del proveedor.
    #[error("Proveedor no disponible: {0}")]
    ProviderUnavailable(String),
    #[error("Error de validación: {0}")]
    ValidationError(String),
    #[error("Error del motor químico: {0}")]
    Engine(String),
}

impl From<EngineError> for DomainError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidStructure { .. } => DomainError::InvalidStructure(e.to_string()),
            other => DomainError::Engine(other.to_string()),
        }
    }
}
