use chem_adapters::ExportError;
use chem_domain::DomainError;
use chem_providers::ProviderError;
use thiserror::Error;

/// Errores de la aplicación (panel web y CLI).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("{0}")]
    Domain(#[from] DomainError),
    #[error("Error del proveedor: {0}")]
    Provider(#[from] ProviderError),
    #[error("{0}")]
    Export(#[from] ExportError),
}

impl CoreError {
    /// Código de salida de la CLI: 2 uso, 4 no encontrado o estructura
    /// inválida, 5 fallo del proveedor o de la exportación.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::Config(_) | CoreError::Domain(DomainError::ValidationError(_)) => 2,
            CoreError::Domain(DomainError::NotFound(_)) | CoreError::Domain(DomainError::InvalidStructure(_)) => 4,
            _ => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_internal_variant_format() {
        let err = CoreError::Internal("algo malo".into());
        assert_eq!(err.to_string(), "Error interno: algo malo");
    }

    #[test]
    fn test_io_variant_from() {
        let io_err = std::io::Error::other("falló IO");
        let err: CoreError = io_err.into();
        assert_eq!(err.to_string(), "Error en IO: falló IO");
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err: CoreError = DomainError::InvalidStructure("C1CC".into()).into();
        assert_eq!(err.to_string(), "Estructura inválida: C1CC");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CoreError::Config("x".into()).exit_code(), 2);
        assert_eq!(CoreError::from(DomainError::ValidationError("x".into())).exit_code(), 2);
        assert_eq!(CoreError::from(DomainError::NotFound("x".into())).exit_code(), 4);
        assert_eq!(CoreError::from(DomainError::ProviderUnavailable("x".into())).exit_code(), 5);
        assert_eq!(CoreError::from(ProviderError::Transport("x".into())).exit_code(), 5);
    }
}
