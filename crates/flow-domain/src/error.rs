use thiserror::Error;

/// Errores del dominio de apparel.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),

    #[error("Entidad no encontrada: {0}")]
    NotFound(String),

    #[error("Error de serialización: {0}")]
    Serialization(String),

    #[error("Error de configuración: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Serialization(e.to_string())
    }
}
