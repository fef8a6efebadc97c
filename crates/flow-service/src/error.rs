//! Errores del servicio remoto.
//! Un fallo de operación es fatal para el flujo en curso; no hay rollback.

use flow_core::TemplateError;
use flow_domain::DomainError;
use flow_ops::RecipeError;
use thiserror::Error;

use crate::types::OperationStatus;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{label} failed: {operation} ended with status {status}")]
    OperationFailed { label: String, operation: String, status: OperationStatus },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("unexpected payload: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}

impl ServiceError {
    /// Etiqueta del paso que falló, si el error viene de una operación.
    pub fn step_label(&self) -> Option<&str> {
        match self {
            ServiceError::OperationFailed { label, .. } => Some(label),
            _ => None,
        }
    }
}
