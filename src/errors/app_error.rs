use flow_core::TemplateError;
use flow_domain::DomainError;
use flow_ops::RecipeError;
use flow_service::ServiceError;
use thiserror::Error;

/// Errores de la aplicación: agrega los de cada capa.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Recipe(#[from] RecipeError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
