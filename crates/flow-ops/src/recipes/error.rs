use flow_core::TemplateError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RecipeError {
    #[error("apparel item has no uploaded image")]
    MissingImage,
    #[error("apparel item has no processed image")]
    MissingProcessedImage,
    #[error("apparel category is unknown")]
    MissingCategory,
    #[error("no pose selected")]
    MissingPose,
    #[error("at least one variation is required")]
    NoVariations,
    #[error("stack metadata could not be encoded: {0}")]
    Encoding(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl From<serde_json::Error> for RecipeError {
    fn from(e: serde_json::Error) -> Self {
        RecipeError::Encoding(e.to_string())
    }
}
