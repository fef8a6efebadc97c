//! Errores del builder de templates.
//!
//! Todos son errores de uso (programador), detectados al declarar el step o al
//! registrar el envío; nunca fallos remotos.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::TemplateId;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum TemplateError {
    #[error("operation name must not be empty")]
    EmptyOperationName,
    #[error("step {step} belongs to template {found}, not to template {expected}")]
    ForeignReference { expected: TemplateId, found: TemplateId, step: String },
    #[error("step {step} was never declared in template {template}")]
    UnknownStep { template: TemplateId, step: String },
    #[error("deferred result {reference} cannot be used as a literal value")]
    DeferredInLiteralContext { reference: String },
    #[error("metadata '{key}' is not serializable: {reason}")]
    MetadataEncoding { key: String, reason: String },
    #[error("template {0} already submitted")]
    AlreadySubmitted(TemplateId),
}
