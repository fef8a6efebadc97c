use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::TemplateId;

/// Registro de un envío aceptado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub seq: u64, // orden de envío dentro del ledger
    pub template_id: TemplateId,
    pub fingerprint: String,
    pub submitted_at: DateTime<Utc>,
}

/// Estado de un template respecto del envío.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateState {
    /// Construido, todavía no enviado.
    Ready,
    /// Enviado; inmutable a todos los efectos.
    Submitted(SubmissionRecord),
}

impl TemplateState {
    pub fn is_submitted(&self) -> bool {
        matches!(self, TemplateState::Submitted(_))
    }
}
