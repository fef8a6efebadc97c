use std::collections::HashMap;

use chrono::Utc;
use log::warn;

use super::{SubmissionRecord, TemplateState};
use crate::errors::TemplateError;
use crate::model::TemplateId;
use crate::template::Template;

/// Almacenamiento append-only de envíos.
pub trait SubmissionLedger {
    /// Estado actual del template.
    fn state(&self, template_id: TemplateId) -> TemplateState;
    /// Marca el template como enviado. Falla si ya lo estaba.
    fn record(&mut self, template: &Template) -> Result<SubmissionRecord, TemplateError>;
    /// Envíos en orden de registro.
    fn list(&self) -> Vec<SubmissionRecord>;
}

#[derive(Debug, Default)]
pub struct InMemorySubmissionLedger {
    inner: HashMap<TemplateId, SubmissionRecord>,
    order: Vec<TemplateId>,
}

impl InMemorySubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionLedger for InMemorySubmissionLedger {
    fn state(&self, template_id: TemplateId) -> TemplateState {
        self.inner
            .get(&template_id)
            .cloned()
            .map(TemplateState::Submitted)
            .unwrap_or(TemplateState::Ready)
    }

    fn record(&mut self, template: &Template) -> Result<SubmissionRecord, TemplateError> {
        if self.inner.contains_key(&template.id()) {
            warn!("ledger:record rejected template_id={} (already submitted)", template.id());
            return Err(TemplateError::AlreadySubmitted(template.id()));
        }
        let record = SubmissionRecord { seq: self.order.len() as u64,
                                        template_id: template.id(),
                                        fingerprint: template.fingerprint().to_string(),
                                        submitted_at: Utc::now() };
        self.inner.insert(template.id(), record.clone());
        self.order.push(template.id());
        Ok(record)
    }

    fn list(&self) -> Vec<SubmissionRecord> {
        self.order.iter().filter_map(|id| self.inner.get(id).cloned()).collect()
    }
}
