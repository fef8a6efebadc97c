//! Envío de templates al servicio de pipelines.
//!
//! Un template se envía como mucho una vez: el ledger se consulta antes de la
//! llamada remota y sólo se marca si ésta tiene éxito. El lock del ledger se
//! mantiene durante la llamada, así que dos envíos concurrentes del mismo
//! template no pueden pasar ambos.

use flow_core::{SubmissionLedger, SubmissionRecord, Template, TemplateError, TemplateState};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::api::PipelineService;
use crate::error::ServiceError;
use crate::types::{CreatePipelineRequest, PipelineId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub pipeline_id: PipelineId,
    pub record: SubmissionRecord,
}

pub struct PipelineSubmitter<P, L> {
    service: P,
    ledger: Mutex<L>,
}

impl<P, L> PipelineSubmitter<P, L>
    where P: PipelineService,
          L: SubmissionLedger + Send
{
    pub fn new(service: P, ledger: L) -> Self {
        Self { service,
               ledger: Mutex::new(ledger) }
    }

    pub fn service(&self) -> &P {
        &self.service
    }

    pub async fn state(&self, template: &Template) -> TemplateState {
        self.ledger.lock().await.state(template.id())
    }

    pub async fn submissions(&self) -> Vec<SubmissionRecord> {
        self.ledger.lock().await.list()
    }

    pub async fn submit(&self, template: &Template) -> Result<Submission, ServiceError> {
        let mut ledger = self.ledger.lock().await;
        if ledger.state(template.id()).is_submitted() {
            warn!("submit:rejected template_id={} (already submitted)", template.id());
            return Err(TemplateError::AlreadySubmitted(template.id()).into());
        }
        let request = CreatePipelineRequest::from_template(template)?;
        let pipeline_id = self.service.create_pipeline(request).await?;
        let record = ledger.record(template)?;
        info!("submit:ok template_id={} pipeline_id={} steps={} fingerprint={}",
              template.id(),
              pipeline_id,
              template.len(),
              record.fingerprint);
        Ok(Submission { pipeline_id,
                        record })
    }
}
