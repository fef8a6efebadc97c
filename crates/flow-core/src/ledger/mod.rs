//! Registro de envíos de templates.
//!
//! Un template pasa de "construido" a "enviado" una sola vez. Reenviar el mismo
//! template (mismo `TemplateId`) es un error (`TemplateError::AlreadySubmitted`).

mod store;
mod types;

pub use store::{InMemorySubmissionLedger, SubmissionLedger};
pub use types::{SubmissionRecord, TemplateState};
