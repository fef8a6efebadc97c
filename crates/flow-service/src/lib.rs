//! flow-service
//!
//! Costura asíncrona con el servicio remoto de operaciones.
//!
//! Módulos:
//! - `api`: traits `OperationsService`, `ImageService`, `PipelineService` y el
//!   helper `run_and_wait` que exige estado `finished`.
//! - `types`: ids, estados y registros que devuelve el servicio.
//! - `memory`: implementación en memoria (tests, demo y CLI).
//! - `submitter`: envío único de templates con ledger.
//! - `prepare`: flujo de preparación de prendas (llamadas directas en orden).

pub mod api;
pub mod error;
pub mod memory;
pub mod prepare;
pub mod submitter;
pub mod types;

pub use api::{run_and_wait, ImageService, OperationsService, PipelineService};
pub use error::ServiceError;
pub use memory::{InMemoryService, OperationCall, StoredPipeline};
pub use prepare::{ApparelPreparer, PreparationMode};
pub use submitter::{PipelineSubmitter, Submission};
pub use types::{CreatePipelineRequest, ImageEntity, ImageFile, OperationId, OperationRecord, OperationStatus, PipelineId};
