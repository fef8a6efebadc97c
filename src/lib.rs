//! ApparelFlow
//!
//! Este crate actúa como fachada de la aplicación:
//! - Expone `config` (configuración global y logging) y `errors`.
//! - Re-exporta los crates del workspace: builder de templates (`flow_core`),
//!   modelo del producto (`flow_domain`), operaciones y recetas (`flow_ops`) y
//!   servicio remoto (`flow_service`).
//! - `generate_naomi`/`generate_linda`: construir la receta y enviarla en un
//!   solo paso.

pub mod config;
pub mod errors;

pub use flow_core;
pub use flow_domain;
pub use flow_ops;
pub use flow_service;

pub use config::{init_logging, AppConfig, CONFIG};
pub use errors::AppError;

use flow_core::SubmissionLedger;
use flow_ops::{linda_pipeline, naomi_pipeline, LindaRequest, NaomiRequest};
use flow_service::{PipelineService, PipelineSubmitter, Submission};

/// Construye la receta Naomi y la envía.
pub async fn generate_naomi<P, L>(submitter: &PipelineSubmitter<P, L>,
                                  request: &NaomiRequest,
                                  config: &AppConfig)
                                  -> Result<Submission, AppError>
    where P: PipelineService,
          L: SubmissionLedger + Send
{
    let draft = naomi_pipeline(request, &config.generation)?;
    Ok(submitter.submit(&draft.template).await?)
}

/// Construye la receta Linda y la envía.
pub async fn generate_linda<P, L>(submitter: &PipelineSubmitter<P, L>,
                                  request: &LindaRequest,
                                  config: &AppConfig)
                                  -> Result<Submission, AppError>
    where P: PipelineService,
          L: SubmissionLedger + Send
{
    let draft = linda_pipeline(request, &config.generation)?;
    Ok(submitter.submit(&draft.template).await?)
}
