//! Demo de punta a punta contra el servicio en memoria: prepara una prenda,
//! genera con Naomi y con Linda, y muestra que un template no se reenvía.

use std::io::Cursor;
use std::sync::Arc;

use apparelflow::flow_core::InMemorySubmissionLedger;
use apparelflow::flow_domain::{ApparelItems, ModelTraits, Pose};
use apparelflow::flow_ops::{naomi_pipeline, operations, prompts, random_seed, ChipSelection, LindaRequest,
                            NaomiRequest, PromptSource};
use apparelflow::flow_service::{ApparelPreparer, ImageFile, InMemoryService, PipelineSubmitter, PreparationMode};
use apparelflow::{generate_linda, init_logging, AppError, CONFIG};
use image::{DynamicImage, ImageFormat, RgbImage};
use log::{error, info, warn};
use serde_json::json;

const COLLECTION_ID: &str = "personal-collection";

fn sample_photo(width: u32, height: u32) -> Result<ImageFile, AppError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height)).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                                                         .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
    Ok(ImageFile { name: "garment.png".into(),
                   bytes })
}

/// Respuestas fijas para GPT y detección.
fn demo_service() -> InMemoryService {
    let svc = InMemoryService::new();
    svc.on(operations::GPT, |_| {
           json!({"data": {
               "description": "white cotton t-shirt",
               "productCategory": "t-shirt",
               "hasHuman": false,
               "prompt": "smiling model in a white t-shirt, studio light, ultra realistic"
           }})
       });
    svc.on(operations::OBJECT_DETECTION, |_| json!({"data": [[40.0, 52.5, 760.0, 1130.2]]}));
    svc
}

async fn run() -> Result<(), AppError> {
    let config = &*CONFIG;
    let svc = Arc::new(demo_service());
    let submitter = PipelineSubmitter::new(svc.clone(), InMemorySubmissionLedger::new());
    let preparer = ApparelPreparer::new(svc.as_ref(), &config.processing);

    // Naomi: prenda recortada y centrada
    let mut naomi_items = ApparelItems::new();
    let id = preparer.add_item(&mut naomi_items, sample_photo(2400, 3200)?, PreparationMode::Cutout).await?;
    let item = naomi_items.get(id).cloned().ok_or_else(|| AppError::Config("prepared item vanished".into()))?;
    info!("naomi item ready: {}", serde_json::to_string(&item).unwrap_or_default());

    let naomi = NaomiRequest { item,
                               pose: Some(Pose { id: "pose-front".into(),
                                                 preview_image_id: "pose-front-preview".into() }),
                               size: apparelflow::flow_domain::ImageSize::new(832, 1216)?,
                               aspect_ratio: "2:3".parse()?,
                               prompt: PromptSource::Generate { instructions:
                                                                    "Propose prompt to generate attractive photo of a model wearing t-shirt. Return it in JSON format like { prompt }".into() },
                               chips: ChipSelection { model: Some(ModelTraits { age: "adult".into(),
                                                                                gender: "female".into(),
                                                                                model: "default".into() }),
                                                      background: Some("studio".into()),
                                                      prompt: None },
                               seed: random_seed(),
                               collection_id: COLLECTION_ID.into() };
    let draft = naomi_pipeline(&naomi, &config.generation)?;
    let submission = submitter.submit(&draft.template).await?;
    info!("naomi pipeline {} ({} steps)", submission.pipeline_id, draft.template.len());

    match submitter.submit(&draft.template).await {
        Ok(_) => warn!("template {} was accepted twice", draft.template.id()),
        Err(e) => info!("resubmission rejected: {e}"),
    }

    // Linda: sólo descripción
    let mut linda_items = ApparelItems::new();
    let id = preparer.add_item(&mut linda_items, sample_photo(1000, 1000)?, PreparationMode::Describe).await?;
    let item = linda_items.get(id).cloned().ok_or_else(|| AppError::Config("prepared item vanished".into()))?;
    let linda = LindaRequest { item,
                               size: apparelflow::flow_domain::ImageSize::new(896, 1152)?,
                               aspect_ratio: "3:4".parse()?,
                               prompt: PromptSource::Generate { instructions: prompts::LINDA_PROMPT_INSTRUCTIONS.into() },
                               chips: ChipSelection::default(),
                               seed: random_seed(),
                               collection_id: COLLECTION_ID.into() };
    let submission = generate_linda(&submitter, &linda, config).await?;
    info!("linda pipeline {}", submission.pipeline_id);

    for record in submitter.submissions().await {
        info!("submission #{} template={} fingerprint={} at {}",
              record.seq,
              record.template_id,
              record.fingerprint,
              record.submitted_at.to_rfc3339());
    }
    info!("remote operations run directly: {}", svc.calls().len());
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging(&CONFIG);
    if let Err(e) = run().await {
        error!("demo failed: {e}");
        std::process::exit(1);
    }
}
