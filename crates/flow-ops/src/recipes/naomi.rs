//! Naomi: la prenda procesada puesta sobre un modelo en la pose elegida.
//!
//! generación → detección de la prenda → máscara → máscara negada → inpaint
//! del resto de la foto → contraste → ruido → stack + colección.

use flow_core::{InputValue, TemplateBuilder};
use flow_domain::{detection_label, AiModel, ApparelItem, AspectRatio, Chips, GenerationConfig, ImageSize, NaomiMode,
                  PipelineInfo, PoseChip, Pose, SizeChip, StackInfo};
use log::debug;

use super::store::{store_result, StoreRequest};
use super::{final_prompt, seal, ChipSelection, PipelineDraft, PromptSource, RecipeError};
use crate::inputs::{ContrastInput, DeclareOperation, InpaintKateInput, NaomiInput, NegateImageInput, NoiseInput,
                    ObjectDetectionInput, SegmentMaskInput};
use crate::{operations, prompts};

const INPAINT_STRENGTH: f64 = 0.3;
const INPAINT_MASK_SPREAD: u32 = 25;
const CONTRAST: f64 = -0.15;
const NOISE_SIGMA: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct NaomiRequest {
    pub item: ApparelItem,
    pub pose: Option<Pose>,
    pub size: ImageSize,
    pub aspect_ratio: AspectRatio,
    /// `Literal` cuenta como prompt avanzado.
    pub prompt: PromptSource,
    pub chips: ChipSelection,
    pub seed: u64,
    pub collection_id: String,
}

pub fn naomi_pipeline(req: &NaomiRequest, config: &GenerationConfig) -> Result<PipelineDraft, RecipeError> {
    let image_id = req.item.image_id.as_deref().ok_or(RecipeError::MissingImage)?;
    let processed_id = req.item.processed_image_id.as_deref().ok_or(RecipeError::MissingProcessedImage)?;
    let category = req.item.category.as_deref().ok_or(RecipeError::MissingCategory)?;
    let pose = req.pose.as_ref().ok_or(RecipeError::MissingPose)?;

    let mut b = TemplateBuilder::new();
    let prompt = final_prompt(&mut b, &req.prompt, None)?;

    let youth = req.chips.model.as_ref().is_some_and(|m| m.is_youth());
    let naomi = b.run(NaomiInput { prompt: prompt.clone(),
                                   category: category.to_string(),
                                   garment_image_id: processed_id.to_string(),
                                   pose_id: pose.id.clone(),
                                   seed: req.seed,
                                   size: req.size,
                                   mode: NaomiMode::for_photo(req.item.has_human.unwrap_or(false)),
                                   lora_ids: youth.then(|| config.youth_lora_ids.clone()) })?;
    let generated = operations::image_output(&naomi);

    let detection = b.run(ObjectDetectionInput { image_id: generated.clone().into(),
                                                 labels: vec![detection_label(category)] })?;
    let mask = b.run(SegmentMaskInput { image_id: generated.clone().into(),
                                        region: operations::first_box(&detection).into(),
                                        mask_threshold: None })?;
    let negated = b.run(NegateImageInput { image_id: operations::image_output(&mask).into() })?;
    let inpaint = b.run(InpaintKateInput { image_id: generated.into(),
                                           mask_image_id: Some(operations::image_output(&negated).into()),
                                           prompt: prompts::REFINE_PHOTO.to_string(),
                                           seed: req.seed,
                                           strength: INPAINT_STRENGTH,
                                           mask_spread: Some(INPAINT_MASK_SPREAD),
                                           size: req.size })?;
    let contrast = b.run(ContrastInput { image_id: operations::image_output(&inpaint).into(),
                                         contrast: CONTRAST })?;
    let noised = b.run(NoiseInput { image_id: operations::image_output(&contrast).into(),
                                    sigma: NOISE_SIGMA })?;

    let info = StackInfo { chips: req.chips.chips(&req.item, Some(pose)),
                           size: SizeChip::new(req.size, req.aspect_ratio),
                           seed: req.seed,
                           ai_model: AiModel::Naomi };
    let stored = store_result(&mut b,
                              StoreRequest { result: operations::image_output(&noised),
                                             info: &info,
                                             prompt,
                                             attachments: vec![InputValue::from(image_id), InputValue::from(processed_id)],
                                             collection_id: &req.collection_id })?;
    debug!("recipe:naomi template={} stack={} added={} published={}",
           b.id(),
           stored.stack.id,
           stored.added.id,
           stored.published.id);

    seal(b, pipeline_info(req, pose))
}

/// Con prompt avanzado los chips sólo llevan prenda, pose y ese prompt.
fn pipeline_info(req: &NaomiRequest, pose: &Pose) -> PipelineInfo {
    let (chips, advanced) = match &req.prompt {
        PromptSource::Literal(advanced) => (Chips { apparel_image: Some(req.item.chip()),
                                                    pose: Some(PoseChip::from(pose)),
                                                    prompt: Some(advanced.clone()),
                                                    ..Chips::default() },
                                            true),
        PromptSource::Generate { .. } => (req.chips.chips(&req.item, Some(pose)), false),
    };
    PipelineInfo { title: AiModel::Naomi.title().to_string(),
                   chips,
                   advanced }
}
