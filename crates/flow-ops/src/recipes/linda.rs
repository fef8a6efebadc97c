//! Linda: varias fotos de la prenda a partir de la imagen original, cada una
//! refinada con inpaint y guardada en su propio stack.

use flow_core::{InputValue, TemplateBuilder};
use flow_domain::{AiModel, ApparelItem, AspectRatio, GenerationConfig, ImageSize, PipelineInfo, SizeChip, StackInfo};
use log::debug;

use super::store::{store_result, StoreRequest};
use super::{final_prompt, seal, ChipSelection, PipelineDraft, PromptSource, RecipeError};
use crate::inputs::{DeclareOperation, InpaintKateInput, LindaInput};
use crate::{operations, prompts};

const INPAINT_STRENGTH: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct LindaRequest {
    pub item: ApparelItem,
    pub size: ImageSize,
    pub aspect_ratio: AspectRatio,
    /// `Generate` usa la foto de la prenda como contexto.
    pub prompt: PromptSource,
    pub chips: ChipSelection,
    pub seed: u64,
    pub collection_id: String,
}

pub fn linda_pipeline(req: &LindaRequest, config: &GenerationConfig) -> Result<PipelineDraft, RecipeError> {
    let garment_id = req.item.image_id.as_deref().ok_or(RecipeError::MissingImage)?;
    if config.linda_variations == 0 {
        return Err(RecipeError::NoVariations);
    }

    let mut b = TemplateBuilder::new();
    let prompt = final_prompt(&mut b, &req.prompt, Some(garment_id))?;
    let linda = b.run(LindaInput { prompt: prompt.clone(),
                                   product_image_id: garment_id.to_string(),
                                   seed: req.seed,
                                   aspect_ratio: req.aspect_ratio })?;

    let info = StackInfo { chips: req.chips.chips(&req.item, None),
                           size: SizeChip::new(req.size, req.aspect_ratio),
                           seed: req.seed,
                           ai_model: AiModel::Linda };
    for i in 0..config.linda_variations {
        let inpaint = b.run(InpaintKateInput { image_id: operations::image_outputs_at(&linda, i).into(),
                                               mask_image_id: None,
                                               prompt: prompts::REFINE_PHOTO.to_string(),
                                               seed: req.seed,
                                               strength: INPAINT_STRENGTH,
                                               mask_spread: None,
                                               size: req.size })?;
        let stored = store_result(&mut b,
                                  StoreRequest { result: operations::image_output(&inpaint),
                                                 info: &info,
                                                 prompt: prompt.clone(),
                                                 attachments: vec![InputValue::from(garment_id)],
                                                 collection_id: &req.collection_id })?;
        debug!("recipe:linda template={} variation={} stack={} added={} published={}",
               b.id(),
               i,
               stored.stack.id,
               stored.added.id,
               stored.published.id);
    }

    seal(b,
         PipelineInfo { title: AiModel::Linda.title().to_string(),
                        chips: req.chips.chips(&req.item, None),
                        advanced: false })
}
