use flow_core::{InputValue, StepInput};
use flow_domain::{AspectRatio, ImageSize, NaomiMode};

use super::OperationInput;
use crate::operations;

#[derive(Debug, Clone)]
pub struct NaomiInput {
    pub prompt: InputValue,
    pub category: String,
    pub garment_image_id: String,
    pub pose_id: String,
    pub seed: u64,
    pub size: ImageSize,
    pub mode: NaomiMode,
    pub lora_ids: Option<Vec<String>>,
}

impl OperationInput for NaomiInput {
    const OPERATION: &'static str = operations::NAOMI;

    fn into_step_input(self) -> StepInput {
        let mode = match self.mode {
            NaomiMode::ModelToModel => "model_to_model",
            NaomiMode::ApparelToModel => "apparel_to_model",
        };
        StepInput::new().with("prompt", self.prompt)
                        .with("category", self.category)
                        .with("garmentImageId", self.garment_image_id)
                        .with("poseId", self.pose_id)
                        .with("seed", self.seed)
                        .with("width", self.size.width)
                        .with("height", self.size.height)
                        .with("mode", mode)
                        .with_opt("loraIds", self.lora_ids)
    }
}

/// Genera varias fotos (`output.imageIds`) a partir de la foto de producto.
#[derive(Debug, Clone)]
pub struct LindaInput {
    pub prompt: InputValue,
    pub product_image_id: String,
    pub seed: u64,
    pub aspect_ratio: AspectRatio,
}

impl OperationInput for LindaInput {
    const OPERATION: &'static str = operations::LINDA;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("prompt", self.prompt)
                        .with("productImageId", self.product_image_id)
                        .with("seed", self.seed)
                        .with("aspectRatio", self.aspect_ratio.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct InpaintKateInput {
    pub image_id: InputValue,
    pub mask_image_id: Option<InputValue>,
    pub prompt: String,
    pub seed: u64,
    pub strength: f64,
    pub mask_spread: Option<u32>,
    pub size: ImageSize,
}

impl OperationInput for InpaintKateInput {
    const OPERATION: &'static str = operations::INPAINT_KATE;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id)
                        .with_opt("maskImageId", self.mask_image_id)
                        .with("prompt", self.prompt)
                        .with("seed", self.seed)
                        .with("strength", self.strength)
                        .with_opt("maskSpread", self.mask_spread)
                        .with("width", self.size.width)
                        .with("height", self.size.height)
    }
}
