use flow_core::{InputValue, StepInput};
use flow_domain::Placement;

use super::OperationInput;
use crate::operations;

pub const WHITE_BACKGROUND: &str = "#FFFFFFFF";

/// Cómo encaja un elemento dentro de su caja en un composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    Cover,
    Contain,
}

impl Fit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fit::Cover => "cover",
            Fit::Contain => "contain",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompositeElement {
    pub image_id: InputValue,
    pub placement: Placement,
    pub fit: Fit,
}

impl CompositeElement {
    fn into_value(self) -> InputValue {
        InputValue::object([("imageId", self.image_id),
                            ("left", self.placement.left.into()),
                            ("top", self.placement.top.into()),
                            ("width", self.placement.width.into()),
                            ("height", self.placement.height.into()),
                            ("fit", self.fit.as_str().into())])
    }
}

/// Lienzo `width`×`height` con los elementos colocados encima.
#[derive(Debug, Clone)]
pub struct CompositeInput {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub elements: Vec<CompositeElement>,
}

impl CompositeInput {
    /// Un único elemento sobre fondo blanco.
    pub fn single(width: u32, height: u32, element: CompositeElement) -> Self {
        Self { width,
               height,
               background: WHITE_BACKGROUND.to_string(),
               elements: vec![element] }
    }
}

impl OperationInput for CompositeInput {
    const OPERATION: &'static str = operations::COMPOSITE;

    fn into_step_input(self) -> StepInput {
        let elements: Vec<InputValue> = self.elements.into_iter().map(CompositeElement::into_value).collect();
        StepInput::new().with("width", self.width)
                        .with("height", self.height)
                        .with("background", self.background)
                        .with("elements", elements)
    }
}

#[derive(Debug, Clone)]
pub struct CropInput {
    pub image_id: InputValue,
    pub region: Placement,
}

impl OperationInput for CropInput {
    const OPERATION: &'static str = operations::CROP;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id)
                        .with("left", self.region.left)
                        .with("top", self.region.top)
                        .with("width", self.region.width)
                        .with("height", self.region.height)
    }
}

/// Recorta la imagen con una máscara.
#[derive(Debug, Clone)]
pub struct CutInput {
    pub image_id: InputValue,
    pub mask_image_id: InputValue,
}

impl OperationInput for CutInput {
    const OPERATION: &'static str = operations::CUT;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id).with("maskImageId", self.mask_image_id)
    }
}

#[derive(Debug, Clone)]
pub struct NegateImageInput {
    pub image_id: InputValue,
}

impl OperationInput for NegateImageInput {
    const OPERATION: &'static str = operations::NEGATE_IMAGE;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id)
    }
}

#[derive(Debug, Clone)]
pub struct ContrastInput {
    pub image_id: InputValue,
    pub contrast: f64,
}

impl OperationInput for ContrastInput {
    const OPERATION: &'static str = operations::CONTRAST;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id).with("contrast", self.contrast)
    }
}

#[derive(Debug, Clone)]
pub struct NoiseInput {
    pub image_id: InputValue,
    pub sigma: f64,
}

impl OperationInput for NoiseInput {
    const OPERATION: &'static str = operations::NOISE;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id).with("sigma", self.sigma)
    }
}
