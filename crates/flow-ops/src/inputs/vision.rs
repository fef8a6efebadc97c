use flow_core::{InputValue, StepInput};

use super::OperationInput;
use crate::operations;

/// Detección de objetos por etiqueta de texto. El output trae las cajas en
/// `data` como `[x0, y0, x1, y1]`.
#[derive(Debug, Clone)]
pub struct ObjectDetectionInput {
    pub image_id: InputValue,
    pub labels: Vec<String>,
}

impl OperationInput for ObjectDetectionInput {
    const OPERATION: &'static str = operations::OBJECT_DETECTION;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("labels", self.labels).with("imageId", self.image_id)
    }
}

/// Máscara de segmentación dentro de una caja.
#[derive(Debug, Clone)]
pub struct SegmentMaskInput {
    pub image_id: InputValue,
    pub region: InputValue,
    pub mask_threshold: Option<f64>,
}

impl OperationInput for SegmentMaskInput {
    const OPERATION: &'static str = operations::SEGMENT_ANYTHING_MASK;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("imageId", self.image_id)
                        .with("box", self.region)
                        .with_opt("maskThreshold", self.mask_threshold)
    }
}

/// Consulta a GPT, opcionalmente con una imagen. La respuesta JSON llega en
/// `output.data`.
#[derive(Debug, Clone)]
pub struct GptInput {
    pub prompt: InputValue,
    pub image_id: Option<InputValue>,
}

impl OperationInput for GptInput {
    const OPERATION: &'static str = operations::GPT;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with_opt("imageId", self.image_id).with("prompt", self.prompt)
    }
}
