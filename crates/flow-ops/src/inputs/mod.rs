//! Inputs tipados de las operaciones remotas.
//!
//! Cada tipo conoce su nombre de operación y cómo volcarse a `StepInput` con
//! los nombres camelCase que espera el servicio. Los campos que pueden venir
//! de otro step son `InputValue`; el resto son literales tipados.

mod generation;
mod image;
mod storage;
mod vision;

pub use generation::{InpaintKateInput, LindaInput, NaomiInput};
pub use image::{CompositeElement, CompositeInput, ContrastInput, CropInput, CutInput, Fit, NegateImageInput, NoiseInput,
                WHITE_BACKGROUND};
pub use storage::{AccessAttachInput, CollectionItemsAddInput, StackCreateInput, StackItemsAddInput};
pub use vision::{GptInput, ObjectDetectionInput, SegmentMaskInput};

use flow_core::{Declared, OperationName, StepId, StepInput, TemplateBuilder, TemplateError};

/// Input de una operación del catálogo.
pub trait OperationInput {
    const OPERATION: &'static str;

    fn into_step_input(self) -> StepInput;

    fn operation() -> OperationName {
        OperationName::new(Self::OPERATION)
    }
}

/// Declaración de inputs tipados sobre el builder del core.
pub trait DeclareOperation {
    fn run<I: OperationInput>(&mut self, input: I) -> Result<Declared, TemplateError>;

    fn run_after<I: OperationInput>(&mut self, prerequisites: &[StepId], input: I) -> Result<Declared, TemplateError>;
}

impl DeclareOperation for TemplateBuilder {
    fn run<I: OperationInput>(&mut self, input: I) -> Result<Declared, TemplateError> {
        self.declare(I::operation(), input.into_step_input())
    }

    fn run_after<I: OperationInput>(&mut self, prerequisites: &[StepId], input: I) -> Result<Declared, TemplateError> {
        self.declare_after(prerequisites, I::operation(), input.into_step_input())
    }
}
