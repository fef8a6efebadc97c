//! Catálogo de operaciones remotas y rutas de sus outputs.

use flow_core::{Declared, DeferredResult};

pub const COMPOSITE: &str = "operations.run.composite.v1";
pub const OBJECT_DETECTION: &str = "operations.run.objectDetection.v1";
pub const SEGMENT_ANYTHING_MASK: &str = "operations.run.segmentAnything.mask.v1";
pub const CUT: &str = "operations.run.cut.v1";
pub const CROP: &str = "operations.run.crop.v1";
pub const NEGATE_IMAGE: &str = "operations.run.negateImage.v1";
pub const CONTRAST: &str = "operations.run.contrast.v1";
pub const NOISE: &str = "operations.run.noise.v1";
pub const GPT: &str = "operations.run.gpt.v1";
pub const NAOMI: &str = "operations.run.haute.naomi.v1";
pub const LINDA: &str = "operations.run.haute.linda.v1";
pub const INPAINT_KATE: &str = "operations.run.inpaint.kate.v1";
pub const STACKS_CREATE: &str = "stacks.create";
pub const STACKS_ITEMS_ADD: &str = "stacks.items.add";
pub const ACCESS_ATTACH: &str = "access.attach";
pub const COLLECTIONS_ITEMS_ADD: &str = "collections.items.add";

/// Imagen producida por una operación de imagen (`output.imageId`).
pub fn image_output(step: &Declared) -> DeferredResult {
    step.result.output("imageId")
}

/// i-ésima imagen de una operación con salida múltiple (`output.imageIds[i]`).
pub fn image_outputs_at(step: &Declared, index: usize) -> DeferredResult {
    step.result.output("imageIds").index(index)
}

/// Primera caja de una detección (`output.data[0]`).
pub fn first_box(step: &Declared) -> DeferredResult {
    step.result.output("data").index(0)
}

/// Campo del JSON devuelto por GPT (`output.data.<field>`).
pub fn json_field(step: &Declared, field: &str) -> DeferredResult {
    step.result.output("data").field(field)
}

/// Id del recurso creado (`id`), p. ej. un stack.
pub fn resource_id(step: &Declared) -> DeferredResult {
    step.result.field("id")
}
