//! flow-ops: capa de adaptación Producto ↔ Core
//!
//! Este crate provee:
//! - El catálogo de operaciones remotas (`operations`) y las rutas de sus
//!   outputs.
//! - Inputs tipados (`inputs`) que se convierten en `StepInput` del core. Los
//!   mismos tipos, sin diferidos, sirven para llamadas directas.
//! - Los textos de prompt del producto (`prompts`).
//! - Las recetas de generación (`recipes`): Naomi y Linda construyen un
//!   `Template` completo con su metadata de pipeline.
//!
//! El core sólo conoce nombres de operación y mappings de parámetros; la
//! semántica de cada operación vive aquí.

pub mod inputs;
pub mod operations;
pub mod prompts;
pub mod recipes;

pub use inputs::{DeclareOperation, OperationInput};
pub use recipes::{linda_pipeline, naomi_pipeline, random_seed, ChipSelection, LindaRequest, NaomiRequest, PipelineDraft,
                  PromptSource, RecipeError};
