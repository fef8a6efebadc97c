//! Recetas de generación.
//!
//! Cada receta valida sus precondiciones antes de declarar ningún step y
//! devuelve un `PipelineDraft`: el template (con la metadata del pipeline
//! bajo la clave `strict`) listo para enviarse una sola vez.

mod error;
mod linda;
mod naomi;
mod store;

pub use error::RecipeError;
pub use linda::{linda_pipeline, LindaRequest};
pub use naomi::{naomi_pipeline, NaomiRequest};

use flow_core::{InputValue, Template, TemplateBuilder};
use flow_domain::{ApparelItem, Chips, ModelTraits, PipelineInfo, PoseChip, Pose, Strict};
use uuid::Uuid;

use crate::inputs::{DeclareOperation, GptInput};
use crate::operations;

/// Clave bajo la que se guarda la metadata del pipeline en el template.
pub const PIPELINE_METADATA_KEY: &str = "strict";

/// Semillas en `[0, 1_000_000)`.
const SEED_RANGE: u128 = 1_000_000;

/// Origen del prompt final de la generación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// Prompt ya redactado (prompt avanzado o preparado por el producto).
    Literal(String),
    /// Se pide a GPT con estas instrucciones; el prompt llega en
    /// `output.data.prompt`.
    Generate { instructions: String },
}

/// Elecciones del usuario que se guardan como chips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipSelection {
    pub model: Option<ModelTraits>,
    pub background: Option<String>,
    pub prompt: Option<String>,
}

impl ChipSelection {
    fn chips(&self, item: &ApparelItem, pose: Option<&Pose>) -> Chips {
        Chips { apparel_image: Some(item.chip()),
                model: self.model.clone(),
                background: self.background.clone().filter(|b| !b.is_empty()),
                pose: pose.map(PoseChip::from),
                prompt: self.prompt.clone().filter(|p| !p.is_empty()) }
    }
}

/// Template listo para enviar y su metadata de pipeline.
#[derive(Debug, Clone)]
pub struct PipelineDraft {
    pub template: Template,
    pub metadata: Strict<PipelineInfo>,
}

/// Semilla aleatoria para una generación.
pub fn random_seed() -> u64 {
    (Uuid::new_v4().as_u128() % SEED_RANGE) as u64
}

/// Prompt final: literal o diferido de un step GPT.
fn final_prompt(b: &mut TemplateBuilder,
                source: &PromptSource,
                image_id: Option<&str>)
                -> Result<InputValue, RecipeError> {
    match source {
        PromptSource::Literal(p) => Ok(p.as_str().into()),
        PromptSource::Generate { instructions } => {
            let gpt = b.run(GptInput { prompt: instructions.as_str().into(),
                                       image_id: image_id.map(InputValue::from) })?;
            Ok(operations::json_field(&gpt, "prompt").into())
        }
    }
}

fn seal(mut b: TemplateBuilder, info: PipelineInfo) -> Result<PipelineDraft, RecipeError> {
    let metadata = Strict::new(info);
    b.set_metadata(PIPELINE_METADATA_KEY, &metadata.strict)?;
    Ok(PipelineDraft { template: b.build(),
                       metadata })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_seed_stays_in_range() {
        for _ in 0..100 {
            assert!(random_seed() < 1_000_000);
        }
    }

    #[test]
    fn empty_chip_texts_are_dropped() {
        let sel = ChipSelection { model: None,
                                  background: Some(String::new()),
                                  prompt: Some("red".into()) };
        let chips = sel.chips(&ApparelItem::new(), None);
        assert_eq!(chips.background, None);
        assert_eq!(chips.prompt.as_deref(), Some("red"));
    }
}
