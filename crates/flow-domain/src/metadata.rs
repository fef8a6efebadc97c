//! Metadata descriptiva que acompaña a stacks y pipelines.
//!
//! Todo se envuelve en `{ "strict": { "v": 1, ... } }`.

use serde::{Deserialize, Serialize};

use crate::image::{AspectRatio, ImageSize};
use crate::item::ApparelChip;
use crate::model::{ModelTraits, Pose};

pub const METADATA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub v: u32,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strict<T> {
    pub strict: Versioned<T>,
}

impl<T> Strict<T> {
    pub fn new(body: T) -> Self {
        Self { strict: Versioned { v: METADATA_VERSION,
                                   body } }
    }

    pub fn body(&self) -> &T {
        &self.strict.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    Naomi,
    Linda,
}

impl AiModel {
    pub fn title(&self) -> &'static str {
        match self {
            AiModel::Naomi => "Naomi",
            AiModel::Linda => "Linda",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseChip {
    pub id: String,
    pub image_id: String,
}

impl From<&Pose> for PoseChip {
    fn from(p: &Pose) -> Self {
        Self { id: p.id.clone(),
               image_id: p.preview_image_id.clone() }
    }
}

/// Elecciones del usuario mostradas como "chips".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chips {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparel_image: Option<ApparelChip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelTraits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<PoseChip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeChip {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: [u32; 2],
}

impl SizeChip {
    pub fn new(size: ImageSize, ratio: AspectRatio) -> Self {
        Self { width: size.width,
               height: size.height,
               aspect_ratio: ratio.parts() }
    }
}

/// Metadata de un stack de resultados. El prompt final se añade aparte porque
/// puede ser un resultado diferido de la generación de prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackInfo {
    pub chips: Chips,
    pub size: SizeChip,
    pub seed: u64,
    pub ai_model: AiModel,
}

/// Metadata libre del pipeline, para mostrar/auditar más tarde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub title: String,
    pub chips: Chips,
    pub advanced: bool,
}
