//! Elecciones del usuario para la generación: rasgos del modelo, pose y modo.

use serde::{Deserialize, Serialize};

/// Grupos de edad para los que la generación añade LoRAs juveniles.
const YOUTH_AGES: [&str; 2] = ["toddler", "pre-teen"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTraits {
    pub age: String,
    pub gender: String,
    pub model: String,
}

impl ModelTraits {
    pub fn is_youth(&self) -> bool {
        YOUTH_AGES.contains(&self.age.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub id: String,
    pub preview_image_id: String,
}

/// Modo de la generación Naomi según la foto de origen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaomiMode {
    /// La foto ya muestra la prenda puesta en una persona.
    ModelToModel,
    /// Foto de producto sin persona.
    ApparelToModel,
}

impl NaomiMode {
    pub fn for_photo(has_human: bool) -> Self {
        if has_human {
            NaomiMode::ModelToModel
        } else {
            NaomiMode::ApparelToModel
        }
    }
}
