use serde::{Deserialize, Serialize};

/// Respuesta JSON de la operación de descripción (GPT) sobre la foto de la
/// prenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarmentDescription {
    pub description: String,
    pub product_category: String,
    pub has_human: bool,
}

impl GarmentDescription {
    pub fn detection_label(&self) -> String {
        detection_label(&self.product_category)
    }
}

/// Etiqueta usada para detectar la prenda en una imagen (`the t-shirt cloth`).
pub fn detection_label(category: &str) -> String {
    format!("the {} cloth", category.trim())
}
