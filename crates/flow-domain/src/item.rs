//! Items de apparel y su progreso.
//!
//! Un item nace vacío (sólo `id`) y sus campos opcionales se completan a
//! medida que terminan los pasos remotos: subida, descripción, recorte.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::description::GarmentDescription;
use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApparelItem {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_human: Option<bool>,
}

impl ApparelItem {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(),
               image_id: None,
               processed_image_id: None,
               description: None,
               category: None,
               has_human: None }
    }

    pub fn apply_description(&mut self, d: &GarmentDescription) {
        self.description = Some(d.description.clone());
        self.category = Some(d.product_category.clone());
        self.has_human = Some(d.has_human);
    }

    /// Vista del item sin `id`, usada como chip en la metadata.
    pub fn chip(&self) -> ApparelChip {
        ApparelChip { image_id: self.image_id.clone(),
                      processed_image_id: self.processed_image_id.clone(),
                      description: self.description.clone(),
                      category: self.category.clone(),
                      has_human: self.has_human }
    }
}

impl Default for ApparelItem {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApparelChip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_human: Option<bool>,
}

/// Lista ordenada de items en preparación.
#[derive(Debug, Clone, Default)]
pub struct ApparelItems {
    items: Vec<ApparelItem>,
}

impl ApparelItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade un item vacío y devuelve su id.
    pub fn add_pending(&mut self) -> Uuid {
        let item = ApparelItem::new();
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&ApparelItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Primer item, el que usan las generaciones.
    pub fn first(&self) -> Option<&ApparelItem> {
        self.items.first()
    }

    pub fn update<F>(&mut self, id: Uuid, f: F) -> Result<&ApparelItem, DomainError>
        where F: FnOnce(&mut ApparelItem)
    {
        let item = self.items
                       .iter_mut()
                       .find(|i| i.id == id)
                       .ok_or_else(|| DomainError::NotFound(format!("apparel item {id}")))?;
        f(item);
        Ok(item)
    }

    /// Elimina el item; devuelve `false` si no existía.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApparelItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
