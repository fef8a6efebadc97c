//! Resultado diferido: referencia etiquetada `{step, path}` al output futuro
//! de un step.
//!
//! El builder nunca resuelve el valor. El motor de ejecución externo busca el
//! output del step referenciado y navega `path` sobre él.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use super::{StepId, TemplateId};
use crate::constants::DEFERRED_REF_KEY;

/// Segmento de ruta dentro del output de un step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeferredResult {
    step: StepId,
    path: Vec<PathSegment>,
}

impl DeferredResult {
    pub(crate) fn root(step: StepId) -> Self {
        Self { step, path: Vec::new() }
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn template(&self) -> TemplateId {
        self.step.template()
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Navega a una clave del output.
    pub fn field(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.path.push(PathSegment::Key(key.into()));
        next
    }

    /// Navega a una posición de un array del output.
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.path.push(PathSegment::Index(index));
        next
    }

    /// Atajo para `field("output").field(key)`, la forma en que las operaciones
    /// remotas exponen sus resultados.
    pub fn output(&self, key: impl Into<String>) -> Self {
        self.field("output").field(key)
    }

    /// Forma wire: `{"$ref": {"step": "s3", "path": ["output", "imageId"]}}`.
    pub fn to_wire(&self) -> Value {
        json!({ DEFERRED_REF_KEY: { "step": self.step.key(), "path": self.path } })
    }
}

impl fmt::Display for DeferredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step)?;
        for segment in &self.path {
            match segment {
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}
