//! Identificadores de template y de step.
//!
//! Un `StepId` sólo se obtiene declarando un step en un `TemplateBuilder`; lleva
//! consigo el id del template que lo produjo, lo que permite detectar en el
//! momento de la declaración referencias cruzadas entre templates.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::constants::STEP_KEY_PREFIX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identificador opaco de un step dentro de su template.
///
/// Se ordena por posición de declaración. En la forma wire se representa como
/// `s<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId {
    template: TemplateId,
    index: usize,
}

impl StepId {
    pub(crate) fn new(template: TemplateId, index: usize) -> Self {
        Self { template, index }
    }

    /// Template que declaró el step.
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Posición del step en orden de declaración.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Clave wire (`s0`, `s1`, ...).
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", STEP_KEY_PREFIX, self.index)
    }
}

impl Serialize for StepId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
