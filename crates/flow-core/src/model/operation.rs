use std::fmt;

use serde::{Deserialize, Serialize};

/// Nombre de una operación remota (`operations.run.composite.v1`, `stacks.create`, ...).
///
/// El builder no interpreta el nombre; sólo exige que no esté vacío.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationName(String);

impl OperationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Vacío o sólo espacios.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for OperationName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OperationName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&OperationName> for OperationName {
    fn from(value: &OperationName) -> Self {
        value.clone()
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
