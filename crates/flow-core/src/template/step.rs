use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::model::{OperationName, StepId, StepInput};

/// Step declarado dentro de un template.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub(crate) id: StepId,
    pub(crate) operation: OperationName,
    pub(crate) input: StepInput,
    pub(crate) after: Vec<StepId>,
}

impl Step {
    pub fn id(&self) -> StepId {
        self.id
    }

    pub fn operation(&self) -> &OperationName {
        &self.operation
    }

    pub fn input(&self) -> &StepInput {
        &self.input
    }

    /// Restricciones de orden explícitas (independientes de los datos).
    pub fn after(&self) -> &[StepId] {
        &self.after
    }

    /// Steps cuyos outputs aparecen en el input.
    pub fn data_dependencies(&self) -> BTreeSet<StepId> {
        self.input.deferred_refs().into_iter().map(|d| d.step()).collect()
    }

    /// Prerequisitos directos: dependencias de datos ∪ restricciones de orden.
    pub fn prerequisites(&self) -> BTreeSet<StepId> {
        let mut out = self.data_dependencies();
        out.extend(self.after.iter().copied());
        out
    }

    pub fn to_wire(&self) -> Value {
        json!({
            "id": self.id,
            "operation": self.operation,
            "input": self.input.to_wire(),
            "after": self.after,
        })
    }
}
