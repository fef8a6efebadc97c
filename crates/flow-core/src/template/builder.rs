//! Builder de `Template`.
//!
//! Registra estructura y nada más: no hace llamadas de red ni espera
//! resultados. Cada `declare` devuelve un `Declared` con el `StepId` y un
//! `DeferredResult` que puede pasarse como input de steps posteriores.
//!
//! ```ignore
//! let mut b = TemplateBuilder::new();
//! let gpt = b.declare(ops::GPT, step_input! { "prompt" => "..." })?;
//! let gen = b.declare(ops::NAOMI, step_input! { "prompt" => gpt.result.output("data").field("prompt") })?;
//! let stack = b.declare(ops::STACKS_CREATE, step_input! { "metadata" => json!({}) })?;
//! let add = b.declare(ops::STACKS_ITEMS_ADD, step_input! { "stackId" => stack.result.field("id") })?;
//! b.after(&add.id)?.declare(ops::COLLECTIONS_ITEMS_ADD, step_input! { "collectionId" => "c1" })?;
//! let template = b.build();
//! ```

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::{Step, Template};
use crate::errors::TemplateError;
use crate::model::{DeferredResult, OperationName, StepId, StepInput, TemplateId};

/// Resultado de declarar un step.
#[derive(Debug, Clone)]
pub struct Declared {
    pub id: StepId,
    /// Output futuro del step (raíz, sin ruta).
    pub result: DeferredResult,
}

#[derive(Debug)]
pub struct TemplateBuilder {
    id: TemplateId,
    steps: Vec<Step>,
    metadata: IndexMap<String, Value>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self { id: TemplateId::new(),
               steps: Vec::new(),
               metadata: IndexMap::new() }
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Declara un step sin restricciones de orden adicionales.
    pub fn declare(&mut self, operation: impl Into<OperationName>, input: StepInput) -> Result<Declared, TemplateError> {
        self.push(operation.into(), input, Vec::new())
    }

    /// Declara un step que espera a todos los `prerequisites`, haya o no
    /// dependencia de datos con ellos.
    pub fn declare_after(&mut self,
                         prerequisites: &[StepId],
                         operation: impl Into<OperationName>,
                         input: StepInput)
                         -> Result<Declared, TemplateError> {
        let mut after: Vec<StepId> = Vec::with_capacity(prerequisites.len());
        for p in prerequisites {
            self.check_step(p)?;
            if !after.contains(p) {
                after.push(*p);
            }
        }
        self.push(operation.into(), input, after)
    }

    /// Inicia una declaración ordenada: `b.after(&id)?.declare(op, input)`.
    pub fn after(&mut self, step: &StepId) -> Result<After<'_>, TemplateError> {
        self.check_step(step)?;
        Ok(After { builder: self,
                   prerequisites: vec![*step] })
    }

    /// Adjunta metadata descriptiva (se conserva en el template y entra en su
    /// fingerprint).
    pub fn set_metadata<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<&mut Self, TemplateError> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| TemplateError::MetadataEncoding { key: key.clone(),
                                                                                             reason: e.to_string() })?;
        self.metadata.insert(key, value);
        Ok(self)
    }

    /// Cierra el builder y devuelve el template inmutable.
    pub fn build(self) -> Template {
        debug!("template:build id={} steps={}", self.id, self.steps.len());
        Template::seal(self.id, self.steps, self.metadata)
    }

    fn check_step(&self, step: &StepId) -> Result<(), TemplateError> {
        if step.template() != self.id {
            return Err(TemplateError::ForeignReference { expected: self.id,
                                                         found: step.template(),
                                                         step: step.key() });
        }
        if step.index() >= self.steps.len() {
            return Err(TemplateError::UnknownStep { template: self.id,
                                                    step: step.key() });
        }
        Ok(())
    }

    fn push(&mut self, operation: OperationName, input: StepInput, after: Vec<StepId>) -> Result<Declared, TemplateError> {
        if operation.is_blank() {
            return Err(TemplateError::EmptyOperationName);
        }
        for reference in input.deferred_refs() {
            self.check_step(&reference.step())?;
        }
        let id = StepId::new(self.id, self.steps.len());
        debug!("template:declare id={} step={} operation={} after={}",
               self.id,
               id,
               operation,
               after.len());
        self.steps.push(Step { id,
                               operation,
                               input,
                               after });
        Ok(Declared { id,
                      result: DeferredResult::root(id) })
    }
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Declaración pendiente con restricciones de orden.
#[derive(Debug)]
pub struct After<'a> {
    builder: &'a mut TemplateBuilder,
    prerequisites: Vec<StepId>,
}

impl<'a> After<'a> {
    /// Añade otro step al que esperar.
    pub fn and(mut self, step: &StepId) -> Result<Self, TemplateError> {
        self.builder.check_step(step)?;
        self.prerequisites.push(*step);
        Ok(self)
    }

    pub fn declare(self, operation: impl Into<OperationName>, input: StepInput) -> Result<Declared, TemplateError> {
        self.builder.declare_after(&self.prerequisites, operation, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step_input;

    #[test]
    fn undeclared_index_in_same_template_is_rejected() {
        let mut b = TemplateBuilder::new();
        let ghost = StepId::new(b.id(), 3);
        let err = b.declare("operations.run.cut.v1", step_input! { "imageId" => DeferredResult::root(ghost) })
                   .unwrap_err();
        assert_eq!(err, TemplateError::UnknownStep { template: b.id(), step: "s3".into() });
        assert!(b.is_empty());
    }

    #[test]
    fn blank_operation_name_is_rejected() {
        let mut b = TemplateBuilder::new();
        assert_eq!(b.declare("  ", StepInput::new()).unwrap_err(), TemplateError::EmptyOperationName);
    }

    #[test]
    fn duplicate_prerequisites_are_recorded_once() {
        let mut b = TemplateBuilder::new();
        let a = b.declare("stacks.create", StepInput::new()).unwrap();
        let c = b.after(&a.id).unwrap().and(&a.id).unwrap().declare("collections.items.add", StepInput::new()).unwrap();
        let t = b.build();
        assert_eq!(t.step(&c.id).unwrap().after(), &[a.id]);
    }
}
