//! Template inmutable.
//!
//! Una vez construido no expone ninguna API mutable. La ejecución, el paralelismo
//! y la entrega de resultados son responsabilidad del servicio externo; aquí
//! sólo se consulta la estructura.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{json, Value};

use super::Step;
use crate::constants::TEMPLATE_FORMAT_VERSION;
use crate::errors::TemplateError;
use crate::hashing::hash_value;
use crate::model::{StepId, TemplateId};

#[derive(Debug, Clone)]
pub struct Template {
    id: TemplateId,
    steps: Vec<Step>,
    metadata: IndexMap<String, Value>,
    created_at: DateTime<Utc>,
    fingerprint: String,
}

impl Template {
    pub(crate) fn seal(id: TemplateId, steps: Vec<Step>, metadata: IndexMap<String, Value>) -> Self {
        let fingerprint = hash_value(&json!({
            "version": TEMPLATE_FORMAT_VERSION,
            "steps": steps.iter().map(Step::to_wire).collect::<Vec<_>>(),
            "metadata": metadata,
        }));
        Self { id,
               steps,
               metadata,
               created_at: Utc::now(),
               fingerprint }
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    /// Steps en orden de declaración.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: &StepId) -> Option<&Step> {
        if id.template() != self.id {
            return None;
        }
        self.steps.get(id.index())
    }

    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Hash de contenido (steps + metadata). No incluye id ni timestamp: dos
    /// templates con la misma estructura comparten fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn data_dependencies(&self, id: &StepId) -> Result<BTreeSet<StepId>, TemplateError> {
        Ok(self.require(id)?.data_dependencies())
    }

    pub fn prerequisites(&self, id: &StepId) -> Result<BTreeSet<StepId>, TemplateError> {
        Ok(self.require(id)?.prerequisites())
    }

    /// Cierre transitivo de prerequisitos de un step.
    pub fn dependency_closure(&self, id: &StepId) -> Result<BTreeSet<StepId>, TemplateError> {
        let mut seen = BTreeSet::new();
        let mut pending: Vec<StepId> = self.require(id)?.prerequisites().into_iter().collect();
        while let Some(next) = pending.pop() {
            if seen.insert(next) {
                pending.extend(self.require(&next)?.prerequisites());
            }
        }
        Ok(seen)
    }

    /// Cierre transitivo para todos los steps.
    ///
    /// Los prerequisitos siempre preceden al step (no hay referencias hacia
    /// adelante), así que basta un recorrido en orden de declaración.
    pub fn dependencies(&self) -> BTreeMap<StepId, BTreeSet<StepId>> {
        let mut closure: BTreeMap<StepId, BTreeSet<StepId>> = BTreeMap::new();
        for step in &self.steps {
            let mut deps = BTreeSet::new();
            for p in step.prerequisites() {
                deps.insert(p);
                if let Some(inherited) = closure.get(&p) {
                    deps.extend(inherited.iter().copied());
                }
            }
            closure.insert(step.id, deps);
        }
        closure
    }

    /// Forma wire enviada a "create pipeline from template".
    pub fn to_wire(&self) -> Value {
        json!({
            "version": TEMPLATE_FORMAT_VERSION,
            "id": self.id,
            "steps": self.steps.iter().map(Step::to_wire).collect::<Vec<_>>(),
            "metadata": self.metadata,
        })
    }

    fn require(&self, id: &StepId) -> Result<&Step, TemplateError> {
        if id.template() != self.id {
            return Err(TemplateError::ForeignReference { expected: self.id,
                                                         found: id.template(),
                                                         step: id.key() });
        }
        self.steps.get(id.index()).ok_or_else(|| TemplateError::UnknownStep { template: self.id, step: id.key() })
    }
}
