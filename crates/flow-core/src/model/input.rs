//! Inputs declarados de un step.
//!
//! Un `StepInput` es un mapping ordenado de parámetros. Cada valor puede ser
//! literal (JSON), un `DeferredResult` de un step anterior o una estructura
//! (array/objeto) que mezcle ambos.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::DeferredResult;
use crate::errors::TemplateError;

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Literal(Value),
    Deferred(DeferredResult),
    Array(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
}

impl InputValue {
    pub fn null() -> Self {
        InputValue::Literal(Value::Null)
    }

    /// Construye un objeto a partir de pares clave/valor.
    pub fn object<K, V, I>(entries: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<String>,
              V: Into<InputValue>
    {
        InputValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, InputValue::Deferred(_))
    }

    /// Acumula todas las referencias diferidas contenidas (recursivo).
    pub fn collect_refs<'a>(&'a self, out: &mut Vec<&'a DeferredResult>) {
        match self {
            InputValue::Literal(_) => {}
            InputValue::Deferred(d) => out.push(d),
            InputValue::Array(items) => items.iter().for_each(|i| i.collect_refs(out)),
            InputValue::Object(map) => map.values().for_each(|v| v.collect_refs(out)),
        }
    }

    /// Forma wire: los diferidos se serializan como `{"$ref": ...}`.
    pub fn to_wire(&self) -> Value {
        match self {
            InputValue::Literal(v) => v.clone(),
            InputValue::Deferred(d) => d.to_wire(),
            InputValue::Array(items) => Value::Array(items.iter().map(InputValue::to_wire).collect()),
            InputValue::Object(map) => {
                Value::Object(map.iter().map(|(k, v)| (k.clone(), v.to_wire())).collect::<Map<String, Value>>())
            }
        }
    }

    /// JSON plano para llamadas directas; falla si hay algún diferido.
    pub fn to_literal_json(&self) -> Result<Value, TemplateError> {
        match self {
            InputValue::Literal(v) => Ok(v.clone()),
            InputValue::Deferred(d) => Err(TemplateError::DeferredInLiteralContext { reference: d.to_string() }),
            InputValue::Array(items) => {
                items.iter().map(InputValue::to_literal_json).collect::<Result<Vec<_>, _>>().map(Value::Array)
            }
            InputValue::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.to_literal_json()?);
                }
                Ok(Value::Object(out))
            }
        }
    }
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        InputValue::Literal(value)
    }
}

impl From<DeferredResult> for InputValue {
    fn from(value: DeferredResult) -> Self {
        InputValue::Deferred(value)
    }
}

impl From<&DeferredResult> for InputValue {
    fn from(value: &DeferredResult) -> Self {
        InputValue::Deferred(value.clone())
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Literal(Value::from(value))
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Literal(Value::from(value))
    }
}

impl From<&String> for InputValue {
    fn from(value: &String) -> Self {
        InputValue::Literal(Value::from(value.as_str()))
    }
}

macro_rules! literal_from {
    ($($ty:ty),+) => {
        $(impl From<$ty> for InputValue {
            fn from(value: $ty) -> Self { InputValue::Literal(Value::from(value)) }
        })+
    };
}

literal_from!(bool, i32, i64, u32, u64, usize, f64);

impl<T: Into<InputValue>> From<Vec<T>> for InputValue {
    fn from(value: Vec<T>) -> Self {
        InputValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(InputValue::null)
    }
}

/// Mapping ordenado de parámetros de un step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInput {
    params: IndexMap<String, InputValue>,
}

impl StepInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante encadenable de `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserta sólo si hay valor; un `None` deja el parámetro ausente.
    pub fn with_opt<V: Into<InputValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.insert(key, v);
        }
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.params.get(key)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InputValue)> {
        self.params.iter()
    }

    /// Referencias diferidas en orden de aparición.
    pub fn deferred_refs(&self) -> Vec<&DeferredResult> {
        let mut out = Vec::new();
        self.params.values().for_each(|v| v.collect_refs(&mut out));
        out
    }

    pub fn to_wire(&self) -> Value {
        Value::Object(self.params.iter().map(|(k, v)| (k.clone(), v.to_wire())).collect())
    }

    pub fn to_literal_json(&self) -> Result<Value, TemplateError> {
        let mut out = Map::with_capacity(self.params.len());
        for (k, v) in &self.params {
            out.insert(k.clone(), v.to_literal_json()?);
        }
        Ok(Value::Object(out))
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for StepInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { params: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_input_converts_to_plain_json_in_order() {
        let input = StepInput::new().with("width", 832u32)
                                    .with("background", "#FFFFFFFF")
                                    .with("labels", vec!["the shirt cloth"])
                                    .with_opt("seed", None::<u64>);
        assert_eq!(input.len(), 3);
        let keys: Vec<&String> = input.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["width", "background", "labels"]);
        assert_eq!(input.to_literal_json().unwrap(),
                   json!({"width": 832, "background": "#FFFFFFFF", "labels": ["the shirt cloth"]}));
    }

    #[test]
    fn none_option_becomes_null_literal() {
        let v: InputValue = None::<String>.into();
        assert_eq!(v, InputValue::null());
    }
}
