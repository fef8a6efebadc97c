//! Cola común de las recetas: guardar un resultado en un stack nuevo y
//! publicarlo en la colección personal.

use flow_core::{Declared, DeferredResult, InputValue, TemplateBuilder};
use flow_domain::{StackInfo, METADATA_VERSION};
use indexmap::IndexMap;
use serde_json::Value;

use super::RecipeError;
use crate::inputs::{AccessAttachInput, CollectionItemsAddInput, DeclareOperation, StackCreateInput, StackItemsAddInput};
use crate::operations;

pub(super) struct StoreRequest<'a> {
    pub result: DeferredResult,
    pub info: &'a StackInfo,
    pub prompt: InputValue,
    /// Recursos adjuntados al stack además del resultado.
    pub attachments: Vec<InputValue>,
    pub collection_id: &'a str,
}

#[derive(Debug, Clone)]
pub(super) struct Stored {
    pub stack: Declared,
    pub added: Declared,
    pub published: Declared,
}

/// `{"strict": {"v": 1, chips, size, seed, aiModel, prompt}}`. El prompt puede
/// ser diferido, así que la metadata se arma como `InputValue`.
fn stack_metadata(info: &StackInfo, prompt: InputValue) -> Result<InputValue, RecipeError> {
    let fields = match serde_json::to_value(info)? {
        Value::Object(map) => map,
        other => return Err(RecipeError::Encoding(format!("stack info is not an object: {other}"))),
    };
    let mut body: IndexMap<String, InputValue> = IndexMap::with_capacity(fields.len() + 2);
    body.insert("v".into(), METADATA_VERSION.into());
    for (k, v) in fields {
        body.insert(k, InputValue::Literal(v));
    }
    body.insert("prompt".into(), prompt);
    Ok(InputValue::object([("strict", InputValue::Object(body))]))
}

pub(super) fn store_result(b: &mut TemplateBuilder, req: StoreRequest<'_>) -> Result<Stored, RecipeError> {
    let stack = b.run(StackCreateInput { metadata: stack_metadata(req.info, req.prompt)? })?;
    let stack_id = operations::resource_id(&stack);

    let mut attach: Vec<InputValue> = Vec::with_capacity(req.attachments.len() + 1);
    attach.push(req.result.clone().into());
    attach.extend(req.attachments);
    for resource in attach {
        b.run(AccessAttachInput { resource_id: resource,
                                  parent_resource_id: stack_id.clone().into() })?;
    }

    let added = b.run(StackItemsAddInput { stack_id: stack_id.clone().into(),
                                           item_ids: vec![req.result.into()] })?;
    let published = b.run_after(&[added.id],
                                CollectionItemsAddInput { collection_id: req.collection_id.to_string(),
                                                          item_ids: vec![stack_id.into()] })?;
    Ok(Stored { stack,
                added,
                published })
}
