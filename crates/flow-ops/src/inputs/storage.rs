use flow_core::{InputValue, StepInput};

use super::OperationInput;
use crate::operations;

/// Crea un stack de resultados. El output trae el `id` del stack.
#[derive(Debug, Clone)]
pub struct StackCreateInput {
    pub metadata: InputValue,
}

impl OperationInput for StackCreateInput {
    const OPERATION: &'static str = operations::STACKS_CREATE;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("metadata", self.metadata)
    }
}

/// Da acceso a `resource_id` bajo el recurso padre.
#[derive(Debug, Clone)]
pub struct AccessAttachInput {
    pub resource_id: InputValue,
    pub parent_resource_id: InputValue,
}

impl OperationInput for AccessAttachInput {
    const OPERATION: &'static str = operations::ACCESS_ATTACH;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("resourceId", self.resource_id)
                        .with("parentResourceId", self.parent_resource_id)
    }
}

#[derive(Debug, Clone)]
pub struct StackItemsAddInput {
    pub stack_id: InputValue,
    pub item_ids: Vec<InputValue>,
}

impl OperationInput for StackItemsAddInput {
    const OPERATION: &'static str = operations::STACKS_ITEMS_ADD;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("stackId", self.stack_id).with("itemIds", self.item_ids)
    }
}

#[derive(Debug, Clone)]
pub struct CollectionItemsAddInput {
    pub collection_id: String,
    pub item_ids: Vec<InputValue>,
}

impl OperationInput for CollectionItemsAddInput {
    const OPERATION: &'static str = operations::COLLECTIONS_ITEMS_ADD;

    fn into_step_input(self) -> StepInput {
        StepInput::new().with("collectionId", self.collection_id).with("itemIds", self.item_ids)
    }
}
