//! Modelos neutrales del template (ids, operaciones, resultados diferidos,
//! inputs).

pub mod deferred;
pub mod ids;
pub mod input;
pub mod operation;

pub use deferred::{DeferredResult, PathSegment};
pub use ids::{StepId, TemplateId};
pub use input::{InputValue, StepInput};
pub use operation::OperationName;
