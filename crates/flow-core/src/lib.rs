//! flow-core: builder de templates de pipeline.
//!
//! Un template describe, antes de ejecutarse, una secuencia de operaciones
//! remotas con sus dependencias de datos (resultados diferidos) y de orden
//! (`after`). El crate no hace I/O: la ejecución pertenece al servicio externo.
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod ledger;
pub mod macros;
pub mod model;
pub mod template;

pub use errors::TemplateError;
pub use ledger::{InMemorySubmissionLedger, SubmissionLedger, SubmissionRecord, TemplateState};
pub use model::{DeferredResult, InputValue, OperationName, PathSegment, StepId, StepInput, TemplateId};
pub use template::{After, Declared, Step, Template, TemplateBuilder};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Cadena mínima: generar -> detectar -> segmentar, más una inserción que
    // sólo depende por orden del último paso.
    #[test]
    fn chained_declarations_resolve_to_wire_refs() {
        let mut b = TemplateBuilder::new();
        let generate = b.declare("operations.run.haute.naomi.v1", step_input! { "prompt" => "studio photo", "seed" => 42u64 })
                        .expect("generate");
        let image = generate.result.output("imageId");
        let detect = b.declare("operations.run.objectDetection.v1",
                               step_input! { "imageId" => &image, "labels" => vec!["the shirt cloth"] })
                      .expect("detect");
        let sam = b.declare("operations.run.segmentAnything.mask.v1",
                            step_input! { "imageId" => &image, "box" => detect.result.output("data").index(0) })
                   .expect("sam");
        let add = b.after(&sam.id).expect("after").declare("collections.items.add", step_input! { "collectionId" => "c-1" }).expect("add");

        let template = b.build();
        assert_eq!(template.len(), 4);

        let wire = template.to_wire();
        assert_eq!(wire["steps"][2]["input"]["box"], json!({"$ref": {"step": "s1", "path": ["output", "data", 0]}}));
        assert_eq!(wire["steps"][1]["input"]["imageId"], json!({"$ref": {"step": "s0", "path": ["output", "imageId"]}}));
        assert_eq!(wire["steps"][3]["after"], json!(["s2"]));

        let closure = template.dependency_closure(&add.id).expect("closure");
        assert_eq!(closure.into_iter().collect::<Vec<_>>(), vec![generate.id, detect.id, sam.id]);
    }

    #[test]
    fn deferred_display_uses_path_notation() {
        let mut b = TemplateBuilder::new();
        let d = b.declare("operations.run.objectDetection.v1", StepInput::new()).expect("declare");
        assert_eq!(d.result.output("data").index(0).to_string(), "s0.output.data[0]");
    }
}
