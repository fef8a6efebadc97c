use std::collections::BTreeSet;

use flow_core::{step_input, StepInput, TemplateBuilder};

#[test]
fn deferred_input_records_data_dependency() {
    let mut b = TemplateBuilder::new();
    let gpt = b.declare("operations.run.gpt.v1", step_input! { "prompt" => "describe" }).unwrap();
    let linda = b.declare("operations.run.haute.linda.v1",
                          step_input! { "prompt" => gpt.result.output("data").field("prompt"), "seed" => 7u64 })
                 .unwrap();
    let t = b.build();

    assert_eq!(t.data_dependencies(&linda.id).unwrap(), BTreeSet::from([gpt.id]));
    assert!(t.data_dependencies(&gpt.id).unwrap().is_empty());
}

#[test]
fn dependency_set_is_transitive_closure_of_references() {
    // s0 <- s1 <- s2,  s3 independiente,  s4 <- (s2, s3)
    let mut b = TemplateBuilder::new();
    let s0 = b.declare("operations.run.haute.naomi.v1", StepInput::new()).unwrap();
    let s1 = b.declare("operations.run.objectDetection.v1", step_input! { "imageId" => s0.result.output("imageId") })
              .unwrap();
    let s2 = b.declare("operations.run.segmentAnything.mask.v1",
                       step_input! { "box" => s1.result.output("data").index(0) })
              .unwrap();
    let s3 = b.declare("stacks.create", step_input! { "metadata" => serde_json::json!({"v": 1}) }).unwrap();
    let s4 = b.declare("access.attach",
                       step_input! {
                           "resourceId" => s2.result.output("imageId"),
                           "parentResourceId" => s3.result.field("id"),
                       })
              .unwrap();
    let t = b.build();

    let deps = t.dependencies();
    assert_eq!(deps[&s0.id], BTreeSet::new());
    assert_eq!(deps[&s1.id], BTreeSet::from([s0.id]));
    assert_eq!(deps[&s2.id], BTreeSet::from([s0.id, s1.id]));
    assert_eq!(deps[&s3.id], BTreeSet::new());
    assert_eq!(deps[&s4.id], BTreeSet::from([s0.id, s1.id, s2.id, s3.id]));

    for step in t.steps() {
        assert_eq!(t.dependency_closure(&step.id()).unwrap(), deps[&step.id()]);
    }
}

#[test]
fn ordering_constraint_adds_prerequisite_without_data_dependency() {
    let mut b = TemplateBuilder::new();
    let add_to_stack = b.declare("stacks.items.add", step_input! { "stackId" => "stack-1", "itemIds" => vec!["img-1"] })
                        .unwrap();
    let add_to_collection = b.after(&add_to_stack.id)
                             .unwrap()
                             .declare("collections.items.add",
                                      step_input! { "collectionId" => "personal", "itemIds" => vec!["stack-1"] })
                             .unwrap();
    let t = b.build();

    assert!(t.data_dependencies(&add_to_collection.id).unwrap().is_empty());
    assert!(t.prerequisites(&add_to_collection.id).unwrap().contains(&add_to_stack.id));
    assert_eq!(t.step(&add_to_collection.id).unwrap().after(), &[add_to_stack.id]);
}

#[test]
fn declare_after_accepts_several_prerequisites() {
    let mut b = TemplateBuilder::new();
    let a = b.declare("access.attach", StepInput::new()).unwrap();
    let c = b.declare("access.attach", StepInput::new()).unwrap();
    let d = b.declare_after(&[a.id, c.id, a.id], "stacks.items.add", StepInput::new()).unwrap();
    let t = b.build();
    assert_eq!(t.prerequisites(&d.id).unwrap(), BTreeSet::from([a.id, c.id]));
}
