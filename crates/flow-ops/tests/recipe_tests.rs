use flow_core::{StepId, Template};
use flow_domain::{ApparelItem, GenerationConfig, ImageSize, ModelTraits, Pose};
use flow_ops::operations::*;
use flow_ops::prompts;
use flow_ops::{linda_pipeline, naomi_pipeline, ChipSelection, LindaRequest, NaomiRequest, PromptSource, RecipeError};
use serde_json::json;

fn prepared_item() -> ApparelItem {
    ApparelItem { image_id: Some("img-orig".into()),
                  processed_image_id: Some("img-proc".into()),
                  description: Some("blue denim jacket".into()),
                  category: Some("jacket".into()),
                  has_human: Some(true),
                  ..ApparelItem::new() }
}

fn naomi_request(prompt: PromptSource) -> NaomiRequest {
    NaomiRequest { item: prepared_item(),
                   pose: Some(Pose { id: "pose-7".into(),
                                     preview_image_id: "pose-7-preview".into() }),
                   size: ImageSize { width: 832, height: 1216 },
                   aspect_ratio: "2:3".parse().unwrap(),
                   prompt,
                   chips: ChipSelection { model: Some(ModelTraits { age: "adult".into(),
                                                                    gender: "female".into(),
                                                                    model: "m1".into() }),
                                          background: Some("studio".into()),
                                          prompt: None },
                   seed: 4242,
                   collection_id: "personal".into() }
}

fn linda_request(prompt: PromptSource) -> LindaRequest {
    LindaRequest { item: prepared_item(),
                   size: ImageSize { width: 896, height: 1152 },
                   aspect_ratio: "3:4".parse().unwrap(),
                   prompt,
                   chips: ChipSelection::default(),
                   seed: 7,
                   collection_id: "personal".into() }
}

fn operations_of(t: &Template) -> Vec<&str> {
    t.steps().iter().map(|s| s.operation().as_str()).collect()
}

fn step_wire(t: &Template, index: usize) -> serde_json::Value {
    t.to_wire()["steps"][index].clone()
}

fn generate() -> PromptSource {
    PromptSource::Generate { instructions: "propose a prompt".into() }
}

#[test]
fn naomi_declares_refinement_chain_then_storage() {
    let draft = naomi_pipeline(&naomi_request(generate()), &GenerationConfig::default()).unwrap();
    assert_eq!(operations_of(&draft.template),
               vec![GPT,
                    NAOMI,
                    OBJECT_DETECTION,
                    SEGMENT_ANYTHING_MASK,
                    NEGATE_IMAGE,
                    INPAINT_KATE,
                    CONTRAST,
                    NOISE,
                    STACKS_CREATE,
                    ACCESS_ATTACH,
                    ACCESS_ATTACH,
                    ACCESS_ATTACH,
                    STACKS_ITEMS_ADD,
                    COLLECTIONS_ITEMS_ADD]);

    let naomi = step_wire(&draft.template, 1);
    assert_eq!(naomi["input"]["prompt"], json!({"$ref": {"step": "s0", "path": ["output", "data", "prompt"]}}));
    assert_eq!(naomi["input"]["garmentImageId"], json!("img-proc"));
    assert_eq!(naomi["input"]["mode"], json!("model_to_model"));
    assert!(naomi["input"].get("loraIds").is_none());

    let sam = step_wire(&draft.template, 3);
    assert_eq!(sam["input"]["box"], json!({"$ref": {"step": "s2", "path": ["output", "data", 0]}}));

    let inpaint = step_wire(&draft.template, 5);
    assert_eq!(inpaint["input"]["strength"], json!(0.3));
    assert_eq!(inpaint["input"]["maskSpread"], json!(25));
    assert_eq!(inpaint["input"]["prompt"], json!(prompts::REFINE_PHOTO));
}

#[test]
fn naomi_publishes_stack_after_adding_result() {
    let draft = naomi_pipeline(&naomi_request(generate()), &GenerationConfig::default()).unwrap();
    let t = &draft.template;
    let publish = &t.steps()[13];
    let add = &t.steps()[12];
    assert_eq!(publish.after(), &[add.id()]);

    let closure = t.dependency_closure(&publish.id()).unwrap();
    // stack (s8) por datos, add (s12) por orden y toda la cadena de generación.
    assert!(closure.contains(&t.steps()[8].id()));
    assert!(closure.contains(&add.id()));
    assert!(closure.contains(&t.steps()[0].id()));

    let attached: Vec<serde_json::Value> = (9..12).map(|i| step_wire(t, i)["input"]["resourceId"].clone()).collect();
    assert_eq!(attached,
               vec![json!({"$ref": {"step": "s7", "path": ["output", "imageId"]}}), json!("img-orig"), json!("img-proc")]);
}

#[test]
fn naomi_stack_metadata_carries_deferred_prompt() {
    let draft = naomi_pipeline(&naomi_request(generate()), &GenerationConfig::default()).unwrap();
    let stack = step_wire(&draft.template, 8);
    let strict = &stack["input"]["metadata"]["strict"];
    assert_eq!(strict["v"], json!(1));
    assert_eq!(strict["aiModel"], json!("naomi"));
    assert_eq!(strict["seed"], json!(4242));
    assert_eq!(strict["size"], json!({"width": 832, "height": 1216, "aspectRatio": [2, 3]}));
    assert_eq!(strict["prompt"], json!({"$ref": {"step": "s0", "path": ["output", "data", "prompt"]}}));
    assert_eq!(strict["chips"]["pose"], json!({"id": "pose-7", "imageId": "pose-7-preview"}));
    assert_eq!(strict["chips"]["background"], json!("studio"));
}

#[test]
fn advanced_prompt_skips_generation_and_narrows_chips() {
    let draft = naomi_pipeline(&naomi_request(PromptSource::Literal("editorial shot".into())),
                               &GenerationConfig::default()).unwrap();
    assert_eq!(draft.template.len(), 13);
    assert_eq!(operations_of(&draft.template)[0], NAOMI);
    assert_eq!(step_wire(&draft.template, 0)["input"]["prompt"], json!("editorial shot"));

    let info = draft.metadata.body();
    assert!(info.advanced);
    assert_eq!(info.title, "Naomi");
    assert_eq!(info.chips.prompt.as_deref(), Some("editorial shot"));
    assert!(info.chips.model.is_none());
    assert!(info.chips.background.is_none());

    let meta = &draft.template.to_wire()["metadata"];
    assert_eq!(meta["strict"]["advanced"], json!(true));
    assert_eq!(meta["strict"]["v"], json!(1));
}

#[test]
fn youth_models_get_lora_ids() {
    let mut req = naomi_request(generate());
    req.chips.model = Some(ModelTraits { age: "toddler".into(),
                                         gender: "male".into(),
                                         model: "m2".into() });
    req.item.has_human = Some(false);
    let cfg = GenerationConfig::default();
    let draft = naomi_pipeline(&req, &cfg).unwrap();
    let naomi = step_wire(&draft.template, 1);
    assert_eq!(naomi["input"]["loraIds"], json!(cfg.youth_lora_ids));
    assert_eq!(naomi["input"]["mode"], json!("apparel_to_model"));
}

#[test]
fn naomi_preconditions_fail_before_any_step() {
    let cfg = GenerationConfig::default();

    let mut req = naomi_request(generate());
    req.item.processed_image_id = None;
    assert_eq!(naomi_pipeline(&req, &cfg).unwrap_err(), RecipeError::MissingProcessedImage);

    let mut req = naomi_request(generate());
    req.item.category = None;
    assert_eq!(naomi_pipeline(&req, &cfg).unwrap_err(), RecipeError::MissingCategory);

    let mut req = naomi_request(generate());
    req.pose = None;
    assert_eq!(naomi_pipeline(&req, &cfg).unwrap_err(), RecipeError::MissingPose);

    let mut req = naomi_request(generate());
    req.item.image_id = None;
    assert_eq!(naomi_pipeline(&req, &cfg).unwrap_err(), RecipeError::MissingImage);
}

#[test]
fn linda_stores_each_variation_in_its_own_stack() {
    let draft = linda_pipeline(&linda_request(PromptSource::Generate { instructions:
                                                                           prompts::LINDA_PROMPT_INSTRUCTIONS.into() }),
                               &GenerationConfig::default()).unwrap();
    let t = &draft.template;
    let per_variation = [INPAINT_KATE, STACKS_CREATE, ACCESS_ATTACH, ACCESS_ATTACH, STACKS_ITEMS_ADD, COLLECTIONS_ITEMS_ADD];
    let mut expected = vec![GPT, LINDA];
    expected.extend(per_variation);
    expected.extend(per_variation);
    assert_eq!(operations_of(t), expected);

    assert_eq!(step_wire(t, 0)["input"]["imageId"], json!("img-orig"));
    assert_eq!(step_wire(t, 2)["input"]["imageId"], json!({"$ref": {"step": "s1", "path": ["output", "imageIds", 0]}}));
    assert_eq!(step_wire(t, 8)["input"]["imageId"], json!({"$ref": {"step": "s1", "path": ["output", "imageIds", 1]}}));
    assert_eq!(step_wire(t, 2)["input"]["strength"], json!(0.25));
    assert!(step_wire(t, 2)["input"].get("maskImageId").is_none());

    let stack = step_wire(t, 3);
    assert_eq!(stack["input"]["metadata"]["strict"]["aiModel"], json!("linda"));
    assert_eq!(stack["input"]["metadata"]["strict"]["size"]["aspectRatio"], json!([3, 4]));
    assert!(!draft.metadata.body().advanced);
    assert_eq!(draft.metadata.body().title, "Linda");
}

#[test]
fn linda_with_literal_prompt_and_custom_variations() {
    let cfg = GenerationConfig { linda_variations: 3,
                                 ..GenerationConfig::default() };
    let draft = linda_pipeline(&linda_request(PromptSource::Literal("a model in a park".into())), &cfg).unwrap();
    assert_eq!(draft.template.len(), 1 + 3 * 6);
    let publishes: Vec<StepId> = draft.template
                                      .steps()
                                      .iter()
                                      .filter(|s| s.operation().as_str() == COLLECTIONS_ITEMS_ADD)
                                      .map(|s| s.id())
                                      .collect();
    assert_eq!(publishes.len(), 3);
}

#[test]
fn linda_requires_uploaded_image_and_variations() {
    let mut req = linda_request(PromptSource::Literal("p".into()));
    req.item.image_id = None;
    assert_eq!(linda_pipeline(&req, &GenerationConfig::default()).unwrap_err(), RecipeError::MissingImage);

    let cfg = GenerationConfig { linda_variations: 0,
                                 ..GenerationConfig::default() };
    let req = linda_request(PromptSource::Literal("p".into()));
    assert_eq!(linda_pipeline(&req, &cfg).unwrap_err(), RecipeError::NoVariations);
}
