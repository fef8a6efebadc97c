
use flow_domain::{ApparelItems, ProcessingConfig};
use flow_ops::operations::*;
use flow_service::{ApparelPreparer, PreparationMode, ServiceError};
use serde_json::json;
use test_support::{png, scripted_service};

#[tokio::test]
async fn product_photo_is_resized_padded_cut_and_centered() {
    let svc = scripted_service(false);
    let cfg = ProcessingConfig::default();
    let mut items = ApparelItems::new();

    let id = ApparelPreparer::new(&svc, &cfg).add_item(&mut items, png("jacket.png", 801, 600), PreparationMode::Cutout)
                                             .await
                                             .unwrap();

    assert_eq!(svc.operation_names(),
               vec![COMPOSITE, GPT, COMPOSITE, OBJECT_DETECTION, SEGMENT_ANYTHING_MASK, CUT, COMPOSITE]);
    let calls = svc.calls();
    assert_eq!(calls[0].input["width"], json!(808));
    assert_eq!(calls[0].input["height"], json!(600));
    assert_eq!(calls[0].input["elements"][0]["fit"], json!("cover"));

    // margen de 30px alrededor de la imagen redimensionada
    assert_eq!(calls[2].input["width"], json!(868));
    assert_eq!(calls[2].input["height"], json!(660));
    assert_eq!(calls[2].input["elements"][0]["left"], json!(30));
    assert_eq!(calls[2].input["elements"][0]["width"], json!(808));
    assert_eq!(calls[3].input["labels"], json!(["the jacket cloth"]));
    assert_eq!(calls[4].input["box"], json!([10.6, 20.2, 110.1, 220.9]));
    assert_eq!(calls[4].input["maskThreshold"], json!(-1.0));

    let canvas = &calls[6].input;
    assert_eq!((canvas["width"].clone(), canvas["height"].clone()), (json!(832), json!(1200)));
    let element = &canvas["elements"][0];
    assert_eq!(element["left"], json!(30));
    assert_eq!(element["top"], json!(30));
    assert_eq!(element["width"], json!(772));
    assert_eq!(element["height"], json!(1140));
    assert_eq!(element["fit"], json!("contain"));

    let item = items.get(id).unwrap();
    assert!(item.image_id.is_some());
    assert!(item.processed_image_id.is_some());
    assert_ne!(item.image_id, item.processed_image_id);
    assert_eq!(item.category.as_deref(), Some("jacket"));
    assert_eq!(item.has_human, Some(false));
}

#[tokio::test]
async fn photo_on_model_is_cropped_to_detected_box() {
    let svc = scripted_service(true);
    let cfg = ProcessingConfig::default();
    let mut items = ApparelItems::new();

    ApparelPreparer::new(&svc, &cfg).add_item(&mut items, png("look.png", 832, 1200), PreparationMode::Cutout)
                                    .await
                                    .unwrap();

    // sin redimensionado: 832x1200 ya es apto
    assert_eq!(svc.operation_names(),
               vec![GPT, OBJECT_DETECTION, CROP, SEGMENT_ANYTHING_MASK, CUT, COMPOSITE]);
    let calls = svc.calls();
    let crop = &calls[2].input;
    assert_eq!(crop["left"], json!(10));
    assert_eq!(crop["top"], json!(20));
    assert_eq!(crop["width"], json!(100));
    assert_eq!(crop["height"], json!(201));
    assert_eq!(calls[3].input["box"], json!([0, 0, 100, 201]));
    assert_eq!(items.first().unwrap().has_human, Some(true));
}

#[tokio::test]
async fn describe_mode_keeps_resized_image_as_item_image() {
    let svc = scripted_service(false);
    let cfg = ProcessingConfig::default();
    let mut items = ApparelItems::new();

    let id = ApparelPreparer::new(&svc, &cfg).add_item(&mut items, png("shirt.png", 1000, 3000), PreparationMode::Describe)
                                             .await
                                             .unwrap();

    assert_eq!(svc.operation_names(), vec![COMPOSITE, GPT]);
    let calls = svc.calls();
    assert_eq!((calls[0].input["width"].clone(), calls[0].input["height"].clone()), (json!(504), json!(1504)));
    let item = items.get(id).unwrap();
    // la descripción se pidió sobre la imagen redimensionada, que es la que queda en el item
    assert_eq!(item.image_id.as_deref(), calls[1].input["imageId"].as_str());
    assert!(item.processed_image_id.is_none());
    assert_eq!(item.description.as_deref(), Some("blue denim jacket"));
}

#[tokio::test]
async fn failing_step_aborts_with_its_label() {
    let svc = scripted_service(false);
    svc.fail(SEGMENT_ANYTHING_MASK);
    let cfg = ProcessingConfig::default();
    let mut items = ApparelItems::new();

    let err = ApparelPreparer::new(&svc, &cfg).add_item(&mut items, png("jacket.png", 832, 1200), PreparationMode::Cutout)
                                              .await
                                              .unwrap_err();
    assert!(matches!(&err, ServiceError::OperationFailed { operation, .. } if operation == SEGMENT_ANYTHING_MASK));
    assert_eq!(err.step_label(), Some("segment"));
    assert_eq!(svc.operation_names().last().map(String::as_str), Some(SEGMENT_ANYTHING_MASK));

    // lo ya completado se conserva
    let item = items.first().unwrap();
    assert!(item.image_id.is_some());
    assert_eq!(item.category.as_deref(), Some("jacket"));
    assert!(item.processed_image_id.is_none());
}

#[tokio::test]
async fn unreadable_upload_is_rejected() {
    let svc = scripted_service(false);
    let cfg = ProcessingConfig::default();
    let mut items = ApparelItems::new();
    let file = flow_service::ImageFile { name: "notes.txt".into(),
                                         bytes: b"not an image".to_vec() };

    let err = ApparelPreparer::new(&svc, &cfg).add_item(&mut items, file, PreparationMode::Describe)
                                              .await
                                              .unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
    assert!(svc.calls().is_empty());
}
