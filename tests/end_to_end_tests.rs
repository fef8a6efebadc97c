use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use apparelflow::flow_core::{InMemorySubmissionLedger, TemplateError};
use apparelflow::flow_domain::{ApparelItems, ImageSize, Pose};
use apparelflow::flow_ops::{operations, ChipSelection, NaomiRequest, PromptSource};
use apparelflow::flow_service::{ApparelPreparer, CreatePipelineRequest, ImageFile, InMemoryService, PipelineId,
                                PipelineService, PipelineSubmitter, PreparationMode, ServiceError};
use apparelflow::{generate_naomi, AppConfig, AppError};
use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::json;

fn photo(width: u32, height: u32) -> ImageFile {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(width, height)).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                                                         .unwrap();
    ImageFile { name: "photo.png".into(),
                bytes }
}

fn scripted() -> Arc<InMemoryService> {
    let svc = InMemoryService::new();
    svc.on(operations::GPT, |_| json!({"data": {"description": "black dress", "productCategory": "dress", "hasHuman": false}}));
    svc.on(operations::OBJECT_DETECTION, |_| json!({"data": [[5.0, 5.0, 200.0, 400.0]]}));
    Arc::new(svc)
}

/// Falla las primeras `failures` llamadas.
struct FlakyPipelines {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl PipelineService for FlakyPipelines {
    async fn create_pipeline(&self, _request: CreatePipelineRequest) -> Result<PipelineId, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(ServiceError::Transport(format!("attempt {n} refused")));
        }
        Ok(PipelineId(Default::default()))
    }
}

fn naomi_request(items: &ApparelItems) -> NaomiRequest {
    NaomiRequest { item: items.first().cloned().unwrap(),
                   pose: Some(Pose { id: "pose-1".into(),
                                     preview_image_id: "pose-1-prev".into() }),
                   size: ImageSize::new(832, 1216).unwrap(),
                   aspect_ratio: "2:3".parse().unwrap(),
                   prompt: PromptSource::Literal("black dress, city street at night".into()),
                   chips: ChipSelection::default(),
                   seed: 12,
                   collection_id: "col".into() }
}

#[test]
fn prepared_item_flows_into_a_single_submission() {
    tokio_test::block_on(async {
        let svc = scripted();
        let config = AppConfig::default();
        let mut items = ApparelItems::new();
        ApparelPreparer::new(svc.as_ref(), &config.processing).add_item(&mut items, photo(640, 960), PreparationMode::Cutout)
                                                               .await
                                                               .unwrap();
        let submitter = PipelineSubmitter::new(svc.clone(), InMemorySubmissionLedger::new());
        let req = naomi_request(&items);

        let submission = generate_naomi(&submitter, &req, &config).await.unwrap();
        let stored = svc.pipelines();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, submission.pipeline_id);

        // la generación usa la imagen procesada por la preparación
        let naomi_step = &stored[0].request.template["steps"][0];
        assert_eq!(naomi_step["operation"], json!(operations::NAOMI));
        assert_eq!(naomi_step["input"]["garmentImageId"].as_str(), items.first().unwrap().processed_image_id.as_deref());
    });
}

#[tokio::test]
async fn remote_failures_do_not_consume_the_template() {
    let submitter = PipelineSubmitter::new(FlakyPipelines { failures: 2,
                                                            calls: AtomicUsize::new(0) },
                                           InMemorySubmissionLedger::new());
    let template = apparelflow::flow_core::TemplateBuilder::new().build();

    for _ in 0..2 {
        assert!(matches!(submitter.submit(&template).await, Err(ServiceError::Transport(_))));
    }
    submitter.submit(&template).await.unwrap();
    let err = submitter.submit(&template).await.unwrap_err();
    assert!(matches!(err, ServiceError::Template(TemplateError::AlreadySubmitted(_))));
    assert_eq!(submitter.service().calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn missing_preparation_surfaces_as_recipe_error() {
    let svc = scripted();
    let submitter = PipelineSubmitter::new(svc.clone(), InMemorySubmissionLedger::new());
    let mut items = ApparelItems::new();
    items.add_pending();

    let err = generate_naomi(&submitter, &naomi_request(&items), &AppConfig::default()).await.unwrap_err();
    assert!(matches!(err, AppError::Recipe(_)));
    assert!(svc.pipelines().is_empty());
}
