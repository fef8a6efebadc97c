//! Servicio en memoria.
//!
//! Cada operación termina en el acto. Sin respuesta programada, una
//! operación produce una imagen nueva (`{"imageId": ...}`) y, si el input trae
//! `width`/`height`, la registra con ese tamaño. Las respuestas de GPT,
//! detección, etc. se programan con `on`/`fail`.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use flow_core::OperationName;
use log::debug;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::{ImageService, OperationsService, PipelineService};
use crate::error::ServiceError;
use crate::types::{CreatePipelineRequest, ImageEntity, ImageFile, OperationId, OperationRecord, OperationStatus, PipelineId};

type Handler = Box<dyn Fn(&Value) -> (OperationStatus, Value) + Send + Sync>;

/// Llamada registrada, en orden de lanzamiento.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationCall {
    pub seq: u64,
    pub operation: String,
    pub input: Value,
}

#[derive(Debug, Clone)]
pub struct StoredPipeline {
    pub id: PipelineId,
    pub request: CreatePipelineRequest,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemoryService {
    seq: AtomicU64,
    handlers: DashMap<String, Handler>,
    operations: DashMap<OperationId, OperationRecord>,
    calls: DashMap<u64, OperationCall>,
    images: DashMap<String, ImageEntity>,
    pipelines: DashMap<PipelineId, StoredPipeline>,
    pipelines_unavailable: AtomicBool,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Programa la respuesta (`finished`) de una operación.
    pub fn on<F>(&self, operation: &str, f: F)
        where F: Fn(&Value) -> Value + Send + Sync + 'static
    {
        self.handlers
            .insert(operation.to_string(), Box::new(move |input| (OperationStatus::Finished, f(input))));
    }

    /// Hace que la operación termine en `failed`.
    pub fn fail(&self, operation: &str) {
        self.handlers
            .insert(operation.to_string(), Box::new(|_| (OperationStatus::Failed, Value::Null)));
    }

    /// Simula la caída del endpoint de pipelines.
    pub fn set_pipelines_unavailable(&self, unavailable: bool) {
        self.pipelines_unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Registra una imagen ya existente en el servicio.
    pub fn insert_image(&self, entity: ImageEntity) {
        self.images.insert(entity.id.clone(), entity);
    }

    pub fn calls(&self) -> Vec<OperationCall> {
        let mut calls: Vec<OperationCall> = self.calls.iter().map(|c| c.value().clone()).collect();
        calls.sort_by_key(|c| c.seq);
        calls
    }

    /// Nombres de operación lanzados, en orden.
    pub fn operation_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    pub fn pipelines(&self) -> Vec<StoredPipeline> {
        let mut out: Vec<StoredPipeline> = self.pipelines.iter().map(|p| p.value().clone()).collect();
        out.sort_by_key(|p| p.created_at);
        out
    }

    fn next(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst)
    }

    fn default_output(&self, input: &Value) -> Value {
        let id = format!("img-{}", self.next());
        let dims = (input.get("width").and_then(Value::as_u64), input.get("height").and_then(Value::as_u64));
        if let (Some(width), Some(height)) = dims {
            self.images.insert(id.clone(),
                               ImageEntity { id: id.clone(),
                                             width: width as u32,
                                             height: height as u32 });
        }
        json!({ "imageId": id })
    }
}

#[async_trait]
impl OperationsService for InMemoryService {
    async fn run(&self, operation: &OperationName, input: Value) -> Result<OperationId, ServiceError> {
        let seq = self.next();
        let (status, output) = match self.handlers.get(operation.as_str()) {
            Some(handler) => (handler.value())(&input),
            None => (OperationStatus::Finished, self.default_output(&input)),
        };
        let id = OperationId::new();
        debug!("memory:run seq={seq} operation={operation} id={id} status={status}");
        self.calls.insert(seq,
                          OperationCall { seq,
                                          operation: operation.to_string(),
                                          input });
        self.operations.insert(id,
                               OperationRecord { id,
                                                 operation: operation.to_string(),
                                                 status,
                                                 output });
        Ok(id)
    }

    async fn wait(&self, id: OperationId) -> Result<OperationRecord, ServiceError> {
        self.operations
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| ServiceError::NotFound(format!("operation {id}")))
    }
}

#[async_trait]
impl ImageService for InMemoryService {
    async fn create_from_file(&self, file: ImageFile) -> Result<ImageEntity, ServiceError> {
        let decode = |e: &dyn std::fmt::Display| ServiceError::Decode(format!("{}: {e}", file.name));
        let reader = image::ImageReader::new(Cursor::new(&file.bytes)).with_guessed_format()
                                                                      .map_err(|e| decode(&e))?;
        let (width, height) = reader.into_dimensions().map_err(|e| decode(&e))?;
        let entity = ImageEntity { id: format!("img-{}", self.next()),
                                   width,
                                   height };
        debug!("memory:upload name={} id={} size={}x{}", file.name, entity.id, width, height);
        self.images.insert(entity.id.clone(), entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: &str) -> Result<Option<ImageEntity>, ServiceError> {
        Ok(self.images.get(id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl PipelineService for InMemoryService {
    async fn create_pipeline(&self, request: CreatePipelineRequest) -> Result<PipelineId, ServiceError> {
        if self.pipelines_unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::Transport("pipelines endpoint unavailable".into()));
        }
        let id = PipelineId(Uuid::new_v4());
        self.pipelines.insert(id,
                              StoredPipeline { id,
                                               request,
                                               created_at: Utc::now() });
        Ok(id)
    }
}
