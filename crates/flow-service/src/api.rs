//! Traits del servicio remoto.

use std::sync::Arc;

use async_trait::async_trait;
use flow_core::OperationName;
use flow_ops::OperationInput;
use log::{debug, warn};
use serde_json::Value;

use crate::error::ServiceError;
use crate::types::{CreatePipelineRequest, ImageEntity, ImageFile, OperationId, OperationRecord, PipelineId};

#[async_trait]
pub trait OperationsService: Send + Sync {
    /// Lanza la operación; no espera a que termine.
    async fn run(&self, operation: &OperationName, input: Value) -> Result<OperationId, ServiceError>;
    /// Espera el estado terminal de la operación.
    async fn wait(&self, id: OperationId) -> Result<OperationRecord, ServiceError>;
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn create_from_file(&self, file: ImageFile) -> Result<ImageEntity, ServiceError>;
    async fn get(&self, id: &str) -> Result<Option<ImageEntity>, ServiceError>;
}

#[async_trait]
pub trait PipelineService: Send + Sync {
    async fn create_pipeline(&self, request: CreatePipelineRequest) -> Result<PipelineId, ServiceError>;
}

/// Ejecuta una operación con input literal y espera su resultado. Cualquier
/// estado distinto de `finished` aborta con `OperationFailed { label }`.
pub async fn run_and_wait<S, I>(service: &S, input: I, label: &str) -> Result<OperationRecord, ServiceError>
    where S: OperationsService + ?Sized,
          I: OperationInput
{
    let operation = I::operation();
    let params = input.into_step_input().to_literal_json()?;
    let id = service.run(&operation, params).await?;
    let record = service.wait(id).await?;
    if !record.is_finished() {
        warn!("operation:failed label={label} operation={operation} id={id} status={}", record.status);
        return Err(ServiceError::OperationFailed { label: label.to_string(),
                                                   operation: operation.to_string(),
                                                   status: record.status });
    }
    debug!("operation:finished label={label} operation={operation} id={id}");
    Ok(record)
}

#[async_trait]
impl<T: OperationsService + ?Sized> OperationsService for Arc<T> {
    async fn run(&self, operation: &OperationName, input: Value) -> Result<OperationId, ServiceError> {
        (**self).run(operation, input).await
    }

    async fn wait(&self, id: OperationId) -> Result<OperationRecord, ServiceError> {
        (**self).wait(id).await
    }
}

#[async_trait]
impl<T: ImageService + ?Sized> ImageService for Arc<T> {
    async fn create_from_file(&self, file: ImageFile) -> Result<ImageEntity, ServiceError> {
        (**self).create_from_file(file).await
    }

    async fn get(&self, id: &str) -> Result<Option<ImageEntity>, ServiceError> {
        (**self).get(id).await
    }
}

#[async_trait]
impl<T: PipelineService + ?Sized> PipelineService for Arc<T> {
    async fn create_pipeline(&self, request: CreatePipelineRequest) -> Result<PipelineId, ServiceError> {
        (**self).create_pipeline(request).await
    }
}
