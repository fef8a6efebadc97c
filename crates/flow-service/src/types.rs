use std::fmt;

use flow_core::Template;
use flow_domain::ImageSize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Pending,
    Running,
    Finished,
    Failed,
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationStatus::Pending => "pending",
            OperationStatus::Running => "running",
            OperationStatus::Finished => "finished",
            OperationStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Estado terminal de una operación tras `wait`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: OperationId,
    pub operation: String,
    pub status: OperationStatus,
    #[serde(default)]
    pub output: Value,
}

impl OperationRecord {
    pub fn is_finished(&self) -> bool {
        self.status == OperationStatus::Finished
    }

    /// `output.imageId`.
    pub fn image_id(&self) -> Result<String, ServiceError> {
        self.output
            .get("imageId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Decode(format!("{} output has no imageId", self.operation)))
    }

    /// `output.data` deserializado.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        let data = self.output
                       .get("data")
                       .cloned()
                       .ok_or_else(|| ServiceError::Decode(format!("{} output has no data", self.operation)))?;
        Ok(serde_json::from_value(data)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntity {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl ImageEntity {
    pub fn size(&self) -> Result<ImageSize, ServiceError> {
        Ok(ImageSize::new(self.width, self.height)?)
    }
}

/// Archivo subido por el usuario.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineId(pub Uuid);

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cuerpo de "crear pipeline desde template".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePipelineRequest {
    pub template: Value,
    pub metadata: Value,
}

impl CreatePipelineRequest {
    pub fn from_template(template: &Template) -> Result<Self, ServiceError> {
        Ok(Self { template: template.to_wire(),
                  metadata: serde_json::to_value(template.metadata())? })
    }
}
