// flow-domain library entry point
pub mod config;
pub mod description;
pub mod error;
pub mod image;
pub mod item;
pub mod metadata;
pub mod model;
pub use config::{CanvasConfig, GenerationConfig, ProcessingConfig};
pub use description::{detection_label, GarmentDescription};
pub use error::DomainError;
pub use image::{fit_for_generation, AspectRatio, ImageSize, Placement};
pub use item::{ApparelChip, ApparelItem, ApparelItems};
pub use metadata::{AiModel, Chips, PipelineInfo, PoseChip, SizeChip, StackInfo, Strict, Versioned, METADATA_VERSION};
pub use model::{ModelTraits, NaomiMode, Pose};
