//! # Pipeline Error Types
//!
//! Everything a stage can fail with. Assemblers turn these into a failed
//! [`GenerationResult`](crate::GenerationResult); they never escape the
//! public entry points.

use grimoire_procedural::{GeometryError, MaterialError};
use grimoire_rig::SkeletonError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while generating content.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Geometry build failed.
    #[error("geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Material composition failed.
    #[error("material: {0}")]
    Material(#[from] MaterialError),

    /// Rig construction or skinning failed.
    #[error("skeleton: {0}")]
    Skeleton(#[from] SkeletonError),

    /// Configuration was unusable.
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// A request field was out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A batch worker died before reporting.
    #[error("batch worker failed")]
    WorkerFailed,
}

impl GenerationError {
    /// True when the caller cancelled the build.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Geometry(GeometryError::Cancelled))
    }
}

/// Result type for pipeline stages.
pub type PipelineResult<T> = Result<T, GenerationError>;
