//! # Procedural Error Types
//!
//! All errors that can occur while building geometry or composing materials.

use thiserror::Error;

/// Errors that can occur while building a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A scale component was non-finite, non-positive or too large.
    #[error("invalid scale on {axis} axis: {value} (must be finite and in (0, {max}])")]
    InvalidScale {
        /// Offending axis.
        axis: char,
        /// Offending value.
        value: f32,
        /// Upper bound.
        max: f32,
    },

    /// A distortion parameter was out of range.
    #[error("invalid distortion {name}: {value}")]
    InvalidDistortion {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Two modifiers that cannot be applied together were both requested.
    #[error("conflicting modifiers: {0} and {1}")]
    ConflictingModifiers(&'static str, &'static str),

    /// A shape parameter was unusable.
    #[error("invalid shape parameter: {0}")]
    InvalidParameter(String),

    /// The produced mesh failed structural checks.
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),

    /// The mesh grew beyond the configured vertex ceiling.
    #[error("vertex budget exceeded: {count} vertices, limit {limit}")]
    VertexBudgetExceeded {
        /// Vertices produced.
        count: usize,
        /// Configured ceiling.
        limit: usize,
    },

    /// The caller cancelled the build.
    #[error("build cancelled")]
    Cancelled,
}

/// Errors that can occur while composing a material.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    /// A numeric parameter was not finite.
    #[error("invalid material parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Result type for material operations.
pub type MaterialResult<T> = Result<T, MaterialError>;
