//! # Rig Error Types

use thiserror::Error;

/// Structural problems with a skeleton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// No bones at all.
    #[error("skeleton has no bones")]
    Empty,

    /// Every bone has a parent.
    #[error("skeleton has no root bone")]
    NoRoot,

    /// More than one parentless bone.
    #[error("skeleton has {} root bones: {}", .0.len(), .0.join(", "))]
    MultipleRoots(Vec<String>),

    /// Two bones share a name.
    #[error("duplicate bone name: {0}")]
    DuplicateBone(String),

    /// A parent name that names no bone.
    #[error("bone {bone} has unknown parent {parent}")]
    UnresolvedParent {
        /// The child bone.
        bone: String,
        /// The missing parent name.
        parent: String,
    },

    /// Following parents from this bone never reaches the root.
    #[error("cycle in bone hierarchy at {0}")]
    Cycle(String),

    /// Too many bones to index with `u16`.
    #[error("skeleton has {count} bones, limit is {limit}")]
    TooManyBones {
        /// Bones in the skeleton.
        count: usize,
        /// Largest supported bone count.
        limit: usize,
    },

    /// A skinning worker thread panicked.
    #[error("skinning worker failed")]
    WorkerFailed,
}

/// Result type for rig operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;
