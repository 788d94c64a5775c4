//! # GRIMOIRE Shared
//!
//! The descriptor data model handed between pipeline stages and to the
//! collaborators that consume them (renderer, persistence, UI).
//!
//! ## CRITICAL RULE
//!
//! This crate holds data only. Parsing lives in `grimoire_lexicon`,
//! geometry in `grimoire_procedural`, rigs in `grimoire_rig`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod character;
pub mod color;
pub mod constants;
pub mod events;
pub mod hash;
pub mod math;
pub mod quality;
pub mod scene;

pub use character::{
    AnimationClip, AnimationPreset, BlendMode, BoneConfig, BoneType, CharacterConfig,
    CharacterFeatures, CharacterIntent, CharacterType, CollisionBox, CollisionKind, Keyframe,
    MaterialHints, MeshQuality, PhysicsParams, SkeletonConfig, TextureHint,
};
pub use color::Color;
pub use constants::{
    DEFAULT_EMISSIVE_INTENSITY, HORROR_THRESHOLD, MAX_BONE_INFLUENCES, MAX_COMPLEXITY, MAX_HORROR_LEVEL, MAX_SCALE,
    WEIGHT_EPSILON,
};
pub use events::{CollisionEvent, CollisionTag};
pub use hash::fnv1a;
pub use math::{Transform, Vec2, Vec3};
pub use quality::QualityTier;
pub use scene::{
    AnimationSpec, AtmosphereConfig, BaseShape, DistortionKind, DistortionSpec, Emissive,
    FogConfig, GeometryModifiers, GlassParams, LightingPreset, MaterialConfig, ParticleConfig,
    ParticleKind, PostProcessing, SceneAnimationKind, SceneConfig, Theme,
};

use thiserror::Error;

/// A string did not name a known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    /// Creates a parse error.
    #[must_use]
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
