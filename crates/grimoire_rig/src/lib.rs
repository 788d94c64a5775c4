//! # GRIMOIRE Rig
//!
//! Everything that makes a character move: a bone hierarchy for the body
//! plan, per-vertex bone weights for a mesh, keyframe clips for the
//! animation presets and the collision volumes that follow the bones.
//!
//! ## Example
//!
//! ```rust
//! use grimoire_rig::{synthesize, validate_skeleton, SkeletonGenerator};
//! use grimoire_shared::{AnimationPreset, CharacterFeatures, CharacterType};
//!
//! let features = CharacterFeatures { has_tail: true, ..CharacterFeatures::default() };
//! let skeleton = SkeletonGenerator::new().generate(CharacterType::Creature, &features, 1.0);
//! assert!(validate_skeleton(&skeleton).is_ok());
//!
//! let idle = synthesize(AnimationPreset::Idle, &skeleton, 1.0, None);
//! assert!(idle.track("tail_base").count() > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod animation;
pub mod collision;
pub mod error;
pub mod skeleton;
pub mod skinning;

pub use animation::{synthesize, synthesize_library, MAX_INTENSITY};
pub use collision::generate_collision_boxes;
pub use error::{SkeletonError, SkeletonResult};
pub use skeleton::{striking_bone, validate_skeleton, SkeletonGenerator};
pub use skinning::{BoneWeightCalculator, SkinData};
