//! # Pipeline Constants
//!
//! Fixed bounds shared by parsers, builders and validators.

/// Upper bound of the horror score.
pub const MAX_HORROR_LEVEL: u8 = 10;

/// Upper bound of the complexity score.
pub const MAX_COMPLEXITY: u8 = 10;

/// Maximum bone influences per vertex.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Largest accepted scale component.
pub const MAX_SCALE: f32 = 1000.0;

/// Horror level above which a prompt counts as horror.
pub const HORROR_THRESHOLD: u8 = 3;

/// Tolerance when checking that skin weights sum to one.
pub const WEIGHT_EPSILON: f32 = 1e-5;

/// Emission strength when a description names a glow but no strength.
pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 1.0;
