//! # GRIMOIRE Procedural Geometry
//!
//! Deterministic mesh and material synthesis for prompt-derived scenes.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same request, seed and clock always produce the same mesh
//! 2. **Bounded**: Recursive shapes stop at configured ceilings and say so
//! 3. **Cancellable**: Long builds poll a shared token between steps
//!
//! ## Core Components
//!
//! - `SimplexNoise` / `SeededRng`: the only sources of variation
//! - `primitives` / `shapes`: base geometry in a unit volume
//! - `modifiers` / `distortion`: per-vertex displacement passes
//! - `GeometryBuilder`: validation, limits and the fixed pass order
//! - `MaterialComposer`: renderer parameters, presets and animated variants
//!
//! ## Example
//!
//! ```rust
//! use grimoire_procedural::{BuildContext, GeometryBuilder, GeometryRequest, Seed};
//! use grimoire_shared::BaseShape;
//!
//! let mut request = GeometryRequest::new(BaseShape::Torus);
//! request.modifiers.twisted = true;
//!
//! let built = GeometryBuilder::default()
//!     .build(&request, &BuildContext::new(Seed::new(7)))
//!     .expect("valid request");
//! assert!(built.mesh.vertex_count() > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod builder;
pub mod cancel;
pub mod distortion;
pub mod error;
pub mod material;
pub mod mesh;
pub mod modifiers;
pub mod noise;
pub mod primitives;
pub mod rng;
pub mod shapes;

pub use builder::{
    BuildContext, BuildLimits, BuiltGeometry, GeometryBuilder, GeometryRequest, SegmentCounts,
};
pub use cancel::CancellationToken;
pub use error::{GeometryError, GeometryResult, MaterialError, MaterialResult};
pub use material::{
    AnimatedEffect, AnimatedMaterial, MaterialComposer, MaterialModel, PresetLibrary,
    RenderableMaterial, ShadingSample, Side,
};
pub use mesh::{Bounds, Mesh, MeshVertex};
pub use noise::{Seed, SimplexNoise};
pub use rng::SeededRng;
