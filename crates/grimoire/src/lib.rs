//! # GRIMOIRE
//!
//! Free-text prompts in, renderable descriptors out.
//!
//! ## Design Principles
//!
//! 1. **Total**: parsing never fails; build failures come back as values
//! 2. **Deterministic**: same prompt, seed and clock give the same output
//! 3. **Stateless**: assemblers can be shared across threads freely
//!
//! ## Pipeline
//!
//! - Scene path: [`SceneAssembler`] parses, merges the theme template,
//!   builds geometry, composes the material and writes a renderer snippet
//! - Character path: [`CharacterAssembler`] parses, rigs, builds and skins
//!   a proxy body, synthesizes clips and derives collision volumes
//! - [`BatchGenerator`] runs either path over many prompts in parallel
//!
//! ## Example
//!
//! ```rust
//! use grimoire::{CharacterAssembler, CharacterRequest, SceneAssembler, SceneRequest};
//!
//! let scene = SceneAssembler::default().generate("a haunted twisted cathedral glowing red", &SceneRequest::default());
//! assert!(scene.success);
//!
//! let toad = CharacterAssembler::default().generate("a toad with a tail", &CharacterRequest::with_quality("low"));
//! assert_eq!(toad.config.map(|o| o.character.name).as_deref(), Some("Toad"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod character;
pub mod clock;
pub mod config;
pub mod error;
pub mod result;
pub mod scene;
pub mod snippet;
pub mod templates;
pub mod validate;

pub use batch::BatchGenerator;
pub use character::{CharacterAssembler, CharacterOutput, CharacterRequest};
pub use config::{ConfigError, ConfigResult, GeneratorConfig, LimitsConfig, SegmentsConfig};
pub use error::{GenerationError, PipelineResult};
pub use result::GenerationResult;
pub use scene::{SceneAssembler, SceneOutput, SceneRequest};
pub use snippet::render_snippet;
pub use templates::{character_template, theme_template, CharacterTemplate, ThemeTemplate};
pub use validate::{validate_character, validate_scene};

pub use grimoire_shared as shared;
