//! # GRIMOIRE Lexicon
//!
//! Prompt understanding for the generation pipeline.
//!
//! ## Design Principles
//!
//! 1. **Total**: every prompt, including the empty one, parses to a config
//! 2. **Data-driven**: vocabulary lives in ordered `'static` tables
//! 3. **Deterministic**: the same prompt always yields the same config
//!
//! ## Example
//!
//! ```rust
//! use grimoire_lexicon::{parse_character, parse_scene};
//! use grimoire_shared::{BaseShape, CharacterType};
//!
//! let scene = parse_scene("a haunted twisted cathedral glowing red");
//! assert_eq!(scene.base_shape, BaseShape::Extrusion);
//! assert!(scene.modifiers.twisted);
//!
//! let intent = parse_character("a toad with a tail");
//! assert_eq!(intent.character_type, CharacterType::Creature);
//! assert_eq!(intent.name, "Toad");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod character;
pub mod name;
pub mod rules;
pub mod scene;
pub mod tables;

pub use character::parse_character;
pub use name::extract_name;
pub use rules::{KeywordRule, MatchMode, Tokens};
pub use scene::{parse_scene, parse_scene_with, SceneOverrides};
