//! Static object descriptors.
//!
//! A [`SceneConfig`] is everything the scene path derives from a prompt:
//! which base shape to build, how to bend it, what it is made of and the
//! mood around it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::constants::{DEFAULT_EMISSIVE_INTENSITY, MAX_COMPLEXITY, MAX_HORROR_LEVEL};
use crate::math::Vec3;
use crate::ParseEnumError;

/// Base geometry family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseShape {
    /// Axis-aligned box
    Box,
    /// UV sphere
    #[default]
    Sphere,
    /// Capped cylinder
    Cylinder,
    /// Ring torus
    Torus,
    /// Capped cone
    Cone,
    /// Row of glyph slabs
    Text,
    /// Beveled profile extrusion (gothic arch)
    Extrusion,
    /// Helically sheared cylinder
    Twisted,
    /// Recursive cube cluster
    Fractal,
    /// Recursive branching trunk
    Organic,
}

impl BaseShape {
    /// Every shape, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Box,
        Self::Sphere,
        Self::Cylinder,
        Self::Torus,
        Self::Cone,
        Self::Text,
        Self::Extrusion,
        Self::Twisted,
        Self::Fractal,
        Self::Organic,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Torus => "torus",
            Self::Cone => "cone",
            Self::Text => "text",
            Self::Extrusion => "extrusion",
            Self::Twisted => "twisted",
            Self::Fractal => "fractal",
            Self::Organic => "organic",
        }
    }

    /// True for the shapes built by recursive constructors.
    #[must_use]
    pub const fn is_recursive(self) -> bool {
        matches!(self, Self::Fractal | Self::Organic)
    }
}

impl fmt::Display for BaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall stylistic classification of a prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Editorial and horror cues together
    Hybrid,
    /// Print / typography look
    Editorial,
    /// Film-like staging
    Cinematic,
    /// Horror level above the threshold
    Horror,
    /// Nothing specific
    #[default]
    Abstract,
}

impl Theme {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hybrid => "hybrid",
            Self::Editorial => "editorial",
            Self::Cinematic => "cinematic",
            Self::Horror => "horror",
            Self::Abstract => "abstract",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Self::Hybrid),
            "editorial" => Ok(Self::Editorial),
            "cinematic" => Ok(Self::Cinematic),
            "horror" => Ok(Self::Horror),
            "abstract" => Ok(Self::Abstract),
            _ => Err(ParseEnumError::new("theme", s)),
        }
    }
}

/// Self-illumination.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emissive {
    /// Emitted color
    pub color: Color,
    /// Emission strength; omitted in a description it reads as
    /// [`DEFAULT_EMISSIVE_INTENSITY`].
    #[serde(default = "default_emissive_intensity")]
    pub intensity: f32,
}

impl Emissive {
    /// Glow in `color` at the default strength.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            intensity: DEFAULT_EMISSIVE_INTENSITY,
        }
    }

    /// Replaces the strength.
    #[must_use]
    pub const fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

const fn default_emissive_intensity() -> f32 {
    DEFAULT_EMISSIVE_INTENSITY
}

/// Glass-like transmission parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlassParams {
    /// Fraction of light transmitted [0, 1]
    pub transmission: f32,
    /// Index of refraction
    pub ior: f32,
    /// Volume thickness
    pub thickness: f32,
}

impl Default for GlassParams {
    fn default() -> Self {
        Self {
            transmission: 0.9,
            ior: 1.5,
            thickness: 0.5,
        }
    }
}

/// PBR-like material description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// Base color
    pub color: Color,
    /// Roughness [0, 1]
    pub roughness: f32,
    /// Metalness [0, 1]
    pub metalness: f32,
    /// Optional emission
    pub emissive: Option<Emissive>,
    /// Optional opacity; `Some` implies transparency
    pub opacity: Option<f32>,
    /// Optional glass parameters
    pub glass: Option<GlassParams>,
    /// Optional clearcoat strength
    pub clearcoat: Option<f32>,
    /// Render as wireframe
    pub wireframe: bool,
    /// Named preset this material was derived from
    pub preset: Option<String>,
}

impl MaterialConfig {
    /// The safe fallback: white, half rough, half metallic.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 0.5,
            metalness: 0.5,
            emissive: None,
            opacity: None,
            glass: None,
            clearcoat: None,
            wireframe: false,
            preset: None,
        }
    }

    /// Plain material with the given color and surface.
    #[must_use]
    pub fn solid(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            ..Self::fallback()
        }
    }

    /// True when the material needs alpha blending.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.glass.is_some() || self.opacity.is_some_and(|o| o < 1.0)
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Parameterized per-vertex displacement family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionKind {
    /// Fractal noise along the normal
    Noise,
    /// Height-driven twist
    Twist,
    /// Noise-driven shrink
    Decay,
    /// Thresholded pits
    Erosion,
    /// Vertical stretch, volume-preserving
    Stretch,
    /// Upper half sags and spreads
    Melt,
    /// Thresholded outward burst
    Shatter,
    /// Clock-driven breathing scale
    Pulse,
    /// Sparse random jitter
    Glitch,
}

impl DistortionKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noise => "noise",
            Self::Twist => "twist",
            Self::Decay => "decay",
            Self::Erosion => "erosion",
            Self::Stretch => "stretch",
            Self::Melt => "melt",
            Self::Shatter => "shatter",
            Self::Pulse => "pulse",
            Self::Glitch => "glitch",
        }
    }

    /// Default spatial frequency for this kind.
    #[must_use]
    pub const fn default_frequency(self) -> f32 {
        match self {
            Self::Glitch => 4.0,
            Self::Pulse => 2.0,
            _ => 1.0,
        }
    }

    /// True when the displacement changes with the clock.
    #[must_use]
    pub const fn is_time_varying(self) -> bool {
        matches!(self, Self::Pulse | Self::Glitch)
    }
}

/// A concrete distortion request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistortionSpec {
    /// Which kernel
    pub kind: DistortionKind,
    /// Displacement strength
    pub intensity: f32,
    /// Spatial (or temporal, for pulse) frequency
    pub frequency: f32,
    /// PRNG / noise seed
    pub seed: u64,
    /// Renderer should re-evaluate over time
    pub animate: bool,
}

impl DistortionSpec {
    /// Creates a spec with the kind's default frequency.
    #[must_use]
    pub const fn new(kind: DistortionKind, intensity: f32, seed: u64) -> Self {
        Self {
            kind,
            intensity,
            frequency: kind.default_frequency(),
            seed,
            animate: kind.is_time_varying(),
        }
    }
}

/// Independent geometry modifier flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryModifiers {
    /// Rotate around the vertical axis by height
    pub twisted: bool,
    /// Noise-driven shrink
    pub decayed: bool,
    /// Thresholded outward cracks
    pub fractured: bool,
    /// Hand-sculpted jitter
    pub organic: bool,
    /// Inner shell
    pub hollow: bool,
    /// Exaggerate extremities
    pub sharp: bool,
    /// Soften extremities
    pub smooth: bool,
    /// Explicit distortion
    pub distortion: Option<DistortionSpec>,
}

impl GeometryModifiers {
    /// Names of the active flags, in application order.
    #[must_use]
    pub fn active_names(&self) -> Vec<&'static str> {
        [
            (self.hollow, "hollow"),
            (self.twisted, "twisted"),
            (self.decayed, "decayed"),
            (self.fractured, "fractured"),
            (self.organic, "organic"),
            (self.sharp, "sharp"),
            (self.smooth, "smooth"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }

    /// True when nothing would touch the base mesh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_names().is_empty() && self.distortion.is_none()
    }
}

/// Airborne particle family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Drifting dust motes
    Dust,
    /// Rising glowing embers
    Embers,
    /// Falling ash
    Ash,
    /// Electric sparks
    Sparks,
    /// Floating spores
    Spores,
    /// Snowfall
    Snow,
}

impl ParticleKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dust => "dust",
            Self::Embers => "embers",
            Self::Ash => "ash",
            Self::Sparks => "sparks",
            Self::Spores => "spores",
            Self::Snow => "snow",
        }
    }

    /// Typical particle tint.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Self::Dust => Color::from_hex(0xC8B89A),
            Self::Embers => Color::from_hex(0xFF5A1F),
            Self::Ash => Color::from_hex(0x5A5A5A),
            Self::Sparks => Color::from_hex(0x9FD8FF),
            Self::Spores => Color::from_hex(0x9ACD32),
            Self::Snow => Color::WHITE,
        }
    }
}

/// Distance fog.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FogConfig {
    /// Fog tint
    pub color: Color,
    /// Start distance
    pub near: f32,
    /// Full-density distance
    pub far: f32,
}

/// Particle emitter description.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Family
    pub kind: ParticleKind,
    /// Particle count
    pub count: u32,
    /// Tint
    pub color: Color,
}

impl ParticleConfig {
    /// Emitter with default count and tint for `kind`.
    #[must_use]
    pub const fn of(kind: ParticleKind) -> Self {
        Self {
            kind,
            count: 500,
            color: kind.default_color(),
        }
    }
}

/// Lighting rig preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingPreset {
    /// Plain three-point
    #[default]
    Neutral,
    /// Hard key, deep shadows
    Dramatic,
    /// Low, cold, underlit
    Eerie,
    /// Saturated colored rim lights
    Neon,
    /// Cold blue key
    Moonlight,
    /// Warm flickering point lights
    Candlelight,
    /// Soft even product lighting
    Studio,
}

impl LightingPreset {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Dramatic => "dramatic",
            Self::Eerie => "eerie",
            Self::Neon => "neon",
            Self::Moonlight => "moonlight",
            Self::Candlelight => "candlelight",
            Self::Studio => "studio",
        }
    }
}

/// Post-processing switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostProcessing {
    /// Bloom on bright areas
    pub bloom: bool,
    /// Film grain
    pub film_grain: bool,
    /// Darkened corners
    pub vignette: bool,
    /// Color fringing
    pub chromatic_aberration: bool,
    /// Digital glitch pass
    pub glitch: bool,
}

impl PostProcessing {
    /// Number of enabled passes.
    #[must_use]
    pub fn active_count(&self) -> u8 {
        [
            self.bloom,
            self.film_grain,
            self.vignette,
            self.chromatic_aberration,
            self.glitch,
        ]
        .iter()
        .filter(|on| **on)
        .count() as u8
    }

    /// Enables every pass set in `other`.
    pub fn merge(&mut self, other: Self) {
        self.bloom |= other.bloom;
        self.film_grain |= other.film_grain;
        self.vignette |= other.vignette;
        self.chromatic_aberration |= other.chromatic_aberration;
        self.glitch |= other.glitch;
    }
}

/// Everything around the object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    /// Optional distance fog
    pub fog: Option<FogConfig>,
    /// Optional particle emitter
    pub particles: Option<ParticleConfig>,
    /// Lighting rig
    pub lighting: LightingPreset,
    /// Post-processing switches
    pub post_processing: PostProcessing,
    /// Optional clear color
    pub background: Option<Color>,
}

/// Object-level motion family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneAnimationKind {
    /// Spin around Y
    Rotate,
    /// Bob up and down
    Float,
    /// Scale in and out
    Pulse,
    /// Emission flicker
    Flicker,
    /// Slow scale swell
    Breathe,
    /// Circle around the origin
    Orbit,
}

impl SceneAnimationKind {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Float => "float",
            Self::Pulse => "pulse",
            Self::Flicker => "flicker",
            Self::Breathe => "breathe",
            Self::Orbit => "orbit",
        }
    }
}

/// One object-level animation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// Motion family
    pub kind: SceneAnimationKind,
    /// Cycles per second
    pub speed: f32,
    /// Motion magnitude
    pub amplitude: f32,
}

impl AnimationSpec {
    /// Spec with the default speed and amplitude for `kind`.
    #[must_use]
    pub const fn of(kind: SceneAnimationKind) -> Self {
        let (speed, amplitude) = match kind {
            SceneAnimationKind::Rotate => (0.25, 1.0),
            SceneAnimationKind::Float => (0.5, 0.2),
            SceneAnimationKind::Pulse => (1.0, 0.1),
            SceneAnimationKind::Flicker => (8.0, 0.6),
            SceneAnimationKind::Breathe => (0.3, 0.05),
            SceneAnimationKind::Orbit => (0.1, 2.0),
        };
        Self { kind, speed, amplitude }
    }
}

/// Complete descriptor for a static object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Source prompt
    pub prompt: String,
    /// Base geometry
    pub base_shape: BaseShape,
    /// Per-axis size
    pub scale: Vec3,
    /// Optional placement
    pub position: Option<Vec3>,
    /// Optional euler rotation
    pub rotation: Option<Vec3>,
    /// Surface
    pub materials: MaterialConfig,
    /// Geometry modifiers
    pub modifiers: GeometryModifiers,
    /// Surroundings
    pub atmosphere: AtmosphereConfig,
    /// Object motion
    pub animations: Vec<AnimationSpec>,
    /// Style classification
    pub theme: Theme,
    /// Thematic intensity [0, 10]
    pub horror_level: u8,
    /// Generation richness [0, 10]
    pub complexity: u8,
    /// Sorted, de-duplicated tags
    pub tags: BTreeSet<String>,
    /// Glyphs for the text shape
    pub text: Option<String>,
}

impl SceneConfig {
    /// Sets the horror level, clamped to [0, 10].
    pub fn set_horror_level(&mut self, level: i32) {
        self.horror_level = clamp_score(level, MAX_HORROR_LEVEL);
    }

    /// Sets the complexity, clamped to [0, 10].
    pub fn set_complexity(&mut self, complexity: i32) {
        self.complexity = clamp_score(complexity, MAX_COMPLEXITY);
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            base_shape: BaseShape::default(),
            scale: Vec3::ONE,
            position: None,
            rotation: None,
            materials: MaterialConfig::default(),
            modifiers: GeometryModifiers::default(),
            atmosphere: AtmosphereConfig::default(),
            animations: Vec::new(),
            theme: Theme::default(),
            horror_level: 0,
            complexity: 0,
            tags: BTreeSet::new(),
            text: None,
        }
    }
}

/// Clamps an integer score into `[0, max]`.
#[must_use]
pub fn clamp_score(value: i32, max: u8) -> u8 {
    value.clamp(0, i32::from(max)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape_is_sphere() {
        assert_eq!(SceneConfig::default().base_shape, BaseShape::Sphere);
    }

    #[test]
    fn test_scores_clamp() {
        let mut scene = SceneConfig::default();
        scene.set_horror_level(42);
        scene.set_complexity(-3);
        assert_eq!(scene.horror_level, 10);
        assert_eq!(scene.complexity, 0);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!("Horror".parse::<Theme>(), Ok(Theme::Horror));
        assert!("gothic".parse::<Theme>().is_err());
    }

    #[test]
    fn test_active_modifier_names_follow_application_order() {
        let mods = GeometryModifiers {
            smooth: true,
            twisted: true,
            hollow: true,
            ..GeometryModifiers::default()
        };
        assert_eq!(mods.active_names(), vec!["hollow", "twisted", "smooth"]);
        assert!(!mods.is_empty());
        assert!(GeometryModifiers::default().is_empty());
    }

    #[test]
    fn test_transparency() {
        let mut mat = MaterialConfig::default();
        assert!(!mat.is_transparent());
        mat.opacity = Some(0.4);
        assert!(mat.is_transparent());
    }

    #[test]
    fn test_scene_serializes_with_snake_case_enums() {
        let scene = SceneConfig {
            base_shape: BaseShape::Extrusion,
            ..SceneConfig::default()
        };
        let text = toml::to_string(&scene).expect("serialize");
        assert!(text.contains("base_shape = \"extrusion\""));
    }

    #[test]
    fn test_emissive_intensity_defaults_when_omitted() {
        let glow: Emissive = toml::from_str("[color]\nr = 1.0\ng = 0.0\nb = 0.0\n").expect("deserialize");
        assert_eq!(glow, Emissive::new(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(glow.intensity, DEFAULT_EMISSIVE_INTENSITY);

        let bright: Emissive = toml::from_str("intensity = 2.5\n[color]\nr = 1.0\ng = 0.0\nb = 0.0\n").expect("deserialize");
        assert_eq!(bright.intensity, 2.5);
    }
}
