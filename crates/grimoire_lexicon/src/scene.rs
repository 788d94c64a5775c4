//! # Scene Prompt Parser
//!
//! Turns free text into a [`SceneConfig`]. Parsing never fails: unknown
//! words are ignored and every field falls back to a default.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use grimoire_shared::{
    fnv1a, AnimationSpec, AtmosphereConfig, BaseShape, DistortionSpec, Emissive, GeometryModifiers,
    GlassParams, LightingPreset, MaterialConfig, ParticleConfig, SceneConfig, Theme, Vec3,
    HORROR_THRESHOLD,
};

use crate::rules::{all_matches, contains_any, contains_substring, earliest_match, first_match, Tokens};
use crate::tables::{
    theme_surface, MaterialCue, ModifierFlag, ATMOSPHERE_PRESETS, CINEMATIC_CUES, COLOR_WORDS,
    DEFAULT_FOG, DISTORTION_WORDS, EDITORIAL_CUES, FOG_WORDS, GLITCH_POST_WORDS, HORROR_BOOSTS,
    HORROR_WORDS, LIGHTING_WORDS, MATERIAL_CUES, MODIFIER_WORDS, PARTICLE_WORDS, SCALE_WORDS,
    SCENE_ANIMATION_WORDS, SHAPE_CONTEXT, SHAPE_WORDS,
};

/// Text used for a text shape with no quoted string.
pub const DEFAULT_TEXT: &str = "TEXT";

/// Opacity for ghostly surfaces.
pub const GHOSTLY_OPACITY: f32 = 0.45;

/// Opacity for glass surfaces.
pub const GLASS_OPACITY: f32 = 0.6;

static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"|(?:^|[\s(\[])'([^']+)'"#).expect("quoted-text pattern is valid")
});

/// Caller choices that replace what the parser derives.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneOverrides {
    /// Replaces the derived theme.
    pub theme: Option<Theme>,
    /// Replaces the derived scale.
    pub scale: Option<Vec3>,
}

/// Parses a scene prompt with no overrides.
#[must_use]
pub fn parse_scene(prompt: &str) -> SceneConfig {
    parse_scene_with(prompt, &SceneOverrides::default())
}

/// Parses a scene prompt.
#[must_use]
pub fn parse_scene_with(prompt: &str, overrides: &SceneOverrides) -> SceneConfig {
    let tokens = Tokens::new(prompt);
    let mut scene = SceneConfig {
        prompt: prompt.to_owned(),
        ..SceneConfig::default()
    };
    let mut tags = BTreeSet::new();

    let quoted = quoted_text(prompt);
    scene.base_shape = detect_shape(&tokens, quoted.is_some(), &mut tags);
    if scene.base_shape == BaseShape::Text {
        scene.text = Some(quoted.unwrap_or_else(|| DEFAULT_TEXT.to_owned()));
    }

    scene.set_horror_level(horror_score(&tokens));
    scene.theme = overrides.theme.unwrap_or_else(|| resolve_theme(&tokens, scene.horror_level));

    scene.modifiers = detect_modifiers(&tokens);
    scene.animations = all_matches(SCENE_ANIMATION_WORDS, &tokens)
        .into_iter()
        .map(AnimationSpec::of)
        .collect();
    if let Some(kind) = earliest_match(DISTORTION_WORDS, &tokens) {
        let intensity = (0.3 + 0.05 * f32::from(scene.horror_level)).min(1.0);
        let mut spec = DistortionSpec::new(kind, intensity, fnv1a(tokens.text().as_bytes()));
        spec.animate |= !scene.animations.is_empty();
        scene.modifiers.distortion = Some(spec);
    }

    scene.atmosphere = detect_atmosphere(&tokens, &mut tags);
    scene.materials = derive_material(&tokens, scene.theme, scene.horror_level);
    scene.scale = overrides
        .scale
        .or_else(|| first_match(SCALE_WORDS, &tokens).map(Vec3::splat))
        .unwrap_or(Vec3::ONE);
    scene.set_complexity(complexity_score(&scene));

    tags.insert(scene.theme.as_str().to_owned());
    tags.insert(scene.base_shape.as_str().to_owned());
    tags.extend(scene.modifiers.active_names().into_iter().map(str::to_owned));
    if let Some(spec) = &scene.modifiers.distortion {
        tags.insert(spec.kind.as_str().to_owned());
    }
    tags.extend(scene.animations.iter().map(|a| a.kind.as_str().to_owned()));
    scene.tags = tags;

    tracing::debug!(
        "Parsed scene: shape={}, theme={}, horror={}, complexity={}",
        scene.base_shape.as_str(),
        scene.theme.as_str(),
        scene.horror_level,
        scene.complexity
    );
    scene
}

/// First quoted substring (`"…"` or `'…'`), trimmed; `None` when absent or blank.
#[must_use]
pub fn quoted_text(prompt: &str) -> Option<String> {
    QUOTED
        .captures_iter(prompt)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().trim().to_owned())
        .find(|t| !t.is_empty())
}

fn detect_shape(tokens: &Tokens, has_quote: bool, tags: &mut BTreeSet<String>) -> BaseShape {
    for rule in SHAPE_CONTEXT {
        for keyword in rule.keywords {
            if tokens.has_word(keyword) {
                tags.insert((*keyword).to_owned());
            }
        }
    }
    first_match(SHAPE_WORDS, tokens)
        .or_else(|| first_match(SHAPE_CONTEXT, tokens))
        .unwrap_or(if has_quote { BaseShape::Text } else { BaseShape::Sphere })
}

/// Averaged keyword intensity plus one-off boosts, rounded.
///
/// Unclamped; callers clamp into `[0, 10]`.
#[must_use]
pub fn horror_score(tokens: &Tokens) -> i32 {
    let hits: Vec<u8> = HORROR_WORDS
        .iter()
        .filter(|(word, _)| tokens.has_word(word))
        .map(|(_, level)| *level)
        .collect();
    let average = if hits.is_empty() {
        0.0
    } else {
        hits.iter().map(|&l| f32::from(l)).sum::<f32>() / hits.len() as f32
    };
    let boost: i32 = HORROR_BOOSTS
        .iter()
        .filter(|(word, _)| tokens.text().contains(word))
        .map(|(_, b)| *b)
        .sum();
    (average + boost as f32).round() as i32
}

/// Hybrid > editorial > cinematic > horror > abstract.
#[must_use]
pub fn resolve_theme(tokens: &Tokens, horror_level: u8) -> Theme {
    let editorial = contains_substring(tokens, EDITORIAL_CUES);
    let cinematic = contains_substring(tokens, CINEMATIC_CUES);
    let horror = horror_level > HORROR_THRESHOLD;
    match (editorial, cinematic, horror) {
        (true, _, true) => Theme::Hybrid,
        (true, _, false) => Theme::Editorial,
        (false, true, _) => Theme::Cinematic,
        (false, false, true) => Theme::Horror,
        (false, false, false) => Theme::Abstract,
    }
}

fn detect_modifiers(tokens: &Tokens) -> GeometryModifiers {
    let mut modifiers = GeometryModifiers::default();
    for flag in all_matches(MODIFIER_WORDS, tokens) {
        match flag {
            ModifierFlag::Twisted => modifiers.twisted = true,
            ModifierFlag::Decayed => modifiers.decayed = true,
            ModifierFlag::Fractured => modifiers.fractured = true,
            ModifierFlag::Organic => modifiers.organic = true,
            ModifierFlag::Hollow => modifiers.hollow = true,
            ModifierFlag::Sharp => modifiers.sharp = true,
            ModifierFlag::Smooth => modifiers.smooth = true,
        }
    }
    if modifiers.sharp && modifiers.smooth {
        // keep whichever the prompt mentions first
        let position = |flag: ModifierFlag| {
            MODIFIER_WORDS
                .iter()
                .find(|r| r.value == flag)
                .and_then(|r| r.position(tokens))
        };
        if position(ModifierFlag::Sharp) <= position(ModifierFlag::Smooth) {
            modifiers.smooth = false;
        } else {
            modifiers.sharp = false;
        }
    }
    modifiers
}

fn detect_atmosphere(tokens: &Tokens, tags: &mut BTreeSet<String>) -> AtmosphereConfig {
    let mut atmosphere = AtmosphereConfig::default();
    if let Some(preset) = first_match(ATMOSPHERE_PRESETS, tokens) {
        let bundle = preset.bundle();
        atmosphere.fog = bundle.fog;
        atmosphere.particles = bundle.particles;
        atmosphere.lighting = bundle.lighting;
        atmosphere.post_processing = bundle.post;
        atmosphere.background = bundle.background;
        tags.insert(preset.as_str().to_owned());
    }
    if contains_any(tokens, FOG_WORDS) && atmosphere.fog.is_none() {
        atmosphere.fog = Some(DEFAULT_FOG);
    }
    if let Some(kind) = first_match(PARTICLE_WORDS, tokens) {
        atmosphere.particles = Some(ParticleConfig::of(kind));
    }
    if let Some(lighting) = first_match(LIGHTING_WORDS, tokens) {
        atmosphere.lighting = lighting;
    }
    if contains_any(tokens, GLITCH_POST_WORDS) {
        atmosphere.post_processing.glitch = true;
    }
    atmosphere
}

fn derive_material(tokens: &Tokens, theme: Theme, horror_level: u8) -> MaterialConfig {
    let (theme_color, roughness, metalness) = theme_surface(theme);
    let color = earliest_match(COLOR_WORDS, tokens).unwrap_or(theme_color);
    let mut material = MaterialConfig::solid(color, roughness, metalness);

    for cue in all_matches(MATERIAL_CUES, tokens) {
        match cue {
            MaterialCue::Glow => {
                material.emissive = Some(Emissive {
                    color,
                    intensity: 0.5 + 0.05 * f32::from(horror_level),
                });
            }
            MaterialCue::Glass => {
                material.glass = Some(GlassParams::default());
                material.opacity = Some(GLASS_OPACITY);
            }
            MaterialCue::Ghostly => material.opacity = Some(GHOSTLY_OPACITY),
            MaterialCue::Metallic => {
                material.metalness = 0.9;
                material.roughness = 0.3;
            }
            MaterialCue::Rough => material.roughness = 0.9,
            MaterialCue::Glossy => material.clearcoat = Some(1.0),
            MaterialCue::Wireframe => material.wireframe = true,
        }
    }
    material
}

/// Base 2, plus modifier, animation and atmosphere contributions.
///
/// Unclamped; callers clamp into `[0, 10]`.
#[must_use]
pub fn complexity_score(scene: &SceneConfig) -> i32 {
    let m = &scene.modifiers;
    let atmosphere = &scene.atmosphere;
    let mut score = 2;
    score += i32::from(m.twisted) + i32::from(m.decayed);
    score += 2 * (i32::from(m.fractured) + i32::from(m.organic) + i32::from(m.distortion.is_some()));
    score += scene.animations.len() as i32;
    score += i32::from(atmosphere.fog.is_some());
    score += 2 * i32::from(atmosphere.particles.is_some());
    score += i32::from(atmosphere.lighting != LightingPreset::Neutral);
    score += i32::from(atmosphere.post_processing.active_count());
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_shared::{Color, DistortionKind, ParticleKind, SceneAnimationKind};

    #[test]
    fn test_haunted_cathedral() {
        let scene = parse_scene("a haunted twisted cathedral glowing red");
        assert_eq!(scene.base_shape, BaseShape::Extrusion);
        assert!(scene.horror_level >= 4, "horror {}", scene.horror_level);
        assert!(matches!(scene.theme, Theme::Horror | Theme::Hybrid));
        assert!(scene.modifiers.twisted);
        assert_eq!(scene.materials.color, Color::from_hex(0xFF0000));
        let emissive = scene.materials.emissive.expect("glowing sets emissive");
        assert_eq!(emissive.color, Color::from_hex(0xFF0000));
        assert!(scene.tags.contains("cathedral"));
        assert!(scene.tags.contains("haunted"));
    }

    #[test]
    fn test_empty_prompt_defaults() {
        let scene = parse_scene("");
        assert_eq!(scene.base_shape, BaseShape::Sphere);
        assert_eq!(scene.theme, Theme::Abstract);
        assert_eq!(scene.horror_level, 0);
        assert_eq!(scene.complexity, 2);
        assert_eq!(scene.scale, Vec3::ONE);
    }

    #[test]
    fn test_word_table_beats_context() {
        assert_eq!(parse_scene("a gothic sphere").base_shape, BaseShape::Sphere);
        assert_eq!(parse_scene("a gothic tower").base_shape, BaseShape::Extrusion);
        assert_eq!(parse_scene("writhing tentacled organism").base_shape, BaseShape::Organic);
    }

    #[test]
    fn test_horror_boosts_apply_once() {
        let once = horror_score(&Tokens::new("blood"));
        let twice = horror_score(&Tokens::new("blood blood blood"));
        assert_eq!(once, twice);
        assert_eq!(once, 8 + 3);
        assert_eq!(parse_scene("blood terror nightmare death corpse").horror_level, 10);
    }

    #[test]
    fn test_theme_priority() {
        assert_eq!(parse_scene("a magazine cover").theme, Theme::Editorial);
        assert_eq!(parse_scene("a cinematic orb").theme, Theme::Cinematic);
        assert_eq!(parse_scene("a haunted skull").theme, Theme::Horror);
        assert_eq!(parse_scene("a haunted magazine skull").theme, Theme::Hybrid);
        let forced = parse_scene_with(
            "a haunted skull",
            &SceneOverrides {
                theme: Some(Theme::Editorial),
                ..SceneOverrides::default()
            },
        );
        assert_eq!(forced.theme, Theme::Editorial);
    }

    #[test]
    fn test_distortion_spec() {
        let scene = parse_scene("a melting glitchy cube");
        let spec = scene.modifiers.distortion.expect("distortion");
        assert_eq!(spec.kind, DistortionKind::Melt, "earliest distortion word wins");
        assert_eq!(spec.seed, fnv1a(b"a melting glitchy cube"));
        assert!(!spec.animate);
        assert!(scene.atmosphere.post_processing.glitch);

        let pulsing = parse_scene("a PULSING heart orb").modifiers.distortion.expect("distortion");
        assert_eq!(pulsing.kind, DistortionKind::Pulse);
        assert_eq!(pulsing.frequency, 2.0);
        assert!(pulsing.animate);
    }

    #[test]
    fn test_distortion_intensity_tracks_horror() {
        let calm = parse_scene("a melting cube").modifiers.distortion.expect("distortion");
        assert!((calm.intensity - 0.3).abs() < 1e-6);
        let scene = parse_scene("a melting corpse of blood");
        let grim = scene.modifiers.distortion.expect("distortion");
        assert!(grim.intensity <= 1.0);
        assert!(grim.intensity > calm.intensity);
    }

    #[test]
    fn test_sharp_and_smooth_keep_first() {
        let m = parse_scene("a smooth but sharp ring").modifiers;
        assert!(m.smooth && !m.sharp);
        let m = parse_scene("a sharp yet smooth ring").modifiers;
        assert!(m.sharp && !m.smooth);
    }

    #[test]
    fn test_materials() {
        let glass = parse_scene("a glass orb").materials;
        assert_eq!(glass.glass, Some(GlassParams::default()));
        assert_eq!(glass.opacity, Some(GLASS_OPACITY));
        assert_eq!(parse_scene("a ghostly orb").materials.opacity, Some(GHOSTLY_OPACITY));
        let chrome = parse_scene("a chrome cube").materials;
        assert_eq!((chrome.metalness, chrome.roughness), (0.9, 0.3));
        assert_eq!(parse_scene("a glossy cube").materials.clearcoat, Some(1.0));
        assert!(parse_scene("a wireframe cube").materials.wireframe);
    }

    #[test]
    fn test_atmosphere_and_complexity() {
        let scene = parse_scene("a spinning orb in the misty snow with candlelight");
        assert!(scene.atmosphere.fog.is_some());
        assert_eq!(scene.atmosphere.particles.map(|p| p.kind), Some(ParticleKind::Snow));
        assert_eq!(scene.atmosphere.lighting, LightingPreset::Candlelight);
        assert_eq!(scene.animations[0].kind, SceneAnimationKind::Rotate);
        // 2 base + 1 animation + 1 fog + 2 particles + 1 lighting
        assert_eq!(scene.complexity, 7);
    }

    #[test]
    fn test_complexity_clamped() {
        let scene = parse_scene(
            "a twisted decayed fractured organic melting spinning floating pulsing flickering breathing orbiting \
             haunted neon glitch embers dramatic cube",
        );
        assert_eq!(scene.complexity, 10);
    }

    #[test]
    fn test_text_shape() {
        let scene = parse_scene("a headline reading \"DOOM AWAITS\"");
        assert_eq!(scene.base_shape, BaseShape::Text);
        assert_eq!(scene.text.as_deref(), Some("DOOM AWAITS"));
        assert_eq!(parse_scene("giant letters").text.as_deref(), Some(DEFAULT_TEXT));
        assert_eq!(parse_scene("'hello' in the dark").base_shape, BaseShape::Text);
        assert_eq!(quoted_text("the dragon's lair"), None);
    }

    #[test]
    fn test_scale_words_and_override() {
        assert_eq!(parse_scene("a huge orb").scale, Vec3::splat(2.5));
        let scene = parse_scene_with(
            "a huge orb",
            &SceneOverrides {
                scale: Some(Vec3::new(1.0, 2.0, 3.0)),
                ..SceneOverrides::default()
            },
        );
        assert_eq!(scene.scale, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let prompt = "a decayed neon pyramid pulsing with embers";
        assert_eq!(parse_scene(prompt), parse_scene(prompt));
    }
}
