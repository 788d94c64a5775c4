//! # Character Prompt Parser
//!
//! Produces a [`CharacterIntent`]: body plan, anatomy, clips to synthesize,
//! surface hints, size and a display name.

use std::collections::BTreeSet;

use grimoire_shared::{
    AnimationPreset, CharacterFeatures, CharacterIntent, CharacterType, MaterialHints, TextureHint, Vec3,
};

use crate::name::extract_name;
use crate::rules::{all_matches, earliest_match, first_match, Tokens};
use crate::tables::{
    FeatureCue, MaterialCue, CHARACTER_ANIMATION_WORDS, CHARACTER_TYPE_CONTEXT, CHARACTER_TYPE_WORDS,
    COLOR_WORDS, FEATURE_WORDS, MATERIAL_CUES, SCALE_WORDS, TEXTURE_WORDS,
};

/// Parses a character prompt. Never fails.
#[must_use]
pub fn parse_character(prompt: &str) -> CharacterIntent {
    let tokens = Tokens::new(prompt);

    let character_type = first_match(CHARACTER_TYPE_WORDS, &tokens)
        .or_else(|| first_match(CHARACTER_TYPE_CONTEXT, &tokens))
        .unwrap_or_default();
    let features = detect_features(&tokens);
    let suggested_animations = suggest_animations(&tokens, character_type);
    let material_hints = detect_material_hints(&tokens, &features);
    let scale = first_match(SCALE_WORDS, &tokens).map_or(Vec3::ONE, Vec3::splat);

    let mut tags = BTreeSet::new();
    tags.insert(character_type.as_str().to_owned());
    tags.extend(features.active_names().into_iter().map(str::to_owned));
    if features.bipedal {
        tags.insert("bipedal".to_owned());
    }
    if !features.symmetrical {
        tags.insert("asymmetric".to_owned());
    }
    if let Some(texture) = material_hints.texture {
        tags.insert(texture.as_str().to_owned());
    }

    let intent = CharacterIntent {
        prompt: prompt.to_owned(),
        character_type,
        features,
        suggested_animations,
        material_hints,
        scale,
        tags,
        name: extract_name(prompt),
    };

    tracing::debug!(
        "Parsed character: name={}, type={}, features={}, clips={}",
        intent.name,
        intent.character_type.as_str(),
        intent.features.special_count(),
        intent.suggested_animations.len()
    );
    intent
}

fn detect_features(tokens: &Tokens) -> CharacterFeatures {
    let mut features = CharacterFeatures::default();
    for cue in all_matches(FEATURE_WORDS, tokens) {
        match cue {
            FeatureCue::Tail => features.has_tail = true,
            FeatureCue::Wings => features.has_wings = true,
            FeatureCue::Horns => features.has_horns = true,
            FeatureCue::Claws => features.has_claws = true,
            FeatureCue::Fangs => features.has_fangs = true,
            FeatureCue::Armor => features.has_armor = true,
            FeatureCue::GlowingEyes => features.glowing_eyes = true,
            FeatureCue::ExtraLimbs => features.extra_limbs = true,
            FeatureCue::Bipedal => features.bipedal = true,
            FeatureCue::Asymmetric => features.symmetrical = false,
        }
    }
    features
}

/// Idle first, then keyword presets, then a walk for anything with legs
/// when no locomotion was asked for.
fn suggest_animations(tokens: &Tokens, character_type: CharacterType) -> Vec<AnimationPreset> {
    let mut presets = vec![AnimationPreset::Idle];
    presets.extend(all_matches(CHARACTER_ANIMATION_WORDS, tokens));

    let has_locomotion = presets
        .iter()
        .any(|p| matches!(p, AnimationPreset::Walk | AnimationPreset::Run));
    let has_legs = matches!(character_type, CharacterType::Humanoid | CharacterType::Creature);
    if has_legs && !has_locomotion {
        presets.push(AnimationPreset::Walk);
    }
    presets
}

fn detect_material_hints(tokens: &Tokens, features: &CharacterFeatures) -> MaterialHints {
    let texture = first_match(TEXTURE_WORDS, tokens);
    let cues = all_matches(MATERIAL_CUES, tokens);
    MaterialHints {
        texture,
        color: earliest_match(COLOR_WORDS, tokens),
        emissive: features.glowing_eyes || cues.contains(&MaterialCue::Glow),
        metallic: texture == Some(TextureHint::Metallic) || cues.contains(&MaterialCue::Metallic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_shared::Color;

    #[test]
    fn test_tiny_furry_creature() {
        let intent = parse_character("a tiny furry creature");
        assert_eq!(intent.character_type, CharacterType::Creature);
        assert_eq!(intent.scale, Vec3::splat(0.3));
        assert_eq!(intent.material_hints.texture, Some(TextureHint::Furry));
        assert!(intent.tags.contains("furry"));
    }

    #[test]
    fn test_toad_with_tail() {
        let intent = parse_character("a toad with a tail");
        assert_eq!(intent.character_type, CharacterType::Creature);
        assert!(intent.features.has_tail);
        assert_eq!(intent.name, "Toad");
    }

    #[test]
    fn test_type_order_and_fallbacks() {
        assert_eq!(parse_character("a knight riding a dragon").character_type, CharacterType::Humanoid);
        assert_eq!(parse_character("an old wooden chair").character_type, CharacterType::Object);
        assert_eq!(parse_character("a cat-like thing").character_type, CharacterType::Creature);
        assert_eq!(parse_character("humanoid shape").character_type, CharacterType::Humanoid);
        assert_eq!(parse_character("").character_type, CharacterType::Creature);
    }

    #[test]
    fn test_idle_always_first() {
        let intent = parse_character("a dancing wizard who can jump");
        assert_eq!(
            intent.suggested_animations,
            vec![AnimationPreset::Idle, AnimationPreset::Jump, AnimationPreset::Dance, AnimationPreset::Walk]
        );
        let running = parse_character("a running wolf");
        assert_eq!(running.suggested_animations, vec![AnimationPreset::Idle, AnimationPreset::Run]);
        let lamp = parse_character("a lamp");
        assert_eq!(lamp.suggested_animations, vec![AnimationPreset::Idle]);
    }

    #[test]
    fn test_features_and_hints() {
        let intent = parse_character("a lopsided horned demon with glowing eyes and red steel armor");
        let f = intent.features;
        assert!(f.has_horns && f.has_armor && f.glowing_eyes);
        assert!(!f.symmetrical);
        assert!(intent.material_hints.emissive);
        assert!(intent.material_hints.metallic);
        assert_eq!(intent.material_hints.color, Some(Color::from_hex(0xFF_0000)));
        assert!(intent.tags.contains("asymmetric"));
    }

    #[test]
    fn test_empty_prompt() {
        let intent = parse_character("");
        assert_eq!(intent.name, "Unnamed");
        assert_eq!(intent.scale, Vec3::ONE);
        assert_eq!(intent.features, CharacterFeatures::default());
    }
}
