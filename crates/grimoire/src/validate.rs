//! # Descriptor Validation
//!
//! Structural post-checks. Violations are returned as readable strings so
//! the caller decides whether a partially-invalid descriptor is usable.

use grimoire_rig::validate_skeleton;
use grimoire_shared::{
    BaseShape, CharacterConfig, MaterialConfig, SceneConfig, MAX_COMPLEXITY, MAX_HORROR_LEVEL, MAX_SCALE,
};

/// Checks a scene descriptor.
#[must_use]
pub fn validate_scene(scene: &SceneConfig) -> Vec<String> {
    let mut violations = Vec::new();
    if scene.complexity > MAX_COMPLEXITY {
        violations.push(format!("complexity {} exceeds {MAX_COMPLEXITY}", scene.complexity));
    }
    if scene.horror_level > MAX_HORROR_LEVEL {
        violations.push(format!("horror level {} exceeds {MAX_HORROR_LEVEL}", scene.horror_level));
    }
    for (axis, value) in [('x', scene.scale.x), ('y', scene.scale.y), ('z', scene.scale.z)] {
        if !value.is_finite() || value <= 0.0 || value > MAX_SCALE {
            violations.push(format!("scale {axis} = {value} outside (0, {MAX_SCALE}]"));
        }
    }
    if scene.base_shape == BaseShape::Text && scene.text.as_deref().map_or(true, |t| t.trim().is_empty()) {
        violations.push("text shape without text".to_owned());
    }
    check_material(&scene.materials, &mut violations);
    violations
}

/// Checks a character descriptor.
#[must_use]
pub fn validate_character(character: &CharacterConfig) -> Vec<String> {
    let mut violations = Vec::new();
    if character.id.trim().is_empty() {
        violations.push("empty id".to_owned());
    }
    if character.name.trim().is_empty() {
        violations.push("empty name".to_owned());
    }
    if character.skeleton.is_empty() {
        violations.push("skeleton has no bones".to_owned());
    } else if let Err(err) = validate_skeleton(&character.skeleton) {
        violations.push(format!("skeleton: {err}"));
    }

    if character.animations.is_empty() {
        violations.push("no animations".to_owned());
    } else if character.animation(&character.default_animation).is_none() {
        violations.push(format!("default animation {:?} not in library", character.default_animation));
    }
    for clip in &character.animations {
        if !clip.duration.is_finite() || clip.duration <= 0.0 {
            violations.push(format!("clip {}: duration {} is not positive", clip.name, clip.duration));
            continue;
        }
        if let Some(key) = clip.keyframes.iter().find(|k| !(0.0..=clip.duration).contains(&k.time)) {
            violations.push(format!(
                "clip {}: keyframe at {} outside [0, {}]",
                clip.name, key.time, clip.duration
            ));
        }
        if let Some(key) = clip.keyframes.iter().find(|k| !character.skeleton.contains(&k.bone)) {
            violations.push(format!("clip {}: unknown bone {:?}", clip.name, key.bone));
        }
    }

    let physics = &character.physics;
    if !physics.mass.is_finite() || physics.mass <= 0.0 {
        violations.push(format!("mass {} is not positive", physics.mass));
    }
    if !character.interaction_radius.is_finite() || character.interaction_radius < 0.0 {
        violations.push(format!("interaction radius {} is negative", character.interaction_radius));
    }
    check_material(&character.materials, &mut violations);
    violations
}

fn check_material(material: &MaterialConfig, violations: &mut Vec<String>) {
    let mut unit = |name: &str, value: f32| {
        if !(0.0..=1.0).contains(&value) {
            violations.push(format!("material {name} {value} outside [0, 1]"));
        }
    };
    unit("roughness", material.roughness);
    unit("metalness", material.metalness);
    if let Some(opacity) = material.opacity {
        unit("opacity", opacity);
    }
    if let Some(clearcoat) = material.clearcoat {
        unit("clearcoat", clearcoat);
    }
    if let Some(glass) = material.glass {
        unit("transmission", glass.transmission);
    }
    if let Some(emissive) = material.emissive {
        if !emissive.intensity.is_finite() || emissive.intensity < 0.0 {
            violations.push(format!("material emissive intensity {} is negative", emissive.intensity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_shared::{AnimationClip, BlendMode, Keyframe, Vec3};

    #[test]
    fn test_default_scene_is_valid() {
        assert!(validate_scene(&SceneConfig::default()).is_empty());
    }

    #[test]
    fn test_scene_violations() {
        let mut scene = SceneConfig {
            complexity: 11,
            scale: Vec3::new(1.0, -2.0, f32::NAN),
            base_shape: BaseShape::Text,
            ..SceneConfig::default()
        };
        scene.materials.roughness = 1.5;
        let violations = validate_scene(&scene);
        assert_eq!(violations.len(), 5, "{violations:?}");
        assert!(violations[0].starts_with("complexity 11"));
        assert!(violations.iter().any(|v| v.contains("roughness")));
    }

    #[test]
    fn test_character_violations() {
        let character = CharacterConfig {
            id: String::new(),
            name: "Ghoul".into(),
            description: String::new(),
            character_type: grimoire_shared::CharacterType::Humanoid,
            mesh_quality: grimoire_shared::QualityTier::Low.into(),
            materials: MaterialConfig::fallback(),
            skeleton: grimoire_shared::SkeletonConfig::default(),
            animations: vec![AnimationClip {
                name: "idle".into(),
                preset: None,
                duration: 1.0,
                looping: true,
                keyframes: vec![Keyframe {
                    time: 2.0,
                    bone: "spine".into(),
                    position: None,
                    rotation: Some(Vec3::ZERO),
                    scale: None,
                }],
                blend_mode: BlendMode::Override,
                blend_weight: 1.0,
            }],
            default_animation: "walk".into(),
            collision_boxes: Vec::new(),
            physics: grimoire_shared::PhysicsParams {
                mass: 10.0,
                friction: 0.5,
                restitution: 0.1,
            },
            interaction_radius: 1.0,
            transform: grimoire_shared::Transform::IDENTITY,
            tags: std::collections::BTreeSet::new(),
        };
        let violations = validate_character(&character);
        assert!(violations.contains(&"empty id".to_owned()));
        assert!(violations.contains(&"skeleton has no bones".to_owned()));
        assert!(violations.iter().any(|v| v.contains("default animation")));
        assert!(violations.iter().any(|v| v.contains("outside [0, 1]")));
        assert!(violations.iter().any(|v| v.contains("unknown bone")));
        assert_eq!(violations.len(), 5, "{violations:?}");
    }
}
