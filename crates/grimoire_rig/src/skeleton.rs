//! # Skeleton Generator
//!
//! Bone layouts are authored at a reference height and scaled linearly.
//! Left-side bones are authored once; the right side is derived from them
//! by mirroring (or, for asymmetric characters, a fixed skew).

use std::collections::{HashMap, HashSet};

use grimoire_shared::{BoneConfig, BoneType, CharacterFeatures, CharacterType, SkeletonConfig, Vec3};

use crate::error::{SkeletonError, SkeletonResult};

/// Height the humanoid layout is authored at.
pub const HUMANOID_REFERENCE_HEIGHT: f32 = 1.8;

/// Height the quadruped layout is authored at.
pub const CREATURE_REFERENCE_HEIGHT: f32 = 1.0;

/// Right-side length and offset factor for asymmetric characters.
pub const ASYMMETRY_SKEW: f32 = 1.08;

/// Right-side weight factor for asymmetric characters.
pub const ASYMMETRY_WEIGHT: f32 = 0.9;

/// Bones tried, in order, as the striking limb.
pub const STRIKE_BONES: [&str; 3] = ["arm_upper_r", "leg_front_upper_r", "jaw"];

/// The bone an attack swings, if the rig has one.
#[must_use]
pub fn striking_bone(skeleton: &SkeletonConfig) -> Option<&BoneConfig> {
    STRIKE_BONES.iter().find_map(|name| skeleton.find(name))
}

/// Where a bilateral bone attaches.
#[derive(Clone, Copy)]
enum Attach<'a> {
    /// Both sides hang off one central bone.
    Center(&'a str),
    /// Each side hangs off its own side of a paired bone.
    Side(&'a str),
}

/// Incremental skeleton under construction.
struct RigBuilder {
    bones: Vec<BoneConfig>,
    unit: f32,
    symmetrical: bool,
}

impl RigBuilder {
    fn new(unit: f32, symmetrical: bool) -> Self {
        Self {
            bones: Vec::with_capacity(32),
            unit,
            symmetrical,
        }
    }

    fn bone(&mut self, name: &str, bone_type: BoneType, offset: Vec3, parent: Option<&str>, length: f32, weight: f32) {
        self.bones.push(BoneConfig::new(
            name,
            bone_type,
            offset * self.unit,
            parent,
            length * self.unit,
            weight,
        ));
    }

    /// Adds `{stem}_l` and `{stem}_r`. `offset` is the left-side offset.
    fn pair(&mut self, stem: &str, bone_type: BoneType, offset: Vec3, attach: Attach, length: f32, weight: f32) {
        let (left_parent, right_parent) = match attach {
            Attach::Center(name) => (name.to_owned(), name.to_owned()),
            Attach::Side(stem) => (format!("{stem}_l"), format!("{stem}_r")),
        };
        self.bone(&format!("{stem}_l"), bone_type, offset, Some(&left_parent), length, weight);

        let mirrored = Vec3::new(-offset.x, offset.y, offset.z);
        if self.symmetrical {
            self.bone(&format!("{stem}_r"), bone_type, mirrored, Some(&right_parent), length, weight);
        } else {
            self.bone(
                &format!("{stem}_r"),
                bone_type,
                mirrored * ASYMMETRY_SKEW,
                Some(&right_parent),
                length * ASYMMETRY_SKEW,
                (weight * ASYMMETRY_WEIGHT).clamp(0.0, 1.0),
            );
        }
    }

    fn has(&self, name: &str) -> bool {
        self.bones.iter().any(|b| b.name == name)
    }

    fn finish(self) -> SkeletonConfig {
        SkeletonConfig { bones: self.bones }
    }
}

/// Builds skeletons for a body plan and feature set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonGenerator;

impl SkeletonGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Generates a skeleton for a character `height` units tall.
    ///
    /// Non-finite or non-positive heights fall back to the layout's
    /// reference height.
    #[must_use]
    pub fn generate(&self, character_type: CharacterType, features: &CharacterFeatures, height: f32) -> SkeletonConfig {
        let skeleton = match character_type {
            CharacterType::Object => {
                let height = sanitize_height(height, CREATURE_REFERENCE_HEIGHT);
                let mut rig = RigBuilder::new(1.0, true);
                rig.bone("root", BoneType::Root, Vec3::ZERO, None, height, 1.0);
                rig.finish()
            }
            CharacterType::Creature if !features.bipedal => {
                let height = sanitize_height(height, CREATURE_REFERENCE_HEIGHT);
                let mut rig = RigBuilder::new(height / CREATURE_REFERENCE_HEIGHT, features.symmetrical);
                quadruped(&mut rig);
                attach_features(&mut rig, features);
                rig.finish()
            }
            CharacterType::Humanoid | CharacterType::Custom | CharacterType::Creature => {
                let height = sanitize_height(height, HUMANOID_REFERENCE_HEIGHT);
                let mut rig = RigBuilder::new(height / HUMANOID_REFERENCE_HEIGHT, features.symmetrical);
                biped(&mut rig);
                attach_features(&mut rig, features);
                rig.finish()
            }
        };

        tracing::debug!(
            "Generated {} skeleton with {} bones",
            character_type.as_str(),
            skeleton.len()
        );
        skeleton
    }
}

fn sanitize_height(height: f32, reference: f32) -> f32 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        reference
    }
}

/// Upright two-arm, two-leg layout. Arms in T-pose along X.
fn biped(rig: &mut RigBuilder) {
    rig.bone("root", BoneType::Root, Vec3::new(0.0, 0.95, 0.0), None, 0.1, 0.5);
    rig.bone("spine", BoneType::Spine, Vec3::new(0.0, 0.15, 0.0), Some("root"), 0.3, 1.0);
    rig.bone("chest", BoneType::Chest, Vec3::new(0.0, 0.3, 0.0), Some("spine"), 0.25, 1.0);
    rig.bone("neck", BoneType::Neck, Vec3::new(0.0, 0.25, 0.0), Some("chest"), 0.1, 0.8);
    rig.bone("head", BoneType::Head, Vec3::new(0.0, 0.1, 0.0), Some("neck"), 0.25, 1.0);

    rig.pair("shoulder", BoneType::Shoulder, Vec3::new(0.18, 0.2, 0.0), Attach::Center("chest"), 0.1, 0.6);
    rig.pair("arm_upper", BoneType::UpperLimb, Vec3::new(0.1, 0.0, 0.0), Attach::Side("shoulder"), 0.3, 0.9);
    rig.pair("arm_lower", BoneType::LowerLimb, Vec3::new(0.3, 0.0, 0.0), Attach::Side("arm_upper"), 0.27, 0.9);
    rig.pair("hand", BoneType::Extremity, Vec3::new(0.27, 0.0, 0.0), Attach::Side("arm_lower"), 0.1, 0.7);

    rig.pair("hip", BoneType::Shoulder, Vec3::new(0.1, -0.05, 0.0), Attach::Center("root"), 0.1, 0.6);
    rig.pair("leg_upper", BoneType::UpperLimb, Vec3::new(0.0, -0.05, 0.0), Attach::Side("hip"), 0.42, 1.0);
    rig.pair("leg_lower", BoneType::LowerLimb, Vec3::new(0.0, -0.42, 0.0), Attach::Side("leg_upper"), 0.42, 1.0);
    rig.pair("foot", BoneType::Extremity, Vec3::new(0.0, -0.42, 0.05), Attach::Side("leg_lower"), 0.15, 0.8);
}

/// Four-legged layout facing +Z.
fn quadruped(rig: &mut RigBuilder) {
    rig.bone("root", BoneType::Root, Vec3::new(0.0, 0.55, 0.0), None, 0.1, 0.5);
    rig.bone("spine", BoneType::Spine, Vec3::new(0.0, 0.05, 0.2), Some("root"), 0.4, 1.0);
    rig.bone("neck", BoneType::Neck, Vec3::new(0.0, 0.1, 0.25), Some("spine"), 0.15, 0.8);
    rig.bone("head", BoneType::Head, Vec3::new(0.0, 0.12, 0.1), Some("neck"), 0.2, 1.0);
    rig.bone("jaw", BoneType::Jaw, Vec3::new(0.0, -0.05, 0.1), Some("head"), 0.12, 0.6);

    for (end, parent, z) in [("front", "spine", 0.2), ("back", "root", -0.2)] {
        let upper = format!("leg_{end}_upper");
        let lower = format!("leg_{end}_lower");
        let paw = format!("paw_{end}");
        rig.pair(&upper, BoneType::UpperLimb, Vec3::new(0.12, -0.05, z), Attach::Center(parent), 0.25, 0.9);
        rig.pair(&lower, BoneType::LowerLimb, Vec3::new(0.0, -0.25, 0.0), Attach::Side(&upper), 0.25, 0.9);
        rig.pair(&paw, BoneType::Extremity, Vec3::new(0.0, -0.25, 0.03), Attach::Side(&lower), 0.06, 0.7);
    }
}

/// Tail, wings and horns.
fn attach_features(rig: &mut RigBuilder, features: &CharacterFeatures) {
    if features.has_tail {
        rig.bone("tail_base", BoneType::Tail, Vec3::new(0.0, 0.0, -0.15), Some("root"), 0.2, 0.7);
        rig.bone("tail_mid", BoneType::Tail, Vec3::new(0.0, -0.02, -0.2), Some("tail_base"), 0.2, 0.6);
        rig.bone("tail_tip", BoneType::Tail, Vec3::new(0.0, -0.02, -0.18), Some("tail_mid"), 0.15, 0.5);
    }
    if features.has_wings {
        let anchor = if rig.has("chest") { "chest" } else { "spine" };
        rig.pair("wing", BoneType::Wing, Vec3::new(0.15, 0.1, -0.1), Attach::Center(anchor), 0.5, 0.7);
        rig.pair("wing_tip", BoneType::Wing, Vec3::new(0.5, 0.05, 0.0), Attach::Side("wing"), 0.4, 0.5);
    }
    if features.has_horns {
        rig.pair("horn", BoneType::Horn, Vec3::new(0.06, 0.12, 0.02), Attach::Center("head"), 0.12, 0.3);
    }
}

/// Checks hierarchy integrity: one root, unique names, resolvable parents
/// and no cycles.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_skeleton(skeleton: &SkeletonConfig) -> SkeletonResult<()> {
    if skeleton.is_empty() {
        return Err(SkeletonError::Empty);
    }

    let mut seen = HashSet::with_capacity(skeleton.len());
    for bone in &skeleton.bones {
        if !seen.insert(bone.name.as_str()) {
            return Err(SkeletonError::DuplicateBone(bone.name.clone()));
        }
    }

    let roots: Vec<String> = skeleton
        .bones
        .iter()
        .filter(|b| b.parent.is_none())
        .map(|b| b.name.clone())
        .collect();
    match roots.len() {
        0 => return Err(SkeletonError::NoRoot),
        1 => {}
        _ => return Err(SkeletonError::MultipleRoots(roots)),
    }

    let parents: HashMap<&str, Option<&str>> = skeleton
        .bones
        .iter()
        .map(|b| (b.name.as_str(), b.parent.as_deref()))
        .collect();

    for bone in &skeleton.bones {
        if let Some(parent) = bone.parent.as_deref() {
            if !parents.contains_key(parent) {
                return Err(SkeletonError::UnresolvedParent {
                    bone: bone.name.clone(),
                    parent: parent.to_owned(),
                });
            }
        }
    }

    for bone in &skeleton.bones {
        let mut current = bone.parent.as_deref();
        let mut hops = 0;
        while let Some(name) = current {
            hops += 1;
            if hops > skeleton.len() {
                return Err(SkeletonError::Cycle(bone.name.clone()));
            }
            current = parents.get(name).copied().flatten();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> CharacterFeatures {
        CharacterFeatures::default()
    }

    #[test]
    fn test_humanoid_layout() {
        let skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        validate_skeleton(&skel).expect("valid");
        for name in ["root", "spine", "chest", "neck", "head", "arm_upper_l", "hand_r", "leg_lower_l", "foot_r"] {
            assert!(skel.contains(name), "missing {name}");
        }
        assert_eq!(skel.len(), 21);
        assert_eq!(skel.bones[0].name, "root");
    }

    #[test]
    fn test_creature_layout() {
        let skel = SkeletonGenerator::new().generate(CharacterType::Creature, &features(), 1.0);
        validate_skeleton(&skel).expect("valid");
        for name in ["jaw", "leg_front_upper_l", "leg_back_lower_r", "paw_front_r", "paw_back_l"] {
            assert!(skel.contains(name), "missing {name}");
        }
        assert!(!skel.contains("tail_base"));
    }

    #[test]
    fn test_bipedal_creature_uses_biped_layout() {
        let f = CharacterFeatures {
            bipedal: true,
            ..features()
        };
        let skel = SkeletonGenerator::new().generate(CharacterType::Creature, &f, 1.8);
        assert!(skel.contains("arm_upper_r"));
        assert!(!skel.contains("paw_front_l"));
    }

    #[test]
    fn test_object_is_single_root() {
        let skel = SkeletonGenerator::new().generate(CharacterType::Object, &features(), 2.0);
        assert_eq!(skel.len(), 1);
        assert!(skel.bones[0].parent.is_none());
        assert_eq!(skel.bones[0].length, 2.0);
    }

    #[test]
    fn test_optional_features() {
        let f = CharacterFeatures {
            has_tail: true,
            has_wings: true,
            has_horns: true,
            ..features()
        };
        let skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &f, 1.8);
        validate_skeleton(&skel).expect("valid");
        assert_eq!(skel.find("wing_l").and_then(|b| b.parent.as_deref()), Some("chest"));
        assert_eq!(skel.find("tail_mid").and_then(|b| b.parent.as_deref()), Some("tail_base"));
        assert!(skel.contains("horn_r"));

        let quad = SkeletonGenerator::new().generate(CharacterType::Creature, &f, 1.0);
        assert_eq!(quad.find("wing_r").and_then(|b| b.parent.as_deref()), Some("spine"));
    }

    #[test]
    fn test_height_scales_linearly() {
        let gen = SkeletonGenerator::new();
        let base = gen.generate(CharacterType::Humanoid, &features(), 1.8);
        let tall = gen.generate(CharacterType::Humanoid, &features(), 3.6);
        for (a, b) in base.bones.iter().zip(&tall.bones) {
            assert!((b.length - a.length * 2.0).abs() < 1e-5);
            assert!((b.position.y - a.position.y * 2.0).abs() < 1e-5);
        }
        let fallback = gen.generate(CharacterType::Humanoid, &features(), f32::NAN);
        assert_eq!(fallback, base);
    }

    #[test]
    fn test_symmetry_mirrors_exactly() {
        let skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        let l = skel.find("arm_lower_l").expect("left");
        let r = skel.find("arm_lower_r").expect("right");
        assert_eq!(r.position.x, -l.position.x);
        assert_eq!(r.length, l.length);
        assert_eq!(r.weight, l.weight);
    }

    #[test]
    fn test_asymmetry_skews_right_side() {
        let f = CharacterFeatures {
            symmetrical: false,
            ..features()
        };
        let skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &f, 1.8);
        let l = skel.find("arm_lower_l").expect("left");
        let r = skel.find("arm_lower_r").expect("right");
        assert!((r.length - l.length * ASYMMETRY_SKEW).abs() < 1e-6);
        assert!((r.weight - l.weight * ASYMMETRY_WEIGHT).abs() < 1e-6);
        assert_eq!(skel, SkeletonGenerator::new().generate(CharacterType::Humanoid, &f, 1.8));
    }

    #[test]
    fn test_validation_failures() {
        assert_eq!(validate_skeleton(&SkeletonConfig::default()), Err(SkeletonError::Empty));

        let mut skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        skel.bones[3].parent = None;
        assert!(matches!(validate_skeleton(&skel), Err(SkeletonError::MultipleRoots(r)) if r.len() == 2));

        let mut skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        skel.bones[2].parent = Some("pelvis".into());
        assert!(matches!(validate_skeleton(&skel), Err(SkeletonError::UnresolvedParent { .. })));

        let mut skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        let dup = skel.bones[4].clone();
        skel.bones.push(dup);
        assert_eq!(validate_skeleton(&skel), Err(SkeletonError::DuplicateBone("head".into())));

        let mut skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        skel.bones[0].parent = Some("head".into());
        assert_eq!(validate_skeleton(&skel), Err(SkeletonError::NoRoot));

        // one root, but neck and head point at each other
        let mut skel = SkeletonGenerator::new().generate(CharacterType::Humanoid, &features(), 1.8);
        skel.bones[3].parent = Some("head".into());
        assert!(matches!(validate_skeleton(&skel), Err(SkeletonError::Cycle(_))));
    }

    #[test]
    fn test_striking_bone_preference() {
        let gen = SkeletonGenerator::new();
        let human = gen.generate(CharacterType::Humanoid, &features(), 1.8);
        assert_eq!(striking_bone(&human).map(|b| b.name.as_str()), Some("arm_upper_r"));
        let quad = gen.generate(CharacterType::Creature, &features(), 1.0);
        assert_eq!(striking_bone(&quad).map(|b| b.name.as_str()), Some("leg_front_upper_r"));
        let object = gen.generate(CharacterType::Object, &features(), 1.0);
        assert!(striking_bone(&object).is_none());
    }
}
