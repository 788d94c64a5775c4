//! Rig integrity across every body plan and feature combination.
//!
//! Run with: cargo test --package grimoire_rig --test rig_integrity_test

use grimoire_rig::{synthesize_library, validate_skeleton, BoneWeightCalculator, SkeletonGenerator};
use grimoire_shared::{AnimationPreset, CharacterFeatures, CharacterType, Vec3, WEIGHT_EPSILON};

fn feature_matrix() -> Vec<CharacterFeatures> {
    let mut all = Vec::new();
    for bits in 0u8..32 {
        all.push(CharacterFeatures {
            has_tail: bits & 1 != 0,
            has_wings: bits & 2 != 0,
            has_horns: bits & 4 != 0,
            bipedal: bits & 8 != 0,
            symmetrical: bits & 16 == 0,
            ..CharacterFeatures::default()
        });
    }
    all
}

const TYPES: [CharacterType; 4] = [
    CharacterType::Humanoid,
    CharacterType::Creature,
    CharacterType::Object,
    CharacterType::Custom,
];

/// Test: every generated skeleton has one root and resolvable parents
#[test]
fn test_all_skeletons_valid() {
    let generator = SkeletonGenerator::new();
    for character_type in TYPES {
        for features in feature_matrix() {
            let skeleton = generator.generate(character_type, &features, 1.5);
            assert_eq!(
                validate_skeleton(&skeleton),
                Ok(()),
                "{character_type} {features:?}"
            );
        }
    }
}

/// Test: skin weights sum to one with at most four influences
#[test]
fn test_skin_weights_normalized() {
    let generator = SkeletonGenerator::new();
    let positions: Vec<Vec3> = (0..600)
        .map(|i| Vec3::new((i % 7) as f32 * 0.1 - 0.3, (i % 19) as f32 * 0.1, (i % 5) as f32 * 0.1 - 0.2))
        .collect();

    for character_type in TYPES {
        let skeleton = generator.generate(character_type, &CharacterFeatures::default(), 1.8);
        let skin = BoneWeightCalculator::new(2)
            .compute(&skeleton, &positions)
            .expect("non-empty skeleton");
        assert_eq!(skin.len(), positions.len());
        for (row, indices) in skin.weights.iter().zip(&skin.indices) {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() <= WEIGHT_EPSILON, "sum {sum}");
            assert!(row.iter().filter(|w| **w > 0.0).count() <= 4);
            assert!(indices.iter().all(|&i| usize::from(i) < skeleton.len()));
        }
    }
}

/// Test: clip keys stay inside the clip and on existing bones
#[test]
fn test_clip_bounds() {
    let generator = SkeletonGenerator::new();
    for character_type in TYPES {
        for features in feature_matrix() {
            let skeleton = generator.generate(character_type, &features, 1.2);
            for clip in synthesize_library(&AnimationPreset::ALL, &skeleton, 1.0) {
                assert!(clip.duration > 0.0);
                for key in &clip.keyframes {
                    assert!(key.time >= 0.0 && key.time <= clip.duration);
                    assert!(skeleton.contains(&key.bone));
                }
            }
        }
    }
}
