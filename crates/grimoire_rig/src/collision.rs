//! Collision volumes derived from a rig.
//!
//! Every character gets a body hurtbox and an interaction trigger. Rigs
//! with a head get a head hurtbox; rigs with a striking limb get a hitbox
//! that starts disabled and is switched on by gameplay during attacks.

use grimoire_shared::{CharacterType, CollisionBox, CollisionKind, SkeletonConfig, Vec3};

use crate::skeleton::striking_bone;

/// Body box extents relative to height, per body plan.
#[must_use]
pub const fn body_proportions(character_type: CharacterType) -> Vec3 {
    match character_type {
        CharacterType::Humanoid | CharacterType::Custom => Vec3::new(0.35, 1.0, 0.25),
        CharacterType::Creature => Vec3::new(0.5, 0.75, 1.0),
        CharacterType::Object => Vec3::new(0.6, 1.0, 0.6),
    }
}

/// Builds the collision set for a rigged character.
#[must_use]
pub fn generate_collision_boxes(
    skeleton: &SkeletonConfig,
    character_type: CharacterType,
    height: f32,
    interaction_radius: f32,
) -> Vec<CollisionBox> {
    let world = skeleton.world_positions();
    let world_of = |name: &str| skeleton.index_of(name).and_then(|i| world.get(i).copied());

    let body = body_proportions(character_type) * height;
    let mut boxes = vec![CollisionBox {
        name: "body".to_owned(),
        bone: skeleton.find("spine").map(|b| b.name.clone()),
        position: Vec3::new(0.0, body.y * 0.5, 0.0),
        size: body,
        rotation: Vec3::ZERO,
        kind: CollisionKind::Hurtbox,
        enabled: true,
    }];

    if let (Some(head), Some(at)) = (skeleton.find("head"), world_of("head")) {
        let edge = head.length * 1.2;
        boxes.push(CollisionBox {
            name: "head".to_owned(),
            bone: Some(head.name.clone()),
            position: at + Vec3::new(0.0, head.length * 0.5, 0.0),
            size: Vec3::splat(edge),
            rotation: Vec3::ZERO,
            kind: CollisionKind::Hurtbox,
            enabled: true,
        });
    }

    if let Some(strike) = striking_bone(skeleton) {
        if let Some(at) = world_of(&strike.name) {
            boxes.push(CollisionBox {
                name: "strike".to_owned(),
                bone: Some(strike.name.clone()),
                position: at,
                size: Vec3::splat(strike.length.max(0.05)),
                rotation: Vec3::ZERO,
                kind: CollisionKind::Hitbox,
                enabled: false,
            });
        }
    }

    boxes.push(CollisionBox {
        name: "interaction".to_owned(),
        bone: None,
        position: Vec3::new(0.0, body.y * 0.5, 0.0),
        size: Vec3::new(interaction_radius * 2.0, body.y, interaction_radius * 2.0),
        rotation: Vec3::ZERO,
        kind: CollisionKind::Trigger,
        enabled: true,
    });
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonGenerator;
    use grimoire_shared::CharacterFeatures;

    fn boxes_for(character_type: CharacterType) -> Vec<CollisionBox> {
        let skel = SkeletonGenerator::new().generate(character_type, &CharacterFeatures::default(), 1.8);
        generate_collision_boxes(&skel, character_type, 1.8, 2.0)
    }

    #[test]
    fn test_humanoid_set() {
        let boxes = boxes_for(CharacterType::Humanoid);
        let names: Vec<_> = boxes.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["body", "head", "strike", "interaction"]);
        let strike = &boxes[2];
        assert_eq!(strike.kind, CollisionKind::Hitbox);
        assert!(!strike.enabled);
        assert_eq!(strike.bone.as_deref(), Some("arm_upper_r"));
        assert_eq!(boxes[3].size.x, 4.0);
    }

    #[test]
    fn test_head_box_sits_on_head() {
        let boxes = boxes_for(CharacterType::Creature);
        let head = boxes.iter().find(|b| b.name == "head").expect("head box");
        assert!(head.position.y > 0.5);
        assert!(head.position.z > 0.0, "creature head faces +Z");
    }

    #[test]
    fn test_object_has_no_head_or_strike() {
        let boxes = boxes_for(CharacterType::Object);
        assert_eq!(boxes.len(), 2);
        assert!(boxes.iter().all(|b| b.kind != CollisionKind::Hitbox));
    }
}
