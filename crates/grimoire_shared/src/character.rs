//! Rigged character descriptors.
//!
//! The character path produces a [`CharacterConfig`]: identity, a bone
//! hierarchy, a clip library and collision volumes. The lexical stage hands
//! over a [`CharacterIntent`] first.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::math::{Transform, Vec3};
use crate::quality::QualityTier;
use crate::scene::MaterialConfig;

/// Broad body plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterType {
    /// Two arms, two legs, upright
    Humanoid,
    /// Four-legged animal or monster
    #[default]
    Creature,
    /// Inanimate prop
    Object,
    /// Caller-defined; rigged like a humanoid
    Custom,
}

impl CharacterType {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Humanoid => "humanoid",
            Self::Creature => "creature",
            Self::Object => "object",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional anatomy detected in a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct CharacterFeatures {
    /// Tail chain
    pub has_tail: bool,
    /// Wing pair
    pub has_wings: bool,
    /// Horn pair
    pub has_horns: bool,
    /// Claws on extremities
    pub has_claws: bool,
    /// Fangs
    pub has_fangs: bool,
    /// Armor plating
    pub has_armor: bool,
    /// Emissive eyes
    pub glowing_eyes: bool,
    /// More limbs than the body plan
    pub extra_limbs: bool,
    /// Creature stands on two legs
    pub bipedal: bool,
    /// Left/right mirrored
    pub symmetrical: bool,
}

impl CharacterFeatures {
    /// Number of special (non-structural) features present.
    #[must_use]
    pub fn special_count(&self) -> usize {
        [
            self.has_tail,
            self.has_wings,
            self.has_horns,
            self.has_claws,
            self.has_fangs,
            self.has_armor,
            self.glowing_eyes,
            self.extra_limbs,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }

    /// Names of the special features present.
    #[must_use]
    pub fn active_names(&self) -> Vec<&'static str> {
        [
            (self.has_tail, "tail"),
            (self.has_wings, "wings"),
            (self.has_horns, "horns"),
            (self.has_claws, "claws"),
            (self.has_fangs, "fangs"),
            (self.has_armor, "armor"),
            (self.glowing_eyes, "glowing_eyes"),
            (self.extra_limbs, "extra_limbs"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

impl Default for CharacterFeatures {
    fn default() -> Self {
        Self {
            has_tail: false,
            has_wings: false,
            has_horns: false,
            has_claws: false,
            has_fangs: false,
            has_armor: false,
            glowing_eyes: false,
            extra_limbs: false,
            bipedal: false,
            symmetrical: true,
        }
    }
}

/// Keyframe clip generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPreset {
    /// Breathing loop
    Idle,
    /// Walk cycle
    Walk,
    /// Faster, larger walk cycle
    Run,
    /// Crouch, leap, land
    Jump,
    /// Raised arm greeting
    Wave,
    /// Swaying loop
    Dance,
    /// Wind-up, strike, recovery
    Attack,
}

impl AnimationPreset {
    /// Every preset.
    pub const ALL: [Self; 7] = [
        Self::Idle,
        Self::Walk,
        Self::Run,
        Self::Jump,
        Self::Wave,
        Self::Dance,
        Self::Attack,
    ];

    /// Stable lowercase name, also used as the clip name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Wave => "wave",
            Self::Dance => "dance",
            Self::Attack => "attack",
        }
    }

    /// Duration used when the caller gives none, in seconds.
    #[must_use]
    pub const fn default_duration(self) -> f32 {
        match self {
            Self::Idle => 3.0,
            Self::Walk => 1.2,
            Self::Run => 1.2 * 0.6,
            Self::Jump => 0.8,
            Self::Wave => 2.0,
            Self::Dance => 4.0,
            Self::Attack => 0.6,
        }
    }

    /// Whether the clip repeats.
    #[must_use]
    pub const fn looping(self) -> bool {
        matches!(self, Self::Idle | Self::Walk | Self::Run | Self::Dance)
    }
}

impl fmt::Display for AnimationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surface texture family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureHint {
    /// Fur
    Furry,
    /// Scales
    Scaly,
    /// Wet, glossy
    Slimy,
    /// Bare metal
    Metallic,
    /// Stone
    Rocky,
    /// Feathers
    Feathered,
    /// Wood grain
    Wooden,
    /// Faceted crystal
    Crystal,
    /// Plain smooth skin
    Smooth,
}

impl TextureHint {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Furry => "furry",
            Self::Scaly => "scaly",
            Self::Slimy => "slimy",
            Self::Metallic => "metallic",
            Self::Rocky => "rocky",
            Self::Feathered => "feathered",
            Self::Wooden => "wooden",
            Self::Crystal => "crystal",
            Self::Smooth => "smooth",
        }
    }

    /// (roughness, metalness) typical for this surface.
    #[must_use]
    pub const fn surface(self) -> (f32, f32) {
        match self {
            Self::Furry | Self::Feathered => (0.95, 0.0),
            Self::Scaly => (0.55, 0.1),
            Self::Slimy => (0.15, 0.0),
            Self::Metallic => (0.3, 0.9),
            Self::Rocky => (0.9, 0.05),
            Self::Wooden => (0.8, 0.0),
            Self::Crystal => (0.05, 0.2),
            Self::Smooth => (0.4, 0.0),
        }
    }
}

/// Material cues collected by the character parser.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialHints {
    /// Texture family
    pub texture: Option<TextureHint>,
    /// Named color
    pub color: Option<Color>,
    /// Glow cue present
    pub emissive: bool,
    /// Metal cue present
    pub metallic: bool,
}

/// What the character parser understood.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterIntent {
    /// Source prompt
    pub prompt: String,
    /// Body plan
    pub character_type: CharacterType,
    /// Optional anatomy
    pub features: CharacterFeatures,
    /// Clips to synthesize, idle first
    pub suggested_animations: Vec<AnimationPreset>,
    /// Surface cues
    pub material_hints: MaterialHints,
    /// Relative size
    pub scale: Vec3,
    /// Sorted tags
    pub tags: BTreeSet<String>,
    /// Extracted display name
    pub name: String,
}

impl Default for CharacterIntent {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            character_type: CharacterType::default(),
            features: CharacterFeatures::default(),
            suggested_animations: vec![AnimationPreset::Idle],
            material_hints: MaterialHints::default(),
            scale: Vec3::ONE,
            tags: BTreeSet::new(),
            name: String::from("Unnamed"),
        }
    }
}

/// Semantic role of a bone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoneType {
    /// Hierarchy root
    Root,
    /// Lower back
    Spine,
    /// Upper torso
    Chest,
    /// Neck
    Neck,
    /// Head
    Head,
    /// Lower jaw
    Jaw,
    /// Shoulder or hip socket
    Shoulder,
    /// Upper arm / thigh
    UpperLimb,
    /// Forearm / shin
    LowerLimb,
    /// Hand, foot or paw
    Extremity,
    /// Tail segment
    Tail,
    /// Wing segment
    Wing,
    /// Horn
    Horn,
}

/// One bone of a skeleton.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneConfig {
    /// Unique name
    pub name: String,
    /// Semantic role
    pub bone_type: BoneType,
    /// Offset from the parent (from the origin for the root)
    pub position: Vec3,
    /// Optional euler rest rotation
    pub rotation: Option<Vec3>,
    /// Parent bone name; `None` only for the root
    pub parent: Option<String>,
    /// Bone length
    pub length: f32,
    /// Base skinning influence [0, 1]
    pub weight: f32,
}

impl BoneConfig {
    /// Creates a bone.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        bone_type: BoneType,
        position: Vec3,
        parent: Option<&str>,
        length: f32,
        weight: f32,
    ) -> Self {
        Self {
            name: name.into(),
            bone_type,
            position,
            rotation: None,
            parent: parent.map(str::to_owned),
            length,
            weight,
        }
    }
}

/// Ordered bone hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonConfig {
    /// Bones, parents before children
    pub bones: Vec<BoneConfig>,
}

impl SkeletonConfig {
    /// Looks up a bone by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BoneConfig> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// True when a bone with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Index of a bone by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Number of bones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// True when there are no bones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Rest positions in model space, by accumulating parent offsets.
    ///
    /// Unresolved parents are treated as the origin; parent chains longer
    /// than the bone count (cycles) stop accumulating.
    #[must_use]
    pub fn world_positions(&self) -> Vec<Vec3> {
        let by_name: HashMap<&str, &BoneConfig> =
            self.bones.iter().map(|b| (b.name.as_str(), b)).collect();

        self.bones
            .iter()
            .map(|bone| {
                let mut pos = bone.position;
                let mut parent = bone.parent.as_deref();
                let mut hops = 0;
                while let Some(name) = parent {
                    if hops >= self.bones.len() {
                        break;
                    }
                    match by_name.get(name) {
                        Some(p) => {
                            pos += p.position;
                            parent = p.parent.as_deref();
                        }
                        None => break,
                    }
                    hops += 1;
                }
                pos
            })
            .collect()
    }
}

/// How a clip combines with the pose below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Replaces the pose
    #[default]
    Override,
    /// Adds on top of the pose
    Additive,
}

/// Timed pose sample for one bone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from clip start
    pub time: f32,
    /// Target bone
    pub bone: String,
    /// Position delta
    pub position: Option<Vec3>,
    /// Euler rotation delta
    pub rotation: Option<Vec3>,
    /// Scale
    pub scale: Option<Vec3>,
}

/// Named collection of keyframes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name
    pub name: String,
    /// Generator that produced it
    pub preset: Option<AnimationPreset>,
    /// Seconds, > 0
    pub duration: f32,
    /// Repeats
    pub looping: bool,
    /// Keyframes ordered by bone then time
    pub keyframes: Vec<Keyframe>,
    /// Blend mode
    pub blend_mode: BlendMode,
    /// Blend weight [0, 1]
    pub blend_weight: f32,
}

impl AnimationClip {
    /// Keyframes targeting `bone`, in stored order.
    pub fn track<'a>(&'a self, bone: &'a str) -> impl Iterator<Item = &'a Keyframe> + 'a {
        self.keyframes.iter().filter(move |k| k.bone == bone)
    }

    /// Distinct bones this clip animates.
    #[must_use]
    pub fn animated_bones(&self) -> BTreeSet<&str> {
        self.keyframes.iter().map(|k| k.bone.as_str()).collect()
    }
}

/// Collision volume role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    /// Deals damage
    Hitbox,
    /// Receives damage
    Hurtbox,
    /// Fires events only
    Trigger,
}

/// Box-shaped collision volume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    /// Name
    pub name: String,
    /// Bone it follows
    pub bone: Option<String>,
    /// Local center
    pub position: Vec3,
    /// Full extents
    pub size: Vec3,
    /// Euler rotation
    pub rotation: Vec3,
    /// Role
    pub kind: CollisionKind,
    /// Active
    pub enabled: bool,
}

/// Rigid-body parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Kilograms
    pub mass: f32,
    /// Coulomb friction
    pub friction: f32,
    /// Bounciness
    pub restitution: f32,
}

/// Vertex/texture budget actually assigned to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshQuality {
    /// Tier
    pub tier: QualityTier,
    /// Vertex budget
    pub vertex_count: u32,
    /// Texture edge in pixels
    pub texture_size: u32,
}

impl From<QualityTier> for MeshQuality {
    fn from(tier: QualityTier) -> Self {
        Self {
            tier,
            vertex_count: tier.vertex_count(),
            texture_size: tier.texture_size(),
        }
    }
}

/// Complete descriptor for a rigged character.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Source description
    pub description: String,
    /// Body plan
    pub character_type: CharacterType,
    /// Budget tier
    pub mesh_quality: MeshQuality,
    /// Surface
    pub materials: MaterialConfig,
    /// Rig
    pub skeleton: SkeletonConfig,
    /// Clip library
    pub animations: Vec<AnimationClip>,
    /// Clip played on spawn
    pub default_animation: String,
    /// Collision volumes
    pub collision_boxes: Vec<CollisionBox>,
    /// Rigid-body parameters
    pub physics: PhysicsParams,
    /// Interaction trigger radius
    pub interaction_radius: f32,
    /// Placement
    pub transform: Transform,
    /// Sorted tags
    pub tags: BTreeSet<String>,
}

impl CharacterConfig {
    /// Looks up a clip by name.
    #[must_use]
    pub fn animation(&self, name: &str) -> Option<&AnimationClip> {
        self.animations.iter().find(|a| a.name == name)
    }
}
