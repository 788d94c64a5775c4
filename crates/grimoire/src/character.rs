//! # Character Assembler
//!
//! ```text
//! parse ─► template ─► skeleton ─► proxy body ─► skinning ─► clips ─► collision ─► validate
//! ```
//!
//! The proxy body is a stand-in for real character art: one tapered
//! cylinder per bone segment and a sphere for the head, tessellated for the
//! requested quality tier. It exists so the skin weights have something to
//! bind to and the renderer has something to show.

use grimoire_lexicon::parse_character;
use grimoire_procedural::{primitives, Mesh, SegmentCounts};
use grimoire_rig::{
    generate_collision_boxes, synthesize_library, validate_skeleton, BoneWeightCalculator, SkeletonGenerator,
    SkinData,
};
use grimoire_shared::{
    fnv1a, BoneConfig, BoneType, CharacterConfig, CharacterType, Color, Emissive, MaterialConfig, MaterialHints,
    MeshQuality, SkeletonConfig, Transform, Vec3,
};

use crate::clock::Instant;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, PipelineResult};
use crate::result::GenerationResult;
use crate::scene::warn;
use crate::templates::character_template;
use crate::validate::validate_character;

/// Thinnest proxy limb, in meters.
const MIN_LIMB_RADIUS: f32 = 0.01;

/// Emission strength for glow hints.
const GLOW_INTENSITY: f32 = 1.5;

/// Optional knobs for one character request.
#[derive(Debug, Clone, Default)]
pub struct CharacterRequest {
    /// Quality tier name; unknown names fall back to the configured default.
    pub quality: Option<String>,
    /// Replaces the extracted display name.
    pub name: Option<String>,
    /// Standing height in meters; defaults to the type template times the
    /// prompt's size cue.
    pub height: Option<f32>,
    /// Animation intensity; defaults to the configured intensity.
    pub intensity: Option<f32>,
    /// Replaces the derived id.
    pub id: Option<String>,
}

impl CharacterRequest {
    /// Request at a named quality tier.
    #[must_use]
    pub fn with_quality(quality: impl Into<String>) -> Self {
        Self {
            quality: Some(quality.into()),
            ..Self::default()
        }
    }
}

/// A generated character plus its bound proxy mesh.
#[derive(Debug, Clone)]
pub struct CharacterOutput {
    /// Descriptor.
    pub character: CharacterConfig,
    /// Proxy body mesh in rest pose.
    pub mesh: Mesh,
    /// Per-vertex bone weights for `mesh`.
    pub skin: SkinData,
}

/// Runs the character path of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct CharacterAssembler {
    config: GeneratorConfig,
    skeletons: SkeletonGenerator,
}

impl CharacterAssembler {
    /// Creates an assembler.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            skeletons: SkeletonGenerator::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a character from `prompt`. Never panics, never returns `Err`.
    #[must_use]
    pub fn generate(&self, prompt: &str, request: &CharacterRequest) -> GenerationResult<CharacterOutput> {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let outcome = self.assemble(prompt, request, &mut warnings);
        let elapsed = start.elapsed();

        match &outcome {
            Ok(output) => tracing::info!(
                "Generated {} {:?} in {:?}: {} bones, {} clips, {} warning(s)",
                output.character.character_type,
                output.character.name,
                elapsed,
                output.character.skeleton.len(),
                output.character.animations.len(),
                warnings.len()
            ),
            Err(err) => tracing::warn!("Character generation failed after {:?}: {}", elapsed, err),
        }
        GenerationResult::from_outcome(outcome, warnings, elapsed)
    }

    fn assemble(
        &self,
        prompt: &str,
        request: &CharacterRequest,
        warnings: &mut Vec<String>,
    ) -> PipelineResult<CharacterOutput> {
        let (quality, fallback) = self.config.resolve_quality(request.quality.as_deref());
        warnings.extend(fallback);

        let intent = parse_character(prompt);
        let template = character_template(intent.character_type);
        let height = match request.height {
            Some(h) if h.is_finite() && h > 0.0 => h,
            Some(h) => return Err(GenerationError::InvalidRequest(format!("height {h} must be positive"))),
            None => template.height * intent.scale.y,
        };

        let special = intent.features.special_count();
        if special > self.config.feature_warning_threshold {
            warn(
                warnings,
                format!(
                    "{special} special features ({}); rig and clips may be heavy",
                    intent.features.active_names().join(", ")
                ),
            );
        }

        let skeleton = self.skeletons.generate(intent.character_type, &intent.features, height);
        validate_skeleton(&skeleton)?;
        tracing::debug!("Skeleton generated: {} bones at {:.2}m", skeleton.len(), height);

        let mesh = proxy_body(&skeleton, height, self.config.segments_for(quality));
        mesh.validate()?;
        let budget = quality.vertex_count() as usize;
        if mesh.vertex_count() > budget {
            warn(
                warnings,
                format!(
                    "proxy body has {} vertices, above the {} budget of {budget}",
                    mesh.vertex_count(),
                    quality
                ),
            );
        }

        let skin = BoneWeightCalculator::new(self.config.skinning_workers).compute(&skeleton, &mesh.positions)?;
        tracing::debug!("Skinned {} vertices", skin.len());

        let intensity = request.intensity.unwrap_or(self.config.default_intensity);
        let animations = synthesize_library(&intent.suggested_animations, &skeleton, intensity);
        let default_animation = animations
            .first()
            .map_or_else(|| "idle".to_owned(), |clip| clip.name.clone());

        let interaction_radius = template.interaction_radius * height / template.height;
        let collision_boxes = generate_collision_boxes(&skeleton, intent.character_type, height, interaction_radius);

        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| intent.name.clone(), str::to_owned);
        let id = request.id.clone().unwrap_or_else(|| character_id(&name, prompt));

        let character = CharacterConfig {
            id,
            name,
            description: prompt.trim().to_owned(),
            character_type: intent.character_type,
            mesh_quality: MeshQuality::from(quality),
            materials: character_material(&intent.material_hints, intent.character_type),
            skeleton,
            animations,
            default_animation,
            collision_boxes,
            physics: template.physics(height),
            interaction_radius,
            transform: Transform::IDENTITY,
            tags: intent.tags,
        };

        for violation in validate_character(&character) {
            warn(warnings, format!("validation: {violation}"));
        }

        Ok(CharacterOutput { character, mesh, skin })
    }
}

/// Stable id: slugged name plus a hash of the prompt.
#[must_use]
pub fn character_id(name: &str, prompt: &str) -> String {
    let slug: String = name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let hash = fnv1a(prompt.trim().to_lowercase().as_bytes());
    if slug.is_empty() {
        format!("character-{hash:016x}")
    } else {
        format!("{slug}-{hash:016x}")
    }
}

/// Surface for a character from the parser's hints.
#[must_use]
pub fn character_material(hints: &MaterialHints, character_type: CharacterType) -> MaterialConfig {
    let color = hints.color.unwrap_or_else(|| default_color(character_type));
    let (mut roughness, mut metalness) = hints.texture.map_or((0.6, 0.0), |t| t.surface());
    if hints.metallic {
        roughness = roughness.min(0.35);
        metalness = metalness.max(0.85);
    }
    let mut material = MaterialConfig::solid(color, roughness, metalness);
    if hints.emissive {
        material.emissive = Some(Emissive::new(color).with_intensity(GLOW_INTENSITY));
    }
    material
}

const fn default_color(character_type: CharacterType) -> Color {
    match character_type {
        CharacterType::Humanoid => Color::from_hex(0xC8_A27A),
        CharacterType::Creature => Color::from_hex(0x5A_6B3A),
        CharacterType::Object => Color::from_hex(0x88_8888),
        CharacterType::Custom => Color::from_hex(0x9A_7FB0),
    }
}

/// Limb radius relative to body height.
const fn thickness(bone_type: BoneType) -> f32 {
    match bone_type {
        BoneType::Root | BoneType::Spine | BoneType::Chest => 0.09,
        BoneType::Neck | BoneType::Shoulder | BoneType::UpperLimb => 0.04,
        BoneType::LowerLimb | BoneType::Jaw => 0.032,
        BoneType::Extremity | BoneType::Tail => 0.026,
        BoneType::Horn => 0.015,
        BoneType::Wing => 0.01,
        BoneType::Head => 0.0,
    }
}

/// Builds the proxy body for a rest-pose skeleton.
#[must_use]
pub fn proxy_body(skeleton: &SkeletonConfig, height: f32, segments: SegmentCounts) -> Mesh {
    let world = skeleton.world_positions();
    let radial = segments.radial;
    let rows = (segments.height / 2).max(1);
    let mut body = Mesh::new();

    for (bone, &at) in skeleton.bones.iter().zip(&world) {
        if bone.bone_type == BoneType::Head {
            let radius = (bone.length * 0.6).max(MIN_LIMB_RADIUS);
            let mut head = primitives::sphere(radius, radial, (radial / 2).max(2));
            head.translate(at + Vec3::Y * (bone.length * 0.5));
            body.merge(&head);
            continue;
        }
        let radius = (thickness(bone.bone_type) * height).max(MIN_LIMB_RADIUS);
        match bone.parent.as_deref().and_then(|p| skeleton.index_of(p)) {
            Some(parent) => {
                if let Some(limb) = limb_between(world[parent], at, radius, radial, rows) {
                    body.merge(&limb);
                }
            }
            // a lone root is the whole object
            None if skeleton.len() == 1 => body.merge(&trunk(bone, at, radial, rows)),
            None => {}
        }
    }
    tracing::debug!("Proxy body: {} vertices for {} bones", body.vertex_count(), skeleton.len());
    body
}

fn trunk(bone: &BoneConfig, at: Vec3, radial: u32, rows: u32) -> Mesh {
    let radius = (bone.length * 0.3).max(MIN_LIMB_RADIUS);
    let mut mesh = primitives::cylinder(radius, radius, bone.length.max(MIN_LIMB_RADIUS), radial, rows);
    mesh.translate(at + Vec3::Y * (bone.length * 0.5));
    mesh
}

/// Tapered cylinder from `from` to `to`; `None` when the points coincide.
fn limb_between(from: Vec3, to: Vec3, radius: f32, radial: u32, rows: u32) -> Option<Mesh> {
    let span = to - from;
    let length = span.length();
    if length < MIN_LIMB_RADIUS {
        return None;
    }
    let dir = span / length;
    let helper = if dir.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
    let u = helper.cross(dir).normalize_or_zero();
    let w = u.cross(dir);
    let rotate = |p: Vec3| u * p.x + dir * p.y + w * p.z;

    // cylinder top (+Y) is the child end
    let mut mesh = primitives::cylinder(radius * 0.8, radius, length, radial, rows);
    for p in &mut mesh.positions {
        *p = rotate(*p);
    }
    for n in &mut mesh.normals {
        *n = rotate(*n);
    }
    mesh.translate((from + to) * 0.5);
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grimoire_shared::{CharacterFeatures, QualityTier, TextureHint};

    #[test]
    fn test_toad_with_tail() {
        let result = CharacterAssembler::default().generate("a toad with a tail", &CharacterRequest::default());
        assert!(result.success, "{:?}", result.error);
        let output = result.config.expect("output");
        let toad = &output.character;
        assert_eq!(toad.name, "Toad");
        assert_eq!(toad.character_type, CharacterType::Creature);
        assert!(toad.skeleton.contains("tail_base"));
        assert_eq!(toad.default_animation, "idle");
        assert!(toad.animation("idle").expect("idle").track("tail_mid").count() > 0);
        assert!(toad.id.starts_with("toad-"));
        assert_eq!(output.skin.len(), output.mesh.vertex_count());
    }

    #[test]
    fn test_quality_sets_budget() {
        let assembler = CharacterAssembler::default();
        let ultra = assembler
            .generate("a knight", &CharacterRequest::with_quality("ultra"))
            .into_config()
            .expect("ultra");
        assert_eq!(ultra.character.mesh_quality.vertex_count, 100_000);
        assert_eq!(ultra.character.mesh_quality.texture_size, 4096);

        let low = assembler
            .generate("a knight", &CharacterRequest::with_quality("low"))
            .into_config()
            .expect("low");
        assert_eq!(low.character.mesh_quality.vertex_count, 5_000);
        assert_eq!(low.character.mesh_quality.texture_size, 512);
        assert!(low.mesh.vertex_count() < ultra.mesh.vertex_count());
        assert!(low.mesh.vertex_count() <= 5_000);
    }

    #[test]
    fn test_feature_warning() {
        let result = CharacterAssembler::default().generate(
            "a dragon with wings, horns, claws, fangs and a tail",
            &CharacterRequest::default(),
        );
        assert!(result.success);
        assert!(result.warnings.iter().any(|w| w.contains("special features")));
    }

    #[test]
    fn test_bad_height_fails() {
        let request = CharacterRequest {
            height: Some(-1.0),
            ..CharacterRequest::default()
        };
        let result = CharacterAssembler::default().generate("a knight", &request);
        assert!(!result.success);
        assert!(result.error.expect("error").contains("height"));
    }

    #[test]
    fn test_overrides() {
        let request = CharacterRequest {
            name: Some("  Sir Reginald ".into()),
            height: Some(2.0),
            id: Some("npc-7".into()),
            ..CharacterRequest::default()
        };
        let knight = CharacterAssembler::default()
            .generate("a knight", &request)
            .into_config()
            .expect("knight")
            .character;
        assert_eq!(knight.name, "Sir Reginald");
        assert_eq!(knight.id, "npc-7");
        let template = character_template(CharacterType::Humanoid);
        assert!((knight.physics.mass - template.physics(2.0).mass).abs() < 1e-3);
    }

    #[test]
    fn test_object_gets_single_trunk() {
        let skeleton = SkeletonGenerator::new().generate(CharacterType::Object, &CharacterFeatures::default(), 1.0);
        let mesh = proxy_body(&skeleton, 1.0, SegmentCounts::for_tier(QualityTier::Low));
        assert!(!mesh.is_empty());
        let bounds = mesh.bounds().expect("bounds");
        assert!((bounds.max.y - 1.0).abs() < 1e-4);
        assert!(bounds.min.y.abs() < 1e-4);
    }

    #[test]
    fn test_limb_spans_its_endpoints() {
        let from = Vec3::new(1.0, 0.0, 0.0);
        let to = Vec3::new(1.0, 0.0, 2.0);
        let limb = limb_between(from, to, 0.1, 8, 1).expect("limb");
        let bounds = limb.bounds().expect("bounds");
        assert!((bounds.min.z - 0.0).abs() < 1e-4);
        assert!((bounds.max.z - 2.0).abs() < 1e-4);
        assert!(limb_between(from, from, 0.1, 8, 1).is_none());
    }

    #[test]
    fn test_material_hints() {
        let hints = MaterialHints {
            texture: Some(TextureHint::Furry),
            color: None,
            emissive: true,
            metallic: true,
        };
        let material = character_material(&hints, CharacterType::Creature);
        assert!((material.roughness - 0.35).abs() < f32::EPSILON);
        assert!((material.metalness - 0.85).abs() < f32::EPSILON);
        assert_eq!(material.emissive.map(|e| e.color), Some(material.color));
    }

    #[test]
    fn test_id_is_stable() {
        assert_eq!(character_id("Old Toad", "An old toad"), character_id("Old Toad", "an old toad "));
        assert!(character_id("", "x").starts_with("character-"));
    }
}
