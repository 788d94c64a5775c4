//! # Scene Assembler
//!
//! Prompt in, renderable object out:
//!
//! ```text
//! parse ─► theme template ─► geometry ─► material (+ effect) ─► snippet ─► validate
//! ```
//!
//! Build-level failures come back as a failed [`GenerationResult`];
//! validation findings come back as warnings on a successful one.

use grimoire_lexicon::rules::all_matches;
use grimoire_lexicon::scene::complexity_score;
use grimoire_lexicon::tables::{MaterialCue, MATERIAL_CUES};
use grimoire_lexicon::{parse_scene_with, SceneOverrides, Tokens};
use grimoire_procedural::{
    AnimatedEffect, AnimatedMaterial, BuildContext, CancellationToken, GeometryBuilder, GeometryRequest,
    MaterialComposer, Mesh, RenderableMaterial, Seed,
};
use grimoire_shared::{DistortionKind, QualityTier, SceneConfig, Theme, Vec3};

use crate::clock::{wall_clock_seconds, Instant};
use crate::config::GeneratorConfig;
use crate::error::PipelineResult;
use crate::result::GenerationResult;
use crate::snippet::render_snippet;
use crate::templates::apply_theme_template;
use crate::validate::validate_scene;

/// Optional knobs for one scene request.
#[derive(Debug, Clone, Default)]
pub struct SceneRequest {
    /// Quality tier name; unknown names fall back to the configured default.
    pub quality: Option<String>,
    /// Replaces the derived theme.
    pub theme: Option<Theme>,
    /// Replaces the derived scale.
    pub scale: Option<Vec3>,
    /// Build seed; defaults to a hash of the prompt.
    pub seed: Option<u64>,
    /// Clock for time-varying distortions; defaults to the wall clock.
    pub clock_seconds: Option<f32>,
    /// Token the caller can fire to abort a long build.
    pub cancel: Option<CancellationToken>,
}

impl SceneRequest {
    /// Request at a named quality tier.
    #[must_use]
    pub fn with_quality(quality: impl Into<String>) -> Self {
        Self {
            quality: Some(quality.into()),
            ..Self::default()
        }
    }
}

/// Everything a renderer needs for one generated object.
#[derive(Debug, Clone)]
pub struct SceneOutput {
    /// Descriptor.
    pub scene: SceneConfig,
    /// Tier the mesh was tessellated for.
    pub quality: QualityTier,
    /// Built geometry.
    pub mesh: Mesh,
    /// Static material.
    pub material: RenderableMaterial,
    /// Clock-driven variant, when the prompt asked for one.
    pub animated_material: Option<AnimatedMaterial>,
    /// Human-readable renderer recipe.
    pub snippet: String,
}

/// Runs the scene path of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct SceneAssembler {
    config: GeneratorConfig,
    builder: GeometryBuilder,
    composer: MaterialComposer,
}

impl SceneAssembler {
    /// Creates an assembler.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            builder: GeometryBuilder::new(config.limits.into()),
            composer: MaterialComposer::new(),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a scene from `prompt`. Never panics, never returns `Err`.
    #[must_use]
    pub fn generate(&self, prompt: &str, request: &SceneRequest) -> GenerationResult<SceneOutput> {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let outcome = self.assemble(prompt, request, &mut warnings);
        let elapsed = start.elapsed();

        match &outcome {
            Ok(output) => tracing::info!(
                "Generated {} scene in {:?}: {} vertices, {} warning(s)",
                output.scene.base_shape.as_str(),
                elapsed,
                output.mesh.vertex_count(),
                warnings.len()
            ),
            Err(err) => tracing::warn!("Scene generation failed after {:?}: {}", elapsed, err),
        }
        GenerationResult::from_outcome(outcome, warnings, elapsed)
    }

    fn assemble(&self, prompt: &str, request: &SceneRequest, warnings: &mut Vec<String>) -> PipelineResult<SceneOutput> {
        let (quality, fallback) = self.config.resolve_quality(request.quality.as_deref());
        warnings.extend(fallback);

        let overrides = SceneOverrides {
            theme: request.theme,
            scale: request.scale,
        };
        let mut scene = parse_scene_with(prompt, &overrides);
        apply_theme_template(&mut scene.atmosphere, scene.theme);
        // template lighting and post passes count toward complexity
        scene.set_complexity(complexity_score(&scene));
        tracing::debug!(
            "Scene parsed: {} / {} at {} quality, complexity {}",
            scene.base_shape.as_str(),
            scene.theme.as_str(),
            quality,
            scene.complexity
        );

        let modifier_count =
            scene.modifiers.active_names().len() + usize::from(scene.modifiers.distortion.is_some());
        if modifier_count > self.config.feature_warning_threshold {
            warn(
                warnings,
                format!("{modifier_count} geometry modifiers active; generation may be slow"),
            );
        }

        let geometry = GeometryRequest::from_scene(&scene, self.config.segments_for(quality));
        let mut context = request
            .seed
            .map_or_else(|| BuildContext::for_prompt(prompt), |seed| BuildContext::new(Seed::new(seed)))
            .with_clock(request.clock_seconds.unwrap_or_else(wall_clock_seconds));
        if let Some(cancel) = &request.cancel {
            context = context.with_cancel(cancel.clone());
        }

        let built = self.builder.build(&geometry, &context)?;
        for note in built.warnings {
            warn(warnings, note);
        }
        let mesh = built.mesh;
        let budget = quality.vertex_count() as usize;
        if mesh.vertex_count() > budget {
            warn(
                warnings,
                format!(
                    "mesh has {} vertices, above the {} budget of {budget}",
                    mesh.vertex_count(),
                    quality
                ),
            );
        }
        tracing::debug!("Geometry built: {} vertices", mesh.vertex_count());

        let material = self.composer.compose(&scene.materials)?;
        let animated_material = select_effect(&scene)
            .map(|effect| self.composer.compose_animated(&scene.materials, effect))
            .transpose()?;
        tracing::debug!(
            "Material composed: {:?}{}",
            material.model,
            animated_material
                .as_ref()
                .map_or(String::new(), |a| format!(" + {}", a.effect.as_str()))
        );

        let snippet = render_snippet(&scene, &mesh, &material, animated_material.as_ref());

        for violation in validate_scene(&scene) {
            warn(warnings, format!("validation: {violation}"));
        }

        Ok(SceneOutput {
            scene,
            quality,
            mesh,
            material,
            animated_material,
            snippet,
        })
    }
}

/// Picks the clock-driven material effect a scene asks for, if any.
///
/// Glitch and pulse distortions carry over to the surface; otherwise a
/// ghostly cue sweeps a phase band and any emission gets a rim glow.
#[must_use]
pub fn select_effect(scene: &SceneConfig) -> Option<AnimatedEffect> {
    match scene.modifiers.distortion.map(|d| d.kind) {
        Some(DistortionKind::Glitch) => return Some(AnimatedEffect::GLITCH),
        Some(DistortionKind::Pulse) => return Some(AnimatedEffect::PULSE),
        _ => {}
    }
    let ghostly = all_matches(MATERIAL_CUES, &Tokens::new(&scene.prompt)).contains(&MaterialCue::Ghostly);
    if ghostly {
        Some(AnimatedEffect::PHASE)
    } else if scene.materials.emissive.is_some() {
        Some(AnimatedEffect::GLOW)
    } else {
        None
    }
}

pub(crate) fn warn(warnings: &mut Vec<String>, message: String) {
    tracing::warn!("{}", message);
    warnings.push(message);
}
