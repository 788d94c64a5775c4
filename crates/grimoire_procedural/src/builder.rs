//! # Geometry Builder
//!
//! Turns a [`GeometryRequest`] into a validated [`Mesh`]:
//!
//! 1. Validate scale and distortion parameters
//! 2. Construct the base shape in a unit volume
//! 3. Add the inner shell for `hollow`
//! 4. Run the modifier pipeline, then the explicit distortion
//! 5. Apply the scale, recompute normals, validate
//!
//! Recursive shapes are bounded by [`BuildLimits`]. Hitting a limit
//! truncates growth and adds a warning; it never fails the build.

use grimoire_shared::{BaseShape, GeometryModifiers, QualityTier, SceneConfig, Vec3, MAX_SCALE};

use crate::cancel::CancellationToken;
use crate::distortion::{apply_distortion, validate_distortion};
use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::modifiers::apply_modifiers;
use crate::noise::Seed;
use crate::primitives;
use crate::rng::SeededRng;
use crate::shapes::{self, OrganicParams};

/// Scale factor of the inner shell added by `hollow`.
pub const HOLLOW_SHELL_SCALE: f32 = 0.85;

/// Text used when a text shape carries none.
pub const DEFAULT_TEXT: &str = "TEXT";

const ORGANIC_GROWTH: u64 = 0x0026_0477;

/// Ceilings for recursive construction and output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildLimits {
    /// Deepest organic branching level.
    pub max_organic_depth: u32,
    /// Most organic branch segments.
    pub max_organic_nodes: usize,
    /// Deepest fractal subdivision.
    pub max_fractal_depth: u32,
    /// Most vertices in a finished mesh.
    pub max_vertices: usize,
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self {
            max_organic_depth: 6,
            max_organic_nodes: 400,
            max_fractal_depth: 4,
            max_vertices: 250_000,
        }
    }
}

/// Tessellation density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentCounts {
    /// Segments around curved shapes.
    pub radial: u32,
    /// Segments along their height.
    pub height: u32,
}

impl SegmentCounts {
    /// Density matching a quality tier.
    #[must_use]
    pub const fn for_tier(tier: QualityTier) -> Self {
        let radial = tier.radial_segments();
        Self {
            radial,
            height: radial / 2,
        }
    }
}

impl Default for SegmentCounts {
    fn default() -> Self {
        Self::for_tier(QualityTier::Medium)
    }
}

/// Everything about a build that is not the request itself.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Root of every noise field and random stream in the build.
    pub seed: Seed,
    /// Clock value for time-varying distortions, in seconds.
    pub clock_seconds: f32,
    /// Cooperative cancellation.
    pub cancel: CancellationToken,
}

impl BuildContext {
    /// Context at clock zero with a fresh token.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Context seeded from the lower-cased prompt.
    #[must_use]
    pub fn for_prompt(prompt: &str) -> Self {
        Self::new(Seed::from_text(&prompt.to_lowercase()))
    }

    /// Sets the clock value.
    #[must_use]
    pub fn with_clock(mut self, seconds: f32) -> Self {
        self.clock_seconds = seconds;
        self
    }

    /// Shares an existing cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// What to build.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRequest {
    /// Base shape.
    pub shape: BaseShape,
    /// Per-axis size.
    pub scale: Vec3,
    /// Modifiers and optional distortion.
    pub modifiers: GeometryModifiers,
    /// Drives decay strength.
    pub horror_level: u8,
    /// Drives recursion depth of organic and fractal shapes.
    pub detail: u8,
    /// Glyphs for [`BaseShape::Text`].
    pub text: Option<String>,
    /// Tessellation.
    pub segments: SegmentCounts,
}

impl GeometryRequest {
    /// Plain request for a shape at unit scale.
    #[must_use]
    pub fn new(shape: BaseShape) -> Self {
        Self {
            shape,
            scale: Vec3::ONE,
            modifiers: GeometryModifiers::default(),
            horror_level: 0,
            detail: 0,
            text: None,
            segments: SegmentCounts::default(),
        }
    }

    /// Request mirroring a parsed scene.
    #[must_use]
    pub fn from_scene(scene: &SceneConfig, segments: SegmentCounts) -> Self {
        Self {
            shape: scene.base_shape,
            scale: scene.scale,
            modifiers: scene.modifiers,
            horror_level: scene.horror_level,
            detail: scene.complexity,
            text: scene.text.clone(),
            segments,
        }
    }
}

/// Finished geometry plus anything worth telling the caller.
#[derive(Debug, Clone)]
pub struct BuiltGeometry {
    /// Validated mesh.
    pub mesh: Mesh,
    /// Non-fatal notes such as truncated recursion.
    pub warnings: Vec<String>,
}

/// Builds meshes under a fixed set of limits.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuilder {
    limits: BuildLimits,
}

impl GeometryBuilder {
    /// Creates a builder.
    #[must_use]
    pub const fn new(limits: BuildLimits) -> Self {
        Self { limits }
    }

    /// Active limits.
    #[must_use]
    pub const fn limits(&self) -> &BuildLimits {
        &self.limits
    }

    /// Builds the requested geometry.
    ///
    /// Identical `(request, context.seed, context.clock_seconds)` always
    /// produce an identical mesh.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InvalidScale`] for a non-finite, non-positive or
    ///   oversized scale component
    /// - [`GeometryError::ConflictingModifiers`] for `sharp` with `smooth`
    /// - [`GeometryError::InvalidDistortion`] for bad distortion parameters
    /// - [`GeometryError::InvalidParameter`] for a text shape with no glyphs
    /// - [`GeometryError::VertexBudgetExceeded`] past `max_vertices`
    /// - [`GeometryError::MalformedMesh`] if the result fails validation
    /// - [`GeometryError::Cancelled`] once the context's token fires
    pub fn build(&self, request: &GeometryRequest, context: &BuildContext) -> GeometryResult<BuiltGeometry> {
        validate_scale(request.scale)?;
        if request.modifiers.sharp && request.modifiers.smooth {
            return Err(GeometryError::ConflictingModifiers("sharp", "smooth"));
        }
        if let Some(spec) = &request.modifiers.distortion {
            validate_distortion(spec)?;
        }

        let mut warnings = Vec::new();
        let mut mesh = self.base_mesh(request, context, &mut warnings)?;
        tracing::debug!(
            "Base {} built: {} vertices",
            request.shape.as_str(),
            mesh.vertex_count()
        );

        if request.modifiers.hollow {
            let mut inner = mesh.clone();
            inner.scale(Vec3::splat(HOLLOW_SHELL_SCALE));
            inner.flip_winding();
            mesh.merge(&inner);
        }
        self.check_budget(&mesh)?;

        let applied = apply_modifiers(
            &mut mesh,
            &request.modifiers,
            context.seed,
            request.horror_level,
            &context.cancel,
        )?;
        if !applied.is_empty() {
            tracing::debug!("Modifiers applied: {}", applied.join(", "));
        }

        if let Some(spec) = &request.modifiers.distortion {
            context.cancel.check()?;
            mesh.compute_normals();
            apply_distortion(&mut mesh, spec, context.clock_seconds)?;
        }

        mesh.scale(request.scale);
        mesh.compute_normals();
        mesh.validate()?;

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(BuiltGeometry { mesh, warnings })
    }

    fn base_mesh(
        &self,
        request: &GeometryRequest,
        context: &BuildContext,
        warnings: &mut Vec<String>,
    ) -> GeometryResult<Mesh> {
        let radial = request.segments.radial.max(3);
        let height = request.segments.height.max(1);
        let detail = u32::from(request.detail);

        let mesh = match request.shape {
            BaseShape::Box => primitives::cuboid(Vec3::ONE, (radial / 8).max(1)),
            BaseShape::Sphere => primitives::sphere(0.5, radial, height),
            BaseShape::Cylinder => primitives::cylinder(0.5, 0.5, 1.0, radial, (height / 4).max(1)),
            BaseShape::Torus => primitives::torus(0.35, 0.15, (radial / 2).max(3), radial),
            BaseShape::Cone => primitives::cone(0.5, 1.0, radial, 1),
            BaseShape::Text => {
                let text = request.text.as_deref().unwrap_or(DEFAULT_TEXT);
                let mesh = primitives::text_plate(text);
                if mesh.is_empty() {
                    return Err(GeometryError::InvalidParameter(format!(
                        "text {text:?} has no visible characters"
                    )));
                }
                mesh
            }
            BaseShape::Extrusion => shapes::gothic_extrusion(radial),
            BaseShape::Twisted => shapes::twisted_column(radial, height),
            BaseShape::Organic => {
                let depth = capped(
                    "organic depth",
                    2 + detail / 3,
                    self.limits.max_organic_depth,
                    warnings,
                );
                let params = OrganicParams {
                    depth,
                    max_nodes: self.limits.max_organic_nodes,
                    radial_segments: radial / 2,
                };
                let mut rng = SeededRng::new(context.seed.derive(ORGANIC_GROWTH));
                let grown = shapes::organic(&params, &mut rng, &context.cancel)?;
                if grown.truncated {
                    warnings.push(format!(
                        "organic growth stopped at the {} node limit",
                        self.limits.max_organic_nodes
                    ));
                }
                grown.mesh
            }
            BaseShape::Fractal => {
                let depth = capped(
                    "fractal depth",
                    1 + detail / 4,
                    self.limits.max_fractal_depth,
                    warnings,
                );
                shapes::fractal(depth, &context.cancel)?.mesh
            }
        };
        Ok(mesh)
    }

    fn check_budget(&self, mesh: &Mesh) -> GeometryResult<()> {
        if mesh.vertex_count() > self.limits.max_vertices {
            return Err(GeometryError::VertexBudgetExceeded {
                count: mesh.vertex_count(),
                limit: self.limits.max_vertices,
            });
        }
        Ok(())
    }
}

fn capped(what: &str, requested: u32, limit: u32, warnings: &mut Vec<String>) -> u32 {
    if requested > limit {
        warnings.push(format!("{what} {requested} capped at {limit}"));
        limit
    } else {
        requested
    }
}

fn validate_scale(scale: Vec3) -> GeometryResult<()> {
    for (axis, value) in [('x', scale.x), ('y', scale.y), ('z', scale.z)] {
        if !value.is_finite() || value <= 0.0 || value > MAX_SCALE {
            return Err(GeometryError::InvalidScale {
                axis,
                value,
                max: MAX_SCALE,
            });
        }
    }
    Ok(())
}
