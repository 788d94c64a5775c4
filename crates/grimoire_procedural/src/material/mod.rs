//! # Material Composer
//!
//! Maps a [`MaterialConfig`] onto the flat parameter block a renderer
//! consumes, with named preset libraries and clock-driven variants.

mod animated;
mod presets;

pub use animated::{AnimatedEffect, AnimatedMaterial, ShadingSample};
pub use presets::{normalize_preset_name, preset, preset_or_fallback, PresetLibrary};

use grimoire_shared::{Color, MaterialConfig};

use crate::error::{MaterialError, MaterialResult};

/// Shading model the renderer should instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialModel {
    /// Metal/rough PBR.
    Standard,
    /// PBR with transmission and clearcoat.
    Physical,
}

/// Faces to rasterize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Front faces only.
    Front,
    /// Both faces, for see-through surfaces.
    Double,
}

/// Renderer-ready material parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableMaterial {
    /// Shading model.
    pub model: MaterialModel,
    /// Albedo.
    pub color: Color,
    /// Roughness [0, 1].
    pub roughness: f32,
    /// Metalness [0, 1].
    pub metalness: f32,
    /// Emitted color, black when not emissive.
    pub emissive: Color,
    /// Emission strength.
    pub emissive_intensity: f32,
    /// Opacity [0, 1].
    pub opacity: f32,
    /// Needs alpha blending.
    pub transparent: bool,
    /// Light transmission [0, 1].
    pub transmission: f32,
    /// Index of refraction.
    pub ior: f32,
    /// Transmission volume thickness.
    pub thickness: f32,
    /// Clearcoat strength [0, 1].
    pub clearcoat: f32,
    /// Draw edges only.
    pub wireframe: bool,
    /// Faces to draw.
    pub side: Side,
    /// Preset name, if any.
    pub preset: Option<String>,
}

impl RenderableMaterial {
    /// True when the material emits light.
    #[must_use]
    pub fn is_emissive(&self) -> bool {
        self.emissive_intensity > 0.0 && self.emissive != Color::BLACK
    }
}

/// Stateless material mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialComposer;

impl MaterialComposer {
    /// Creates a composer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps a material description onto renderer parameters.
    ///
    /// Emission keeps the description's strength. Descriptions that leave
    /// it out deserialize with [`grimoire_shared::DEFAULT_EMISSIVE_INTENSITY`].
    ///
    /// # Errors
    ///
    /// [`MaterialError::InvalidParameter`] naming the first non-finite
    /// parameter.
    pub fn compose(&self, config: &MaterialConfig) -> MaterialResult<RenderableMaterial> {
        check_finite(config)?;

        let (emissive, emissive_intensity) = config
            .emissive
            .map_or((Color::BLACK, 0.0), |e| (clamp_color(e.color), e.intensity.max(0.0)));
        let opacity = config.opacity.map_or(1.0, |o| o.clamp(0.0, 1.0));
        let clearcoat = config.clearcoat.map_or(0.0, |c| c.clamp(0.0, 1.0));
        let (transmission, ior, thickness) = config
            .glass
            .map_or((0.0, 1.5, 0.0), |g| (g.transmission.clamp(0.0, 1.0), g.ior.max(1.0), g.thickness.max(0.0)));

        let physical = config.glass.is_some() || config.clearcoat.is_some();
        let transparent = config.glass.is_some() || opacity < 1.0;

        Ok(RenderableMaterial {
            model: if physical { MaterialModel::Physical } else { MaterialModel::Standard },
            color: clamp_color(config.color),
            roughness: config.roughness.clamp(0.0, 1.0),
            metalness: config.metalness.clamp(0.0, 1.0),
            emissive,
            emissive_intensity,
            opacity,
            transparent,
            transmission,
            ior,
            thickness,
            clearcoat,
            wireframe: config.wireframe,
            side: if transparent { Side::Double } else { Side::Front },
            preset: config.preset.clone(),
        })
    }

    /// Composes a material and attaches a clock-driven effect.
    ///
    /// # Errors
    ///
    /// As [`compose`](Self::compose).
    pub fn compose_animated(&self, config: &MaterialConfig, effect: AnimatedEffect) -> MaterialResult<AnimatedMaterial> {
        Ok(AnimatedMaterial::new(self.compose(config)?, effect))
    }
}

fn clamp_color(c: Color) -> Color {
    Color::new(c.r.clamp(0.0, 1.0), c.g.clamp(0.0, 1.0), c.b.clamp(0.0, 1.0))
}

fn check_finite(config: &MaterialConfig) -> MaterialResult<()> {
    let mut params = vec![
        ("color.r", config.color.r),
        ("color.g", config.color.g),
        ("color.b", config.color.b),
        ("roughness", config.roughness),
        ("metalness", config.metalness),
    ];
    if let Some(e) = config.emissive {
        params.extend([
            ("emissive.r", e.color.r),
            ("emissive.g", e.color.g),
            ("emissive.b", e.color.b),
            ("emissive_intensity", e.intensity),
        ]);
    }
    if let Some(o) = config.opacity {
        params.push(("opacity", o));
    }
    if let Some(g) = config.glass {
        params.extend([("transmission", g.transmission), ("ior", g.ior), ("thickness", g.thickness)]);
    }
    if let Some(c) = config.clearcoat {
        params.push(("clearcoat", c));
    }

    match params.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(MaterialError::InvalidParameter { name, value }),
        None => Ok(()),
    }
}
