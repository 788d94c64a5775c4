//! Clock-driven material variants.
//!
//! [`AnimatedMaterial::shade`] is a pure function of the caller's clock and
//! the shading sample, so a renderer can evaluate it per fragment or per
//! vertex without any hidden state.

use std::f32::consts::TAU;

use grimoire_shared::{fnv1a, Color, Vec3};

use super::RenderableMaterial;

/// Probability that a glitch cell inverts in a given frame.
const GLITCH_PROBABILITY: f64 = 0.1;

/// Time-varying effect layered on a base material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedEffect {
    /// Fresnel rim blend toward the emissive color.
    Glow {
        /// Rim falloff exponent.
        power: f32,
    },
    /// Sinusoidal blend between base and emissive color.
    Pulse {
        /// Cycles per second.
        speed: f32,
    },
    /// Bright band sweeping up the object.
    Phase {
        /// Sweeps per second.
        speed: f32,
        /// Half-width of the band in object units.
        band_width: f32,
    },
    /// Blocky, probability-gated color inversion.
    Glitch {
        /// Re-rolls per second.
        speed: f32,
    },
}

impl AnimatedEffect {
    /// Glow with the default rim exponent.
    pub const GLOW: Self = Self::Glow { power: 2.0 };
    /// One pulse per second.
    pub const PULSE: Self = Self::Pulse { speed: 1.0 };
    /// Slow sweep with a narrow band.
    pub const PHASE: Self = Self::Phase {
        speed: 0.5,
        band_width: 0.2,
    };
    /// Eight re-rolls per second.
    pub const GLITCH: Self = Self::Glitch { speed: 8.0 };

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Glow { .. } => "glow",
            Self::Pulse { .. } => "pulse",
            Self::Phase { .. } => "phase",
            Self::Glitch { .. } => "glitch",
        }
    }
}

/// Per-fragment inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingSample {
    /// Object-space position.
    pub position: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
    /// Unit vector from the surface toward the eye.
    pub view_dir: Vec3,
}

/// Base material plus an effect.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedMaterial {
    /// Static parameters.
    pub base: RenderableMaterial,
    /// Layered effect.
    pub effect: AnimatedEffect,
}

impl AnimatedMaterial {
    /// Creates an animated material.
    #[must_use]
    pub const fn new(base: RenderableMaterial, effect: AnimatedEffect) -> Self {
        Self { base, effect }
    }

    /// Color the effect targets: the emissive color, or white when the
    /// base does not emit.
    #[must_use]
    pub fn accent(&self) -> Color {
        if self.base.is_emissive() {
            self.base.emissive
        } else {
            Color::WHITE
        }
    }

    /// Evaluates the surface color at `clock` seconds.
    #[must_use]
    pub fn shade(&self, clock: f32, sample: &ShadingSample) -> Color {
        let base = self.base.color;
        let accent = self.accent();
        match self.effect {
            AnimatedEffect::Glow { power } => {
                let facing = sample.normal.dot(sample.view_dir).abs().min(1.0);
                base.lerp(accent, (1.0 - facing).powf(power.max(0.0)))
            }
            AnimatedEffect::Pulse { speed } => {
                let t = 0.5 + 0.5 * (clock * speed * TAU).sin();
                base.lerp(accent, t)
            }
            AnimatedEffect::Phase { speed, band_width } => {
                // band center sweeps y in [-1, 1)
                let center = (clock * speed).rem_euclid(2.0) - 1.0;
                let distance = (sample.position.y - center).abs();
                let weight = (1.0 - distance / band_width.max(f32::EPSILON)).max(0.0);
                base.lerp(accent, weight)
            }
            AnimatedEffect::Glitch { speed } => {
                let frame = (clock * speed).floor() as i64;
                if glitch_roll(frame, sample.position) < GLITCH_PROBABILITY {
                    base.inverted()
                } else {
                    base
                }
            }
        }
    }
}

/// Uniform in [0, 1) for a frame and a coarse 0.1-unit position cell.
fn glitch_roll(frame: i64, position: Vec3) -> f64 {
    let cell = |v: f32| (v * 10.0).floor() as i32;
    let mut bytes = [0u8; 20];
    bytes[..8].copy_from_slice(&frame.to_le_bytes());
    bytes[8..12].copy_from_slice(&cell(position.x).to_le_bytes());
    bytes[12..16].copy_from_slice(&cell(position.y).to_le_bytes());
    bytes[16..].copy_from_slice(&cell(position.z).to_le_bytes());
    (fnv1a(&bytes) >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialComposer;
    use grimoire_shared::{Emissive, MaterialConfig};

    fn animated(effect: AnimatedEffect) -> AnimatedMaterial {
        let config = MaterialConfig {
            emissive: Some(Emissive::new(Color::from_hex(0xFF0000))),
            ..MaterialConfig::solid(Color::BLACK, 0.5, 0.0)
        };
        MaterialComposer::new().compose_animated(&config, effect).expect("finite")
    }

    fn sample(y: f32) -> ShadingSample {
        ShadingSample {
            position: Vec3::new(0.0, y, 0.0),
            normal: Vec3::Z,
            view_dir: Vec3::Z,
        }
    }

    #[test]
    fn test_shade_is_pure() {
        for effect in [AnimatedEffect::GLOW, AnimatedEffect::PULSE, AnimatedEffect::PHASE, AnimatedEffect::GLITCH] {
            let material = animated(effect);
            assert_eq!(material.shade(1.3, &sample(0.2)), material.shade(1.3, &sample(0.2)));
        }
    }

    #[test]
    fn test_glow_rim_only() {
        let material = animated(AnimatedEffect::GLOW);
        assert_eq!(material.shade(0.0, &sample(0.0)), Color::BLACK, "facing the eye shows base");
        let rim = ShadingSample {
            normal: Vec3::X,
            ..sample(0.0)
        };
        assert_eq!(material.shade(0.0, &rim), Color::from_hex(0xFF0000));
    }

    #[test]
    fn test_pulse_midpoint_at_zero() {
        let color = animated(AnimatedEffect::PULSE).shade(0.0, &sample(0.0));
        assert!((color.r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_phase_band_moves() {
        let material = animated(AnimatedEffect::PHASE);
        // at clock 1.0 the band is centered on y = -0.5
        assert!(material.shade(1.0, &sample(-0.5)).r > 0.99);
        assert_eq!(material.shade(1.0, &sample(0.5)), Color::BLACK);
    }

    #[test]
    fn test_glitch_inverts_some_cells() {
        let material = animated(AnimatedEffect::GLITCH);
        let inverted = (0..200)
            .filter(|i| material.shade(0.0, &sample(*i as f32 * 0.1)) == Color::WHITE)
            .count();
        assert!(inverted > 0 && inverted < 100, "{inverted} of 200 cells inverted");
    }
}
