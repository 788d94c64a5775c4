//! # Distortion Kernels
//!
//! Per-vertex displacement families parameterized by intensity, frequency
//! and seed. All noise and randomness derive from [`DistortionSpec::seed`];
//! the only other input is the clock value supplied by the build context,
//! which drives `pulse` and re-rolls `glitch`.

use std::f32::consts::{PI, TAU};

use grimoire_shared::{DistortionKind, DistortionSpec, Vec3};

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::noise::{Seed, SimplexNoise};
use crate::rng::SeededRng;

/// Checks intensity and frequency before any vertex is touched.
///
/// # Errors
///
/// [`GeometryError::InvalidDistortion`] for a non-finite or negative
/// intensity, or a non-finite or non-positive frequency.
pub fn validate_distortion(spec: &DistortionSpec) -> GeometryResult<()> {
    if !spec.intensity.is_finite() || spec.intensity < 0.0 {
        return Err(GeometryError::InvalidDistortion {
            name: "intensity",
            value: spec.intensity,
        });
    }
    if !spec.frequency.is_finite() || spec.frequency <= 0.0 {
        return Err(GeometryError::InvalidDistortion {
            name: "frequency",
            value: spec.frequency,
        });
    }
    Ok(())
}

/// Applies one distortion in place.
///
/// `mesh.normals` must be current; `noise` and `erosion` displace along
/// them.
///
/// # Errors
///
/// See [`validate_distortion`].
pub fn apply_distortion(mesh: &mut Mesh, spec: &DistortionSpec, clock_seconds: f32) -> GeometryResult<()> {
    validate_distortion(spec)?;
    let seed = Seed::new(spec.seed).derive(spec.kind as u64 + 1);
    let i = spec.intensity;
    let f = spec.frequency;
    tracing::debug!("Distortion {}: intensity={}, frequency={}", spec.kind.as_str(), i, f);

    match spec.kind {
        DistortionKind::Noise => {
            let noise = SimplexNoise::new(seed);
            for (p, n) in mesh.positions.iter_mut().zip(&mesh.normals) {
                let d = noise.fbm_at(*p * f);
                *p += *n * (d * i * 0.25);
            }
        }
        DistortionKind::Twist => {
            for p in &mut mesh.positions {
                *p = p.rotate_y(p.y * f * i * PI);
            }
        }
        DistortionKind::Decay => {
            let noise = SimplexNoise::new(seed);
            for p in &mut mesh.positions {
                let d = noise.at(*p * (f * 2.0)).abs();
                *p = *p * (1.0 - d * i * 0.3).max(0.05);
            }
        }
        DistortionKind::Erosion => {
            let noise = SimplexNoise::new(seed);
            for (p, n) in mesh.positions.iter_mut().zip(&mesh.normals) {
                let d = noise.at(*p * (f * 3.0));
                if d > 0.4 {
                    *p += *n * (-(d - 0.4) * i * 0.5);
                }
            }
        }
        DistortionKind::Stretch => {
            let lateral = 1.0 / (1.0 + i).sqrt();
            for p in &mut mesh.positions {
                *p = Vec3::new(p.x * lateral, p.y * (1.0 + i), p.z * lateral);
            }
        }
        DistortionKind::Melt => {
            let noise = SimplexNoise::new(seed);
            for p in &mut mesh.positions {
                if p.y <= 0.0 {
                    continue;
                }
                let wobble = noise.at(Vec3::new(p.x * f, 0.0, p.z * f)).abs();
                let drop = p.y * i * 0.5 * (0.5 + wobble);
                let spread = 1.0 + drop * 0.5;
                *p = Vec3::new(p.x * spread, p.y - drop, p.z * spread);
            }
        }
        DistortionKind::Shatter => {
            let noise = SimplexNoise::new(seed);
            let mut rng = SeededRng::new(seed.derive(0x5A7));
            for p in &mut mesh.positions {
                let d = noise.at(*p * (f * 2.0));
                if d > 0.2 {
                    let burst = p.normalize_or_zero() * (d * i * 0.3);
                    *p += burst + rng.signed_vec3() * (i * 0.05);
                }
            }
        }
        DistortionKind::Pulse => {
            let factor = 1.0 + (clock_seconds * f * TAU).sin() * i * 0.1;
            for p in &mut mesh.positions {
                *p = *p * factor;
            }
        }
        DistortionKind::Glitch => {
            // re-rolled `frequency` times per second
            let frame = (clock_seconds * f).floor().max(0.0) as u64;
            let mut rng = SeededRng::new(seed.derive(frame));
            let probability = 0.1 * i;
            for p in &mut mesh.positions {
                if rng.chance(probability) {
                    let offset = rng.signed() * i * 0.1;
                    match rng.index(3) {
                        0 => p.x += offset,
                        1 => p.y += offset,
                        _ => p.z += offset,
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    fn spec(kind: DistortionKind, intensity: f32) -> DistortionSpec {
        DistortionSpec::new(kind, intensity, 42)
    }

    const ALL_KINDS: [DistortionKind; 9] = [
        DistortionKind::Noise,
        DistortionKind::Twist,
        DistortionKind::Decay,
        DistortionKind::Erosion,
        DistortionKind::Stretch,
        DistortionKind::Melt,
        DistortionKind::Shatter,
        DistortionKind::Pulse,
        DistortionKind::Glitch,
    ];

    #[test]
    fn test_rejects_bad_parameters() {
        let mut mesh = primitives::sphere(0.5, 8, 6);
        let mut bad = spec(DistortionKind::Noise, f32::NAN);
        assert!(matches!(
            apply_distortion(&mut mesh, &bad, 0.0),
            Err(GeometryError::InvalidDistortion { name: "intensity", .. })
        ));
        bad.intensity = -0.5;
        assert!(validate_distortion(&bad).is_err());
        bad.intensity = 0.5;
        bad.frequency = 0.0;
        assert!(matches!(
            validate_distortion(&bad),
            Err(GeometryError::InvalidDistortion { name: "frequency", .. })
        ));
    }

    #[test]
    fn test_every_kind_is_deterministic_and_finite() {
        for kind in ALL_KINDS {
            let mut a = primitives::sphere(0.5, 12, 8);
            let mut b = a.clone();
            apply_distortion(&mut a, &spec(kind, 0.8), 0.3).expect("valid spec");
            apply_distortion(&mut b, &spec(kind, 0.8), 0.3).expect("valid spec");
            assert_eq!(a, b, "{} must be deterministic", kind.as_str());
            assert!(a.positions.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_zero_intensity_is_identity_for_most_kinds() {
        for kind in ALL_KINDS {
            let mut mesh = primitives::sphere(0.5, 8, 6);
            let original = mesh.clone();
            apply_distortion(&mut mesh, &spec(kind, 0.0), 1.7).expect("valid spec");
            assert_eq!(mesh, original, "{} at zero intensity moved vertices", kind.as_str());
        }
    }

    #[test]
    fn test_stretch_preserves_cross_section_ratio() {
        let mut mesh = primitives::cuboid(Vec3::ONE, 1);
        apply_distortion(&mut mesh, &spec(DistortionKind::Stretch, 3.0), 0.0).expect("valid");
        let size = mesh.bounds().expect("non-empty").size();
        assert!((size.y - 4.0).abs() < 1e-5);
        assert!((size.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_melt_leaves_lower_half() {
        let mut mesh = primitives::sphere(0.5, 12, 8);
        let original = mesh.clone();
        apply_distortion(&mut mesh, &spec(DistortionKind::Melt, 1.0), 0.0).expect("valid");
        for (a, b) in mesh.positions.iter().zip(&original.positions) {
            if b.y <= 0.0 {
                assert_eq!(a, b);
            } else {
                assert!(a.y <= b.y);
            }
        }
    }

    #[test]
    fn test_pulse_follows_clock() {
        let base = primitives::sphere(0.5, 8, 6);
        let pulse = spec(DistortionKind::Pulse, 1.0);
        let mut at_zero = base.clone();
        apply_distortion(&mut at_zero, &pulse, 0.0).expect("valid");
        assert_eq!(at_zero, base, "sin(0) should leave the mesh unscaled");

        // frequency 2 Hz: quarter period at 0.125 s is the peak
        let mut at_peak = base.clone();
        apply_distortion(&mut at_peak, &pulse, 0.125).expect("valid");
        assert!((at_peak.max_radius() - 0.55).abs() < 1e-4);
    }

    #[test]
    fn test_glitch_rerolls_per_frame() {
        let base = primitives::sphere(0.5, 24, 16);
        let glitch = spec(DistortionKind::Glitch, 1.0);
        let mut a = base.clone();
        let mut b = base.clone();
        apply_distortion(&mut a, &glitch, 0.0).expect("valid");
        apply_distortion(&mut b, &glitch, 1.0).expect("valid");
        assert_ne!(a, base);
        assert_ne!(a, b);
    }
}
