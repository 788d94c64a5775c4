//! # Modifier Pipeline
//!
//! Boolean geometry modifiers applied in a fixed order after base
//! construction: twist, decay, fracture, organic jitter, then sharp or
//! smooth. Explicit distortions run afterwards (see [`crate::distortion`]).
//!
//! Each pass draws its noise from its own derivation of the build seed, so
//! enabling one modifier never shifts the noise another one sees.

use std::f32::consts::PI;

use grimoire_shared::{GeometryModifiers, Vec3};

use crate::cancel::CancellationToken;
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::noise::{Seed, SimplexNoise};

const DECAY_PURPOSE: u64 = 0x0DEC_A7;
const FRACTURE_PURPOSE: u64 = 0x0F2A_C7;
const ORGANIC_PURPOSE: u64 = 0x0026_A41C;

/// Radial exponent for `sharp`.
pub const SHARP_EXPONENT: f32 = 1.3;
/// Radial exponent for `smooth`.
pub const SMOOTH_EXPONENT: f32 = 0.7;

/// Runs every enabled modifier in pipeline order.
///
/// Returns the names of the passes that ran. `hollow` and `distortion` are
/// handled by the builder and ignored here.
///
/// # Errors
///
/// [`GeometryError::Cancelled`](crate::GeometryError::Cancelled) between
/// passes once `cancel` fires.
pub fn apply_modifiers(
    mesh: &mut Mesh,
    modifiers: &GeometryModifiers,
    seed: Seed,
    horror_level: u8,
    cancel: &CancellationToken,
) -> GeometryResult<Vec<&'static str>> {
    let mut applied = Vec::new();

    if modifiers.twisted {
        cancel.check()?;
        twist(mesh);
        applied.push("twisted");
    }
    if modifiers.decayed {
        cancel.check()?;
        decay(mesh, &SimplexNoise::new(seed.derive(DECAY_PURPOSE)), horror_level);
        applied.push("decayed");
    }
    if modifiers.fractured {
        cancel.check()?;
        fracture(mesh, &SimplexNoise::new(seed.derive(FRACTURE_PURPOSE)));
        applied.push("fractured");
    }
    if modifiers.organic {
        cancel.check()?;
        organic_jitter(mesh, seed.derive(ORGANIC_PURPOSE));
        applied.push("organic");
    }
    if modifiers.sharp {
        cancel.check()?;
        radial_power(mesh, SHARP_EXPONENT);
        applied.push("sharp");
    } else if modifiers.smooth {
        cancel.check()?;
        radial_power(mesh, SMOOTH_EXPONENT);
        applied.push("smooth");
    }

    Ok(applied)
}

/// Rotates each vertex about Y by `y × 1.5π / height`.
pub fn twist(mesh: &mut Mesh) {
    let Some(bounds) = mesh.bounds() else {
        return;
    };
    let height = bounds.size().y;
    if height <= f32::EPSILON {
        return;
    }
    for p in &mut mesh.positions {
        let angle = p.y * 1.5 * PI / height;
        *p = p.rotate_y(angle);
    }
}

/// Pulls vertices inward by up to 30% where noise is strong.
///
/// The effect scales with horror level, floored at 10% so decay still
/// reads on calm prompts.
pub fn decay(mesh: &mut Mesh, noise: &SimplexNoise, horror_level: u8) {
    let horror = (f32::from(horror_level) / 10.0).max(0.1);
    for p in &mut mesh.positions {
        let n = noise.at(*p * 2.0);
        *p = *p * (1.0 - n.abs() * 0.3 * horror);
    }
}

/// Pushes vertices outward where noise exceeds 0.3.
pub fn fracture(mesh: &mut Mesh, noise: &SimplexNoise) {
    for p in &mut mesh.positions {
        let n = noise.at(*p * 3.0);
        if n > 0.3 {
            *p += p.normalize_or_zero() * (n * 0.2);
        }
    }
}

/// Independent per-axis noise offsets of amplitude 0.08.
pub fn organic_jitter(mesh: &mut Mesh, seed: Seed) {
    let axes = [
        SimplexNoise::new(seed.derive(1)),
        SimplexNoise::new(seed.derive(2)),
        SimplexNoise::new(seed.derive(3)),
    ];
    for p in &mut mesh.positions {
        let q = *p * 1.5;
        let offset = Vec3::new(axes[0].at(q), axes[1].at(q), axes[2].at(q));
        *p += offset * 0.08;
    }
}

/// Remaps distance from the origin as `R · (r / R)^k`, `R` being the mesh's
/// largest radius. `k > 1` pinches toward the center, `k < 1` inflates.
pub fn radial_power(mesh: &mut Mesh, exponent: f32) {
    let max_radius = mesh.max_radius();
    if max_radius <= f32::EPSILON {
        return;
    }
    for p in &mut mesh.positions {
        let r = p.length();
        if r <= f32::EPSILON {
            continue;
        }
        let remapped = max_radius * (r / max_radius).powf(exponent);
        *p = *p * (remapped / r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    fn sphere() -> Mesh {
        primitives::sphere(0.5, 16, 12)
    }

    #[test]
    fn test_no_modifiers_is_identity() {
        let mut mesh = sphere();
        let original = mesh.clone();
        let applied = apply_modifiers(
            &mut mesh,
            &GeometryModifiers::default(),
            Seed::new(1),
            5,
            &CancellationToken::new(),
        )
        .expect("no cancel");
        assert!(applied.is_empty());
        assert_eq!(mesh, original);
    }

    #[test]
    fn test_pipeline_order() {
        let modifiers = GeometryModifiers {
            twisted: true,
            decayed: true,
            fractured: true,
            organic: true,
            smooth: true,
            ..GeometryModifiers::default()
        };
        let mut mesh = primitives::cuboid(Vec3::ONE, 2);
        let applied = apply_modifiers(&mut mesh, &modifiers, Seed::new(9), 5, &CancellationToken::new()).expect("run");
        assert_eq!(applied, vec!["twisted", "decayed", "fractured", "organic", "smooth"]);
    }

    #[test]
    fn test_twist_keeps_height_and_radius() {
        let mut mesh = primitives::cuboid(Vec3::ONE, 2);
        let original = mesh.clone();
        twist(&mut mesh);
        for (a, b) in mesh.positions.iter().zip(&original.positions) {
            assert!((a.y - b.y).abs() < 1e-6);
            let ra = (a.x * a.x + a.z * a.z).sqrt();
            let rb = (b.x * b.x + b.z * b.z).sqrt();
            assert!((ra - rb).abs() < 1e-5);
        }
        assert_ne!(mesh.positions, original.positions);
    }

    #[test]
    fn test_decay_only_shrinks() {
        let mut mesh = sphere();
        decay(&mut mesh, &SimplexNoise::new(Seed::new(3)), 10);
        for p in &mesh.positions {
            let r = p.length();
            assert!(r <= 0.5 + 1e-5 && r >= 0.5 * 0.7 - 1e-5, "radius {r} out of decay range");
        }
    }

    #[test]
    fn test_decay_visible_without_horror() {
        let mut mesh = sphere();
        let original = mesh.clone();
        decay(&mut mesh, &SimplexNoise::new(Seed::new(3)), 0);
        assert_ne!(mesh.positions, original.positions);
    }

    #[test]
    fn test_fracture_only_grows() {
        let mut mesh = sphere();
        fracture(&mut mesh, &SimplexNoise::new(Seed::new(4)));
        for p in &mesh.positions {
            assert!(p.length() >= 0.5 - 1e-5);
        }
    }

    #[test]
    fn test_radial_power_preserves_extremes() {
        let mut mesh = primitives::cuboid(Vec3::ONE, 3);
        let before = mesh.max_radius();
        radial_power(&mut mesh, SHARP_EXPONENT);
        assert!((mesh.max_radius() - before).abs() < 1e-5);
    }

    #[test]
    fn test_cancel_between_passes() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let modifiers = GeometryModifiers {
            twisted: true,
            ..GeometryModifiers::default()
        };
        let result = apply_modifiers(&mut sphere(), &modifiers, Seed::new(1), 0, &cancel);
        assert!(result.is_err());
    }
}
