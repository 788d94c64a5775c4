//! # Parametric Primitives
//!
//! Closed-form generators for the simple base shapes. All primitives are
//! centered on the origin with Y up and outward-facing counter-clockwise
//! winding. Normals are filled in by [`Mesh::compute_normals`].

use std::f32::consts::{PI, TAU};

use grimoire_shared::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Axis-aligned box spanning `size`, each face split into `segments²` quads.
#[must_use]
pub fn cuboid(size: Vec3, segments: u32) -> Mesh {
    let seg = segments.max(1);
    // (normal, u, v) with u × v == normal
    let faces = [
        (Vec3::X, Vec3::new(0.0, 0.0, -1.0), Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::new(0.0, 0.0, -1.0)),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, -Vec3::X, Vec3::Y),
    ];

    let per_face = ((seg + 1) * (seg + 1)) as usize;
    let mut mesh = Mesh::with_capacity(per_face * 6, (seg * seg * 36) as usize);
    for (normal, u, v) in faces {
        let base = mesh.vertex_count() as u32;
        for t in 0..=seg {
            for s in 0..=seg {
                let fs = s as f32 / seg as f32;
                let ft = t as f32 / seg as f32;
                let unit = normal * 0.5 + u * (fs - 0.5) + v * (ft - 0.5);
                mesh.push_vertex(unit.mul_elements(size), normal, Vec2::new(fs, ft));
            }
        }
        let row = seg + 1;
        for t in 0..seg {
            for s in 0..seg {
                let a = base + t * row + s;
                let b = a + 1;
                let c = b + row;
                let d = a + row;
                mesh.push_triangle(a, b, c);
                mesh.push_triangle(a, c, d);
            }
        }
    }
    mesh.compute_normals();
    mesh
}

/// UV sphere.
#[must_use]
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = Mesh::with_capacity(((w + 1) * (h + 1)) as usize, (w * h * 6) as usize);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let p = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push_vertex(p, p.normalize_or_zero(), Vec2::new(u, 1.0 - v));
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != h - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh.compute_normals();
    mesh
}

/// Capped frustum along Y. A zero radius omits that cap.
#[must_use]
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32, height_segments: u32) -> Mesh {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height * 0.5;
    let mut mesh = Mesh::with_capacity(
        ((radial + 1) * (rows + 1) + 2 * (radial + 2)) as usize,
        (radial * rows * 6 + radial * 6) as usize,
    );

    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * TAU;
            let p = Vec3::new(radius * theta.sin(), half - v * height, radius * theta.cos());
            mesh.push_vertex(p, Vec3::ZERO, Vec2::new(u, 1.0 - v));
        }
    }

    let row = radial + 1;
    for y in 0..rows {
        for x in 0..radial {
            let a = y * row + x;
            let b = (y + 1) * row + x;
            let c = (y + 1) * row + x + 1;
            let d = y * row + x + 1;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    if radius_top > f32::EPSILON {
        push_cap(&mut mesh, radius_top, half, radial, true);
    }
    if radius_bottom > f32::EPSILON {
        push_cap(&mut mesh, radius_bottom, -half, radial, false);
    }
    mesh.compute_normals();
    mesh
}

fn push_cap(mesh: &mut Mesh, radius: f32, y: f32, radial: u32, top: bool) {
    let normal = if top { Vec3::Y } else { -Vec3::Y };
    let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::new(0.5, 0.5));
    let first = mesh.vertex_count() as u32;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        let (s, c) = theta.sin_cos();
        mesh.push_vertex(
            Vec3::new(radius * s, y, radius * c),
            normal,
            Vec2::new(0.5 + 0.5 * s, 0.5 + 0.5 * c),
        );
    }
    for x in 0..radial {
        let i = first + x;
        if top {
            mesh.push_triangle(center, i, i + 1);
        } else {
            mesh.push_triangle(center, i + 1, i);
        }
    }
}

/// Cone with its apex at +Y.
#[must_use]
pub fn cone(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> Mesh {
    cylinder(0.0, radius, height, radial_segments, height_segments)
}

/// Torus lying in the XY plane.
#[must_use]
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = Mesh::with_capacity(((radial + 1) * (tubular + 1)) as usize, (radial * tubular * 6) as usize);

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let v = j as f32 / radial as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            mesh.push_vertex(p, Vec3::ZERO, Vec2::new(i as f32 / tubular as f32, j as f32 / radial as f32));
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
    mesh.compute_normals();
    mesh
}

/// Glyph slab width as a fraction of the advance.
const GLYPH_WIDTH: f32 = 0.6;
/// Horizontal distance between glyph centers.
const GLYPH_ADVANCE: f32 = 0.75;
/// Slab depth.
const GLYPH_DEPTH: f32 = 0.2;

/// Row of slabs standing in for rendered text, one per character.
///
/// Whitespace leaves a gap. Slab height varies with the character code so
/// different strings produce different silhouettes. The row is centered on
/// the origin and normalized to a unit-height, unit-width block.
#[must_use]
pub fn text_plate(text: &str) -> Mesh {
    let chars: Vec<char> = text.chars().collect();
    let count = chars.len().max(1) as f32;
    let mut mesh = Mesh::new();
    for (i, ch) in chars.iter().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let height = 0.7 + (u32::from(*ch) % 5) as f32 * 0.075;
        let mut glyph = cuboid(Vec3::new(GLYPH_WIDTH, height, GLYPH_DEPTH), 1);
        let x = (i as f32 - (count - 1.0) * 0.5) * GLYPH_ADVANCE;
        glyph.translate(Vec3::new(x, 0.0, 0.0));
        mesh.merge(&glyph);
    }
    let width = (count - 1.0) * GLYPH_ADVANCE + GLYPH_WIDTH;
    mesh.scale(Vec3::new(1.0 / width, 1.0, 1.0));
    mesh
}
