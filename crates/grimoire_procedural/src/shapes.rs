//! # Procedural Constructors
//!
//! Shapes that are grown rather than evaluated in closed form: the twisted
//! column, recursive organic branching, the gothic arch extrusion and the
//! recursive cube fractal. Every constructor yields a mesh that fits a unit
//! volume centered on the origin; the builder applies the scale afterwards.
//!
//! Recursive constructors poll a [`CancellationToken`] once per node and
//! report when a node ceiling cut growth short.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use grimoire_shared::{Vec2, Vec3};

use crate::cancel::CancellationToken;
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::primitives;
use crate::rng::SeededRng;

/// Full turns of the twisted column over its height.
pub const TWIST_TURNS: f32 = 2.0;

/// Length and thickness ratio between a branch and its parent.
pub const BRANCH_FALLOFF: f32 = 0.7;

/// Output of a recursive constructor.
#[derive(Debug, Clone)]
pub struct GrownMesh {
    /// Generated geometry.
    pub mesh: Mesh,
    /// Recursion nodes emitted.
    pub nodes: usize,
    /// True when a node ceiling stopped growth early.
    pub truncated: bool,
}

/// Lobed column with a helical twist of [`TWIST_TURNS`] turns.
#[must_use]
pub fn twisted_column(radial_segments: u32, height_segments: u32) -> Mesh {
    let mut mesh = primitives::cylinder(0.35, 0.35, 1.0, radial_segments.max(8), height_segments.max(24));
    for p in &mut mesh.positions {
        let theta = p.x.atan2(p.z);
        // four lobes peaking at 1.3x the base radius
        let lobe = 1.0 + 0.15 * (1.0 + (4.0 * theta).cos());
        let lobed = Vec3::new(p.x * lobe, p.y, p.z * lobe);
        let angle = (p.y + 0.5) * TWIST_TURNS * TAU;
        *p = lobed.rotate_y(angle);
    }
    mesh.compute_normals();
    mesh
}

/// Tuning for [`organic`].
#[derive(Debug, Clone, Copy)]
pub struct OrganicParams {
    /// Branching levels below the trunk.
    pub depth: u32,
    /// Ceiling on emitted branch segments, trunk included.
    pub max_nodes: usize,
    /// Radial resolution of each segment.
    pub radial_segments: u32,
}

struct Branch {
    start: Vec3,
    direction: Vec3,
    length: f32,
    radius: f32,
    level: u32,
}

/// Trunk plus recursive branches.
///
/// Each level spawns 2–3 children whose pitch and yaw come from `rng`;
/// children are [`BRANCH_FALLOFF`] times the length and thickness of their
/// parent. Growth is breadth-first so a node ceiling trims the finest level.
///
/// # Errors
///
/// [`GeometryError::Cancelled`](crate::GeometryError::Cancelled) when
/// `cancel` fires mid-growth.
pub fn organic(params: &OrganicParams, rng: &mut SeededRng, cancel: &CancellationToken) -> GeometryResult<GrownMesh> {
    let radial = params.radial_segments.clamp(5, 12);
    let mut mesh = Mesh::new();
    let mut nodes = 0usize;
    let mut truncated = false;

    let mut queue = VecDeque::new();
    queue.push_back(Branch {
        start: Vec3::ZERO,
        direction: Vec3::Y,
        length: 0.4,
        radius: 0.06,
        level: 0,
    });

    while let Some(branch) = queue.pop_front() {
        cancel.check()?;
        if nodes >= params.max_nodes.max(1) {
            truncated = true;
            break;
        }
        nodes += 1;

        let (a, b) = basis(branch.direction);
        let mut segment = primitives::cylinder(
            branch.radius * BRANCH_FALLOFF,
            branch.radius,
            branch.length,
            radial,
            1,
        );
        orient(&mut segment, branch.start, a, branch.direction, b, branch.length);
        mesh.merge(&segment);

        let end = branch.start + branch.direction * branch.length;
        if branch.level >= params.depth {
            let mut bulb = primitives::sphere(branch.radius * 1.4, radial, radial.max(6) / 2 + 1);
            bulb.translate(end);
            mesh.merge(&bulb);
            continue;
        }

        let children = rng.count(2, 3);
        for _ in 0..children {
            let pitch = rng.range(0.35, 0.9);
            let yaw = rng.range(0.0, TAU);
            let side = a * yaw.cos() + b * yaw.sin();
            let direction = (branch.direction * pitch.cos() + side * pitch.sin()).normalize_or_zero();
            queue.push_back(Branch {
                start: end,
                direction,
                length: branch.length * BRANCH_FALLOFF,
                radius: branch.radius * BRANCH_FALLOFF,
                level: branch.level + 1,
            });
        }
    }

    fit_unit(&mut mesh);
    mesh.compute_normals();
    Ok(GrownMesh { mesh, nodes, truncated })
}

/// Orthonormal `(a, b)` completing `d` to a right-handed frame `(a, d, b)`.
fn basis(d: Vec3) -> (Vec3, Vec3) {
    let helper = if d.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
    let a = d.cross(helper).normalize_or_zero();
    let b = a.cross(d);
    (a, b)
}

/// Maps a Y-aligned segment centered on the origin onto `start + t·d`.
fn orient(mesh: &mut Mesh, start: Vec3, a: Vec3, d: Vec3, b: Vec3, length: f32) {
    for p in &mut mesh.positions {
        let y = p.y + length * 0.5;
        *p = start + a * p.x + d * y + b * p.z;
    }
}

/// Recenters and uniformly rescales so the largest extent is 1.
fn fit_unit(mesh: &mut Mesh) {
    let Some(bounds) = mesh.bounds() else {
        return;
    };
    let extent = bounds.size().max_element();
    if extent <= f32::EPSILON {
        return;
    }
    mesh.translate(-bounds.center());
    mesh.scale(Vec3::splat(1.0 / extent));
}

const ARCH_DEPTH: f32 = 0.4;
const ARCH_BEVEL: f32 = 0.04;

/// Gothic pointed arch, beveled and extruded along Z.
#[must_use]
pub fn gothic_extrusion(radial_segments: u32) -> Mesh {
    let profile = arch_profile((radial_segments / 2).max(4));
    let centroid = profile.iter().fold(Vec2::ZERO, |acc, p| Vec2::new(acc.x + p.x, acc.y + p.y));
    let centroid = Vec2::new(centroid.x / profile.len() as f32, centroid.y / profile.len() as f32);
    let inset = |p: Vec2| {
        Vec2::new(
            centroid.x + (p.x - centroid.x) * (1.0 - ARCH_BEVEL * 2.0),
            centroid.y + (p.y - centroid.y) * (1.0 - ARCH_BEVEL * 2.0),
        )
    };
    let rings: [(f32, bool); 4] = [
        (-ARCH_DEPTH * 0.5, true),
        (-ARCH_DEPTH * 0.5 + ARCH_BEVEL, false),
        (ARCH_DEPTH * 0.5 - ARCH_BEVEL, false),
        (ARCH_DEPTH * 0.5, true),
    ];

    let n = profile.len() as u32;
    let mut mesh = Mesh::new();
    for (ring, &(z, beveled)) in rings.iter().enumerate() {
        for (i, &p) in profile.iter().enumerate() {
            let q = if beveled { inset(p) } else { p };
            let uv = Vec2::new(i as f32 / n as f32, ring as f32 / 3.0);
            mesh.push_vertex(Vec3::new(q.x, q.y, z), Vec3::ZERO, uv);
        }
    }
    for ring in 0..3u32 {
        for i in 0..n {
            let j = (i + 1) % n;
            let a = ring * n + i;
            let b = ring * n + j;
            let c = (ring + 1) * n + j;
            let d = (ring + 1) * n + i;
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(a, c, d);
        }
    }

    // Caps use their own vertices so the bevel edge stays crisp.
    for (z, front) in [(ARCH_DEPTH * 0.5, true), (-ARCH_DEPTH * 0.5, false)] {
        let normal = if front { Vec3::Z } else { -Vec3::Z };
        let center = mesh.push_vertex(Vec3::new(centroid.x, centroid.y, z), normal, Vec2::new(0.5, 0.5));
        let first = mesh.vertex_count() as u32;
        for p in &profile {
            let q = inset(*p);
            mesh.push_vertex(Vec3::new(q.x, q.y, z), normal, Vec2::new(q.x + 0.5, q.y + 0.5));
        }
        for i in 0..n {
            let here = first + i;
            let next = first + (i + 1) % n;
            if front {
                mesh.push_triangle(center, here, next);
            } else {
                mesh.push_triangle(center, next, here);
            }
        }
    }

    fit_unit(&mut mesh);
    mesh.compute_normals();
    mesh
}

/// Counter-clockwise outline: straight jambs below an equilateral arch.
fn arch_profile(arc_steps: u32) -> Vec<Vec2> {
    let mut points = vec![Vec2::new(-0.5, -0.5), Vec2::new(0.5, -0.5)];
    let sixth = TAU / 6.0;
    // right arc is centered on the left springing point and vice versa
    for step in 0..=arc_steps {
        let angle = sixth * step as f32 / arc_steps as f32;
        points.push(Vec2::new(-0.5 + angle.cos(), angle.sin()));
    }
    for step in 1..arc_steps {
        let angle = sixth * 2.0 + sixth * step as f32 / arc_steps as f32;
        points.push(Vec2::new(0.5 + angle.cos(), angle.sin()));
    }
    points.push(Vec2::new(-0.5, 0.0));
    points
}

/// Sierpinski-style pyramid of cubes.
///
/// Every level replaces a cube with five half-size cubes: one on top and
/// four at the lower corners.
///
/// # Errors
///
/// [`GeometryError::Cancelled`](crate::GeometryError::Cancelled) when
/// `cancel` fires mid-recursion.
pub fn fractal(depth: u32, cancel: &CancellationToken) -> GeometryResult<GrownMesh> {
    let mut mesh = Mesh::new();
    let mut nodes = 0usize;
    let mut stack = vec![(Vec3::ZERO, 1.0_f32, 0u32)];

    while let Some((center, size, level)) = stack.pop() {
        cancel.check()?;
        nodes += 1;
        if level >= depth {
            let mut cube = primitives::cuboid(Vec3::splat(size), 1);
            cube.translate(center);
            mesh.merge(&cube);
            continue;
        }
        let q = size * 0.25;
        let child = size * 0.5;
        stack.push((center + Vec3::new(0.0, q, 0.0), child, level + 1));
        for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            stack.push((center + Vec3::new(sx * q, -q, sz * q), child, level + 1));
        }
    }

    fit_unit(&mut mesh);
    mesh.compute_normals();
    Ok(GrownMesh {
        mesh,
        nodes,
        truncated: false,
    })
}
