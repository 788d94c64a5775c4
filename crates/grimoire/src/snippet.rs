//! Renderer snippet generation.
//!
//! A human-readable recipe for instantiating a generated scene in a
//! renderer. Convenience output only: nothing parses it back.

use std::fmt::Write;

use grimoire_procedural::{AnimatedEffect, AnimatedMaterial, MaterialModel, Mesh, RenderableMaterial};
use grimoire_shared::{Color, SceneConfig};

/// Writes the snippet for a finished scene.
#[must_use]
pub fn render_snippet(
    scene: &SceneConfig,
    mesh: &Mesh,
    material: &RenderableMaterial,
    animated: Option<&AnimatedMaterial>,
) -> String {
    let mut out = String::new();
    // fmt::Write into a String cannot fail
    let _ = write_snippet(&mut out, scene, mesh, material, animated);
    out
}

fn write_snippet(
    out: &mut String,
    scene: &SceneConfig,
    mesh: &Mesh,
    material: &RenderableMaterial,
    animated: Option<&AnimatedMaterial>,
) -> std::fmt::Result {
    writeln!(out, "// {:?}", scene.prompt)?;
    writeln!(
        out,
        "// theme {} | horror {} | complexity {}",
        scene.theme.as_str(),
        scene.horror_level,
        scene.complexity
    )?;
    writeln!(
        out,
        "mesh = Mesh::from_buffer(vertices: {}, triangles: {})  // {}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        scene.base_shape.as_str()
    )?;

    let model = match material.model {
        MaterialModel::Standard => "StandardMaterial",
        MaterialModel::Physical => "PhysicalMaterial",
    };
    writeln!(out, "material = {model} {{")?;
    writeln!(out, "    color: {},", hex(material.color))?;
    writeln!(out, "    roughness: {:.2},", material.roughness)?;
    writeln!(out, "    metalness: {:.2},", material.metalness)?;
    if material.is_emissive() {
        writeln!(out, "    emissive: {},", hex(material.emissive))?;
        writeln!(out, "    emissive_intensity: {:.2},", material.emissive_intensity)?;
    }
    if material.transparent {
        writeln!(out, "    transparent: true,")?;
        writeln!(out, "    opacity: {:.2},", material.opacity)?;
    }
    if material.transmission > 0.0 {
        writeln!(out, "    transmission: {:.2},", material.transmission)?;
        writeln!(out, "    ior: {:.2},", material.ior)?;
        writeln!(out, "    thickness: {:.2},", material.thickness)?;
    }
    if material.clearcoat > 0.0 {
        writeln!(out, "    clearcoat: {:.2},", material.clearcoat)?;
    }
    if material.wireframe {
        writeln!(out, "    wireframe: true,")?;
    }
    writeln!(out, "}}")?;

    if let Some(animated) = animated {
        let params = match animated.effect {
            AnimatedEffect::Glow { power } => format!("power: {power:.2}"),
            AnimatedEffect::Pulse { speed } | AnimatedEffect::Glitch { speed } => format!("speed: {speed:.2}"),
            AnimatedEffect::Phase { speed, band_width } => format!("speed: {speed:.2}, band_width: {band_width:.2}"),
        };
        writeln!(out, "material.effect = {}({params})  // shade(clock, sample) per frame", animated.effect.as_str())?;
    }

    let s = scene.scale;
    writeln!(out, "object = Object {{ mesh, material, scale: ({:.2}, {:.2}, {:.2}) }}", s.x, s.y, s.z)?;
    if let Some(p) = scene.position {
        writeln!(out, "object.position = ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)?;
    }
    if let Some(r) = scene.rotation {
        writeln!(out, "object.rotation = ({:.2}, {:.2}, {:.2})", r.x, r.y, r.z)?;
    }
    for anim in &scene.animations {
        writeln!(
            out,
            "animate(object, {}, speed: {:.2}, amplitude: {:.2})",
            anim.kind.as_str(),
            anim.speed,
            anim.amplitude
        )?;
    }
    if let Some(spec) = &scene.modifiers.distortion {
        if spec.animate {
            writeln!(out, "rebuild_each_frame(object, distortion: {})", spec.kind.as_str())?;
        }
    }

    let atmosphere = &scene.atmosphere;
    writeln!(out, "lighting = {}", atmosphere.lighting.as_str())?;
    if let Some(background) = atmosphere.background {
        writeln!(out, "background = {}", hex(background))?;
    }
    if let Some(fog) = atmosphere.fog {
        writeln!(out, "fog = Fog({}, near: {:.1}, far: {:.1})", hex(fog.color), fog.near, fog.far)?;
    }
    if let Some(particles) = atmosphere.particles {
        writeln!(
            out,
            "particles = Particles({}, count: {}, color: {})",
            particles.kind.as_str(),
            particles.count,
            hex(particles.color)
        )?;
    }
    let post = &atmosphere.post_processing;
    let passes: Vec<&str> = [
        (post.bloom, "bloom"),
        (post.film_grain, "film_grain"),
        (post.vignette, "vignette"),
        (post.chromatic_aberration, "chromatic_aberration"),
        (post.glitch, "glitch"),
    ]
    .into_iter()
    .filter_map(|(on, name)| on.then_some(name))
    .collect();
    if !passes.is_empty() {
        writeln!(out, "post = [{}]", passes.join(", "))?;
    }
    Ok(())
}

fn hex(color: Color) -> String {
    format!("#{:06x}", color.to_hex())
}
