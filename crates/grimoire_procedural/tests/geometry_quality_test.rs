//! # Geometry Quality Tests
//!
//! End-to-end checks over the builder: every shape and modifier combination
//! yields a finite, closed-enough mesh, and the same inputs always yield the
//! same bytes.

use grimoire_procedural::{
    BuildContext, BuildLimits, GeometryBuilder, GeometryError, GeometryRequest, MaterialComposer,
    Seed, SegmentCounts,
};
use grimoire_shared::{BaseShape, DistortionKind, DistortionSpec, QualityTier, Vec3};

fn all_distortions() -> [DistortionKind; 9] {
    [
        DistortionKind::Noise,
        DistortionKind::Twist,
        DistortionKind::Decay,
        DistortionKind::Erosion,
        DistortionKind::Stretch,
        DistortionKind::Melt,
        DistortionKind::Shatter,
        DistortionKind::Pulse,
        DistortionKind::Glitch,
    ]
}

/// Test: every shape survives every distortion at full horror.
#[test]
fn test_every_shape_with_every_distortion() {
    let builder = GeometryBuilder::default();
    let context = BuildContext::new(Seed::new(1234)).with_clock(0.4);

    for shape in BaseShape::ALL {
        for kind in all_distortions() {
            let mut request = GeometryRequest::new(shape);
            request.horror_level = 10;
            request.detail = 10;
            request.modifiers.decayed = true;
            request.modifiers.fractured = true;
            request.modifiers.distortion = Some(DistortionSpec::new(kind, 0.8, 99));

            let built = builder
                .build(&request, &context)
                .unwrap_or_else(|e| panic!("{} + {} failed: {e}", shape.as_str(), kind.as_str()));
            assert!(
                built.mesh.positions.iter().all(|p| p.is_finite()),
                "{} + {} produced non-finite vertices",
                shape.as_str(),
                kind.as_str()
            );
        }
    }
}

/// Test: identical request, seed and clock give identical vertex buffers.
#[test]
fn test_vertex_buffer_is_reproducible() {
    let mut request = GeometryRequest::new(BaseShape::Organic);
    request.detail = 7;
    request.modifiers.organic = true;
    request.modifiers.distortion = Some(DistortionSpec::new(DistortionKind::Shatter, 0.5, 7));

    let context = BuildContext::for_prompt("a writhing tree of tentacles");
    let first = GeometryBuilder::default().build(&request, &context).expect("build");
    let second = GeometryBuilder::default().build(&request, &context).expect("build");

    let first_buffer = first.mesh.to_vertex_buffer();
    let second_buffer = second.mesh.to_vertex_buffer();
    let a: &[u8] = bytemuck::cast_slice(&first_buffer);
    let b: &[u8] = bytemuck::cast_slice(&second_buffer);
    assert_eq!(a, b);
}

/// Test: different prompts grow different organic shapes.
#[test]
fn test_seed_changes_organic_growth() {
    let request = GeometryRequest::new(BaseShape::Organic);
    let builder = GeometryBuilder::default();
    let a = builder.build(&request, &BuildContext::for_prompt("coral")).expect("build");
    let b = builder.build(&request, &BuildContext::for_prompt("roots")).expect("build");
    assert_ne!(a.mesh.positions, b.mesh.positions);
}

/// Test: higher tiers tessellate more finely.
#[test]
fn test_quality_tier_controls_density() {
    let builder = GeometryBuilder::default();
    let context = BuildContext::default();
    let mut counts = Vec::new();
    for tier in QualityTier::ALL {
        let mut request = GeometryRequest::new(BaseShape::Sphere);
        request.segments = SegmentCounts::for_tier(tier);
        counts.push(builder.build(&request, &context).expect("build").mesh.vertex_count());
    }
    assert!(counts.windows(2).all(|w| w[0] < w[1]), "vertex counts {counts:?} should grow with tier");
}

/// Test: a tiny organic node ceiling truncates with a warning instead of failing.
#[test]
fn test_organic_ceiling_warns() {
    let limits = BuildLimits {
        max_organic_nodes: 5,
        ..BuildLimits::default()
    };
    let mut request = GeometryRequest::new(BaseShape::Organic);
    request.detail = 10;
    let built = GeometryBuilder::new(limits)
        .build(&request, &BuildContext::default())
        .expect("truncation is a warning");
    assert!(built.warnings.iter().any(|w| w.contains("node limit")));
}

/// Test: scale above the global maximum fails cleanly.
#[test]
fn test_oversized_scale_fails() {
    let mut request = GeometryRequest::new(BaseShape::Box);
    request.scale = Vec3::new(1.0, 1.0, 1001.0);
    let err = GeometryBuilder::default()
        .build(&request, &BuildContext::default())
        .unwrap_err();
    assert!(matches!(err, GeometryError::InvalidScale { axis: 'z', .. }));
    assert!(err.to_string().contains("z axis"));
}

/// Test: material composition accepts every listed preset.
#[test]
fn test_presets_compose() {
    let composer = MaterialComposer::new();
    for library in [
        grimoire_procedural::PresetLibrary::Horror,
        grimoire_procedural::PresetLibrary::Editorial,
    ] {
        for name in library.names() {
            let config = grimoire_procedural::material::preset_or_fallback(name);
            assert!(composer.compose(&config).is_ok(), "{name} should compose");
        }
    }
}
