//! # Animation Synthesizer
//!
//! Each preset is a handful of keyframe tracks written against bone names.
//! Tracks for bones the skeleton lacks are dropped, so one generator serves
//! every body plan. Rotations are euler radians, positions are deltas from
//! the rest pose.

use grimoire_shared::{AnimationClip, AnimationPreset, BlendMode, Keyframe, SkeletonConfig, Vec3};

use crate::skeleton::striking_bone;

/// Intensity ceiling.
pub const MAX_INTENSITY: f32 = 5.0;

/// Run amplitude relative to walk.
pub const RUN_INTENSITY_FACTOR: f32 = 1.5;

/// Keyframe times closer than this are merged into one key.
const TIME_EPSILON: f32 = 1e-6;

/// Which channel a track drives.
#[derive(Clone, Copy)]
enum Channel {
    Position,
    Rotation,
    Scale,
}

/// Keyframes for one clip, merged per bone and time.
struct ClipBuilder<'a> {
    skeleton: &'a SkeletonConfig,
    duration: f32,
    keyframes: Vec<Keyframe>,
}

impl<'a> ClipBuilder<'a> {
    fn new(skeleton: &'a SkeletonConfig, duration: f32) -> Self {
        Self {
            skeleton,
            duration,
            keyframes: Vec::new(),
        }
    }

    /// Adds `(fraction of duration, value)` samples for `bone`.
    fn track(&mut self, bone: &str, channel: Channel, samples: &[(f32, Vec3)]) {
        if !self.skeleton.contains(bone) {
            return;
        }
        for &(fraction, value) in samples {
            let time = (fraction * self.duration).clamp(0.0, self.duration);
            self.key(bone, time, channel, value);
        }
    }

    fn rotate(&mut self, bone: &str, samples: &[(f32, Vec3)]) {
        self.track(bone, Channel::Rotation, samples);
    }

    fn key(&mut self, bone: &str, time: f32, channel: Channel, value: Vec3) {
        let found = self
            .keyframes
            .iter()
            .position(|k| k.bone == bone && (k.time - time).abs() < TIME_EPSILON);
        let index = found.unwrap_or_else(|| {
            self.keyframes.push(Keyframe {
                time,
                bone: bone.to_owned(),
                position: None,
                rotation: None,
                scale: None,
            });
            self.keyframes.len() - 1
        });
        let key = &mut self.keyframes[index];
        match channel {
            Channel::Position => key.position = Some(value),
            Channel::Rotation => key.rotation = Some(value),
            Channel::Scale => key.scale = Some(value),
        }
    }

    /// Keyframes ordered by skeleton bone order, then time.
    fn finish(mut self) -> Vec<Keyframe> {
        let skeleton = self.skeleton;
        self.keyframes.sort_by(|a, b| {
            let ia = skeleton.index_of(&a.bone);
            let ib = skeleton.index_of(&b.bone);
            ia.cmp(&ib).then(a.time.total_cmp(&b.time))
        });
        self.keyframes
    }
}

fn rx(angle: f32) -> Vec3 {
    Vec3::new(angle, 0.0, 0.0)
}

fn ry(angle: f32) -> Vec3 {
    Vec3::new(0.0, angle, 0.0)
}

fn rz(angle: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, angle)
}

fn up(height: f32) -> Vec3 {
    Vec3::new(0.0, height, 0.0)
}

/// Three-key swing `a, -a, a` at start, middle and end.
fn swing(amplitude: f32, axis: fn(f32) -> Vec3) -> [(f32, Vec3); 3] {
    [(0.0, axis(amplitude)), (0.5, axis(-amplitude)), (1.0, axis(amplitude))]
}

/// Synthesizes one clip.
///
/// `duration` overrides the preset default when finite and positive.
/// `intensity` is clamped to `[0, MAX_INTENSITY]`; non-finite becomes 1.
#[must_use]
pub fn synthesize(
    preset: AnimationPreset,
    skeleton: &SkeletonConfig,
    intensity: f32,
    duration: Option<f32>,
) -> AnimationClip {
    let intensity = if intensity.is_finite() {
        intensity.clamp(0.0, MAX_INTENSITY)
    } else {
        1.0
    };
    let duration = duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or_else(|| preset.default_duration());

    let mut clip = ClipBuilder::new(skeleton, duration);
    match preset {
        AnimationPreset::Idle => idle(&mut clip, intensity),
        AnimationPreset::Walk => walk(&mut clip, intensity),
        AnimationPreset::Run => walk(&mut clip, intensity * RUN_INTENSITY_FACTOR),
        AnimationPreset::Jump => jump(&mut clip, intensity),
        AnimationPreset::Wave => wave(&mut clip, intensity),
        AnimationPreset::Dance => dance(&mut clip, intensity),
        AnimationPreset::Attack => attack(&mut clip, intensity),
    }

    let keyframes = clip.finish();
    tracing::debug!(
        "Synthesized {} clip: {:.2}s, {} keyframes",
        preset.as_str(),
        duration,
        keyframes.len()
    );
    AnimationClip {
        name: preset.as_str().to_owned(),
        preset: Some(preset),
        duration,
        looping: preset.looping(),
        keyframes,
        blend_mode: BlendMode::Override,
        blend_weight: 1.0,
    }
}

/// Synthesizes a clip per distinct preset, in first-seen order.
#[must_use]
pub fn synthesize_library(presets: &[AnimationPreset], skeleton: &SkeletonConfig, intensity: f32) -> Vec<AnimationClip> {
    let mut seen = Vec::with_capacity(presets.len());
    for &preset in presets {
        if !seen.contains(&preset) {
            seen.push(preset);
        }
    }
    seen.into_iter()
        .map(|preset| synthesize(preset, skeleton, intensity, None))
        .collect()
}

fn idle(clip: &mut ClipBuilder, i: f32) {
    clip.track(
        "spine",
        Channel::Scale,
        &[(0.0, Vec3::ONE), (0.5, Vec3::new(1.0, 1.0 + 0.03 * i, 1.0)), (1.0, Vec3::ONE)],
    );
    clip.rotate("head", &[(0.0, rx(0.0)), (0.5, rx(0.05 * i)), (1.0, rx(0.0))]);
    clip.rotate("tail_base", &swing(-0.15 * i, rz));
    clip.rotate("tail_mid", &swing(-0.25 * i, rz));
}

fn walk(clip: &mut ClipBuilder, i: f32) {
    // biped: legs in opposite phase, arms counter-swing at half amplitude
    clip.rotate("leg_upper_l", &swing(0.5 * i, rx));
    clip.rotate("leg_upper_r", &swing(-0.5 * i, rx));
    clip.rotate("arm_upper_l", &swing(-0.25 * i, rx));
    clip.rotate("arm_upper_r", &swing(0.25 * i, rx));

    // quadruped: diagonal pairs move together
    clip.rotate("leg_front_upper_l", &swing(0.4 * i, rx));
    clip.rotate("leg_front_upper_r", &swing(-0.4 * i, rx));
    clip.rotate("leg_back_upper_l", &swing(-0.4 * i, rx));
    clip.rotate("leg_back_upper_r", &swing(0.4 * i, rx));
    clip.rotate("tail_base", &swing(0.2 * i, ry));

    let bob = 0.05 * i;
    clip.track(
        "root",
        Channel::Position,
        &[(0.0, up(0.0)), (0.25, up(bob)), (0.5, up(0.0)), (0.75, up(bob)), (1.0, up(0.0))],
    );
}

fn jump(clip: &mut ClipBuilder, i: f32) {
    // authored against the 0.8 s default
    const TAKE_OFF: f32 = 0.3 / 0.8;
    const APEX: f32 = 0.5 / 0.8;

    clip.track(
        "root",
        Channel::Position,
        &[(0.0, up(-0.15 * i)), (TAKE_OFF, up(0.8 * i)), (APEX, up(0.4 * i)), (1.0, up(0.0))],
    );
    for bone in ["leg_upper_l", "leg_upper_r", "leg_front_upper_l", "leg_front_upper_r", "leg_back_upper_l", "leg_back_upper_r"] {
        clip.rotate(bone, &[(0.0, rx(0.0)), (TAKE_OFF, rx(-0.6 * i)), (1.0, rx(0.0))]);
    }
    for bone in ["leg_lower_l", "leg_lower_r", "leg_front_lower_l", "leg_front_lower_r", "leg_back_lower_l", "leg_back_lower_r"] {
        clip.rotate(bone, &[(0.0, rx(0.0)), (TAKE_OFF, rx(0.8 * i)), (1.0, rx(0.0))]);
    }
}

fn wave(clip: &mut ClipBuilder, i: f32) {
    // authored against the 2.0 s default
    const RAISED: f32 = 0.3 / 2.0;
    const LOWER_FROM: f32 = 1.0 - RAISED;
    const OSCILLATIONS: usize = 3;

    let (upper, lower) = if clip.skeleton.contains("arm_upper_r") {
        ("arm_upper_r", "arm_lower_r")
    } else {
        ("leg_front_upper_r", "leg_front_lower_r")
    };

    let raised = rz(-2.5 * i);
    clip.rotate(upper, &[(0.0, rz(0.0)), (RAISED, raised), (LOWER_FROM, raised), (1.0, rz(0.0))]);

    let mut samples = vec![(0.0, rz(0.0)), (RAISED, rz(0.0))];
    let steps = OSCILLATIONS * 2;
    let span = LOWER_FROM - RAISED;
    for step in 1..=steps {
        let sign = if step % 2 == 1 { 1.0 } else { -1.0 };
        let at = RAISED + span * step as f32 / (steps + 1) as f32;
        samples.push((at, rz(sign * 0.4 * i)));
    }
    samples.push((LOWER_FROM, rz(0.0)));
    samples.push((1.0, rz(0.0)));
    clip.rotate(lower, &samples);
}

fn dance(clip: &mut ClipBuilder, i: f32) {
    let quarters = |v: f32, axis: fn(f32) -> Vec3| {
        [(0.0, axis(0.0)), (0.25, axis(v)), (0.5, axis(0.0)), (0.75, axis(-v)), (1.0, axis(0.0))]
    };
    clip.rotate("spine", &quarters(0.3 * i, ry));
    // arms lift on the beat, the second layer sways them
    clip.rotate(
        "arm_upper_l",
        &[(0.0, rz(0.0)), (0.25, rz(0.6 * i)), (0.5, rz(0.2 * i)), (0.75, rz(0.6 * i)), (1.0, rz(0.0))],
    );
    clip.rotate(
        "arm_upper_r",
        &[(0.0, rz(0.0)), (0.25, rz(-0.6 * i)), (0.5, rz(-0.2 * i)), (0.75, rz(-0.6 * i)), (1.0, rz(0.0))],
    );
    clip.rotate("arm_lower_l", &quarters(0.3 * i, rz));
    clip.rotate("arm_lower_r", &quarters(-0.3 * i, rz));

    let bob = 0.08 * i;
    clip.track(
        "root",
        Channel::Position,
        &[(0.0, up(0.0)), (0.25, up(bob)), (0.5, up(0.0)), (0.75, up(bob)), (1.0, up(0.0))],
    );
}

fn attack(clip: &mut ClipBuilder, i: f32) {
    let Some(bone) = striking_bone(clip.skeleton).map(|b| b.name.clone()) else {
        return;
    };
    clip.rotate(&bone, &[(0.0, rx(-1.0 * i)), (1.0 / 3.0, rx(1.2 * i)), (1.0, rx(0.0))]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::SkeletonGenerator;
    use grimoire_shared::{CharacterFeatures, CharacterType};

    fn rig(character_type: CharacterType, has_tail: bool) -> SkeletonConfig {
        let features = CharacterFeatures {
            has_tail,
            ..CharacterFeatures::default()
        };
        SkeletonGenerator::new().generate(character_type, &features, 1.0)
    }

    fn assert_well_formed(clip: &AnimationClip, skeleton: &SkeletonConfig) {
        assert!(clip.duration > 0.0);
        let mut last: Option<(usize, f32)> = None;
        for key in &clip.keyframes {
            assert!((0.0..=clip.duration).contains(&key.time), "{} at {}", key.bone, key.time);
            let index = skeleton.index_of(&key.bone).expect("keyed bone exists");
            if let Some((prev_index, prev_time)) = last {
                assert!(prev_index < index || (prev_index == index && prev_time <= key.time));
            }
            last = Some((index, key.time));
        }
    }

    #[test]
    fn test_idle_with_tail() {
        let skel = rig(CharacterType::Creature, true);
        let clip = synthesize(AnimationPreset::Idle, &skel, 1.0, None);
        assert_eq!(clip.track("tail_base").count(), 3);
        assert_eq!(clip.track("tail_mid").count(), 3);
        let mid = clip.track("tail_mid").nth(1).expect("mid key");
        assert_eq!(mid.rotation, Some(rz(0.25)));
        assert_eq!(clip.duration, 3.0);
        assert!(clip.looping);
        assert_well_formed(&clip, &skel);
    }

    #[test]
    fn test_idle_without_tail_skips_tail_tracks() {
        let skel = rig(CharacterType::Creature, false);
        let clip = synthesize(AnimationPreset::Idle, &skel, 1.0, None);
        assert_eq!(clip.track("tail_base").count(), 0);
        assert_eq!(clip.track("spine").count(), 3);
    }

    #[test]
    fn test_every_preset_is_well_formed() {
        for character_type in [CharacterType::Humanoid, CharacterType::Creature, CharacterType::Object] {
            let skel = rig(character_type, true);
            for preset in AnimationPreset::ALL {
                let clip = synthesize(preset, &skel, 2.0, None);
                assert_eq!(clip.name, preset.as_str());
                assert_well_formed(&clip, &skel);
            }
        }
    }

    #[test]
    fn test_walk_legs_opposite_phase() {
        let skel = rig(CharacterType::Humanoid, false);
        let clip = synthesize(AnimationPreset::Walk, &skel, 1.0, None);
        let left: Vec<_> = clip.track("leg_upper_l").filter_map(|k| k.rotation).collect();
        let right: Vec<_> = clip.track("leg_upper_r").filter_map(|k| k.rotation).collect();
        assert_eq!(left.len(), 3);
        for (l, r) in left.iter().zip(&right) {
            assert_eq!(l.x, -r.x);
        }
        assert_eq!(clip.track("root").count(), 5);
    }

    #[test]
    fn test_run_is_faster_and_larger() {
        let skel = rig(CharacterType::Humanoid, false);
        let walk = synthesize(AnimationPreset::Walk, &skel, 1.0, None);
        let run = synthesize(AnimationPreset::Run, &skel, 1.0, None);
        assert!((run.duration - walk.duration * 0.6).abs() < 1e-6);
        let peak = |c: &AnimationClip| c.track("leg_upper_l").filter_map(|k| k.rotation).map(|r| r.x.abs()).fold(0.0, f32::max);
        assert!((peak(&run) - peak(&walk) * RUN_INTENSITY_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_jump_times_scale_with_duration() {
        let skel = rig(CharacterType::Humanoid, false);
        let clip = synthesize(AnimationPreset::Jump, &skel, 1.0, Some(1.6));
        let times: Vec<f32> = clip.track("root").map(|k| k.time).collect();
        assert_eq!(times.len(), 4);
        assert!((times[1] - 0.6).abs() < 1e-5);
        assert!((times[2] - 1.0).abs() < 1e-5);
        assert_eq!(times[3], 1.6);
        assert!(!clip.looping);
    }

    #[test]
    fn test_wave_on_creature_uses_front_leg() {
        let skel = rig(CharacterType::Creature, false);
        let clip = synthesize(AnimationPreset::Wave, &skel, 1.0, None);
        assert!(clip.track("leg_front_upper_r").count() > 0);
        assert_eq!(clip.track("leg_front_lower_r").count(), 10);
    }

    #[test]
    fn test_attack_strikes_preferred_bone() {
        let human = rig(CharacterType::Humanoid, false);
        let clip = synthesize(AnimationPreset::Attack, &human, 1.0, None);
        assert_eq!(clip.animated_bones().into_iter().collect::<Vec<_>>(), vec!["arm_upper_r"]);
        let object = rig(CharacterType::Object, false);
        assert!(synthesize(AnimationPreset::Attack, &object, 1.0, None).keyframes.is_empty());
    }

    #[test]
    fn test_bad_inputs_fall_back() {
        let skel = rig(CharacterType::Humanoid, false);
        let clip = synthesize(AnimationPreset::Wave, &skel, f32::NAN, Some(-1.0));
        assert_eq!(clip.duration, AnimationPreset::Wave.default_duration());
        let loud = synthesize(AnimationPreset::Idle, &skel, 1e6, None);
        let capped = synthesize(AnimationPreset::Idle, &skel, MAX_INTENSITY, None);
        assert_eq!(loud, capped);
    }

    #[test]
    fn test_library_deduplicates() {
        let skel = rig(CharacterType::Humanoid, false);
        let presets = [AnimationPreset::Idle, AnimationPreset::Walk, AnimationPreset::Idle];
        let clips = synthesize_library(&presets, &skel, 1.0);
        let names: Vec<_> = clips.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["idle", "walk"]);
    }
}
