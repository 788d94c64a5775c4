//! # Templates
//!
//! Defaults the assemblers merge under whatever the prompt asked for:
//! an atmosphere per theme and a body per character type.

use grimoire_shared::{
    AtmosphereConfig, CharacterType, Color, LightingPreset, PhysicsParams, PostProcessing, Theme,
};

/// Atmosphere defaults for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTemplate {
    /// Lighting used when the prompt picked none.
    pub lighting: LightingPreset,
    /// Passes always enabled for the theme.
    pub post_processing: PostProcessing,
    /// Clear color used when the prompt picked none.
    pub background: Color,
}

/// Template for `theme`.
#[must_use]
pub const fn theme_template(theme: Theme) -> ThemeTemplate {
    let (lighting, post_processing, background) = match theme {
        Theme::Hybrid => (
            LightingPreset::Dramatic,
            PostProcessing {
                bloom: true,
                film_grain: false,
                vignette: true,
                chromatic_aberration: false,
                glitch: false,
            },
            0x10_1018,
        ),
        Theme::Editorial => (
            LightingPreset::Studio,
            PostProcessing {
                bloom: false,
                film_grain: false,
                vignette: false,
                chromatic_aberration: false,
                glitch: false,
            },
            0xF2_F0EB,
        ),
        Theme::Cinematic => (
            LightingPreset::Dramatic,
            PostProcessing {
                bloom: true,
                film_grain: true,
                vignette: true,
                chromatic_aberration: false,
                glitch: false,
            },
            0x05_070A,
        ),
        Theme::Horror => (
            LightingPreset::Eerie,
            PostProcessing {
                bloom: false,
                film_grain: true,
                vignette: true,
                chromatic_aberration: true,
                glitch: false,
            },
            0x05_0203,
        ),
        Theme::Abstract => (
            LightingPreset::Neon,
            PostProcessing {
                bloom: true,
                film_grain: false,
                vignette: false,
                chromatic_aberration: true,
                glitch: false,
            },
            0x0A_0014,
        ),
    };
    ThemeTemplate {
        lighting,
        post_processing,
        background: Color::from_hex(background),
    }
}

/// Merges the theme template under a parsed atmosphere.
///
/// Prompt choices win: lighting is only replaced while still neutral, the
/// background only while unset, and post passes are only ever added.
pub fn apply_theme_template(atmosphere: &mut AtmosphereConfig, theme: Theme) {
    let template = theme_template(theme);
    if atmosphere.lighting == LightingPreset::Neutral {
        atmosphere.lighting = template.lighting;
    }
    atmosphere.post_processing.merge(template.post_processing);
    atmosphere.background.get_or_insert(template.background);
}

/// Body defaults for a character type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTemplate {
    /// Standing height in meters at scale 1.
    pub height: f32,
    /// Mass per cubic meter of height.
    pub mass_density: f32,
    /// Coulomb friction.
    pub friction: f32,
    /// Bounciness.
    pub restitution: f32,
    /// Interaction trigger radius at scale 1.
    pub interaction_radius: f32,
}

impl CharacterTemplate {
    /// Physics for a body of the given height.
    #[must_use]
    pub fn physics(&self, height: f32) -> PhysicsParams {
        PhysicsParams {
            mass: self.mass_density * height.powi(3),
            friction: self.friction,
            restitution: self.restitution,
        }
    }
}

/// Template for `character_type`.
#[must_use]
pub const fn character_template(character_type: CharacterType) -> CharacterTemplate {
    match character_type {
        CharacterType::Humanoid => CharacterTemplate {
            height: 1.8,
            mass_density: 12.0,
            friction: 0.6,
            restitution: 0.05,
            interaction_radius: 2.0,
        },
        CharacterType::Creature => CharacterTemplate {
            height: 1.0,
            mass_density: 30.0,
            friction: 0.7,
            restitution: 0.1,
            interaction_radius: 1.5,
        },
        CharacterType::Object => CharacterTemplate {
            height: 1.0,
            mass_density: 50.0,
            friction: 0.8,
            restitution: 0.2,
            interaction_radius: 1.0,
        },
        CharacterType::Custom => CharacterTemplate {
            height: 1.5,
            mass_density: 15.0,
            friction: 0.6,
            restitution: 0.1,
            interaction_radius: 2.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lighting_survives() {
        let mut atmosphere = AtmosphereConfig {
            lighting: LightingPreset::Candlelight,
            ..AtmosphereConfig::default()
        };
        apply_theme_template(&mut atmosphere, Theme::Horror);
        assert_eq!(atmosphere.lighting, LightingPreset::Candlelight);
        assert!(atmosphere.post_processing.film_grain);
        assert_eq!(atmosphere.background, Some(Color::from_hex(0x05_0203)));
    }

    #[test]
    fn test_neutral_lighting_is_replaced() {
        let mut atmosphere = AtmosphereConfig::default();
        atmosphere.post_processing.glitch = true;
        apply_theme_template(&mut atmosphere, Theme::Abstract);
        assert_eq!(atmosphere.lighting, LightingPreset::Neon);
        assert!(atmosphere.post_processing.glitch, "prompt passes are kept");
        assert!(atmosphere.post_processing.bloom);
    }

    #[test]
    fn test_humanoid_mass() {
        let template = character_template(CharacterType::Humanoid);
        let mass = template.physics(template.height).mass;
        assert!((mass - 69.984).abs() < 1e-3);
    }

    #[test]
    fn test_every_type_has_positive_body() {
        for t in [CharacterType::Humanoid, CharacterType::Creature, CharacterType::Object, CharacterType::Custom] {
            let template = character_template(t);
            assert!(template.height > 0.0);
            assert!(template.physics(1.0).mass > 0.0);
        }
    }
}
