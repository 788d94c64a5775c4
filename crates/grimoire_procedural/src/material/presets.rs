//! Named material presets.

use grimoire_shared::{Color, Emissive, GlassParams, MaterialConfig};

/// Preset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLibrary {
    /// Spectral, decayed and otherwise unsettling surfaces.
    Horror,
    /// Print and magazine surfaces.
    Editorial,
}

impl PresetLibrary {
    /// Names in this library.
    #[must_use]
    pub const fn names(self) -> &'static [&'static str] {
        match self {
            Self::Horror => &["spectral", "decayed", "blood", "bone", "shadow", "cursed_metal", "ethereal"],
            Self::Editorial => &["newsprint", "ink", "highlighter", "paper", "glossy_magazine"],
        }
    }
}

/// Lower-cases and maps `-` and spaces to `_`.
#[must_use]
pub fn normalize_preset_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Looks up a preset in either library.
#[must_use]
pub fn preset(name: &str) -> Option<MaterialConfig> {
    let key = normalize_preset_name(name);
    let config = match key.as_str() {
        "spectral" => MaterialConfig {
            emissive: Some(glow(0xC8E6FF, 0.6)),
            opacity: Some(0.45),
            ..surface(0xC8E6FF, 0.2, 0.0)
        },
        "decayed" => surface(0x5B4A3A, 0.95, 0.05),
        "blood" => MaterialConfig {
            clearcoat: Some(0.8),
            ..surface(0x8A0303, 0.3, 0.1)
        },
        "bone" => surface(0xE3DAC9, 0.7, 0.0),
        "shadow" => MaterialConfig {
            opacity: Some(0.85),
            ..surface(0x0B0B12, 1.0, 0.0)
        },
        "cursed_metal" => MaterialConfig {
            emissive: Some(glow(0x4B0082, 0.3)),
            ..surface(0x3A3F47, 0.45, 0.95)
        },
        "ethereal" => MaterialConfig {
            emissive: Some(glow(0xE8F4FF, 0.8)),
            glass: Some(GlassParams::default()),
            opacity: Some(0.6),
            ..surface(0xE8F4FF, 0.1, 0.0)
        },
        "newsprint" => surface(0xEDE8DC, 0.95, 0.0),
        "ink" => surface(0x111111, 0.6, 0.0),
        "highlighter" => MaterialConfig {
            emissive: Some(glow(0xF5FF3B, 0.3)),
            ..surface(0xF5FF3B, 0.4, 0.0)
        },
        "paper" => surface(0xFAFAF5, 0.9, 0.0),
        "glossy_magazine" => MaterialConfig {
            clearcoat: Some(1.0),
            ..surface(0xFFFFFF, 0.15, 0.0)
        },
        _ => return None,
    };
    Some(MaterialConfig {
        preset: Some(key),
        ..config
    })
}

/// Looks up a preset, falling back to [`MaterialConfig::fallback`].
#[must_use]
pub fn preset_or_fallback(name: &str) -> MaterialConfig {
    preset(name).unwrap_or_else(|| {
        tracing::warn!("Unknown material preset {:?}, using fallback", name);
        MaterialConfig::fallback()
    })
}

fn surface(hex: u32, roughness: f32, metalness: f32) -> MaterialConfig {
    MaterialConfig::solid(Color::from_hex(hex), roughness, metalness)
}

const fn glow(hex: u32, intensity: f32) -> Emissive {
    Emissive {
        color: Color::from_hex(hex),
        intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        for library in [PresetLibrary::Horror, PresetLibrary::Editorial] {
            for name in library.names() {
                let config = preset(name).unwrap_or_else(|| panic!("{name} missing"));
                assert_eq!(config.preset.as_deref(), Some(*name));
            }
        }
    }

    #[test]
    fn test_name_normalization() {
        assert!(preset("Cursed-Metal").is_some());
        assert!(preset("glossy magazine").is_some());
        assert_eq!(normalize_preset_name(" Glossy-Magazine "), "glossy_magazine");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert!(preset("plutonium").is_none());
        let fallback = preset_or_fallback("plutonium");
        assert_eq!(fallback.color, Color::WHITE);
        assert_eq!(fallback.roughness, 0.5);
        assert_eq!(fallback.metalness, 0.5);
    }

    #[test]
    fn test_spectral_is_transparent() {
        let spectral = preset("spectral").expect("listed");
        assert!(spectral.is_transparent());
        assert!(spectral.emissive.is_some());
    }
}
