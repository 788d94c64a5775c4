//! Mesh quality tiers.
//!
//! Each tier is a fixed vertex and texture budget. Renderers pick their
//! level-of-detail from it; the character assembler sizes its proxy mesh
//! with it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseEnumError;

/// Vertex/texture budget tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// 5k vertices, 512px textures
    Low,
    /// 15k vertices, 1024px textures
    #[default]
    Medium,
    /// 40k vertices, 2048px textures
    High,
    /// 100k vertices, 4096px textures
    Ultra,
}

impl QualityTier {
    /// Every tier, cheapest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Ultra];

    /// Vertex budget.
    #[inline]
    #[must_use]
    pub const fn vertex_count(self) -> u32 {
        match self {
            Self::Low => 5_000,
            Self::Medium => 15_000,
            Self::High => 40_000,
            Self::Ultra => 100_000,
        }
    }

    /// Texture edge length in pixels.
    #[inline]
    #[must_use]
    pub const fn texture_size(self) -> u32 {
        match self {
            Self::Low => 512,
            Self::Medium => 1024,
            Self::High => 2048,
            Self::Ultra => 4096,
        }
    }

    /// Radial segment count for procedural primitives at this tier.
    #[inline]
    #[must_use]
    pub const fn radial_segments(self) -> u32 {
        match self {
            Self::Low => 8,
            Self::Medium => 16,
            Self::High => 24,
            Self::Ultra => 32,
        }
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Ultra => "ultra",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "ultra" => Ok(Self::Ultra),
            _ => Err(ParseEnumError::new("quality tier", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budgets() {
        assert_eq!(QualityTier::Low.vertex_count(), 5_000);
        assert_eq!(QualityTier::Low.texture_size(), 512);
        assert_eq!(QualityTier::Medium.vertex_count(), 15_000);
        assert_eq!(QualityTier::High.texture_size(), 2048);
        assert_eq!(QualityTier::Ultra.vertex_count(), 100_000);
        assert_eq!(QualityTier::Ultra.texture_size(), 4096);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ULTRA".parse::<QualityTier>(), Ok(QualityTier::Ultra));
        assert_eq!(" low ".parse::<QualityTier>(), Ok(QualityTier::Low));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "cinematic".parse::<QualityTier>().unwrap_err();
        assert!(err.to_string().contains("cinematic"));
    }

    #[test]
    fn test_budgets_grow_with_tier() {
        for pair in QualityTier::ALL.windows(2) {
            assert!(pair[0].vertex_count() < pair[1].vertex_count());
            assert!(pair[0].texture_size() < pair[1].texture_size());
        }
    }
}
