//! # Generator Configuration
//!
//! Read once by the embedding application, usually from a `grimoire.toml`:
//!
//! ```toml
//! default_quality = "high"
//! feature_warning_threshold = 3
//!
//! [limits]
//! max_organic_depth = 5
//! max_vertices = 200000
//!
//! [segments]
//! radial = 24
//! height = 12
//! ```
//!
//! Every field is optional. Omitting `[segments]` lets tessellation follow
//! the quality tier of each request.

use std::path::Path;

use grimoire_procedural::{BuildLimits, SegmentCounts};
use grimoire_shared::QualityTier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is unusable.
    #[error("invalid config value {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Recursion and size ceilings for geometry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Deepest organic branching level.
    pub max_organic_depth: u32,
    /// Most organic branch segments.
    pub max_organic_nodes: usize,
    /// Deepest fractal subdivision.
    pub max_fractal_depth: u32,
    /// Most vertices in a finished mesh.
    pub max_vertices: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = BuildLimits::default();
        Self {
            max_organic_depth: limits.max_organic_depth,
            max_organic_nodes: limits.max_organic_nodes,
            max_fractal_depth: limits.max_fractal_depth,
            max_vertices: limits.max_vertices,
        }
    }
}

impl From<LimitsConfig> for BuildLimits {
    fn from(limits: LimitsConfig) -> Self {
        Self {
            max_organic_depth: limits.max_organic_depth,
            max_organic_nodes: limits.max_organic_nodes,
            max_fractal_depth: limits.max_fractal_depth,
            max_vertices: limits.max_vertices,
        }
    }
}

/// Fixed tessellation override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentsConfig {
    /// Segments around curved shapes.
    pub radial: u32,
    /// Segments along their height.
    pub height: u32,
}

impl From<SegmentsConfig> for SegmentCounts {
    fn from(segments: SegmentsConfig) -> Self {
        Self {
            radial: segments.radial,
            height: segments.height,
        }
    }
}

/// Pipeline-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Tier used when a request names none or an unknown one.
    pub default_quality: QualityTier,
    /// Geometry ceilings.
    pub limits: LimitsConfig,
    /// Tessellation override; `None` follows the request's tier.
    pub segments: Option<SegmentsConfig>,
    /// More special features than this earns a performance warning.
    pub feature_warning_threshold: usize,
    /// Threads for skinning one character.
    pub skinning_workers: usize,
    /// Threads for batch generation.
    pub batch_workers: usize,
    /// Animation intensity when a request names none.
    pub default_intensity: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_quality: QualityTier::Medium,
            limits: LimitsConfig::default(),
            segments: None,
            feature_warning_threshold: 3,
            skinning_workers: 2,
            batch_workers: 4,
            default_intensity: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Invalid`]
    /// for values that parse but cannot drive the pipeline.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// As [`from_toml_str`](Self::from_toml_str), plus [`ConfigError::Io`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks every value that the type system cannot.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.limits.max_vertices == 0 {
            return Err(invalid("limits.max_vertices", "must be positive"));
        }
        if let Some(segments) = self.segments {
            if segments.radial < 3 {
                return Err(invalid("segments.radial", format!("{} < 3", segments.radial)));
            }
            if segments.height == 0 {
                return Err(invalid("segments.height", "must be positive"));
            }
        }
        if self.skinning_workers == 0 {
            return Err(invalid("skinning_workers", "must be positive"));
        }
        if self.batch_workers == 0 {
            return Err(invalid("batch_workers", "must be positive"));
        }
        if !self.default_intensity.is_finite() || self.default_intensity < 0.0 {
            return Err(invalid("default_intensity", format!("{} is not a finite non-negative number", self.default_intensity)));
        }
        Ok(())
    }

    /// Tessellation for a build at `tier`.
    #[must_use]
    pub fn segments_for(&self, tier: QualityTier) -> SegmentCounts {
        self.segments.map_or_else(|| SegmentCounts::for_tier(tier), SegmentCounts::from)
    }

    /// Resolves a requested tier name, falling back to the default.
    ///
    /// Returns the tier and, for an unrecognized name, a warning to surface.
    #[must_use]
    pub fn resolve_quality(&self, requested: Option<&str>) -> (QualityTier, Option<String>) {
        match requested.map(str::parse::<QualityTier>) {
            None => (self.default_quality, None),
            Some(Ok(tier)) => (tier, None),
            Some(Err(err)) => {
                tracing::warn!("{}; using {}", err, self.default_quality);
                (self.default_quality, Some(format!("{err}; using {}", self.default_quality)))
            }
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = GeneratorConfig::from_toml_str("").expect("empty toml");
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.feature_warning_threshold, 3);
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            default_quality = "ultra"

            [limits]
            max_fractal_depth = 2
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.default_quality, QualityTier::Ultra);
        assert_eq!(config.limits.max_fractal_depth, 2);
        assert_eq!(config.limits.max_vertices, LimitsConfig::default().max_vertices);
        assert!(config.segments.is_none());
    }

    #[test]
    fn test_segments_override_tier() {
        let config = GeneratorConfig::from_toml_str("[segments]\nradial = 12\nheight = 3\n").expect("valid toml");
        let segments = config.segments_for(QualityTier::Ultra);
        assert_eq!((segments.radial, segments.height), (12, 3));
        let follow = GeneratorConfig::default().segments_for(QualityTier::Ultra);
        assert_eq!(follow, SegmentCounts::for_tier(QualityTier::Ultra));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GeneratorConfig::from_toml_str("batch_workers = 0"),
            Err(ConfigError::Invalid { field: "batch_workers", .. })
        ));
        assert!(matches!(
            GeneratorConfig::from_toml_str("[segments]\nradial = 2\nheight = 1\n"),
            Err(ConfigError::Invalid { field: "segments.radial", .. })
        ));
        assert!(matches!(
            GeneratorConfig::from_toml_str("default_quality = \"cinematic\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_quality_falls_back() {
        let config = GeneratorConfig {
            default_quality: QualityTier::High,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.resolve_quality(Some("LOW")), (QualityTier::Low, None));
        assert_eq!(config.resolve_quality(None), (QualityTier::High, None));
        let (tier, warning) = config.resolve_quality(Some("cinematic"));
        assert_eq!(tier, QualityTier::High);
        assert!(warning.expect("warning").contains("cinematic"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GeneratorConfig::load("/nonexistent/grimoire.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
