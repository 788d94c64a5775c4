//! Uniform outcome of a generation request.

use std::time::Duration;

use crate::error::{GenerationError, PipelineResult};

/// Outcome of one assembler call.
///
/// `config` is `Some` exactly when `success` is true; `error` is `Some`
/// exactly when it is false. Warnings are collected either way.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult<T> {
    /// Whether the pipeline produced a config.
    pub success: bool,
    /// The produced config.
    pub config: Option<T>,
    /// Failure description.
    pub error: Option<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
    /// Wall-clock time spent in the call.
    pub processing_time: Duration,
}

impl<T> GenerationResult<T> {
    /// Successful result.
    #[must_use]
    pub fn succeeded(config: T, warnings: Vec<String>, processing_time: Duration) -> Self {
        Self {
            success: true,
            config: Some(config),
            error: None,
            warnings,
            processing_time,
        }
    }

    /// Failed result.
    #[must_use]
    pub fn failed(error: &GenerationError, warnings: Vec<String>, processing_time: Duration) -> Self {
        Self {
            success: false,
            config: None,
            error: Some(error.to_string()),
            warnings,
            processing_time,
        }
    }

    /// Packages a stage outcome.
    #[must_use]
    pub fn from_outcome(outcome: PipelineResult<T>, warnings: Vec<String>, processing_time: Duration) -> Self {
        match outcome {
            Ok(config) => Self::succeeded(config, warnings, processing_time),
            Err(err) => Self::failed(&err, warnings, processing_time),
        }
    }

    /// Borrows the config when present.
    #[must_use]
    pub const fn config(&self) -> Option<&T> {
        self.config.as_ref()
    }

    /// Takes the config, discarding everything else.
    #[must_use]
    pub fn into_config(self) -> Option<T> {
        self.config
    }
}
