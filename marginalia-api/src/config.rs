//! High-level configuration API

use crate::error::{ApiError, Result};
use marginalia_core::PipelineConfig;
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Longest text accepted, in chars
    pub const MAX_CHARS: usize = 5_000;

    /// Length above which a warning is logged, in chars
    pub const WARN_CHARS: usize = 4_500;
}

/// High-level configuration for annotation processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest text accepted, in chars
    pub max_chars: usize,
    /// Length above which a warning is logged
    pub warn_chars: usize,
    /// Pipeline stage settings
    pub pipeline: PipelineConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_chars: defaults::MAX_CHARS,
            warn_chars: defaults::WARN_CHARS,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the size limits and the pipeline settings
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(ApiError::Config("max_chars must be positive".to_string()));
        }
        if self.warn_chars > self.max_chars {
            return Err(ApiError::Config(format!(
                "warn_chars ({}) must not exceed max_chars ({})",
                self.warn_chars, self.max_chars
            )));
        }
        self.pipeline.validate()?;
        Ok(())
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the input ceiling
    pub fn max_chars(mut self, max: usize) -> Self {
        self.config.max_chars = max;
        self
    }

    /// Set the warning threshold
    pub fn warn_chars(mut self, warn: usize) -> Self {
        self.config.warn_chars = warn;
        self
    }

    /// Use these pipeline settings
    pub fn pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.config.pipeline = pipeline;
        self
    }

    /// Load pipeline settings from a TOML file
    pub fn pipeline_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.config.pipeline = PipelineConfig::from_file(path)?;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
