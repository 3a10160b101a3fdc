//! Pipeline configuration
//!
//! Every walk the normalizer performs is bounded; the bounds live here
//! instead of being hard-coded so they can be tuned per deployment and
//! loaded from a TOML file.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Max chars the sentence policy walks backward
    pub const SENTENCE_BACKWARD_LIMIT: usize = 200;

    /// Max chars the sentence policy walks forward
    pub const SENTENCE_FORWARD_LIMIT: usize = 200;

    /// Max chars used to finish a word cut by the end boundary
    pub const WORD_COMPLETION_LIMIT: usize = 30;

    /// Max chars the precise policy moves either boundary
    pub const PRECISE_WORD_LIMIT: usize = 10;

    /// Upper bound accepted for any walk limit
    pub const MAX_WALK_LIMIT: usize = 10_000;
}

/// Where to look when an annotation's offsets disagree with its anchor text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorSearch {
    /// First occurrence in the text
    #[default]
    Leftmost,
    /// Occurrence closest to the annotation's original start
    Nearest,
}

/// Which annotations receive terminal-segment markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalMarking {
    /// Only validations
    #[default]
    Validation,
    /// Every annotation
    All,
}

/// Bounds for the boundary normalizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Max chars the sentence policy walks `start` backward
    pub sentence_backward_limit: usize,
    /// Max chars the sentence policy walks `end` forward
    pub sentence_forward_limit: usize,
    /// Max chars used to finish a word cut by `end` (sentence policy)
    pub word_completion_limit: usize,
    /// Max chars the precise policy moves each boundary
    pub precise_word_limit: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            sentence_backward_limit: defaults::SENTENCE_BACKWARD_LIMIT,
            sentence_forward_limit: defaults::SENTENCE_FORWARD_LIMIT,
            word_completion_limit: defaults::WORD_COMPLETION_LIMIT,
            precise_word_limit: defaults::PRECISE_WORD_LIMIT,
        }
    }
}

/// Reconciler options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Tie-break for anchors that occur more than once
    pub anchor_search: AnchorSearch,
}

/// Segment builder options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Which annotations get terminal markers
    pub mark_terminal: TerminalMarking,
}

/// Complete pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Index reconciler options
    pub reconciler: ReconcilerConfig,
    /// Boundary normalizer bounds
    pub normalizer: NormalizerConfig,
    /// Segment builder options
    pub segments: SegmentConfig,
}

impl PipelineConfig {
    /// Create a configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let limits = [
            (
                "sentence_backward_limit",
                self.normalizer.sentence_backward_limit,
            ),
            (
                "sentence_forward_limit",
                self.normalizer.sentence_forward_limit,
            ),
            ("word_completion_limit", self.normalizer.word_completion_limit),
            ("precise_word_limit", self.normalizer.precise_word_limit),
        ];

        for (name, value) in limits {
            if value > defaults::MAX_WALK_LIMIT {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "{name} must be at most {}, got {value}",
                        defaults::MAX_WALK_LIMIT
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Fluent builder for [`PipelineConfig`]
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Create a builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor tie-break
    pub fn anchor_search(mut self, search: AnchorSearch) -> Self {
        self.config.reconciler.anchor_search = search;
        self
    }

    /// Set the sentence policy walk limits
    pub fn sentence_limits(mut self, backward: usize, forward: usize) -> Self {
        self.config.normalizer.sentence_backward_limit = backward;
        self.config.normalizer.sentence_forward_limit = forward;
        self
    }

    /// Set the word completion limit used by the sentence policy
    pub fn word_completion_limit(mut self, limit: usize) -> Self {
        self.config.normalizer.word_completion_limit = limit;
        self
    }

    /// Set the precise policy limit
    pub fn precise_word_limit(mut self, limit: usize) -> Self {
        self.config.normalizer.precise_word_limit = limit;
        self
    }

    /// Choose which annotations get terminal markers
    pub fn mark_terminal(mut self, marking: TerminalMarking) -> Self {
        self.config.segments.mark_terminal = marking;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
