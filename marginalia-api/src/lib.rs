//! Public API for marginalia annotation rendering
//!
//! This crate wraps the core pipeline behind a small, stable interface:
//! text comes in through [`Input`], annotations come in either as values or
//! as the raw reply of the analysis service, and an [`Output`] of
//! serialisable segments plus run metadata comes back out.

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;
pub mod ingest;

use error::Result;
use marginalia_core::Pipeline;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{CoveringDTO, Input, Metadata, Output, SegmentDTO};
pub use error::ApiError;
pub use ingest::{parse_response, WireAnnotation};
pub use marginalia_core::{
    display_note, parse_note, retain_unaffected, Annotation, AnnotationId, Category, CharRange,
    Confidence, EditOutcome, NoteSpan, PipelineConfig,
};

/// Main entry point for annotation processing
#[derive(Debug, Clone, Default)]
pub struct AnnotationProcessor {
    pipeline: Pipeline,
    config: Config,
}

impl AnnotationProcessor {
    /// Create a processor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with a custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: Pipeline::new(config.pipeline.clone()),
            config,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process text with already-parsed annotations
    pub fn process(&self, input: Input, annotations: &[Annotation]) -> Result<Output> {
        let start = std::time::Instant::now();

        let text = input.read_text()?;
        let total_chars = self.check_limits(&text)?;

        let (result, report) = self.pipeline.run_with_report(&text, annotations);

        let mut metadata = Metadata::from_report(total_chars, &report);
        metadata.processing_time_ms = start.elapsed().as_millis() as u64;
        metadata.near_limit = total_chars > self.config.warn_chars;

        tracing::info!(
            chars = total_chars,
            annotations = report.annotations_in,
            kept = report.kept,
            segments = report.segments,
            "processed text"
        );
        Ok(Output::from_segmented(result, metadata))
    }

    /// Process text with the raw reply of the analysis service
    pub fn process_response(&self, input: Input, reply: &str) -> Result<Output> {
        let annotations = parse_response(reply)?;
        self.process(input, &annotations)
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str, annotations: &[Annotation]) -> Result<Output> {
        self.process(Input::from_text(text), annotations)
    }

    /// Enforce the input ceiling, returning the length in chars
    pub fn check_limits(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Err(ApiError::EmptyText);
        }

        let len = text.chars().count();
        if len > self.config.max_chars {
            return Err(ApiError::TextTooLong {
                len,
                max: self.config.max_chars,
            });
        }
        if len > self.config.warn_chars {
            tracing::warn!(
                len,
                max = self.config.max_chars,
                "text is close to the length limit"
            );
        }
        Ok(len)
    }
}

// Convenience functions

/// Process text with default configuration
pub fn process_text(text: &str, annotations: &[Annotation]) -> Result<Output> {
    AnnotationProcessor::new().process(Input::from_text(text), annotations)
}

/// Process text and an analysis reply with default configuration
pub fn process_response(text: &str, reply: &str) -> Result<Output> {
    AnnotationProcessor::new().process_response(Input::from_text(text), reply)
}

/// Process a file with default configuration
pub fn process_file<P: AsRef<std::path::Path>>(
    path: P,
    annotations: &[Annotation],
) -> Result<Output> {
    AnnotationProcessor::new().process(Input::from_file(path.as_ref().to_path_buf()), annotations)
}
