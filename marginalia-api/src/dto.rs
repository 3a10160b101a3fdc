//! Data Transfer Objects for API

use crate::error::{ApiError, Result};
use marginalia_core::{Annotation, PipelineReport, SegmentedText};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Input source for the text being annotated
#[derive(Serialize, Deserialize)]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[serde(skip)]
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// One annotation covering a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveringDTO {
    /// Index into [`Output::annotations`]
    pub annotation: usize,
    /// Annotation id
    pub id: String,
    /// Canonical category name
    pub category: String,
    /// The annotation ends in this segment and carries its marker here
    pub terminal: bool,
}

/// A run of text with one covering set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDTO {
    /// Char offset where the run starts
    pub start: usize,
    /// Char offset one past the run
    pub end: usize,
    /// The run's text
    pub text: String,
    /// Covering annotations, most important first
    pub covering: Vec<CoveringDTO>,
}

impl SegmentDTO {
    /// Check whether the run is unannotated
    pub fn is_plain(&self) -> bool {
        self.covering.is_empty()
    }
}

/// Processing metadata with run statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Text length in chars
    pub total_chars: usize,
    /// Annotations received
    pub annotations_in: usize,
    /// Annotations that survived the pipeline
    pub annotations_kept: usize,
    /// Annotations relocated onto their anchor text
    pub anchors_relocated: usize,
    /// Annotations whose anchor text was not found
    pub anchors_unresolved: usize,
    /// Annotations whose range was clamped
    pub ranges_repaired: usize,
    /// Validations dropped for overlap
    pub validations_dropped: usize,
    /// Segments produced
    pub segment_count: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Text length is above the warning threshold
    pub near_limit: bool,
}

impl Metadata {
    /// Build from a pipeline report
    pub fn from_report(total_chars: usize, report: &PipelineReport) -> Self {
        Self {
            total_chars,
            annotations_in: report.annotations_in,
            annotations_kept: report.kept,
            anchors_relocated: report.relocated,
            anchors_unresolved: report.unresolved,
            ranges_repaired: report.repaired,
            validations_dropped: report.validations_dropped,
            segment_count: report.segments,
            ..Default::default()
        }
    }
}

/// Complete output: annotations, segments and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Surviving annotations in `(start, priority)` order
    pub annotations: Vec<Annotation>,
    /// Segments in text order
    pub segments: Vec<SegmentDTO>,
    /// Processing metadata
    pub metadata: Metadata,
}

impl Output {
    /// Convert a pipeline result
    pub fn from_segmented(result: SegmentedText, metadata: Metadata) -> Self {
        let segments = result
            .segments
            .iter()
            .map(|segment| SegmentDTO {
                start: segment.range.start,
                end: segment.range.end,
                text: segment.text.clone(),
                covering: segment
                    .covering
                    .iter()
                    .filter_map(|c| {
                        let annotation = result.annotations.get(c.annotation)?;
                        Some(CoveringDTO {
                            annotation: c.annotation,
                            id: annotation.id.to_string(),
                            category: annotation.category.to_string(),
                            terminal: c.terminal,
                        })
                    })
                    .collect(),
            })
            .collect();

        Self {
            annotations: result.annotations,
            segments,
            metadata,
        }
    }

    /// Concatenate segment texts; equals the input text
    pub fn reconstruct(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Annotation referenced by a covering entry
    pub fn annotation(&self, covering: &CoveringDTO) -> Option<&Annotation> {
        self.annotations.get(covering.annotation)
    }
}
