//! Input bundles: one text plus its annotations

use crate::error::CliError;
use anyhow::{Context, Result};
use marginalia_api::ingest::{annotations_from_value, parse_response};
use marginalia_api::{Annotation, AnnotationProcessor, Input, Output};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A JSON document carrying a text and either a wire-format annotation
/// list or the raw reply of the analysis service
#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    /// The annotated text
    pub text: String,
    /// `[...]` of wire annotations, or an object holding one
    #[serde(default)]
    pub annotations: Option<Value>,
    /// Raw analysis reply containing the annotation JSON
    #[serde(default)]
    pub response: Option<String>,
}

impl Bundle {
    /// Read and parse a bundle file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("In bundle {}", path.display()))
    }

    /// Parse a bundle from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| CliError::InvalidBundle(e.to_string()).into())
    }

    /// Extract the annotations the bundle carries
    pub fn annotations(&self) -> Result<Vec<Annotation>> {
        match (&self.annotations, &self.response) {
            (Some(value), None) => Ok(annotations_from_value(value.clone())?),
            (None, Some(reply)) => Ok(parse_response(reply)?),
            (Some(_), Some(_)) => Err(CliError::InvalidBundle(
                "set either `annotations` or `response`, not both".to_string(),
            )
            .into()),
            (None, None) => Err(CliError::InvalidBundle(
                "missing `annotations` or `response`".to_string(),
            )
            .into()),
        }
    }

    /// Run the bundle through `processor`
    pub fn render(self, processor: &AnnotationProcessor) -> Result<Output> {
        let annotations = self.annotations()?;
        Ok(processor.process(Input::from_text(self.text), &annotations)?)
    }
}
