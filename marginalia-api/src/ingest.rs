//! Ingestion of upstream analysis replies
//!
//! The analysis service answers in prose that contains a JSON document,
//! either inside a ```` ```json ```` fence or inline. The document is an
//! object with an `annotations` array (a bare array is accepted too). Each
//! entry is converted independently: an entry that does not fit the wire
//! shape is skipped with a warning rather than failing the whole reply.

use crate::error::{ApiError, Result};
use marginalia_core::{
    Annotation, AnnotationId, CharRange, Confidence, Diagnostic, ExternalReference, Variant,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

static FENCE: OnceLock<Regex> = OnceLock::new();

fn fence() -> &'static Regex {
    FENCE.get_or_init(|| {
        Regex::new(r"```(?:json)?[ \t]*\r?\n([\s\S]*?)\r?\n?```").expect("fence pattern is valid")
    })
}

/// One annotation as the analysis service sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAnnotation {
    /// Upstream id, generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Category in wire vocabulary (`heart`, `circle`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Reported start offset; may be negative or wrong
    pub start_index: i64,
    /// Reported end offset; may be negative or wrong
    pub end_index: i64,
    /// Quoted text the annotation marks
    #[serde(default)]
    pub annotated_text: String,
    /// Free-form note
    #[serde(default)]
    pub comment: String,
    /// `certain` or `uncertain`
    #[serde(default)]
    pub certainty: Option<String>,
    /// Optional citation
    #[serde(default)]
    pub browser_reference: Option<ExternalReference>,
    /// Alternative phrasings
    #[serde(default)]
    pub alternatives: Vec<WireAlternative>,
}

/// An alternative phrasing, bare or with a style label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAlternative {
    /// Just the text
    Text(String),
    /// Text plus style label
    Styled {
        /// Replacement text
        text: String,
        /// Style label
        #[serde(default, alias = "alternativeStyle")]
        style: Option<String>,
    },
}

impl From<WireAlternative> for Variant {
    fn from(alternative: WireAlternative) -> Self {
        match alternative {
            WireAlternative::Text(text) => Variant::new(text),
            WireAlternative::Styled { text, style } => Variant { text, style },
        }
    }
}

impl WireAnnotation {
    /// Convert to a pipeline annotation
    pub fn into_annotation(self) -> Annotation {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => AnnotationId::new(id),
            _ => AnnotationId::generate(),
        };
        // Char offsets cannot be negative; the clamp is recorded below
        let clamped = self.start_index < 0 || self.end_index < 0;
        let start = self.start_index.max(0) as usize;
        let end = self.end_index.max(0) as usize;
        let confidence = match self.certainty.as_deref().map(str::trim) {
            Some(c) if c.eq_ignore_ascii_case("uncertain") => Confidence::Uncertain,
            _ => Confidence::Certain,
        };

        let mut annotation = Annotation::new(
            id,
            self.kind.as_str(),
            CharRange::new(start, end),
            self.annotated_text,
        )
        .with_note(self.comment)
        .with_confidence(confidence)
        .with_variants(self.alternatives.into_iter().map(Variant::from).collect());
        annotation.external_reference = self.browser_reference;
        if clamped {
            annotation.flag(Diagnostic::RangeRepaired);
        }
        annotation
    }
}

/// Locate the JSON document inside a reply
pub fn extract_json(reply: &str) -> Option<&str> {
    if let Some(body) = fence().captures(reply).and_then(|c| c.get(1)) {
        return Some(body.as_str());
    }

    let bounds = |open: char, close: char| match (reply.find(open), reply.rfind(close)) {
        (Some(start), Some(end)) if start < end => Some((start, end)),
        _ => None,
    };

    // Whichever container opens first is the document
    let (start, end) = match (bounds('{', '}'), bounds('[', ']')) {
        (Some(object), Some(array)) if array.0 < object.0 => array,
        (Some(object), _) => object,
        (None, Some(array)) => array,
        (None, None) => return None,
    };
    Some(&reply[start..=end])
}

/// Parse a full analysis reply into annotations
pub fn parse_response(reply: &str) -> Result<Vec<Annotation>> {
    let json = extract_json(reply)
        .ok_or_else(|| ApiError::Payload("no JSON document found in reply".to_string()))?;
    let value: Value = serde_json::from_str(json)?;
    annotations_from_value(value)
}

/// Convert an `{ "annotations": [...] }` object or a bare array
pub fn annotations_from_value(value: Value) -> Result<Vec<Annotation>> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("annotations") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ApiError::Payload(
                    "`annotations` is not an array".to_string(),
                ))
            }
            None => {
                return Err(ApiError::Payload(
                    "missing `annotations` field".to_string(),
                ))
            }
        },
        _ => {
            return Err(ApiError::Payload(
                "expected an object or an array".to_string(),
            ))
        }
    };

    let total = entries.len();
    let annotations: Vec<Annotation> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<WireAnnotation>(entry) {
            Ok(wire) => Some(wire.into_annotation()),
            Err(error) => {
                tracing::warn!(index, %error, "skipping malformed annotation");
                None
            }
        })
        .collect();

    tracing::debug!(total, parsed = annotations.len(), "ingested annotations");
    Ok(annotations)
}
