//! Annotation value types
//!
//! Annotations are plain values. Pipeline stages never mutate a caller's
//! annotation; they clone it and return the corrected copy.

use super::Category;
use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Half-open `[start, end)` range over the text, in char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CharRange {
    /// First covered char
    pub start: usize,
    /// One past the last covered char
    pub end: usize,
}

impl CharRange {
    /// Create a new range (not validated)
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of chars covered; zero for empty or reversed ranges
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check whether the range covers nothing
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open intersection test; empty ranges intersect nothing
    pub fn intersects(&self, other: &CharRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Check whether `offset` lies inside the range
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check whether the range is well-formed for a text of `len` chars
    pub fn is_valid_for(&self, len: usize) -> bool {
        self.start <= self.end && self.end <= len
    }

    /// Clamp both ends into `[0, len]` and put them in order
    pub fn clamp_to(&self, len: usize) -> CharRange {
        let a = self.start.min(len);
        let b = self.end.min(len);
        CharRange::new(a.min(b), a.max(b))
    }
}

impl From<core::ops::Range<usize>> for CharRange {
    fn from(range: core::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Opaque, stable annotation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh identifier that is never reused
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// How sure the upstream analysis was; affects rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Stated with certainty
    #[default]
    Certain,
    /// Hedged
    Uncertain,
}

/// Structured citation attached to an annotation. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalReference {
    /// Title of the cited source
    pub source_title: String,
    /// Locator of the cited source
    pub source_url: String,
    /// Context preceding the quoted passage
    pub quote_before: String,
    /// The quoted passage itself
    pub quote_highlighted: String,
    /// Context following the quoted passage
    pub quote_after: String,
    /// Commentary on the citation
    #[serde(alias = "claudeNote")]
    pub note: String,
}

/// Alternative phrasing for the marked span. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Replacement text
    pub text: String,
    /// Optional style label ("Hemingway-esque", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Variant {
    /// Create a variant without a style label
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }
}

/// Non-fatal conditions recorded while reconciling an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    /// Anchor text does not occur anywhere in the text
    UnresolvableAnchor,
    /// Range was out of bounds or reversed and has been clamped
    RangeRepaired,
    /// Range was moved onto an occurrence of the anchor text
    AnchorRelocated,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvableAnchor => write!(f, "unresolvable anchor"),
            Diagnostic::RangeRepaired => write!(f, "range repaired"),
            Diagnostic::AnchorRelocated => write!(f, "anchor relocated"),
        }
    }
}

/// A unit of feedback attached to a text range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Stable identifier
    pub id: AnnotationId,
    /// Tag governing boundary and overlap rules
    pub category: Category,
    /// Current range, rewritten by the pipeline stages
    pub range: CharRange,
    /// Range as received, kept for diagnostics. Offsets that cannot be
    /// represented (negative wire offsets) are clamped to 0 on ingestion and
    /// the annotation is flagged [`Diagnostic::RangeRepaired`].
    pub source_range: CharRange,
    /// Substring the upstream generator meant to mark
    pub anchor_text: String,
    /// Rendering hint
    #[serde(default)]
    pub confidence: Confidence,
    /// Free-form comment; may contain `**emphasis**`
    #[serde(default)]
    pub note: String,
    /// Optional citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<ExternalReference>,
    /// Optional alternative phrasings, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
    /// Conditions noticed by the reconciler
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub diagnostics: SmallVec<[Diagnostic; 2]>,
}

impl Annotation {
    /// Create an annotation; `source_range` starts equal to `range`
    pub fn new(
        id: impl Into<AnnotationId>,
        category: impl Into<Category>,
        range: impl Into<CharRange>,
        anchor_text: impl Into<String>,
    ) -> Self {
        let range = range.into();
        Self {
            id: id.into(),
            category: category.into(),
            range,
            source_range: range,
            anchor_text: anchor_text.into(),
            confidence: Confidence::default(),
            note: String::new(),
            external_reference: None,
            variants: Vec::new(),
            diagnostics: SmallVec::new(),
        }
    }

    /// Set the confidence
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Attach a citation
    pub fn with_reference(mut self, reference: ExternalReference) -> Self {
        self.external_reference = Some(reference);
        self
    }

    /// Attach alternative phrasings
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Check whether a diagnostic has been recorded
    pub fn has_diagnostic(&self, diagnostic: Diagnostic) -> bool {
        self.diagnostics.contains(&diagnostic)
    }

    /// Record a diagnostic once
    pub fn flag(&mut self, diagnostic: Diagnostic) {
        if !self.has_diagnostic(diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Ordering key shared by the resolver and the segment builder
    pub(crate) fn order_key(&self) -> (usize, u8) {
        (self.range.start, self.category.priority())
    }
}

impl From<String> for AnnotationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
