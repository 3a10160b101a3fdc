//! Index reconciler
//!
//! Upstream offsets drift (off-by-one, UTF-16 vs char counting, plain
//! arithmetic mistakes), but the anchor text the generator quoted is
//! reliable. When the two disagree the anchor wins: the range is moved
//! onto an occurrence of the anchor text.

use crate::config::{AnchorSearch, ReconcilerConfig};
use crate::text::IndexedText;
use crate::types::{Annotation, CharRange, Diagnostic};

/// Corrects annotation offsets against their anchor text
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcilerConfig,
}

impl Reconciler {
    /// Create a reconciler
    pub fn new(config: ReconcilerConfig) -> Self {
        Self { config }
    }

    /// Reconcile every annotation independently.
    ///
    /// Returns corrected copies in input order. Afterwards every range
    /// satisfies `start <= end <= text.len()`.
    pub fn reconcile(&self, text: &IndexedText<'_>, annotations: &[Annotation]) -> Vec<Annotation> {
        annotations
            .iter()
            .map(|annotation| self.reconcile_one(text, annotation))
            .collect()
    }

    /// Reconcile a single annotation
    pub fn reconcile_one(&self, text: &IndexedText<'_>, annotation: &Annotation) -> Annotation {
        let mut corrected = annotation.clone();

        if text.slice(annotation.range) == Some(annotation.anchor_text.as_str()) {
            return corrected;
        }

        match self.locate(text, annotation) {
            Some(start) => {
                let end = start + IndexedText::char_len(&annotation.anchor_text);
                corrected.range = CharRange::new(start, end);
                corrected.flag(Diagnostic::AnchorRelocated);
                tracing::trace!(
                    id = %annotation.id,
                    from = %annotation.range,
                    to = %corrected.range,
                    "relocated annotation onto anchor text"
                );
            }
            None => {
                corrected.flag(Diagnostic::UnresolvableAnchor);
                tracing::warn!(
                    id = %annotation.id,
                    range = %annotation.range,
                    "anchor text not found; keeping original range"
                );
            }
        }

        // Unresolved ranges and upstream garbage still have to be indexable
        let clamped = corrected.range.clamp_to(text.len());
        if clamped != corrected.range {
            tracing::debug!(
                id = %annotation.id,
                from = %corrected.range,
                to = %clamped,
                "clamped out-of-bounds range"
            );
            corrected.range = clamped;
            corrected.flag(Diagnostic::RangeRepaired);
        }

        corrected
    }

    fn locate(&self, text: &IndexedText<'_>, annotation: &Annotation) -> Option<usize> {
        let anchor = annotation.anchor_text.as_str();
        match self.config.anchor_search {
            AnchorSearch::Leftmost => text.find_from(anchor, 0),
            AnchorSearch::Nearest => {
                let origin = annotation.source_range.start;
                // Leftmost wins ties on distance
                text.find_all(anchor)
                    .into_iter()
                    .min_by_key(|&hit| hit.abs_diff(origin))
            }
        }
    }
}
