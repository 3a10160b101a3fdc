//! Overlap resolver
//!
//! Validations mark one sentence's worth of authentic voice, so two of them
//! may never cover the same text. Flags are localized and may overlap each
//! other and sit inside a validated sentence freely.

use crate::types::Annotation;

/// Sort by `(start, category priority)`; stable, so input order breaks ties
pub fn sort_annotations(annotations: &mut [Annotation]) {
    annotations.sort_by_key(Annotation::order_key);
}

/// Outcome of a resolve pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Active annotations in `(start, priority)` order
    pub kept: Vec<Annotation>,
    /// Validations rejected for overlapping an earlier kept validation
    pub dropped: Vec<Annotation>,
}

/// Removes same-category overlap where the category disallows it
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapResolver;

impl OverlapResolver {
    /// Create a resolver
    pub fn new() -> Self {
        Self
    }

    /// Resolve overlap, returning only the active annotations
    pub fn resolve(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        self.resolve_detailed(annotations).kept
    }

    /// Resolve overlap, also reporting which validations were dropped
    pub fn resolve_detailed(&self, mut annotations: Vec<Annotation>) -> Resolution {
        sort_annotations(&mut annotations);

        let (validations, mut kept): (Vec<_>, Vec<_>) = annotations
            .into_iter()
            .partition(|a| a.category.is_validation());

        // Kept validations are disjoint and sorted by start, so a candidate
        // conflicts exactly when it starts before the furthest kept end
        let mut reach = 0;
        let mut dropped = Vec::new();

        for candidate in validations {
            let range = candidate.range;
            if !range.is_empty() && range.start < reach {
                tracing::debug!(
                    id = %candidate.id,
                    range = %range,
                    "dropping validation that overlaps a kept validation"
                );
                dropped.push(candidate);
            } else {
                reach = reach.max(range.end);
                kept.push(candidate);
            }
        }

        sort_annotations(&mut kept);
        Resolution { kept, dropped }
    }
}
