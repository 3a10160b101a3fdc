//! Four-stage annotation pipeline
//!
//! `reconcile -> normalize -> resolve -> segment`. Every stage takes its
//! input by reference or by value and hands back freshly built values, so
//! a run never mutates the caller's annotations and two runs never share
//! state.

use crate::config::PipelineConfig;
use crate::normalize::Normalizer;
use crate::reconcile::Reconciler;
use crate::resolve::OverlapResolver;
use crate::segment::SegmentBuilder;
use crate::text::IndexedText;
use crate::types::{Annotation, Diagnostic, SegmentedText};
use serde::{Deserialize, Serialize};

/// Counters collected during one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Annotations handed to the pipeline
    pub annotations_in: usize,
    /// Annotations moved onto their anchor text
    pub relocated: usize,
    /// Annotations whose anchor text was not found
    pub unresolved: usize,
    /// Annotations whose range had to be clamped or reordered
    pub repaired: usize,
    /// Validations dropped for overlapping an earlier one
    pub validations_dropped: usize,
    /// Annotations that survived
    pub kept: usize,
    /// Segments produced
    pub segments: usize,
}

/// Runs all stages with one configuration
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    reconciler: Reconciler,
    normalizer: Normalizer,
    resolver: OverlapResolver,
    builder: SegmentBuilder,
}

impl Pipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reconciler: Reconciler::new(config.reconciler),
            normalizer: Normalizer::new(config.normalizer),
            resolver: OverlapResolver::new(),
            builder: SegmentBuilder::new(config.segments),
        }
    }

    /// Run the pipeline
    pub fn run(&self, text: &str, annotations: &[Annotation]) -> SegmentedText {
        self.run_with_report(text, annotations).0
    }

    /// Run the pipeline and report what each stage did
    pub fn run_with_report(
        &self,
        text: &str,
        annotations: &[Annotation],
    ) -> (SegmentedText, PipelineReport) {
        let indexed = IndexedText::new(text);
        let mut report = PipelineReport {
            annotations_in: annotations.len(),
            ..Default::default()
        };

        let reconciled = self.reconciler.reconcile(&indexed, annotations);
        for annotation in &reconciled {
            if annotation.has_diagnostic(Diagnostic::AnchorRelocated) {
                report.relocated += 1;
            }
            if annotation.has_diagnostic(Diagnostic::UnresolvableAnchor) {
                report.unresolved += 1;
            }
            if annotation.has_diagnostic(Diagnostic::RangeRepaired) {
                report.repaired += 1;
            }
        }
        tracing::debug!(
            total = report.annotations_in,
            relocated = report.relocated,
            unresolved = report.unresolved,
            repaired = report.repaired,
            "reconciled annotations"
        );

        let normalized: Vec<Annotation> = reconciled
            .iter()
            .map(|annotation| self.normalizer.normalize(&indexed, annotation))
            .collect();

        let resolution = self.resolver.resolve_detailed(normalized);
        report.validations_dropped = resolution.dropped.len();
        report.kept = resolution.kept.len();
        tracing::debug!(
            kept = report.kept,
            dropped = report.validations_dropped,
            "resolved overlap"
        );

        let segments = self.builder.build(&indexed, &resolution.kept);
        report.segments = segments.len();
        tracing::debug!(segments = report.segments, chars = indexed.len(), "segmented text");

        (
            SegmentedText {
                annotations: resolution.kept,
                segments,
            },
            report,
        )
    }
}
