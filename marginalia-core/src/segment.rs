//! Segment builder
//!
//! Cuts the text into maximal runs that share one covering-annotation set.
//! Instead of materializing a per-char membership list, the builder sweeps
//! over sorted open/close events: a cut can only happen where some
//! annotation starts or ends, so the work is `O((n + m) log m)` in the
//! number of annotations plus the number of produced segments.

use crate::config::{SegmentConfig, TerminalMarking};
use crate::text::IndexedText;
use crate::types::{Annotation, CharRange, Covering, Segment};
use smallvec::SmallVec;

/// Builds [`Segment`]s from resolved annotations
#[derive(Debug, Clone, Default)]
pub struct SegmentBuilder {
    config: SegmentConfig,
}

impl SegmentBuilder {
    /// Create a segment builder
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    /// Segment `text` under `annotations`.
    ///
    /// `Covering::annotation` indexes into `annotations`. Zero-width ranges
    /// contribute no coverage and never cause a cut. Out-of-bounds ranges
    /// are clamped. Empty text yields no segments; text with no effective
    /// annotation yields one plain segment.
    pub fn build(&self, text: &IndexedText<'_>, annotations: &[Annotation]) -> Vec<Segment> {
        let len = text.len();
        if len == 0 {
            return Vec::new();
        }

        let ranges: Vec<CharRange> = annotations.iter().map(|a| a.range.clamp_to(len)).collect();

        let mut opens = Vec::with_capacity(ranges.len());
        let mut closes = Vec::with_capacity(ranges.len());
        for (index, range) in ranges.iter().enumerate() {
            if range.is_empty() {
                continue;
            }
            opens.push((range.start, index));
            closes.push((range.end, index));
        }
        opens.sort_unstable();
        closes.sort_unstable();

        let mut cuts: Vec<usize> = opens
            .iter()
            .chain(&closes)
            .map(|&(at, _)| at)
            .chain([0, len])
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        let mut active: Vec<usize> = Vec::new();
        let (mut next_open, mut next_close) = (0, 0);
        let mut runs: Vec<(CharRange, Vec<usize>)> = Vec::with_capacity(cuts.len());

        for window in cuts.windows(2) {
            let (from, to) = (window[0], window[1]);

            while let Some(&(at, index)) = closes.get(next_close) {
                if at > from {
                    break;
                }
                if let Ok(pos) = active.binary_search(&index) {
                    active.remove(pos);
                }
                next_close += 1;
            }
            while let Some(&(at, index)) = opens.get(next_open) {
                if at > from {
                    break;
                }
                if let Err(pos) = active.binary_search(&index) {
                    active.insert(pos, index);
                }
                next_open += 1;
            }

            match runs.last_mut() {
                Some((range, set)) if *set == active => range.end = to,
                _ => runs.push((CharRange::new(from, to), active.clone())),
            }
        }

        let segments: Vec<Segment> = runs
            .into_iter()
            .map(|(range, set)| {
                let mut covering: SmallVec<[Covering; 4]> = set
                    .into_iter()
                    .map(|index| Covering {
                        annotation: index,
                        terminal: ranges[index].end == range.end
                            && self.marks(&annotations[index]),
                    })
                    .collect();
                covering.sort_by_key(|c| {
                    (
                        annotations[c.annotation].category.priority(),
                        ranges[c.annotation].start,
                        c.annotation,
                    )
                });

                Segment {
                    range,
                    text: text.slice(range).unwrap_or_default().to_string(),
                    covering,
                }
            })
            .collect();

        tracing::trace!(segments = segments.len(), "built segments");
        segments
    }

    fn marks(&self, annotation: &Annotation) -> bool {
        match self.config.mark_terminal {
            TerminalMarking::Validation => annotation.category.is_validation(),
            TerminalMarking::All => true,
        }
    }
}
