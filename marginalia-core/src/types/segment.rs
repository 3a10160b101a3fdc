//! Output of the segment builder

use super::{Annotation, AnnotationId, CharRange};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One annotation covering a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Covering {
    /// Index into [`SegmentedText::annotations`]
    pub annotation: usize,
    /// This segment is where the annotation ends
    pub terminal: bool,
}

/// A maximal run of text sharing one covering-annotation set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Char range of the run
    pub range: CharRange,
    /// The run's text
    pub text: String,
    /// Covering annotations, most important first
    pub covering: SmallVec<[Covering; 4]>,
}

impl Segment {
    /// Check whether no annotation covers this run
    pub fn is_plain(&self) -> bool {
        self.covering.is_empty()
    }

    /// Check whether the annotation at `index` ends in this run
    pub fn is_terminal_for(&self, index: usize) -> bool {
        self.covering
            .iter()
            .any(|c| c.annotation == index && c.terminal)
    }
}

/// Pipeline result: the surviving annotations and the segments over them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentedText {
    /// Reconciled, normalized, resolved annotations in `(start, priority)` order
    pub annotations: Vec<Annotation>,
    /// Segments in text order
    pub segments: Vec<Segment>,
}

impl SegmentedText {
    /// Iterate the annotations covering `segment` with their terminal flags
    pub fn covering<'a>(
        &'a self,
        segment: &'a Segment,
    ) -> impl Iterator<Item = (&'a Annotation, bool)> + 'a {
        segment
            .covering
            .iter()
            .filter_map(move |c| self.annotations.get(c.annotation).map(|a| (a, c.terminal)))
    }

    /// Annotations covering the char at `offset`, most important first
    pub fn covering_at(&self, offset: usize) -> Vec<&Annotation> {
        // Segments are sorted and contiguous, so binary search on the start
        let index = self
            .segments
            .partition_point(|segment| segment.range.end <= offset);
        match self.segments.get(index) {
            Some(segment) if segment.range.contains(offset) => {
                self.covering(segment).map(|(a, _)| a).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Segment carrying the terminal marker for annotation `id`
    pub fn terminal_segment(&self, id: &AnnotationId) -> Option<&Segment> {
        let index = self.annotations.iter().position(|a| &a.id == id)?;
        self.segments.iter().find(|s| s.is_terminal_for(index))
    }

    /// Look up an annotation by id
    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.id == id)
    }

    /// Concatenate all segment texts
    pub fn reconstruct(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}
