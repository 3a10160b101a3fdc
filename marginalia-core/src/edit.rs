//! Edit invalidation
//!
//! When the text is edited after analysis, annotations touching the edited
//! region no longer describe what they mark. They are dropped; annotations
//! entirely after the edit are shifted so they keep pointing at the same
//! words.

use crate::types::{Annotation, CharRange};

/// The char region that differs between two versions of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    /// First differing char offset (same in both versions)
    pub start: usize,
    /// End of the replaced region in the old text
    pub old_end: usize,
    /// End of the replacement in the new text
    pub new_end: usize,
}

impl TextChange {
    /// Diff two texts by common prefix and common suffix.
    ///
    /// Returns `None` when the texts are equal.
    pub fn between(old: &str, new: &str) -> Option<Self> {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();

        let start = old
            .iter()
            .zip(&new)
            .take_while(|(a, b)| a == b)
            .count();
        if start == old.len() && start == new.len() {
            return None;
        }

        // The suffix may not reach back into the shared prefix
        let max_suffix = old.len().min(new.len()) - start;
        let suffix = old[start..]
            .iter()
            .rev()
            .zip(new[start..].iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        Some(Self {
            start,
            old_end: old.len() - suffix,
            new_end: new.len() - suffix,
        })
    }

    /// Chars added (positive) or removed (negative) by the edit
    pub fn delta(&self) -> isize {
        self.new_end as isize - self.old_end as isize
    }

    /// Check whether an edit like this one invalidates `range`.
    ///
    /// A pure insertion strictly inside a range invalidates it; one at
    /// either edge does not.
    pub fn affects(&self, range: CharRange) -> bool {
        !(range.end <= self.start || range.start >= self.old_end)
    }

    /// Move a range that starts after the edit into the new text.
    ///
    /// Each endpoint moves on its own; a reversed `source_range` kept as
    /// received stays reversed.
    fn shift(&self, range: CharRange) -> CharRange {
        if range.start < self.old_end {
            return range;
        }
        CharRange::new(self.shift_offset(range.start), self.shift_offset(range.end))
    }

    fn shift_offset(&self, offset: usize) -> usize {
        if offset < self.old_end {
            return offset;
        }
        offset - self.old_end + self.new_end
    }
}

/// Annotations after an edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Annotations still valid, shifted into the new text
    pub annotations: Vec<Annotation>,
    /// Annotations invalidated by the edit
    pub dropped: Vec<Annotation>,
}

/// Keep the annotations an edit from `old` to `new` did not touch
pub fn retain_unaffected(old: &str, new: &str, annotations: &[Annotation]) -> EditOutcome {
    let Some(change) = TextChange::between(old, new) else {
        return EditOutcome {
            annotations: annotations.to_vec(),
            dropped: Vec::new(),
        };
    };

    let mut outcome = EditOutcome::default();
    for annotation in annotations {
        if change.affects(annotation.range) {
            outcome.dropped.push(annotation.clone());
            continue;
        }
        let mut kept = annotation.clone();
        kept.range = change.shift(annotation.range);
        kept.source_range = change.shift(annotation.source_range);
        outcome.annotations.push(kept);
    }

    if !outcome.dropped.is_empty() {
        tracing::debug!(
            dropped = outcome.dropped.len(),
            kept = outcome.annotations.len(),
            change_start = change.start,
            change_end = change.old_end,
            "edit invalidated annotations"
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change() {
        assert_eq!(TextChange::between("same", "same"), None);
        let annotations = vec![Annotation::new("a", "heart", 0..4, "same")];
        let outcome = retain_unaffected("same", "same", &annotations);
        assert_eq!(outcome.annotations, annotations);
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn test_replacement_region() {
        let change = TextChange::between("The cat sat.", "The dog sat.").unwrap();
        assert_eq!(change, TextChange { start: 4, old_end: 7, new_end: 7 });
        assert_eq!(change.delta(), 0);
    }

    #[test]
    fn test_insertion_and_deletion() {
        let inserted = TextChange::between("ab", "aXb").unwrap();
        assert_eq!(inserted, TextChange { start: 1, old_end: 1, new_end: 2 });

        let deleted = TextChange::between("aXXb", "ab").unwrap();
        assert_eq!(deleted, TextChange { start: 1, old_end: 3, new_end: 1 });
        assert_eq!(deleted.delta(), -2);
    }

    #[test]
    fn test_repeated_chars_do_not_overlap_prefix() {
        let change = TextChange::between("aaa", "aaaa").unwrap();
        assert_eq!(change, TextChange { start: 3, old_end: 3, new_end: 4 });
    }

    #[test]
    fn test_overlapping_annotations_dropped_later_shifted() {
        let old = "One fact. Two fact. Three.";
        let new = "One fact. Two big facts. Three.";
        let annotations = vec![
            Annotation::new("before", "heart", 0..9, "One fact."),
            Annotation::new("touched", "circle", 14..18, "fact"),
            Annotation::new("after", "heart", 20..26, "Three."),
        ];
        let outcome = retain_unaffected(old, new, &annotations);

        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].id.as_str(), "touched");

        let after = &outcome.annotations[1];
        assert_eq!(after.range, CharRange::new(25, 31));
        assert_eq!(&new[25..31], "Three.");
        assert_eq!(outcome.annotations[0].range, CharRange::new(0, 9));
    }

    #[test]
    fn test_insertion_inside_range_invalidates() {
        let annotations = vec![Annotation::new("a", "heart", 0..5, "hello")];
        let outcome = retain_unaffected("hello world", "helXlo world", &annotations);
        assert!(outcome.annotations.is_empty());
    }

    #[test]
    fn test_reversed_source_range_is_shifted_per_endpoint() {
        let old = "A cat sat. The dog ran.";
        let new = "A cat sat The dog ran.";
        let mut annotation = Annotation::new("r", "circle", 19..22, "ran");
        annotation.source_range = CharRange::new(20, 1);

        let outcome = retain_unaffected(old, new, &[annotation]);

        let kept = &outcome.annotations[0];
        assert_eq!(kept.range, CharRange::new(18, 21));
        assert_eq!(&new[18..21], "ran");
        assert_eq!(kept.source_range, CharRange::new(19, 1));
    }

    #[test]
    fn test_insertion_at_edges_keeps_range() {
        let annotations = vec![Annotation::new("a", "heart", 2..5, "llo")];
        let outcome = retain_unaffected("hello", "hello!", &annotations);
        assert_eq!(outcome.annotations[0].range, CharRange::new(2, 5));

        let outcome = retain_unaffected("hello", ">>hello", &annotations);
        assert_eq!(outcome.annotations[0].range, CharRange::new(4, 7));
    }
}
