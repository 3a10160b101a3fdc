//! Boundary normalizer
//!
//! Snaps each annotation to a linguistically sensible unit. Logic flags use
//! the precise policy (finish the words at each edge, nothing more); every
//! other category grows to its enclosing sentence. Both policies only walk
//! a bounded number of chars, so each call is linear in the configured
//! limits rather than in the text length.
//!
//! The heuristics are deliberately simple: a sentence starts after `.`, `!`
//! or `?` when the next non-space char is uppercase, or after a newline.

use crate::config::NormalizerConfig;
use crate::text::{is_terminator, is_word_char, IndexedText};
use crate::types::{Annotation, BoundaryPolicy, CharRange};

/// Expands or contracts annotation ranges to unit boundaries
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalize one annotation, returning a corrected copy
    pub fn normalize(&self, text: &IndexedText<'_>, annotation: &Annotation) -> Annotation {
        let mut normalized = annotation.clone();
        normalized.range = self.normalize_range(text, annotation.range, annotation.category.policy());
        if normalized.range != annotation.range {
            tracing::trace!(
                id = %annotation.id,
                from = %annotation.range,
                to = %normalized.range,
                "normalized boundaries"
            );
        }
        normalized
    }

    /// Apply `policy` to a bare range.
    ///
    /// The range is clamped first, so the result always satisfies
    /// `start <= end <= text.len()`. Zero-width ranges are returned as-is:
    /// they mark nothing and must not grow into a sentence.
    pub fn normalize_range(
        &self,
        text: &IndexedText<'_>,
        range: CharRange,
        policy: BoundaryPolicy,
    ) -> CharRange {
        let range = range.clamp_to(text.len());
        if range.is_empty() {
            return range;
        }
        match policy {
            BoundaryPolicy::Precise => self.precise(text, range),
            BoundaryPolicy::Sentence => self.sentence(text, range),
        }
    }

    fn precise(&self, text: &IndexedText<'_>, range: CharRange) -> CharRange {
        let limit = self.config.precise_word_limit;
        let CharRange { mut start, mut end } = range;

        if splits_word(text, start) {
            let mut steps = 0;
            while start > 0 && text.char_is(start - 1, is_word_char) && steps < limit {
                start -= 1;
                steps += 1;
            }
        }

        if splits_word(text, end) {
            end = finish_word(text, end, limit);
        }

        CharRange::new(start, end)
    }

    fn sentence(&self, text: &IndexedText<'_>, range: CharRange) -> CharRange {
        let start = self.sentence_start(text, range);
        let end = self.sentence_end(text, start, range.end);
        CharRange::new(start, end)
    }

    fn sentence_start(&self, text: &IndexedText<'_>, range: CharRange) -> usize {
        let mut start = range.start;
        let mut steps = 0;

        while start > 0 && steps < self.config.sentence_backward_limit {
            let prev = match text.char_at(start - 1) {
                Some(ch) => ch,
                None => break,
            };
            if prev == '\n' {
                break;
            }
            if is_terminator(prev) && opens_sentence(text, start) {
                break;
            }
            start -= 1;
            steps += 1;
        }

        // Never let the space skip cross the original end
        while start < range.end && text.char_is(start, |ch| ch == ' ') {
            start += 1;
        }
        start
    }

    fn sentence_end(&self, text: &IndexedText<'_>, start: usize, end: usize) -> usize {
        let mut end = end;

        if splits_word(text, end) {
            end = finish_word(text, end, self.config.word_completion_limit);
        }

        if closes_sentence(text, start, end) {
            return skip_spaces(text, end);
        }

        let mut steps = 0;
        while steps < self.config.sentence_forward_limit {
            let ch = match text.char_at(end) {
                Some(ch) => ch,
                None => break,
            };
            if ch == '\n' {
                break;
            }
            end += 1;
            if is_terminator(ch) {
                return skip_spaces(text, end);
            }
            steps += 1;
        }
        end
    }
}

/// Word chars on both sides of `offset`
fn splits_word(text: &IndexedText<'_>, offset: usize) -> bool {
    offset > 0 && text.char_is(offset - 1, is_word_char) && text.char_is(offset, is_word_char)
}

/// Walk `end` forward over word chars, at most `limit` of them
fn finish_word(text: &IndexedText<'_>, mut end: usize, limit: usize) -> usize {
    let mut steps = 0;
    while text.char_is(end, is_word_char) && steps < limit {
        end += 1;
        steps += 1;
    }
    end
}

/// Consume a run of spaces (not newlines) starting at `offset`
fn skip_spaces(text: &IndexedText<'_>, mut offset: usize) -> usize {
    while text.char_is(offset, |ch| ch == ' ') {
        offset += 1;
    }
    offset
}

/// The first non-space char at or after `offset` is uppercase
fn opens_sentence(text: &IndexedText<'_>, offset: usize) -> bool {
    text.char_is(skip_spaces(text, offset), char::is_uppercase)
}

/// The last non-space char of `[start, end)` is a terminator that ends a
/// sentence: what follows it is an uppercase char, a newline or the end of
/// the text. `e.g.` followed by lowercase does not count.
fn closes_sentence(text: &IndexedText<'_>, start: usize, end: usize) -> bool {
    let Some(last) = (start..end).rev().find(|&i| !text.char_is(i, |ch| ch == ' ')) else {
        return false;
    };
    if !text.char_is(last, is_terminator) {
        return false;
    }
    match text.char_at(skip_spaces(text, last + 1)) {
        None | Some('\n') => true,
        Some(ch) => ch.is_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn normalize(text: &str, category: &str, range: std::ops::Range<usize>) -> String {
        let indexed = IndexedText::new(text);
        let annotation = Annotation::new("a", category, range, "");
        let result = Normalizer::default().normalize(&indexed, &annotation);
        indexed.slice(result.range).unwrap().to_string()
    }

    #[test]
    fn test_precise_completes_right_word() {
        assert_eq!(normalize("born in 1992 in Rome", "logic-flag", 8..11), "1992");
    }

    #[test]
    fn test_precise_completes_left_word() {
        assert_eq!(normalize("born in 1992 in Rome", "logic-flag", 10..12), "1992");
    }

    #[test]
    fn test_precise_leaves_whole_words_alone() {
        assert_eq!(normalize("born in 1992 in Rome", "logic-flag", 8..12), "1992");
        assert_eq!(normalize("born in 1992 in Rome", "logic-flag", 5..15), "in 1992 in");
    }

    #[test]
    fn test_precise_walk_is_bounded() {
        let text = format!("x {} y", "a".repeat(40));
        let indexed = IndexedText::new(&text);
        let annotation = Annotation::new("a", Category::LogicFlag, 20..22, "");
        let result = Normalizer::default().normalize(&indexed, &annotation);
        assert_eq!(result.range, CharRange::new(10, 32));
    }

    #[test]
    fn test_precise_never_crosses_sentences() {
        assert_eq!(normalize("One. Two three. Four.", "circle", 9..14), "three");
    }

    #[test]
    fn test_sentence_expands_to_full_sentence() {
        let text = "Yes. She ran fast because she could.";
        assert_eq!(
            normalize(text, "validation", 9..17),
            "She ran fast because she could."
        );
    }

    #[test]
    fn test_sentence_consumes_trailing_spaces_but_not_newline() {
        let text = "First one here.  \nSecond";
        assert_eq!(normalize(text, "heart", 6..9), "First one here.  ");
    }

    #[test]
    fn test_sentence_stops_at_newline_both_ways() {
        let text = "Heading\nbody text without end\nNext";
        assert_eq!(normalize(text, "factual-flag", 13..17), "body text without end");
    }

    #[test]
    fn test_sentence_completes_cut_word_first() {
        let text = "We walked home. It was late";
        assert_eq!(normalize(text, "creative-flag", 19..21), "It was late");
    }

    #[test]
    fn test_sentence_already_closed_does_not_bleed() {
        let text = "Yes. She ran fast. Then stopped.";
        assert_eq!(normalize(text, "validation", 5..18), "She ran fast. ");
    }

    #[test]
    fn test_abbreviation_anchor_walks_to_sentence_end() {
        let text = "Use e.g. this one. Done.";
        assert_eq!(normalize(text, "heart", 4..8), "Use e.g. this one. ");
    }

    #[test]
    fn test_closed_sentence_at_end_of_text() {
        let text = "Hi. It works!";
        assert_eq!(normalize(text, "heart", 4..13), "It works!");
    }

    #[test]
    fn test_lowercase_after_period_keeps_walking() {
        let text = "Use e.g. this one. Done.";
        assert_eq!(normalize(text, "heart", 9..13), "Use e.g. this one. ");
    }

    #[test]
    fn test_sentence_walk_is_bounded() {
        let text = "a".repeat(500);
        let indexed = IndexedText::new(&text);
        let annotation = Annotation::new("a", "heart", 250..251, "");
        let result = Normalizer::default().normalize(&indexed, &annotation);
        assert!(result.range.start >= 50);
        assert!(result.range.end <= 500);
        assert!(result.range.is_valid_for(500));
    }

    #[test]
    fn test_zero_width_is_untouched() {
        let indexed = IndexedText::new("Yes. She ran.");
        let annotation = Annotation::new("a", "heart", 7..7, "");
        let result = Normalizer::default().normalize(&indexed, &annotation);
        assert_eq!(result.range, CharRange::new(7, 7));
    }

    #[test]
    fn test_custom_limits() {
        let normalizer = Normalizer::new(NormalizerConfig {
            sentence_backward_limit: 0,
            sentence_forward_limit: 0,
            word_completion_limit: 0,
            precise_word_limit: 0,
        });
        let indexed = IndexedText::new("Yes. She ran fast because she could.");
        let annotation = Annotation::new("a", "heart", 9..11, "");
        let result = normalizer.normalize(&indexed, &annotation);
        assert_eq!(result.range, CharRange::new(9, 11));
    }
}
