//! Char-indexed view over a text
//!
//! Annotation offsets count chars, while Rust strings are sliced by byte.
//! [`IndexedText`] records the byte position of every char once so that
//! char lookups and char-range slices are O(1) afterwards.

use crate::types::CharRange;

/// Sentence-ending punctuation
pub fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Chars that belong to a word
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Text plus a char -> byte offset table
#[derive(Debug, Clone)]
pub struct IndexedText<'a> {
    text: &'a str,
    /// Byte offset of each char, followed by `text.len()`
    offsets: Vec<usize>,
}

impl<'a> IndexedText<'a> {
    /// Index `text`
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    /// The underlying text
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Check whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Char at `index`, if any
    pub fn char_at(&self, index: usize) -> Option<char> {
        let start = *self.offsets.get(index)?;
        self.text[start..].chars().next()
    }

    /// Check whether the char at `index` satisfies `pred`
    pub fn char_is(&self, index: usize, pred: impl Fn(char) -> bool) -> bool {
        self.char_at(index).is_some_and(pred)
    }

    /// Byte offset of char `index`; clamps to the text end
    pub fn byte_offset(&self, index: usize) -> usize {
        self.offsets[index.min(self.len())]
    }

    /// Slice by char range; `None` when the range is reversed or out of bounds
    pub fn slice(&self, range: CharRange) -> Option<&'a str> {
        if !range.is_valid_for(self.len()) {
            return None;
        }
        Some(&self.text[self.offsets[range.start]..self.offsets[range.end]])
    }

    /// Char offset of the first occurrence of `needle` at or after char `from`
    pub fn find_from(&self, needle: &str, from: usize) -> Option<usize> {
        let from_byte = self.byte_offset(from);
        let byte = self.text[from_byte..].find(needle)? + from_byte;
        Some(self.char_index_of_byte(byte))
    }

    /// Char offsets of every occurrence of `needle`, overlapping included
    pub fn find_all(&self, needle: &str) -> Vec<usize> {
        if needle.is_empty() {
            return vec![0];
        }
        let mut hits = Vec::new();
        let mut from = 0;
        while let Some(hit) = self.find_from(needle, from) {
            hits.push(hit);
            from = hit + 1;
            if from > self.len() {
                break;
            }
        }
        hits
    }

    /// Number of chars in `s`
    pub fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    fn char_index_of_byte(&self, byte: usize) -> usize {
        // `byte` always comes from `str::find`, so it sits on a char boundary
        self.offsets.partition_point(|&offset| offset < byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_indexing() {
        let text = IndexedText::new("A cat sat.");
        assert_eq!(text.len(), 10);
        assert_eq!(text.char_at(2), Some('c'));
        assert_eq!(text.char_at(10), None);
        assert_eq!(text.slice(CharRange::new(2, 10)), Some("cat sat."));
    }

    #[test]
    fn test_multibyte_indexing() {
        let text = IndexedText::new("The café costs €50");
        assert_eq!(text.len(), 18);
        assert_eq!(text.char_at(7), Some('é'));
        assert_eq!(text.slice(CharRange::new(15, 18)), Some("€50"));
        assert_eq!(text.find_from("€50", 0), Some(15));
    }

    #[test]
    fn test_invalid_slices() {
        let text = IndexedText::new("abc");
        assert_eq!(text.slice(CharRange::new(2, 1)), None);
        assert_eq!(text.slice(CharRange::new(0, 4)), None);
        assert_eq!(text.slice(CharRange::new(3, 3)), Some(""));
    }

    #[test]
    fn test_find_all_includes_overlaps() {
        let text = IndexedText::new("aaaa");
        assert_eq!(text.find_all("aa"), vec![0, 1, 2]);
        assert!(text.find_all("b").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let text = IndexedText::new("");
        assert!(text.is_empty());
        assert_eq!(text.char_at(0), None);
        assert_eq!(text.find_from("", 0), Some(0));
    }

    #[test]
    fn test_char_classes() {
        assert!(is_word_char('a'));
        assert!(is_word_char('9'));
        assert!(is_word_char('é'));
        assert!(!is_word_char('\''));
        assert!(is_terminator('?'));
        assert!(!is_terminator(','));
    }
}
