//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use marginalia_api::{display_note, Output};
use std::io::Write;

/// Markdown formatter - highlights annotated runs inline.
///
/// Annotated runs are wrapped in `==…==`. Where an annotation ends, a
/// footnote reference is placed and its note is listed below the document.
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    document_count: usize,
    note_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document_count: 0,
            note_count: 0,
        }
    }
}

/// Split `text` into leading whitespace, body, trailing whitespace
fn split_padding(text: &str) -> (&str, &str, &str) {
    let body_start = text.len() - text.trim_start().len();
    let body_end = text.trim_end().len().max(body_start);
    (
        &text[..body_start],
        &text[body_start..body_end],
        &text[body_end..],
    )
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, source: &str, output: &Output) -> Result<()> {
        self.document_count += 1;
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;

        let mut body = String::new();
        let mut footnotes = Vec::new();

        for segment in &output.segments {
            if segment.is_plain() {
                body.push_str(&segment.text);
                continue;
            }

            let mut refs = String::new();
            for covering in &segment.covering {
                let Some(annotation) = output.annotation(covering) else {
                    continue;
                };
                if annotation.range.end != segment.end {
                    continue;
                }
                self.note_count += 1;
                refs.push_str(&format!("[^{}]", self.note_count));

                let note = display_note(annotation);
                let note = if note.is_empty() {
                    format!("*{}*", annotation.category)
                } else {
                    format!("*{}*: {}", annotation.category, note)
                };
                footnotes.push((self.note_count, note));
            }

            let (lead, core, trail) = split_padding(&segment.text);
            if core.is_empty() {
                // Whitespace-only run: nothing to highlight, but notes ending
                // here still attach to the preceding word
                body.push_str(&refs);
                body.push_str(&segment.text);
                continue;
            }

            body.push_str(lead);
            body.push_str("==");
            body.push_str(core);
            body.push_str("==");
            body.push_str(&refs);
            body.push_str(trail);
        }

        writeln!(self.writer, "{body}")?;
        if !footnotes.is_empty() {
            writeln!(self.writer)?;
            for (number, note) in footnotes {
                writeln!(self.writer, "[^{number}]: {note}")?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Documents: {}, notes: {}*",
            self.document_count, self.note_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginalia_api::{process_text, Annotation, Confidence};

    #[test]
    fn test_split_padding() {
        assert_eq!(split_padding(" ab "), (" ", "ab", " "));
        assert_eq!(split_padding("ab"), ("", "ab", ""));
        assert_eq!(split_padding("   "), ("   ", "", ""));
    }

    #[test]
    fn test_note_ending_on_whitespace_run_is_kept() {
        let text = "She ran because she could. Next one.";
        let annotations = vec![
            Annotation::new("v", "heart", 0..26, "She ran because she could.").with_note("Voice"),
            Annotation::new("l", "circle", 20..26, "could.").with_note("Really?"),
        ];
        let output = process_text(text, &annotations).unwrap();
        assert_eq!(output.segments[2].text, " ");

        let mut buffer = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buffer);
        formatter.format_document("story", &output).unwrap();
        formatter.finish().unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains("==She ran because she== ==could.==[^1][^2] Next one."));
        assert!(rendered.contains("[^1]: *logic-flag*: Really?"));
        assert!(rendered.contains("[^2]: *validation*: Voice"));
    }

    #[test]
    fn test_highlights_and_footnotes() {
        let text = "She ran fast because she could.";
        let annotations = vec![
            Annotation::new("v", "heart", 0..31, text).with_note("Strong **voice**"),
            Annotation::new("l", "circle", 8..12, "fast")
                .with_note("Fast?")
                .with_confidence(Confidence::Uncertain),
        ];
        let output = process_text(text, &annotations).unwrap();

        let mut buffer = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buffer);
        formatter.format_document("story", &output).unwrap();
        formatter.finish().unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        assert!(rendered.contains(
            "==She ran== ==fast==[^1] ==because she could.==[^2]"
        ));
        assert!(rendered.contains("[^1]: *logic-flag*: ≈ Fast?"));
        assert!(rendered.contains("[^2]: *validation*: Strong **voice**"));
        assert!(rendered.contains("*Documents: 1, notes: 2*"));
    }
}
