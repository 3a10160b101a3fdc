//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use marginalia_api::Output;
use std::io::Write;

/// Plain text formatter - one line per segment.
///
/// Each line lists the covering categories, most important first, with a
/// `*` on categories whose annotation ends in that segment, followed by the
/// quoted segment text: `[logic-flag,validation*] "fast."`
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &str, output: &Output) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;

        writeln!(self.writer, "# {source}")?;
        for segment in &output.segments {
            let tags: Vec<String> = segment
                .covering
                .iter()
                .map(|c| {
                    if c.terminal {
                        format!("{}*", c.category)
                    } else {
                        c.category.clone()
                    }
                })
                .collect();
            writeln!(self.writer, "[{}] {:?}", tags.join(","), segment.text)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marginalia_api::{process_text, Annotation};

    #[test]
    fn test_segment_lines() {
        let text = "She ran fast because she could.";
        let annotations = vec![
            Annotation::new("v", "heart", 0..31, text),
            Annotation::new("l", "circle", 8..12, "fast"),
        ];
        let output = process_text(text, &annotations).unwrap();

        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer);
        formatter.format_document("story.json", &output).unwrap();
        formatter.finish().unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "# story.json",
                "[validation] \"She ran \"",
                "[logic-flag,validation] \"fast\"",
                "[validation*] \" because she could.\"",
            ]
        );
    }

    #[test]
    fn test_plain_segment_and_separator() {
        let output = process_text("Line one\nline two", &[]).unwrap();

        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer);
        formatter.format_document("a", &output).unwrap();
        formatter.format_document("b", &output).unwrap();
        formatter.finish().unwrap();

        let rendered = String::from_utf8(buffer).unwrap();
        assert_eq!(rendered, "# a\n[] \"Line one\\nline two\"\n\n# b\n[] \"Line one\\nline two\"\n");
    }
}
