//! Note emphasis markup
//!
//! Notes may wrap phrases in `**double asterisks**`. Renderers get the note
//! as a list of plain and emphasized runs instead of parsing it themselves.

use crate::types::{Annotation, Confidence};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Prefix shown before notes of uncertain annotations
pub const UNCERTAIN_PREFIX: &str = "≈ ";

static EMPHASIS: OnceLock<Regex> = OnceLock::new();

fn emphasis() -> &'static Regex {
    // Non-greedy so adjacent pairs stay separate
    EMPHASIS.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("emphasis pattern is valid"))
}

/// A run of note text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSpan {
    /// Text without the markers
    pub text: String,
    /// Whether the run was wrapped in `**`
    pub emphasized: bool,
}

impl NoteSpan {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emphasized: false,
        }
    }
}

/// Split `note` into plain and emphasized runs.
///
/// An unterminated `**` is kept as literal text. Empty runs are omitted.
pub fn parse_note(note: &str) -> Vec<NoteSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for captures in emphasis().captures_iter(note) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(NoteSpan::plain(&note[last..whole.start()]));
        }
        spans.push(NoteSpan {
            text: inner.as_str().to_string(),
            emphasized: true,
        });
        last = whole.end();
    }

    if last < note.len() {
        spans.push(NoteSpan::plain(&note[last..]));
    }
    spans
}

/// The note as it should be displayed, prefixed for uncertain annotations
pub fn display_note(annotation: &Annotation) -> String {
    match annotation.confidence {
        Confidence::Uncertain => format!("{UNCERTAIN_PREFIX}{}", annotation.note),
        Confidence::Certain => annotation.note.clone(),
    }
}

/// Strip emphasis markers, keeping their contents
pub fn plain_note(note: &str) -> String {
    parse_note(note).into_iter().map(|span| span.text).collect()
}
