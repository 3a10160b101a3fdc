//! Annotation reconciliation and segment construction
//!
//! This crate turns a text plus a set of loosely positioned annotations into
//! an ordered list of non-overlapping segments that a renderer can draw
//! directly. Annotations come from an external analysis step whose offsets
//! are unreliable, so every annotation goes through four stages:
//!
//! 1. **Reconcile** ([`Reconciler`]): trust the quoted anchor text over the
//!    reported offsets and relocate ranges that disagree.
//! 2. **Normalize** ([`Normalizer`]): snap ranges to whole words (logic
//!    flags) or whole sentences (everything else).
//! 3. **Resolve** ([`OverlapResolver`]): drop validations that overlap an
//!    earlier validation; flags may overlap freely.
//! 4. **Segment** ([`SegmentBuilder`]): cut the text into maximal runs that
//!    share one set of covering annotations.
//!
//! All offsets are char offsets. No stage fails: malformed annotations are
//! repaired or tagged with a [`Diagnostic`] and processing continues.
//!
//! # Example
//!
//! ```rust
//! use marginalia_core::{Annotation, Category, Pipeline};
//!
//! let text = "Yes. She ran fast because she could.";
//! let annotations = vec![
//!     // Offsets are off by one; the anchor text wins
//!     Annotation::new("v1", Category::Validation, 10..18, "ran fast"),
//!     Annotation::new("f1", Category::LogicFlag, 13..17, "fast"),
//! ];
//!
//! let result = Pipeline::default().run(text, &annotations);
//!
//! assert_eq!(result.reconstruct(), text);
//! let terminal = result.terminal_segment(&"v1".into()).unwrap();
//! assert_eq!(terminal.text, " because she could.");
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod markup;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod resolve;
pub mod segment;
pub mod text;
pub mod types;

pub use config::{
    AnchorSearch, NormalizerConfig, PipelineConfig, PipelineConfigBuilder, ReconcilerConfig,
    SegmentConfig, TerminalMarking,
};
pub use edit::{retain_unaffected, EditOutcome, TextChange};
pub use error::{ConfigError, Result};
pub use markup::{display_note, parse_note, plain_note, NoteSpan};
pub use normalize::Normalizer;
pub use pipeline::{Pipeline, PipelineReport};
pub use reconcile::Reconciler;
pub use resolve::{sort_annotations, OverlapResolver, Resolution};
pub use segment::SegmentBuilder;
pub use text::IndexedText;
pub use types::{
    Annotation, AnnotationId, BoundaryPolicy, Category, CharRange, Confidence, Covering,
    Diagnostic, ExternalReference, Segment, SegmentedText, Variant,
};
