//! Data model shared by all pipeline stages

mod annotation;
mod category;
mod segment;

pub use annotation::{
    Annotation, AnnotationId, CharRange, Confidence, Diagnostic, ExternalReference, Variant,
};
pub use category::{BoundaryPolicy, Category};
pub use segment::{Covering, Segment, SegmentedText};
