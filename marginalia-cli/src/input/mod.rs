//! Input handling module

pub mod bundle;
pub mod glob_resolver;

pub use bundle::Bundle;
pub use glob_resolver::resolve_patterns;
