//! Annotation categories and the policies they select

use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of annotation tags, plus a catch-all for anything the
/// upstream analysis invents.
///
/// Category drives two decisions: which boundary policy the normalizer
/// applies, and whether same-category overlap is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Positive reinforcement; never overlaps another validation
    Validation,
    /// Likely factual error
    FactualFlag,
    /// Creative alternative worth considering
    CreativeFlag,
    /// Short internal-inconsistency marker
    LogicFlag,
    /// Unrecognised tag, kept verbatim and ranked last
    Other(String),
}

/// How an annotation's boundaries are snapped to text units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Only complete the words at each edge
    Precise,
    /// Grow to the enclosing sentence
    Sentence,
}

impl Category {
    /// Rank used for ordering; lower is more important
    pub fn priority(&self) -> u8 {
        match self {
            Category::LogicFlag => 0,
            Category::FactualFlag | Category::CreativeFlag => 1,
            Category::Validation => 2,
            Category::Other(_) => 3,
        }
    }

    /// Boundary policy selected by this category
    pub fn policy(&self) -> BoundaryPolicy {
        match self {
            Category::LogicFlag => BoundaryPolicy::Precise,
            _ => BoundaryPolicy::Sentence,
        }
    }

    /// Whether this category is held to the non-overlap guarantee
    pub fn is_validation(&self) -> bool {
        matches!(self, Category::Validation)
    }

    /// Canonical kebab-case name
    pub fn as_str(&self) -> &str {
        match self {
            Category::Validation => "validation",
            Category::FactualFlag => "factual-flag",
            Category::CreativeFlag => "creative-flag",
            Category::LogicFlag => "logic-flag",
            Category::Other(name) => name,
        }
    }

    /// The four known categories in priority order
    pub fn known() -> [Category; 4] {
        [
            Category::LogicFlag,
            Category::FactualFlag,
            Category::CreativeFlag,
            Category::Validation,
        ]
    }
}

impl FromStr for Category {
    type Err = core::convert::Infallible;

    /// Never fails: unknown names become [`Category::Other`].
    ///
    /// Both the canonical names and the upstream wire vocabulary
    /// (`heart`, `squiggle-correction`, `squiggle-suggestion`, `circle`)
    /// are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_ascii_lowercase().as_str() {
            "validation" | "heart" => Category::Validation,
            "factual-flag" | "squiggle-correction" => Category::FactualFlag,
            "creative-flag" | "squiggle-suggestion" => Category::CreativeFlag,
            "logic-flag" | "circle" => Category::LogicFlag,
            _ => Category::Other(s.to_string()),
        };
        Ok(category)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match Category::from_str(&s) {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
