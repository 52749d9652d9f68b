//! Advisory content validation: does recovered text plausibly come from an
//! engineering document?
//!
//! This is a sanity gate, not a classifier. A scan that OCR mangled into
//! noise, or a PDF whose text layer is empty boilerplate, wastes an expensive
//! analysis call downstream — a quick vocabulary check catches most of those.
//! Callers treat a `false` as a warning, not an error: plenty of legitimate
//! documents (drawings, foreign-language sheets) fail the check.

/// Vocabulary of terms that show up in requirement specs and vendor
/// submittals. Matching is case-insensitive substring containment, so
/// "specifications" and "Pressure-rated" both count.
pub const ENGINEERING_TERMS: &[&str] = &[
    "specification",
    "requirements",
    "pressure",
    "temperature",
    "capacity",
    "material",
    "design",
    "performance",
    "dimensions",
    "standards",
    "rating",
    "model",
    "technical",
    "flow",
    "power",
    "efficiency",
];

/// Thresholds for the vocabulary gate.
///
/// Both values are heuristic defaults carried over from production use;
/// neither encodes a hard semantic, so they stay configurable.
#[derive(Debug, Clone)]
pub struct ContentCheck {
    /// Minimum trimmed length before the vocabulary is even consulted.
    pub min_len: usize,
    /// Minimum number of distinct vocabulary terms that must appear.
    pub min_matches: usize,
}

impl Default for ContentCheck {
    fn default() -> Self {
        Self {
            min_len: 50,
            min_matches: 3,
        }
    }
}

impl ContentCheck {
    /// Whether `text` plausibly contains engineering content.
    ///
    /// Rejects text shorter than `min_len` after trimming; otherwise counts
    /// distinct vocabulary terms present (case-insensitive) and accepts at
    /// `min_matches` or more.
    pub fn passes(&self, text: &str) -> bool {
        // Characters, not bytes: the gate also sees pre-sanitisation text,
        // where multi-byte characters would inflate a byte count.
        if text.trim().chars().count() < self.min_len {
            return false;
        }
        let lower = text.to_lowercase();
        let found = ENGINEERING_TERMS
            .iter()
            .filter(|term| lower.contains(*term))
            .count();
        found >= self.min_matches
    }
}

/// Convenience wrapper using the default thresholds (50 chars, 3 terms).
pub fn looks_like_engineering_text(text: &str) -> bool {
    ContentCheck::default().passes(text)
}
