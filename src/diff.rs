//! Word-level diff between original and enhanced text
//!
//! Compares two whitespace-tokenized texts and classifies every token as
//! unchanged, inserted, or removed. The matcher is a single-pass heuristic
//! with a small lookahead window on each side, tuned for short CV fields
//! where rendering speed matters more than a minimal edit script.

use serde::{Deserialize, Serialize};

/// Classification of a single diff span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Unchanged,
    Inserted,
    Removed,
}

/// One classified token of diff output.
///
/// Spans come out in reading order: unchanged and removed spans reproduce the
/// original token sequence, unchanged and inserted spans reproduce the
/// enhanced one. Unchanged spans carry the enhanced side's text, so with
/// case-insensitive matching the casing shown is the enhanced casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub kind: SpanKind,
}

impl Span {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SpanKind::Unchanged }
    }

    pub fn inserted(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SpanKind::Inserted }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: SpanKind::Removed }
    }
}

/// Tunable parameters for the word diff.
///
/// The defaults (window of 3, case-insensitive) match the behavior the
/// enhancement preview has always had; neither value is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// How many tokens ahead to scan on the opposite side when the current
    /// pair does not match, before falling back to a substitution.
    pub lookahead: usize,
    /// Compare tokens case-insensitively (Unicode lowercase fold).
    pub ignore_case: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            lookahead: 3,
            ignore_case: true,
        }
    }
}

/// Word-level diff engine.
pub struct WordDiff {
    options: DiffOptions,
}

impl Default for WordDiff {
    fn default() -> Self {
        Self::new(DiffOptions::default())
    }
}

impl WordDiff {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diff two texts into an ordered span sequence, one span per token.
    ///
    /// Total over all inputs: empty strings yield zero tokens, every token
    /// from both sides lands in exactly one span, and the span count is
    /// bounded by the combined token count. Identical inputs produce an
    /// all-unchanged sequence; repeated calls are deterministic.
    pub fn diff(&self, original: &str, enhanced: &str) -> Vec<Span> {
        let a: Vec<&str> = original.split_whitespace().collect();
        let b: Vec<&str> = enhanced.split_whitespace().collect();

        let mut spans = Vec::with_capacity(a.len().max(b.len()));
        let mut i = 0;
        let mut j = 0;

        while i < a.len() || j < b.len() {
            if i == a.len() {
                // Original exhausted: the rest of the enhanced text is new
                spans.push(Span::inserted(b[j]));
                j += 1;
            } else if j == b.len() {
                // Enhanced exhausted: the rest of the original was dropped
                spans.push(Span::removed(a[i]));
                i += 1;
            } else if self.tokens_equal(a[i], b[j]) {
                spans.push(Span::unchanged(b[j]));
                i += 1;
                j += 1;
            } else if let Some(k) = self.find_ahead(&b, j, a[i]) {
                // The current original token reappears a few tokens ahead in
                // the enhanced text; everything before it was inserted
                for token in &b[j..k] {
                    spans.push(Span::inserted(*token));
                }
                j = k;
            } else if let Some(k) = self.find_ahead(&a, i, b[j]) {
                // The current enhanced token reappears a few tokens ahead in
                // the original; everything before it was removed
                for token in &a[i..k] {
                    spans.push(Span::removed(*token));
                }
                i = k;
            } else {
                // No resynchronization point in either window: substitution
                spans.push(Span::removed(a[i]));
                spans.push(Span::inserted(b[j]));
                i += 1;
                j += 1;
            }
        }

        spans
    }

    fn tokens_equal(&self, left: &str, right: &str) -> bool {
        if self.options.ignore_case {
            left.to_lowercase() == right.to_lowercase()
        } else {
            left == right
        }
    }

    /// Scan `tokens[from + 1 ..]`, at most `lookahead` positions, for a token
    /// equal to `needle`. Returns the matching index.
    fn find_ahead(&self, tokens: &[&str], from: usize, needle: &str) -> Option<usize> {
        let end = tokens.len().min(from + 1 + self.options.lookahead);
        (from + 1..end).find(|&k| self.tokens_equal(tokens[k], needle))
    }
}

/// Diff two texts with the default options (window 3, case-insensitive).
pub fn compute_diff(original: &str, enhanced: &str) -> Vec<Span> {
    WordDiff::default().diff(original, enhanced)
}

/// Aggregate counts over a span sequence, for change summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub unchanged: usize,
    pub inserted: usize,
    pub removed: usize,
}

impl DiffStats {
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut stats = Self { unchanged: 0, inserted: 0, removed: 0 };
        for span in spans {
            match span.kind {
                SpanKind::Unchanged => stats.unchanged += 1,
                SpanKind::Inserted => stats.inserted += 1,
                SpanKind::Removed => stats.removed += 1,
            }
        }
        stats
    }

    /// Token count of the original text (unchanged + removed).
    pub fn original_tokens(&self) -> usize {
        self.unchanged + self.removed
    }

    /// Token count of the enhanced text (unchanged + inserted).
    pub fn enhanced_tokens(&self) -> usize {
        self.unchanged + self.inserted
    }

    /// Dice-style similarity in [0, 1]: twice the shared token count over the
    /// combined token count. Two empty texts count as identical.
    pub fn similarity(&self) -> f32 {
        let total = self.original_tokens() + self.enhanced_tokens();
        if total == 0 {
            1.0
        } else {
            (2 * self.unchanged) as f32 / total as f32
        }
    }
}
