//! Similarity oracle trait and the exact-match placeholder.
//!
//! The `SimilarityOracle` trait abstracts over string comparison backends.
//! Implementations:
//! - `DiceOracle`: Sørensen-Dice coefficient over character n-grams
//! - `EmbeddingOracle`: cosine similarity over pre-trained word vectors
//! - `ExactOracle`: 1.0 on equality, 0.0 otherwise (fallback when vectors are missing)

/// Trait for similarity backends.
///
/// Scores are in `[0, 1]`. Callers lowercase both operands before asking.
/// A comparison the backend cannot answer scores `0.0`, it never fails.
pub trait SimilarityOracle: Send + Sync {
    /// Similarity between two strings (higher is closer).
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Distance between two strings (lower is closer).
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Short backend name for logs and reports.
    fn name(&self) -> &str;
}

/// Placeholder oracle that only recognizes identical strings.
pub struct ExactOracle;

impl SimilarityOracle for ExactOracle {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            1.0
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "exact"
    }
}
