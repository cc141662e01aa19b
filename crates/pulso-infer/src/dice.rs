//! Sørensen-Dice coefficient over character shingles.
//!
//! Whitespace runs collapse to a single space, then each string becomes the
//! set of its distinct contiguous k-character shingles. The coefficient is
//! `2 * |A ∩ B| / (|A| + |B|)`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::oracle::SimilarityOracle;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lexical oracle based on the Dice coefficient.
pub struct DiceOracle {
    k: usize,
}

impl DiceOracle {
    /// Create an oracle with shingle size `k` (3 for trigrams, 2 for bigrams).
    pub fn new(k: usize) -> Self {
        Self { k: k.max(1) }
    }

    /// Shingle size.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Dice coefficient, or None when either string is shorter than a shingle.
    ///
    /// Identical strings always score 1.0, whatever their length.
    pub fn coefficient(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }

        let profile_a = self.profile(a);
        let profile_b = self.profile(b);
        if profile_a.is_empty() || profile_b.is_empty() {
            return None;
        }

        let shared = profile_a.intersection(&profile_b).count();
        Some(2.0 * shared as f64 / (profile_a.len() + profile_b.len()) as f64)
    }

    fn profile(&self, text: &str) -> HashSet<String> {
        let normalized = WHITESPACE.replace_all(text, " ");
        let chars: Vec<char> = normalized.chars().collect();
        if chars.len() < self.k {
            return HashSet::new();
        }
        chars
            .windows(self.k)
            .map(|w| w.iter().collect::<String>())
            .collect()
    }
}

impl Default for DiceOracle {
    fn default() -> Self {
        Self::new(3)
    }
}

impl SimilarityOracle for DiceOracle {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self.coefficient(a, b) {
            Some(score) => score,
            None => {
                debug!("Dice coefficient undefined for {:?} / {:?} (k={})", a, b, self.k);
                0.0
            }
        }
    }

    fn name(&self) -> &str {
        "dice"
    }
}
