//! Pulso Extract — action/target insights from part-of-speech tagged responses.
//!
//! `extract_all` runs the tag pattern over one response and returns both
//! insight forms. `evaluate` scores extractions against a hand-labelled
//! gold standard.

pub mod evaluate;
pub mod extract;

pub use evaluate::{
    evaluate_phrases, evaluate_word_sets, PhraseEvaluation, WordSetEvaluation, WordSetMatch,
};
pub use extract::notation::{format_stanford, format_tags, parse_stanford};
pub use extract::{extract_all, ExtractionResult, PhraseInsight, WordInsight};
