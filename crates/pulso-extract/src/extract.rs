//! Part-of-speech pattern extraction.
//!
//! Turns one tagged response into phrase insights (verbatim verb-to-noun
//! spans) and word-set insights (an action with its targets) using a fixed
//! tag pattern, not a learned parser.

pub mod machine;
pub mod notation;
pub mod phrases;
pub mod tags;
pub mod words;

use pulso_core::{Response, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Phrase insights of one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseInsight {
    pub response_id: u32,
    pub phrases: Vec<String>,
}

/// One action with the targets it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInsight {
    pub response_id: u32,
    pub action: String,
    pub targets: Vec<String>,
}

impl WordInsight {
    pub fn new(response_id: u32, action: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            response_id,
            action: action.into(),
            targets,
        }
    }

    /// Flat `[response_id, action, target, ...]` record.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.targets.len() + 2);
        fields.push(self.response_id.to_string());
        fields.push(self.action.clone());
        fields.extend(self.targets.iter().cloned());
        fields
    }
}

/// Combined extraction result for a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub response_id: u32,
    pub phrases: Vec<String>,
    pub word_sets: Vec<WordInsight>,
}

impl ExtractionResult {
    /// True when the response yielded no insight of either form.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.word_sets.is_empty()
    }

    pub fn phrase_insight(&self) -> PhraseInsight {
        PhraseInsight {
            response_id: self.response_id,
            phrases: self.phrases.clone(),
        }
    }
}

/// Run both extractors on a response.
///
/// Fails only when the tag count does not match the token count.
pub fn extract_all(response: &Response) -> Result<ExtractionResult> {
    let tagged = response.tagged_tokens()?;

    let phrases = phrases::extract_phrases(&tagged);
    if phrases.is_empty() {
        debug!("No phrase insights extracted at response #{}", response.id);
    }

    let word_sets = words::extract_word_sets(response.id, &tagged);
    if word_sets.is_empty() {
        debug!("No word-set insights extracted at response #{}", response.id);
    }

    Ok(ExtractionResult {
        response_id: response.id,
        phrases,
        word_sets,
    })
}
