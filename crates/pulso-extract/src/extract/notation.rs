//! Tagger output notations.
//!
//! The tagger emits Stanford `word|tag` tokens. Responses store the plain text
//! and the tags-only sequence separately.

use pulso_core::{Error, Result};

/// Split Stanford notation into plain text and its tag sequence.
///
/// The tag is everything after the last `|`, so words may contain pipes.
pub fn parse_stanford(tagged: &str) -> Result<(String, Vec<String>)> {
    let mut words = Vec::new();
    let mut tags = Vec::new();

    for token in tagged.split_whitespace() {
        match token.rsplit_once('|') {
            Some((word, tag)) if !word.is_empty() && !tag.is_empty() => {
                words.push(word);
                tags.push(tag.to_string());
            }
            _ => {
                return Err(Error::Extraction(format!(
                    "token {:?} is not in word|tag notation",
                    token
                )))
            }
        }
    }

    Ok((words.join(" "), tags))
}

/// Format `(word, tag)` pairs as Stanford `word|tag` notation.
pub fn format_stanford(tagged: &[(&str, &str)]) -> String {
    tagged
        .iter()
        .map(|(word, tag)| format!("{}|{}", word, tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the tags only, space-separated.
pub fn format_tags(tagged: &[(&str, &str)]) -> String {
    tagged
        .iter()
        .map(|(_, tag)| *tag)
        .collect::<Vec<_>>()
        .join(" ")
}
