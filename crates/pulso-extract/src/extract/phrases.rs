//! Phrase insights: the verbatim span from the opening verb to the last target.

use super::machine::{scan, Event};

/// Extract verb-to-noun phrases from tagged tokens.
///
/// Periods become spaces and each phrase is trimmed. An insight that never
/// lands on a noun or foreign word is dropped entirely.
pub fn extract_phrases(tagged: &[(&str, &str)]) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for event in scan(tagged) {
        match event {
            Event::Start(word) | Event::Connective(word) | Event::Target(word) => {
                buffer.push(word)
            }
            Event::Close => {
                let phrase = buffer.join(" ").replace('.', " ");
                let phrase = phrase.trim();
                if !phrase.is_empty() {
                    phrases.push(phrase.to_string());
                }
                buffer.clear();
            }
            Event::Abandon => buffer.clear(),
        }
    }

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_span() {
        let tagged = [
            ("Maglinis", "VB"),
            ("ng", "CCP"),
            ("mga", "DTC"),
            ("kanal", "NN"),
            ("at", "CCA"),
            ("kalye", "NN"),
        ];
        assert_eq!(extract_phrases(&tagged), vec!["Maglinis ng mga kanal at kalye"]);
    }

    #[test]
    fn test_trailing_period_stripped() {
        let tagged = [("Magtanim", "VB"), ("ng", "CCP"), ("puno.", "NNC")];
        assert_eq!(extract_phrases(&tagged), vec!["Magtanim ng puno"]);
    }

    #[test]
    fn test_malformed_candidate_dropped() {
        let tagged = [
            ("Maglinis", "VB"),
            ("kanal", "NN"),
            ("at", "CCP"),
            ("maghanda", "VB"),
            ("palagi", "RBF"),
        ];
        // The second candidate never reaches a noun
        assert_eq!(extract_phrases(&tagged), vec!["Maglinis kanal"]);
    }

    #[test]
    fn test_no_phrases() {
        let tagged = [("Wala", "NNC"), ("po", "RBI")];
        assert!(extract_phrases(&tagged).is_empty());
    }
}
