//! Word-set insights: one action and the targets it applies to.

use super::machine::{scan, Event};
use super::WordInsight;

/// Extract `[action, target, ...]` records from tagged tokens.
///
/// Connective words are skipped. A record is kept only if it collected at
/// least one target; when the response ends mid-recording the targets seen
/// so far are kept.
pub fn extract_word_sets(response_id: u32, tagged: &[(&str, &str)]) -> Vec<WordInsight> {
    let mut records = Vec::new();
    let mut current: Option<WordInsight> = None;

    for event in scan(tagged) {
        match event {
            Event::Start(word) => {
                current = Some(WordInsight::new(response_id, word.trim(), Vec::new()));
            }
            Event::Target(word) => {
                if let Some(record) = current.as_mut() {
                    record.targets.push(word.to_string());
                }
            }
            Event::Connective(_) => {}
            Event::Close | Event::Abandon => {
                if let Some(record) = current.take() {
                    if !record.targets.is_empty() {
                        records.push(record);
                    }
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_and_targets() {
        let tagged = [
            ("Maglinis", "VB"),
            ("ng", "CCP"),
            ("mga", "DTC"),
            ("kanal", "NN"),
            ("at", "CCA"),
            ("kalye", "NN"),
        ];
        let records = extract_word_sets(4, &tagged);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_fields(), vec!["4", "Maglinis", "kanal", "kalye"]);
    }

    #[test]
    fn test_action_without_target_discarded() {
        let tagged = [("Maghanda", "VB"), ("palagi", "RBF"), ("tayo", "PRS")];
        assert!(extract_word_sets(1, &tagged).is_empty());
    }

    #[test]
    fn test_targets_kept_when_response_ends() {
        let tagged = [("Magtanim", "VB"), ("puno", "NNC"), (",", "PMC"), ("ngayon", "RBW")];
        let records = extract_word_sets(2, &tagged);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "Magtanim");
        assert_eq!(records[0].targets, vec!["puno"]);
    }

    #[test]
    fn test_one_record_per_verb_phrase() {
        let tagged = [
            ("Maglinis", "VB"),
            ("kanal", "NN"),
            ("at", "CCP"),
            ("itapon", "VB"),
            ("basura", "NN"),
        ];
        let records = extract_word_sets(9, &tagged);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].action, "itapon");
        assert_eq!(records[1].targets, vec!["basura"]);
        assert!(records.iter().all(|r| r.response_id == 9));
    }
}
