//! Extraction evaluation against a gold standard.
//!
//! Phrases are matched per response: a complete match is case-insensitive
//! equality, a partial match is a system phrase whose first or last word
//! appears inside the gold phrase. Partial matches are split by character
//! length into over-, under- and overlapping extractions. Leftovers on the
//! system side are false positives, on the gold side false negatives.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::extract::{PhraseInsight, WordInsight};

/// A system phrase paired with the gold phrase it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhrasePair {
    pub response_id: u32,
    pub system: String,
    pub gold: String,
}

/// A phrase found on only one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedPhrase {
    pub response_id: u32,
    pub phrase: String,
}

/// Result of comparing phrase extractions with a gold standard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PhraseEvaluation {
    pub gold_standard_extractions: usize,
    pub system_extractions: usize,
    pub complete_matches: Vec<PhrasePair>,
    pub over_extractions: Vec<PhrasePair>,
    pub under_extractions: Vec<PhrasePair>,
    pub overlapping_extractions: Vec<PhrasePair>,
    pub false_positives: Vec<UnmatchedPhrase>,
    pub false_negatives: Vec<UnmatchedPhrase>,
}

impl PhraseEvaluation {
    pub fn partial_matches(&self) -> usize {
        self.over_extractions.len() + self.under_extractions.len() + self.overlapping_extractions.len()
    }

    pub fn true_positive(&self) -> usize {
        self.complete_matches.len() + self.partial_matches()
    }

    pub fn false_positive(&self) -> usize {
        self.false_positives.len()
    }

    pub fn false_negative(&self) -> usize {
        self.false_negatives.len()
    }

    pub fn complete_mismatches(&self) -> usize {
        self.false_positive() + self.false_negative()
    }

    /// Extractions seen on either side, matched pairs counted once.
    pub fn total_possible_extractions(&self) -> usize {
        self.system_extractions + self.gold_standard_extractions - self.true_positive()
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive(), self.true_positive() + self.false_positive())
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive(), self.true_positive() + self.false_negative())
    }

    /// Accuracy without true negatives, which extraction cannot observe.
    pub fn accuracy(&self) -> f64 {
        ratio(
            self.true_positive(),
            self.true_positive() + self.false_positive() + self.false_negative(),
        )
    }

    pub fn f_measure(&self) -> f64 {
        f_measure(self.precision(), self.recall())
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f_measure(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Compare system phrases with gold-standard phrases, response by response.
pub fn evaluate_phrases(system: &[PhraseInsight], gold: &[PhraseInsight]) -> PhraseEvaluation {
    let mut evaluation = PhraseEvaluation::default();

    let mut by_response: BTreeMap<u32, (Vec<String>, Vec<String>)> = BTreeMap::new();
    for insight in system {
        evaluation.system_extractions += insight.phrases.len();
        by_response
            .entry(insight.response_id)
            .or_default()
            .0
            .extend(insight.phrases.iter().cloned());
    }
    for insight in gold {
        evaluation.gold_standard_extractions += insight.phrases.len();
        by_response
            .entry(insight.response_id)
            .or_default()
            .1
            .extend(insight.phrases.iter().cloned());
    }

    for (response_id, (mut system_phrases, mut gold_phrases)) in by_response {
        let mut i = 0;
        while i < system_phrases.len() {
            let system_phrase = &system_phrases[i];
            let found = gold_phrases
                .iter()
                .enumerate()
                .find_map(|(j, g)| classify_phrase(system_phrase, g).map(|kind| (j, kind)));

            match found {
                Some((j, kind)) => {
                    let pair = PhrasePair {
                        response_id,
                        system: system_phrases.remove(i),
                        gold: gold_phrases.remove(j),
                    };
                    match kind {
                        PhraseMatch::Complete => evaluation.complete_matches.push(pair),
                        PhraseMatch::Over => evaluation.over_extractions.push(pair),
                        PhraseMatch::Under => evaluation.under_extractions.push(pair),
                        PhraseMatch::Overlapping => evaluation.overlapping_extractions.push(pair),
                    }
                }
                None => i += 1,
            }
        }

        evaluation
            .false_positives
            .extend(system_phrases.into_iter().map(|phrase| UnmatchedPhrase { response_id, phrase }));
        evaluation
            .false_negatives
            .extend(gold_phrases.into_iter().map(|phrase| UnmatchedPhrase { response_id, phrase }));
    }

    evaluation
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhraseMatch {
    Complete,
    Over,
    Under,
    Overlapping,
}

fn classify_phrase(system: &str, gold: &str) -> Option<PhraseMatch> {
    let system_lower = system.to_lowercase();
    let gold_lower = gold.to_lowercase();
    if system_lower == gold_lower {
        return Some(PhraseMatch::Complete);
    }

    let words: Vec<&str> = system_lower.split_whitespace().collect();
    let first = words.first()?;
    let last = words.last()?;
    if !gold_lower.contains(first) && !gold_lower.contains(last) {
        return None;
    }

    let (system_len, gold_len) = (system.chars().count(), gold.chars().count());
    Some(match system_len.cmp(&gold_len) {
        std::cmp::Ordering::Greater => PhraseMatch::Over,
        std::cmp::Ordering::Less => PhraseMatch::Under,
        std::cmp::Ordering::Equal => PhraseMatch::Overlapping,
    })
}

/// How a system word set relates to a gold word set of the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordSetMatch {
    /// Same action and same targets.
    Exact,
    /// Same action, some targets shared.
    Partial,
    /// Same action, no targets shared.
    ActionOnly,
    /// Different action, some targets shared.
    TargetOnly,
    /// The action of one side is a target of the other.
    Crossover,
}

/// Result of comparing word-set extractions with a gold standard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WordSetEvaluation {
    pub gold_standard_extractions: usize,
    pub system_extractions: usize,
    pub exact: usize,
    pub partial: usize,
    pub action_only: usize,
    pub target_only: usize,
    pub crossover: usize,
    pub unmatched_system: usize,
    pub unmatched_gold: usize,
}

impl WordSetEvaluation {
    pub fn partial_matches(&self) -> usize {
        self.partial + self.action_only + self.target_only + self.crossover
    }

    /// Every matched pair is a correct extraction, whatever its kind.
    pub fn true_positive(&self) -> usize {
        self.exact + self.partial_matches()
    }

    pub fn false_positive(&self) -> usize {
        self.unmatched_system
    }

    pub fn false_negative(&self) -> usize {
        self.unmatched_gold
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive(), self.true_positive() + self.false_positive())
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive(), self.true_positive() + self.false_negative())
    }

    pub fn accuracy(&self) -> f64 {
        ratio(
            self.true_positive(),
            self.true_positive() + self.false_positive() + self.false_negative(),
        )
    }

    pub fn f_measure(&self) -> f64 {
        f_measure(self.precision(), self.recall())
    }
}

/// Compare system word sets with gold-standard word sets.
///
/// Each system record takes the best still-unmatched gold record of the same
/// response. Comparison is case-insensitive.
pub fn evaluate_word_sets(system: &[WordInsight], gold: &[WordInsight]) -> WordSetEvaluation {
    let mut evaluation = WordSetEvaluation {
        gold_standard_extractions: gold.len(),
        system_extractions: system.len(),
        ..Default::default()
    };
    let mut used = vec![false; gold.len()];

    for record in system {
        let best = gold
            .iter()
            .enumerate()
            .filter(|(j, g)| !used[*j] && g.response_id == record.response_id)
            .filter_map(|(j, g)| classify_word_set(record, g).map(|kind| (kind, j)))
            .min();

        match best {
            Some((kind, j)) => {
                used[j] = true;
                match kind {
                    WordSetMatch::Exact => evaluation.exact += 1,
                    WordSetMatch::Partial => evaluation.partial += 1,
                    WordSetMatch::ActionOnly => evaluation.action_only += 1,
                    WordSetMatch::TargetOnly => evaluation.target_only += 1,
                    WordSetMatch::Crossover => evaluation.crossover += 1,
                }
            }
            None => evaluation.unmatched_system += 1,
        }
    }

    evaluation.unmatched_gold = used.iter().filter(|u| !**u).count();
    evaluation
}

fn classify_word_set(system: &WordInsight, gold: &WordInsight) -> Option<WordSetMatch> {
    let system_action = system.action.to_lowercase();
    let gold_action = gold.action.to_lowercase();
    let system_targets = lowercase_set(&system.targets);
    let gold_targets = lowercase_set(&gold.targets);

    let same_action = system_action == gold_action;
    let shared_targets = !system_targets.is_disjoint(&gold_targets);

    if same_action && system_targets == gold_targets {
        Some(WordSetMatch::Exact)
    } else if same_action && shared_targets {
        Some(WordSetMatch::Partial)
    } else if same_action {
        Some(WordSetMatch::ActionOnly)
    } else if shared_targets {
        Some(WordSetMatch::TargetOnly)
    } else if gold_targets.contains(&system_action) || system_targets.contains(&gold_action) {
        Some(WordSetMatch::Crossover)
    } else {
        None
    }
}

fn lowercase_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(response_id: u32, list: &[&str]) -> PhraseInsight {
        PhraseInsight {
            response_id,
            phrases: list.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn words(response_id: u32, action: &str, targets: &[&str]) -> WordInsight {
        WordInsight::new(response_id, action, targets.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_phrase_complete_match() {
        let eval = evaluate_phrases(
            &[phrases(1, &["Maglinis ng kanal"])],
            &[phrases(1, &["maglinis ng kanal"])],
        );
        assert_eq!(eval.complete_matches.len(), 1);
        assert_eq!(eval.precision(), 1.0);
        assert_eq!(eval.recall(), 1.0);
        assert_eq!(eval.f_measure(), 1.0);
        assert_eq!(eval.total_possible_extractions(), 1);
    }

    #[test]
    fn test_phrase_partial_kinds() {
        let eval = evaluate_phrases(
            &[
                phrases(1, &["Maglinis ng mga kanal"]),
                phrases(2, &["Magtanim puno"]),
                phrases(3, &["Ihanda bahay"]),
            ],
            &[
                phrases(1, &["Maglinis ng kanal"]),
                phrases(2, &["Magtanim ng puno"]),
                phrases(3, &["Ihanda gamit"]),
            ],
        );
        assert_eq!(eval.over_extractions.len(), 1);
        assert_eq!(eval.under_extractions.len(), 1);
        assert_eq!(eval.overlapping_extractions.len(), 1);
        assert_eq!(eval.true_positive(), 3);
        assert_eq!(eval.complete_mismatches(), 0);
    }

    #[test]
    fn test_phrase_mismatches() {
        let eval = evaluate_phrases(
            &[phrases(1, &["Maglinis kanal", "Bumili pagkain"]), phrases(2, &["Magdasal lagi"])],
            &[phrases(1, &["maglinis kanal"]), phrases(3, &["Magtipid tubig"])],
        );
        assert_eq!(eval.system_extractions, 3);
        assert_eq!(eval.gold_standard_extractions, 2);
        assert_eq!(eval.true_positive(), 1);
        assert_eq!(eval.false_positive(), 2);
        assert_eq!(eval.false_negative(), 1);
        assert!((eval.precision() - 1.0 / 3.0).abs() < 1e-9);
        assert!((eval.recall() - 0.5).abs() < 1e-9);
        assert!((eval.accuracy() - 0.25).abs() < 1e-9);
        assert_eq!(eval.false_negatives[0].response_id, 3);
    }

    #[test]
    fn test_empty_evaluation_has_zero_metrics() {
        let eval = evaluate_phrases(&[], &[]);
        assert_eq!(eval.precision(), 0.0);
        assert_eq!(eval.recall(), 0.0);
        assert_eq!(eval.f_measure(), 0.0);
    }

    #[test]
    fn test_word_set_kinds() {
        let system = vec![
            words(1, "Maglinis", &["kanal", "kalye"]),
            words(2, "maglinis", &["kanal"]),
            words(3, "itapon", &["basura"]),
            words(4, "magtanim", &["puno"]),
            words(5, "kanal", &["linisin"]),
            words(6, "magdasal", &["diyos"]),
        ];
        let gold = vec![
            words(1, "maglinis", &["kalye", "kanal"]),
            words(2, "maglinis", &["kanal", "kalye"]),
            words(3, "itapon", &["kalat"]),
            words(4, "itanim", &["puno"]),
            words(5, "linisin", &["kanal"]),
        ];
        let eval = evaluate_word_sets(&system, &gold);
        assert_eq!(eval.exact, 1);
        assert_eq!(eval.partial, 1);
        assert_eq!(eval.action_only, 1);
        assert_eq!(eval.target_only, 1);
        assert_eq!(eval.crossover, 1);
        assert_eq!(eval.unmatched_system, 1);
        assert_eq!(eval.unmatched_gold, 0);
        assert_eq!(eval.partial_matches(), 4);
        assert_eq!(eval.true_positive(), 5);
        assert_eq!(eval.false_positive(), 1);
        assert_eq!(eval.false_negative(), 0);
        assert!((eval.precision() - 5.0 / 6.0).abs() < 1e-9);
        assert_eq!(eval.recall(), 1.0);
        assert!((eval.accuracy() - 5.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_set_action_only_counts_as_correct() {
        let eval = evaluate_word_sets(
            &[words(1, "maglinis", &["kanal"])],
            &[words(1, "maglinis", &["kalye"])],
        );
        assert_eq!(eval.action_only, 1);
        assert_eq!(eval.true_positive(), 1);
        assert_eq!(eval.precision(), 1.0);
        assert_eq!(eval.recall(), 1.0);
        assert_eq!(eval.accuracy(), 1.0);
        assert_eq!(eval.f_measure(), 1.0);
    }

    #[test]
    fn test_word_set_unmatched_sides() {
        let eval = evaluate_word_sets(
            &[words(1, "maglinis", &["kanal"]), words(2, "magdasal", &["diyos"])],
            &[words(1, "maglinis", &["kanal"]), words(3, "magtipid", &["tubig"])],
        );
        assert_eq!(eval.true_positive(), 1);
        assert_eq!(eval.false_positive(), 1);
        assert_eq!(eval.false_negative(), 1);
        assert_eq!(eval.precision(), 0.5);
        assert_eq!(eval.recall(), 0.5);
        assert!((eval.accuracy() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_word_set_prefers_best_match() {
        let system = vec![words(1, "maglinis", &["kanal"])];
        let gold = vec![words(1, "maglinis", &["kalye"]), words(1, "maglinis", &["kanal"])];
        let eval = evaluate_word_sets(&system, &gold);
        assert_eq!(eval.exact, 1);
        assert_eq!(eval.unmatched_gold, 1);
    }
}
