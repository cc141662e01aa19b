//! Output files and console summaries.

use pulso_extract::{PhraseEvaluation, PhraseInsight, WordInsight, WordSetEvaluation};
use pulso_rank::RankedRecord;
use pulso_runtime::{RunReport, StageTimings};
use serde::Serialize;

/// JSON written by `pulso organize`, with clusters flattened to records.
#[derive(Debug, Serialize)]
pub struct OrganizeOutput<'a> {
    pub technique: String,
    pub oracle: &'a str,
    pub organization: pulso_core::OrganizationMode,
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    pub timings: &'a StageTimings,
    pub phrases: &'a [PhraseInsight],
    #[serde(rename = "wordSets")]
    pub word_sets: &'a [WordInsight],
    pub clusters: Vec<RankedRecord>,
    pub ranked: Vec<RankedRecord>,
}

impl<'a> OrganizeOutput<'a> {
    pub fn new(report: &'a RunReport) -> Self {
        Self {
            technique: report.technique.to_string(),
            oracle: &report.oracle,
            organization: report.organization,
            generated_at: report.generated_at.to_rfc3339(),
            timings: &report.timings,
            phrases: &report.phrases,
            word_sets: &report.word_sets,
            clusters: report.cluster_records(),
            ranked: report.ranked_records(),
        }
    }
}

pub fn print_summary(report: &RunReport) {
    println!("=== Pulso Run ===");
    println!();
    println!("Technique:          {} ({})", report.technique, report.oracle);
    println!("Organization:       {:?}", report.organization);
    println!("Responses:          {}", report.responses);
    println!("Without insights:   {}", report.responses_without_insights);
    println!("Insights:           {}", report.insights);
    println!("Clusters:           {}", report.cluster_count);
    println!(
        "Timings:            extraction={}ms clustering={}ms ranking={}ms",
        report.timings.extraction_ms, report.timings.clustering_ms, report.timings.ranking_ms
    );

    let top: Vec<_> = report
        .ranked_records()
        .into_iter()
        .filter_map(|r| match r {
            RankedRecord::Cluster(c) => Some(c),
            RankedRecord::Category(_) => None,
        })
        .take(5)
        .collect();
    if !top.is_empty() {
        println!();
        println!("Top clusters:");
        for c in top {
            println!("  [{}] {} -> {}", c.frequency, c.action, c.targets);
        }
    }
}

pub fn print_evaluation(phrases: &PhraseEvaluation, word_sets: &WordSetEvaluation) {
    println!("=== Phrase Extraction ===");
    println!();
    println!("Gold standard:      {}", phrases.gold_standard_extractions);
    println!("System:             {}", phrases.system_extractions);
    println!("Complete matches:   {}", phrases.complete_matches.len());
    println!("Over-extractions:   {}", phrases.over_extractions.len());
    println!("Under-extractions:  {}", phrases.under_extractions.len());
    println!("Overlapping:        {}", phrases.overlapping_extractions.len());
    println!("Mismatches:         {}", phrases.complete_mismatches());
    println!("Total possible:     {}", phrases.total_possible_extractions());
    print_metrics(
        phrases.precision(),
        phrases.recall(),
        phrases.accuracy(),
        phrases.f_measure(),
    );

    println!();
    println!("=== Word-Set Extraction ===");
    println!();
    println!("Gold standard:      {}", word_sets.gold_standard_extractions);
    println!("System:             {}", word_sets.system_extractions);
    println!("Exact:              {}", word_sets.exact);
    println!("Partial:            {}", word_sets.partial);
    println!("Action only:        {}", word_sets.action_only);
    println!("Target only:        {}", word_sets.target_only);
    println!("Crossover:          {}", word_sets.crossover);
    println!("Unmatched system:   {}", word_sets.unmatched_system);
    println!("Unmatched gold:     {}", word_sets.unmatched_gold);
    print_metrics(
        word_sets.precision(),
        word_sets.recall(),
        word_sets.accuracy(),
        word_sets.f_measure(),
    );
}

fn print_metrics(precision: f64, recall: f64, accuracy: f64, f_measure: f64) {
    println!();
    println!("Precision:          {:.4}", precision);
    println!("Recall:             {:.4}", recall);
    println!("Accuracy:           {:.4}", accuracy);
    println!("F-measure:          {:.4}", f_measure);
}
