//! Runtime types.

use chrono::{DateTime, Utc};
use pulso_core::{OrganizationMode, Technique};
use pulso_extract::{PhraseInsight, WordInsight};
use pulso_rank::{RankedEntry, RankedRecord};
use serde::Serialize;

/// Clusters of one organization pass.
///
/// In category mode both sequences are interleaved with category labels;
/// otherwise they hold clusters only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Organized {
    pub clusters: Vec<RankedEntry>,
    pub ranked: Vec<RankedEntry>,
    #[serde(rename = "clusteringMs")]
    pub clustering_ms: u64,
    #[serde(rename = "rankingMs")]
    pub ranking_ms: u64,
}

impl Organized {
    /// Number of clusters, labels excluded.
    pub fn cluster_count(&self) -> usize {
        self.clusters.iter().filter(|e| e.as_cluster().is_some()).count()
    }
}

/// Elapsed time per stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageTimings {
    #[serde(rename = "extractionMs")]
    pub extraction_ms: u64,
    #[serde(rename = "clusteringMs")]
    pub clustering_ms: u64,
    #[serde(rename = "rankingMs")]
    pub ranking_ms: u64,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub technique: Technique,
    pub oracle: String,
    pub organization: OrganizationMode,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub responses: usize,
    #[serde(rename = "responsesWithoutInsights")]
    pub responses_without_insights: usize,
    pub insights: usize,
    #[serde(rename = "clusterCount")]
    pub cluster_count: usize,
    pub timings: StageTimings,
    pub phrases: Vec<PhraseInsight>,
    #[serde(rename = "wordSets")]
    pub word_sets: Vec<WordInsight>,
    pub clusters: Vec<RankedEntry>,
    pub ranked: Vec<RankedEntry>,
}

impl RunReport {
    pub fn cluster_records(&self) -> Vec<RankedRecord> {
        self.clusters.iter().map(RankedEntry::to_record).collect()
    }

    pub fn ranked_records(&self) -> Vec<RankedRecord> {
        self.ranked.iter().map(RankedEntry::to_record).collect()
    }
}
