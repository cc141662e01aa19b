//! Orchestrator — drives a batch of responses through extraction, clustering and ranking.

use std::sync::Arc;
use std::time::Instant;

use pulso_cluster::ClusterEngine;
use pulso_core::{OrganizationMode, PulsoConfig, Response, Result};
use pulso_extract::{extract_all, ExtractionResult, WordInsight};
use pulso_infer::SimilarityOracle;
use pulso_rank::{RankedEntry, Ranker};
use tracing::info;

use crate::types::*;

/// Top-level orchestrator holding the configuration and the shared oracle.
pub struct Orchestrator {
    config: PulsoConfig,
    oracle: Arc<dyn SimilarityOracle>,
}

impl Orchestrator {
    /// Validate the configuration and build its oracle.
    pub fn new(config: PulsoConfig) -> Result<Self> {
        config.validate()?;
        let oracle = pulso_infer::create_oracle(&config);

        info!(
            "Orchestrator initialized: technique={}, oracle={}, organization={:?}",
            config.technique,
            oracle.name(),
            config.organization
        );

        Ok(Self { config, oracle })
    }

    /// Create with an explicit oracle (for testing).
    pub fn with_oracle(config: PulsoConfig, oracle: Arc<dyn SimilarityOracle>) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &PulsoConfig {
        &self.config
    }

    pub fn oracle(&self) -> &Arc<dyn SimilarityOracle> {
        &self.oracle
    }

    /// Extract insights from every response, in input order.
    pub fn extract(&self, responses: &[Response]) -> Result<Vec<ExtractionResult>> {
        let results = responses.iter().map(extract_all).collect::<Result<Vec<_>>>()?;

        let empty = results.iter().filter(|r| r.word_sets.is_empty()).count();
        if empty > 0 {
            info!("{} of {} responses yielded no word-set insights", empty, responses.len());
        }
        Ok(results)
    }

    /// Cluster all responses together and rank by frequency.
    pub fn organize_all_entries(&self, responses: &[Response]) -> Result<Organized> {
        let extractions = self.extract(responses)?;
        Ok(self.organize_extracted_all(&extractions))
    }

    /// Cluster each response category separately, rank clusters by frequency
    /// inside each category, then order categories by priority.
    pub fn organize_by_response_categories(&self, responses: &[Response]) -> Result<Organized> {
        let extractions = self.extract(responses)?;
        Ok(self.organize_extracted_by_category(responses, &extractions))
    }

    /// Run the configured organization and report on it.
    pub fn run(&self, responses: &[Response]) -> Result<RunReport> {
        let start = Instant::now();
        let extractions = self.extract(responses)?;
        let extraction_ms = start.elapsed().as_millis() as u64;

        let organized = match self.config.organization {
            OrganizationMode::All => self.organize_extracted_all(&extractions),
            OrganizationMode::Categories => {
                self.organize_extracted_by_category(responses, &extractions)
            }
        };

        let report = RunReport {
            technique: self.config.technique,
            oracle: self.oracle.name().to_string(),
            organization: self.config.organization,
            generated_at: chrono::Utc::now(),
            responses: responses.len(),
            responses_without_insights: extractions.iter().filter(|e| e.is_empty()).count(),
            insights: extractions.iter().map(|e| e.word_sets.len()).sum(),
            cluster_count: organized.cluster_count(),
            timings: StageTimings {
                extraction_ms,
                clustering_ms: organized.clustering_ms,
                ranking_ms: organized.ranking_ms,
            },
            phrases: extractions
                .iter()
                .filter(|e| !e.phrases.is_empty())
                .map(ExtractionResult::phrase_insight)
                .collect(),
            word_sets: word_sets(extractions.iter()),
            clusters: organized.clusters,
            ranked: organized.ranked,
        };

        info!(
            "Run complete: responses={}, insights={}, clusters={}, duration={}ms",
            report.responses,
            report.insights,
            report.cluster_count,
            start.elapsed().as_millis()
        );

        Ok(report)
    }

    fn organize_extracted_all(&self, extractions: &[ExtractionResult]) -> Organized {
        let engine = ClusterEngine::new(self.oracle.as_ref());

        let start = Instant::now();
        let clusters = engine.cluster(word_sets(extractions.iter()));
        let clustering_ms = start.elapsed().as_millis() as u64;

        let start = Instant::now();
        let ranked = Ranker::rank_by_frequency(clusters.clone());
        let ranking_ms = start.elapsed().as_millis() as u64;

        Organized {
            clusters: clusters.into_iter().map(RankedEntry::Cluster).collect(),
            ranked: ranked.into_iter().map(RankedEntry::Cluster).collect(),
            clustering_ms,
            ranking_ms,
        }
    }

    fn organize_extracted_by_category(
        &self,
        responses: &[Response],
        extractions: &[ExtractionResult],
    ) -> Organized {
        let engine = ClusterEngine::new(self.oracle.as_ref());
        let mut organized = Organized::default();

        // Stable, so responses keep input order inside a category
        let mut order: Vec<usize> = (0..responses.len()).collect();
        order.sort_by(|&a, &b| responses[a].category.cmp(&responses[b].category));

        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for i in order {
            let category = responses[i].category.as_str();
            if let Some((current, members)) = groups.last_mut() {
                if *current == category {
                    members.push(i);
                    continue;
                }
            }
            groups.push((category, vec![i]));
        }

        for (category, members) in groups {
            let start = Instant::now();
            let clusters = engine.cluster(word_sets(members.iter().map(|&i| &extractions[i])));
            organized.clustering_ms += start.elapsed().as_millis() as u64;

            let start = Instant::now();
            let ranked = Ranker::rank_by_frequency(clusters.clone());
            organized.ranking_ms += start.elapsed().as_millis() as u64;

            info!("Category {:?}: {} clusters", category, clusters.len());
            organized.clusters.push(RankedEntry::Category(category.to_string()));
            organized.clusters.extend(clusters.into_iter().map(RankedEntry::Cluster));
            organized.ranked.push(RankedEntry::Category(category.to_string()));
            organized.ranked.extend(ranked.into_iter().map(RankedEntry::Cluster));
        }

        let start = Instant::now();
        organized.ranked = Ranker::rank_by_category(
            std::mem::take(&mut organized.ranked),
            &self.config.priority(),
        );
        organized.ranking_ms += start.elapsed().as_millis() as u64;

        organized
    }
}

fn word_sets<'a>(extractions: impl Iterator<Item = &'a ExtractionResult>) -> Vec<WordInsight> {
    extractions.flat_map(|e| e.word_sets.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulso_core::Technique;
    use pulso_infer::ExactOracle;

    fn response(id: u32, category: &str, text: &str, tags: &str) -> Response {
        Response::new(id, text, category, tags.split_whitespace().map(String::from).collect())
    }

    fn exact(organization: OrganizationMode) -> Orchestrator {
        let config = PulsoConfig {
            organization,
            ..Default::default()
        };
        Orchestrator::with_oracle(config, Arc::new(ExactOracle))
    }

    fn sample() -> Vec<Response> {
        vec![
            response(1, "Others", "Magdasal sa Diyos", "VB CCT NNP"),
            response(2, "Disaster Relief", "Mamigay ng pagkain", "VB CCB NNC"),
            response(3, "Others", "magdasal sa simbahan", "VB CCT NNC"),
            response(4, "Sanitation", "Maglinis ng kanal", "VB CCB NNC"),
            response(5, "Disaster Relief", "Salamat po", "NNC RBI"),
        ]
    }

    fn labels(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().filter_map(RankedEntry::as_category).collect()
    }

    #[test]
    fn test_new_validates_config() {
        let bad = PulsoConfig {
            ngram: 5,
            ..Default::default()
        };
        assert!(Orchestrator::new(bad).is_err());

        let orch = Orchestrator::new(PulsoConfig::default()).unwrap();
        assert_eq!(orch.oracle().name(), "dice");
        assert_eq!(orch.config().technique, Technique::Dice);
    }

    #[test]
    fn test_extract_fails_on_mismatch() {
        let orch = exact(OrganizationMode::All);
        let responses = vec![response(1, "Others", "Maglinis ng kanal", "VB NNC")];
        assert!(orch.extract(&responses).is_err());
    }

    #[test]
    fn test_organize_all_entries() {
        let orch = exact(OrganizationMode::All);
        let organized = orch.organize_all_entries(&sample()).unwrap();

        assert_eq!(organized.cluster_count(), 3);
        assert!(labels(&organized.clusters).is_empty());
        let top = organized.ranked[0].as_cluster().unwrap();
        assert_eq!(top.action_string(), "magdasal");
        assert_eq!(top.frequency, 2);
        assert_eq!(top.target_string(), "diyos, simbahan");
    }

    #[test]
    fn test_organize_by_response_categories() {
        let orch = exact(OrganizationMode::Categories);
        let organized = orch.organize_by_response_categories(&sample()).unwrap();

        // Unranked: categories in sorted order
        assert_eq!(
            labels(&organized.clusters),
            vec!["Disaster Relief", "Others", "Sanitation"]
        );
        // Ranked: priority order, unknown category dropped
        assert_eq!(labels(&organized.ranked), vec!["Disaster Relief", "Others"]);
        assert_eq!(organized.ranked.len(), 4);
    }

    #[test]
    fn test_run_report() {
        let orch = exact(OrganizationMode::All);
        let report = orch.run(&sample()).unwrap();

        assert_eq!(report.responses, 5);
        assert_eq!(report.responses_without_insights, 1);
        assert_eq!(report.insights, 4);
        assert_eq!(report.cluster_count, 3);
        assert_eq!(report.oracle, "exact");
        assert_eq!(report.phrases.len(), 4);
        assert_eq!(report.ranked_records().len(), 3);
    }

    #[test]
    fn test_empty_batch() {
        let orch = exact(OrganizationMode::Categories);
        let report = orch.run(&[]).unwrap();
        assert_eq!(report.cluster_count, 0);
        assert!(report.ranked.is_empty());
    }
}
