//! Frequency and category-priority ranking.

use pulso_cluster::Cluster;
use tracing::{info, warn};

use crate::types::RankedEntry;

/// Stateless ranking strategies.
pub struct Ranker;

impl Ranker {
    /// Sort clusters by descending frequency. Ties keep their input order.
    pub fn rank_by_frequency(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
        clusters.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        clusters
    }

    /// Reorder category sections by a priority list.
    ///
    /// Labels match case-insensitively and keep their input spelling. All
    /// sections with the same label are gathered under the first one.
    /// Sections whose category is not in `priority` are dropped, as are
    /// clusters that precede every label.
    pub fn rank_by_category(entries: Vec<RankedEntry>, priority: &[String]) -> Vec<RankedEntry> {
        let mut sections = Self::sections(entries);
        let mut placed = vec![false; sections.len()];
        let mut ranked = Vec::new();

        for category in priority {
            let wanted = category.to_lowercase();
            let mut label_emitted = false;
            for (i, (label, clusters)) in sections.iter_mut().enumerate() {
                if placed[i] || label.to_lowercase() != wanted {
                    continue;
                }
                placed[i] = true;
                if !label_emitted {
                    ranked.push(RankedEntry::Category(label.clone()));
                    label_emitted = true;
                }
                ranked.extend(clusters.drain(..).map(RankedEntry::Cluster));
            }
        }

        for ((label, clusters), _) in sections.iter().zip(&placed).filter(|(_, p)| !**p) {
            info!(
                "Category {:?} not in priority list, dropping {} clusters",
                label,
                clusters.len()
            );
        }

        ranked
    }

    fn sections(entries: Vec<RankedEntry>) -> Vec<(String, Vec<Cluster>)> {
        let mut sections: Vec<(String, Vec<Cluster>)> = Vec::new();
        let mut unlabelled = 0;

        for entry in entries {
            match entry {
                RankedEntry::Category(label) => sections.push((label, Vec::new())),
                RankedEntry::Cluster(cluster) => match sections.last_mut() {
                    Some((_, clusters)) => clusters.push(cluster),
                    None => unlabelled += 1,
                },
            }
        }

        if unlabelled > 0 {
            warn!("{} clusters precede any category label and were dropped", unlabelled);
        }
        sections
    }
}
