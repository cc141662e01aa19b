//! Queue-driven greedy clustering.

use std::collections::VecDeque;

use pulso_extract::WordInsight;
use pulso_infer::SimilarityOracle;
use tracing::{debug, info};

use crate::merge::RawCluster;
use crate::types::Cluster;

/// Similarity a candidate must exceed to join a cluster.
pub const MERGE_THRESHOLD: f64 = 0.5;

/// How a candidate relates to a cluster head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    /// Same word, or a perfect score.
    Duplicate,
    /// Strictly above [`MERGE_THRESHOLD`].
    Similar,
    Distinct,
}

/// Clusters word-set insights with a borrowed similarity oracle.
pub struct ClusterEngine<'a> {
    oracle: &'a dyn SimilarityOracle,
}

impl<'a> ClusterEngine<'a> {
    pub fn new(oracle: &'a dyn SimilarityOracle) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &dyn SimilarityOracle {
        self.oracle
    }

    /// Compare two lowercased strings.
    pub fn affinity(&self, head: &str, candidate: &str) -> Affinity {
        if head == candidate {
            return Affinity::Duplicate;
        }
        let score = self.oracle.similarity(head, candidate);
        if score == 1.0 {
            Affinity::Duplicate
        } else if score > MERGE_THRESHOLD {
            Affinity::Similar
        } else {
            Affinity::Distinct
        }
    }

    /// Cluster insights in input order.
    ///
    /// The first remaining insight seeds a cluster; every later insight whose
    /// action matches the seed's is taken out of the queue. Duplicates fold
    /// into the seed, similar insights join as members. First match in scan
    /// order wins.
    pub fn cluster(&self, insights: Vec<WordInsight>) -> Vec<Cluster> {
        let start = std::time::Instant::now();
        let input = insights.len();
        let mut queue: VecDeque<WordInsight> = insights.into();
        let mut clusters = Vec::new();

        while let Some(mut seed) = queue.pop_front() {
            seed.action = seed.action.to_lowercase();
            let mut raw = RawCluster::new(seed);

            let mut rest = VecDeque::with_capacity(queue.len());
            for mut candidate in queue.drain(..) {
                candidate.action = candidate.action.to_lowercase();
                match self.affinity(raw.action(), &candidate.action) {
                    Affinity::Duplicate => raw.absorb(candidate),
                    Affinity::Similar => raw.add_member(candidate),
                    Affinity::Distinct => rest.push_back(candidate),
                }
            }
            queue = rest;

            debug!("Cluster {:?} absorbed {} insights", raw.action(), raw.frequency());
            clusters.push(self.merge(raw));
        }

        info!(
            "Clustering complete: insights={}, clusters={}, oracle={}, duration={}ms",
            input,
            clusters.len(),
            self.oracle.name(),
            start.elapsed().as_millis()
        );

        clusters
    }
}
