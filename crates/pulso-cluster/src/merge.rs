//! Collapsing a raw cluster into its final form.

use std::collections::HashSet;

use pulso_extract::WordInsight;

use crate::engine::{Affinity, ClusterEngine};
use crate::types::{Cluster, ResponseIds, TargetGroup};

/// A seed insight with everything the scan absorbed into it.
#[derive(Debug, Clone)]
pub struct RawCluster {
    seed: WordInsight,
    /// Ids of exact duplicates, in scan order.
    duplicate_ids: Vec<u32>,
    /// Targets of exact duplicates, appended after the seed's own.
    targets: Vec<String>,
    members: Vec<WordInsight>,
    frequency: usize,
}

impl RawCluster {
    /// Start a cluster from a seed whose action is already lowercased.
    pub fn new(seed: WordInsight) -> Self {
        let targets = seed.targets.clone();
        Self {
            seed,
            duplicate_ids: Vec::new(),
            targets,
            members: Vec::new(),
            frequency: 1,
        }
    }

    pub fn action(&self) -> &str {
        &self.seed.action
    }

    pub fn frequency(&self) -> usize {
        self.frequency
    }

    /// Fold an exact duplicate into the seed; its action is dropped.
    pub fn absorb(&mut self, duplicate: WordInsight) {
        self.duplicate_ids.push(duplicate.response_id);
        self.targets.extend(duplicate.targets);
        self.frequency += 1;
    }

    /// Keep a similar insight as a member; its action becomes a variant.
    pub fn add_member(&mut self, member: WordInsight) {
        self.members.push(member);
        self.frequency += 1;
    }
}

/// Remove repeated strings, keeping the first occurrence.
pub fn dedup_ordered(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

impl ClusterEngine<'_> {
    /// Merge a raw cluster: ids, action variants and targets of the seed
    /// come first, members follow in scan order.
    pub fn merge(&self, raw: RawCluster) -> Cluster {
        let RawCluster {
            seed,
            duplicate_ids,
            mut targets,
            members,
            frequency,
        } = raw;

        let mut response_ids = ResponseIds::new();
        response_ids.insert(seed.response_id);
        for id in duplicate_ids {
            response_ids.insert(id);
        }

        let mut actions = vec![seed.action];
        for member in members {
            response_ids.insert(member.response_id);
            actions.push(member.action);
            targets.extend(member.targets);
        }

        Cluster {
            response_ids,
            frequency,
            actions: dedup_ordered(actions),
            targets: self.lexicalize_targets(dedup_ordered(targets)),
        }
    }

    /// Group similar targets under the first word of each group.
    ///
    /// Words are lowercased; duplicates of the head vanish and words above
    /// the merge threshold become its variants.
    pub fn lexicalize_targets(&self, targets: Vec<String>) -> Vec<TargetGroup> {
        let mut queue: std::collections::VecDeque<String> =
            targets.into_iter().map(|t| t.to_lowercase()).collect();
        let mut groups = Vec::new();

        while let Some(head) = queue.pop_front() {
            let mut group = TargetGroup::new(head);
            let mut rest = std::collections::VecDeque::with_capacity(queue.len());
            for word in queue.drain(..) {
                match self.affinity(&group.head, &word) {
                    Affinity::Duplicate => {}
                    Affinity::Similar => group.variants.push(word),
                    Affinity::Distinct => rest.push_back(word),
                }
            }
            queue = rest;
            groups.push(group);
        }

        groups
    }
}
