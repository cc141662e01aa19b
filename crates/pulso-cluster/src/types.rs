//! Cluster types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique response ids of a cluster, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseIds(BTreeSet<u32>);

impl ResponseIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u32) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for ResponseIds {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders as `"1|2|5"`.
impl fmt::Display for ResponseIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

/// A head target and the similar targets collapsed into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetGroup {
    pub head: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

impl TargetGroup {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            variants: Vec::new(),
        }
    }
}

/// Renders as `head` or `head (w2, ..., wN)`.
impl fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.head)?;
        if !self.variants.is_empty() {
            write!(f, " ({})", self.variants.join(", "))?;
        }
        Ok(())
    }
}

/// One clustered idea: the insights judged similar enough to report together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub response_ids: ResponseIds,
    /// Number of word-set insights merged into this cluster.
    pub frequency: usize,
    /// Distinct action variants, seed action first.
    pub actions: Vec<String>,
    pub targets: Vec<TargetGroup>,
}

impl Cluster {
    pub fn action_string(&self) -> String {
        self.actions.join(", ")
    }

    pub fn target_string(&self) -> String {
        self.targets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Flatten into the delimiter-joined record written to reports.
    pub fn to_record(&self) -> ClusterRecord {
        ClusterRecord {
            response_ids: self.response_ids.to_string(),
            frequency: self.frequency,
            action: self.action_string(),
            targets: self.target_string(),
        }
    }
}

/// Flat `[response_ids, frequency, action, targets]` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRecord {
    #[serde(rename = "responseIds")]
    pub response_ids: String,
    pub frequency: usize,
    pub action: String,
    pub targets: String,
}
