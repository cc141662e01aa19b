//! Ranking types.

use pulso_cluster::{Cluster, ClusterRecord};
use serde::{Deserialize, Serialize};

/// One element of a ranked sequence: a category label opening a section,
/// or a cluster belonging to the most recent label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankedEntry {
    Category(String),
    Cluster(Cluster),
}

impl RankedEntry {
    pub fn as_cluster(&self) -> Option<&Cluster> {
        match self {
            Self::Cluster(cluster) => Some(cluster),
            Self::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Category(label) => Some(label),
            Self::Cluster(_) => None,
        }
    }

    /// Flatten for report writers.
    pub fn to_record(&self) -> RankedRecord {
        match self {
            Self::Category(label) => RankedRecord::Category(label.clone()),
            Self::Cluster(cluster) => RankedRecord::Cluster(cluster.to_record()),
        }
    }
}

/// Serialized form of a [`RankedEntry`]: a bare label string or a flat cluster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankedRecord {
    Category(String),
    Cluster(ClusterRecord),
}
