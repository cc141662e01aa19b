//! Pulso Cluster — groups word-set insights whose actions are similar.
//!
//! `ClusterEngine` walks a work queue of insights, absorbing every
//! candidate whose action matches the seed, then merges each group into a
//! `Cluster` with deduplicated ids, action variants and lexicalized targets.

pub mod engine;
pub mod merge;
pub mod types;

pub use engine::{Affinity, ClusterEngine, MERGE_THRESHOLD};
pub use types::*;
