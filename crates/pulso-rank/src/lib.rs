//! Ranking — orders clusters for reporting.
//!
//! Clusters are ranked by frequency within a partition. When responses are
//! organized by category, whole category sections are then reordered by a
//! priority list of category names.

pub mod ranker;
pub mod types;

pub use ranker::Ranker;
pub use types::*;
