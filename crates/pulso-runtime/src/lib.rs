//! Runtime orchestrator — runs extraction, clustering and ranking over a batch.
//!
//! The similarity oracle is built once per orchestrator and shared by every
//! clustering call. A run yields both the unranked and the ranked cluster
//! sequences, plus counts and stage timings.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
