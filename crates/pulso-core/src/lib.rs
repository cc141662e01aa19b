//! Pulso Core — survey response model, technique selection, configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{OrganizationMode, PulsoConfig, Technique, DEFAULT_PRIORITY_CATEGORIES};
pub use error::{Error, Result};
pub use types::Response;
