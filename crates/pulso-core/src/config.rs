//! Run configuration: similarity technique, organization mode, category priority.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Category ranking used when no override is configured.
pub const DEFAULT_PRIORITY_CATEGORIES: &[&str] = &[
    "Information Campaign and Capacity Building",
    "Disaster Relief",
    "Community-wide Logistic support for disaster response",
    "Infrastructure Maintenance and Management",
    "Early Warning System",
    "Preparedness for emergency",
    "Local government accountability",
    "Filipino values",
    "Others",
];

/// Similarity backend used for clustering actions and targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    /// Sørensen-Dice coefficient over character n-grams.
    #[default]
    Dice,
    /// Cosine similarity over word2vec vectors.
    Word2Vec,
    /// Cosine similarity over fastText vectors.
    FastText,
}

impl Technique {
    /// Whether this technique needs a word vector file.
    pub fn needs_vectors(&self) -> bool {
        matches!(self, Self::Word2Vec | Self::FastText)
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dice => write!(f, "dice"),
            Self::Word2Vec => write!(f, "word2vec"),
            Self::FastText => write!(f, "fasttext"),
        }
    }
}

impl FromStr for Technique {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dice" => Ok(Self::Dice),
            "word2vec" => Ok(Self::Word2Vec),
            "fasttext" => Ok(Self::FastText),
            other => Err(Error::Config(format!("unknown clustering technique: {}", other))),
        }
    }
}

/// How responses are partitioned before clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationMode {
    /// Cluster every response together, rank by frequency.
    #[default]
    All,
    /// Cluster per response category, rank by category priority then frequency.
    Categories,
}

impl FromStr for OrganizationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "categories" => Ok(Self::Categories),
            other => Err(Error::Config(format!("unknown organization mode: {}", other))),
        }
    }
}

/// Top-level Pulso configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulsoConfig {
    #[serde(default)]
    pub technique: Technique,
    /// Shingle size for the Dice coefficient (2 or 3).
    #[serde(default = "default_ngram")]
    pub ngram: usize,
    #[serde(default)]
    pub organization: OrganizationMode,
    /// Category ranking override. Empty means [`DEFAULT_PRIORITY_CATEGORIES`].
    #[serde(default)]
    pub priority_categories: Vec<String>,
    /// Word vector file for the embedding techniques.
    #[serde(default)]
    pub vectors_path: Option<PathBuf>,
}

fn default_ngram() -> usize {
    3
}

impl Default for PulsoConfig {
    fn default() -> Self {
        Self {
            technique: Technique::Dice,
            ngram: default_ngram(),
            organization: OrganizationMode::All,
            priority_categories: Vec::new(),
            vectors_path: None,
        }
    }
}

impl PulsoConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(technique) = std::env::var("PULSO_TECHNIQUE") {
            config.technique = technique.parse()?;
        }
        if let Some(ngram) = std::env::var("PULSO_NGRAM")
            .ok()
            .and_then(|n| n.parse().ok())
        {
            config.ngram = ngram;
        }
        if let Ok(organization) = std::env::var("PULSO_ORGANIZATION") {
            config.organization = organization.parse()?;
        }
        if let Ok(priority) = std::env::var("PULSO_PRIORITY") {
            config.priority_categories = parse_priority_list(&priority);
        }
        config.vectors_path = std::env::var("PULSO_VECTORS").ok().map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(2..=3).contains(&self.ngram) {
            return Err(Error::Config(format!(
                "ngram must be 2 or 3, got {}",
                self.ngram
            )));
        }
        if self.technique.needs_vectors() && self.vectors_path.is_none() {
            return Err(Error::Config(format!(
                "technique {} requires a vectors_path",
                self.technique
            )));
        }
        Ok(())
    }

    /// Effective category ranking.
    pub fn priority(&self) -> Vec<String> {
        if self.priority_categories.is_empty() {
            DEFAULT_PRIORITY_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            self.priority_categories.clone()
        }
    }
}

fn parse_priority_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}
