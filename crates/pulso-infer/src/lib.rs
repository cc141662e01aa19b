//! Pulso Infer — similarity oracles for clustering actions and targets.
//!
//! Provides the `SimilarityOracle` trait. `DiceOracle` compares strings
//! lexically; `EmbeddingOracle` compares words with pre-trained word2vec or
//! fastText vectors. When the configured vector file cannot be loaded,
//! `ExactOracle` is used and clustering falls back to exact matches only.

pub mod cache;
pub mod dice;
pub mod oracle;
pub mod vectors;

pub use cache::{CachedOracle, ScoreCache};
pub use dice::DiceOracle;
pub use oracle::{ExactOracle, SimilarityOracle};
pub use vectors::{EmbeddingOracle, WordVectors};

use std::sync::Arc;

use pulso_core::{PulsoConfig, Technique};

/// Create the oracle selected by the configuration, once per run.
///
/// Every backend is wrapped in a `CachedOracle`.
pub fn create_oracle(config: &PulsoConfig) -> Arc<dyn SimilarityOracle> {
    let backend: Box<dyn SimilarityOracle> = match config.technique {
        Technique::Dice => {
            tracing::info!("Using Dice oracle (k={})", config.ngram);
            Box::new(DiceOracle::new(config.ngram))
        }
        Technique::Word2Vec | Technique::FastText => match config.vectors_path.as_deref() {
            Some(path) => match EmbeddingOracle::load(path, config.technique) {
                Ok(oracle) => {
                    tracing::info!(
                        "Using {} oracle (dim={})",
                        config.technique,
                        oracle.vectors().dimension()
                    );
                    Box::new(oracle)
                }
                Err(e) => {
                    tracing::warn!(
                        "{} vectors unavailable: {}. Falling back to exact matching.",
                        config.technique,
                        e
                    );
                    Box::new(ExactOracle)
                }
            },
            None => {
                tracing::warn!(
                    "No vectors configured for {}. Falling back to exact matching.",
                    config.technique
                );
                Box::new(ExactOracle)
            }
        },
    };

    Arc::new(CachedOracle::new(backend))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_create_dice() {
        let oracle = create_oracle(&PulsoConfig::default());
        assert_eq!(oracle.name(), "dice");
        assert_eq!(oracle.similarity("maglinis", "maglinis"), 1.0);
    }

    #[test]
    fn test_create_embedding() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"maglinis 1.0 0.0\nlinisin 1.0 0.1\n").unwrap();

        let config = PulsoConfig {
            technique: Technique::Word2Vec,
            vectors_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let oracle = create_oracle(&config);
        assert_eq!(oracle.name(), "word2vec");
        assert!(oracle.similarity("maglinis", "linisin") > 0.9);
    }

    #[test]
    fn test_missing_vectors_fall_back() {
        let config = PulsoConfig {
            technique: Technique::FastText,
            vectors_path: Some("/nonexistent/cc.tl.300.vec".into()),
            ..Default::default()
        };
        let oracle = create_oracle(&config);
        assert_eq!(oracle.name(), "exact");
        assert_eq!(oracle.similarity("maglinis", "linisin"), 0.0);
    }
}
