//! Pre-trained word vectors and the cosine-similarity oracle.
//!
//! Vectors are read from the word2vec text format that both word2vec and
//! fastText export: an optional `"<count> <dim>"` header, then one
//! `word v1 v2 ... vdim` line per word. The whole vocabulary is held in a
//! single row-major matrix.

use std::collections::HashMap;
use std::path::Path;

use ndarray::{Array2, ArrayView1};
use pulso_core::{Error, Result, Technique};
use tracing::{debug, info, warn};

use crate::oracle::SimilarityOracle;

/// Fixed vocabulary of word vectors.
pub struct WordVectors {
    index: HashMap<String, usize>,
    matrix: Array2<f32>,
}

impl WordVectors {
    /// Load vectors from a word2vec text file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Vectors(format!("failed to read {}: {}", path.display(), e))
        })?;
        let vectors = Self::parse(&raw)?;
        info!(
            "Word vectors loaded: words={}, dim={}, file={}",
            vectors.len(),
            vectors.dimension(),
            path.display()
        );
        Ok(vectors)
    }

    /// Parse the word2vec text format.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut entries: Vec<(String, Vec<f32>)> = Vec::new();
        let mut dim: Option<usize> = None;

        for (line_no, line) in raw.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(w) => w,
                None => continue,
            };
            let values: std::result::Result<Vec<f32>, _> =
                fields.map(|v| v.parse::<f32>()).collect();
            let values = match values {
                Ok(v) => v,
                Err(_) => {
                    warn!("Skipping malformed vector line {}", line_no + 1);
                    continue;
                }
            };

            // "<count> <dim>" header
            if line_no == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }
            if values.is_empty() {
                warn!("Skipping vector line {} with no values", line_no + 1);
                continue;
            }

            let expected = *dim.get_or_insert(values.len());
            if values.len() != expected {
                warn!(
                    "Skipping vector line {}: expected {} values, found {}",
                    line_no + 1,
                    expected,
                    values.len()
                );
                continue;
            }
            entries.push((word.to_string(), values));
        }

        Self::from_entries(entries)
    }

    /// Build a vocabulary from `(word, vector)` pairs. Later duplicates are ignored.
    pub fn from_entries(entries: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let dim = entries
            .first()
            .map(|(_, v)| v.len())
            .ok_or_else(|| Error::Vectors("vocabulary is empty".into()))?;

        let mut index = HashMap::with_capacity(entries.len());
        let mut data = Vec::with_capacity(entries.len() * dim);
        for (word, values) in entries {
            if values.len() != dim {
                return Err(Error::Vectors(format!(
                    "vector for {:?} has {} values, expected {}",
                    word,
                    values.len(),
                    dim
                )));
            }
            if index.contains_key(&word) {
                debug!("Duplicate vector for {:?} ignored", word);
                continue;
            }
            index.insert(word, index.len());
            data.extend(values);
        }

        let matrix = Array2::from_shape_vec((index.len(), dim), data)
            .map_err(|e| Error::Vectors(e.to_string()))?;
        Ok(Self { index, matrix })
    }

    /// Vector for a word, if it is in the vocabulary.
    pub fn get(&self, word: &str) -> Option<ArrayView1<'_, f32>> {
        self.index.get(word).map(|&row| self.matrix.row(row))
    }

    /// Cosine similarity, or None if either word is out of vocabulary.
    pub fn cosine(&self, a: &str, b: &str) -> Option<f64> {
        let va = self.get(a)?;
        let vb = self.get(b)?;
        let norm_a = va.dot(&va).sqrt();
        let norm_b = vb.dot(&vb).sqrt();
        if norm_a < 1e-9 || norm_b < 1e-9 {
            return Some(0.0);
        }
        Some((va.dot(&vb) / (norm_a * norm_b)) as f64)
    }

    pub fn dimension(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Semantic oracle over word2vec or fastText vectors.
pub struct EmbeddingOracle {
    vectors: WordVectors,
    technique: Technique,
}

impl EmbeddingOracle {
    pub fn new(vectors: WordVectors, technique: Technique) -> Self {
        Self { vectors, technique }
    }

    /// Load the vector file configured for an embedding technique.
    pub fn load(path: &Path, technique: Technique) -> Result<Self> {
        if !technique.needs_vectors() {
            return Err(Error::Config(format!(
                "{} is not an embedding technique",
                technique
            )));
        }
        Ok(Self::new(WordVectors::load(path)?, technique))
    }

    pub fn vectors(&self) -> &WordVectors {
        &self.vectors
    }
}

impl SimilarityOracle for EmbeddingOracle {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match self.vectors.cosine(a, b) {
            Some(score) => score.clamp(0.0, 1.0),
            None => {
                debug!("{:?} or {:?} not in vocabulary", a, b);
                0.0
            }
        }
    }

    fn name(&self) -> &str {
        match self.technique {
            Technique::FastText => "fasttext",
            _ => "word2vec",
        }
    }
}
