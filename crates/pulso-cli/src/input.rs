//! JSON input files: tagged responses and insight sets for evaluation.

use std::path::Path;

use anyhow::Context;
use pulso_core::Response;
use pulso_extract::{parse_stanford, PhraseInsight, WordInsight};
use serde::Deserialize;

/// Tags given either as a list or as one space-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagsInput {
    List(Vec<String>),
    Joined(String),
}

impl TagsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(tags) => tags,
            Self::Joined(tags) => tags.split_whitespace().map(String::from).collect(),
        }
    }
}

/// One response as written by the tagging step.
///
/// Either `text` with `tags`, or Stanford `word|TAG` notation in `tagged`.
#[derive(Debug, Deserialize)]
struct ResponseInput {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    tags: Option<TagsInput>,
    #[serde(default)]
    tagged: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

/// Insight sets compared by `pulso evaluate`. The `organize` output is
/// accepted as a system file as-is.
#[derive(Debug, Default, Deserialize)]
pub struct InsightFile {
    #[serde(default)]
    pub phrases: Vec<PhraseInsight>,
    #[serde(default, alias = "wordSets")]
    pub word_sets: Vec<WordInsight>,
}

/// Load responses. Missing ids are numbered from 1 in file order.
pub fn load_responses(path: &Path) -> anyhow::Result<Vec<Response>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let inputs: Vec<ResponseInput> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid responses file {}", path.display()))?;

    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| {
            let id = input.id.unwrap_or(i as u32 + 1);
            let (text, tags) = match (input.tagged, input.text, input.tags) {
                (Some(tagged), _, _) => parse_stanford(&tagged)
                    .with_context(|| format!("response #{}", id))?,
                (None, Some(text), Some(tags)) => (text, tags.into_vec()),
                _ => anyhow::bail!("response #{} needs `text` with `tags`, or `tagged`", id),
            };
            let mut response = Response::new(id, text, input.category, tags);
            response.language = input.language;
            Ok(response)
        })
        .collect()
}

pub fn load_insights(path: &Path) -> anyhow::Result<InsightFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid insight file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_responses_all_forms() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "responses.json",
            r#"[
                {"text": "Maglinis ng kanal", "category": "Others", "tags": ["VB", "CCB", "NNC"]},
                {"id": 7, "text": "Itapon ang basura", "category": "Others", "tags": "VB DTC NNC", "language": "tl"},
                {"tagged": "Magtanim|VB ng|CCB puno|NNC", "category": "Others"}
            ]"#,
        );

        let responses = load_responses(&path).unwrap();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, 1);
        assert_eq!(responses[0].tags, vec!["VB", "CCB", "NNC"]);
        assert_eq!(responses[1].id, 7);
        assert_eq!(responses[1].language.as_deref(), Some("tl"));
        assert_eq!(responses[2].id, 3);
        assert_eq!(responses[2].text, "Magtanim ng puno");
        assert_eq!(responses[2].tags, vec!["VB", "CCB", "NNC"]);
    }

    #[test]
    fn test_load_responses_missing_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "responses.json", r#"[{"text": "Maglinis", "category": "Others"}]"#);
        assert!(load_responses(&path).is_err());
        assert!(load_responses(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_load_insights() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "gold.json",
            r#"{
                "phrases": [{"response_id": 1, "phrases": ["Maglinis ng kanal"]}],
                "wordSets": [{"response_id": 1, "action": "Maglinis", "targets": ["kanal"]}]
            }"#,
        );
        let insights = load_insights(&path).unwrap();
        assert_eq!(insights.phrases.len(), 1);
        assert_eq!(insights.word_sets[0].action, "Maglinis");
    }
}
