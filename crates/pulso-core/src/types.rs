//! Survey response model.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One free-text survey response with its tagger output.
///
/// `tags` holds one part-of-speech tag per whitespace-separated token of
/// `text`. Tags and category are filled in by upstream collaborators before
/// extraction runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// 1-based row number, stable per input order.
    pub id: u32,
    pub text: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Language identifier (`tl`, `en`, ...), carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Response {
    pub fn new(
        id: u32,
        text: impl Into<String>,
        category: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            tags,
            language: None,
        }
    }

    /// Whitespace-separated tokens of the response text.
    pub fn tokens(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// Zip tokens with their tags.
    ///
    /// Fails when the tagger produced a different number of tags than there
    /// are tokens.
    pub fn tagged_tokens(&self) -> Result<Vec<(&str, &str)>> {
        let tokens = self.tokens();
        if tokens.len() != self.tags.len() {
            return Err(Error::Extraction(format!(
                "response #{}: {} tokens but {} tags",
                self.id,
                tokens.len(),
                self.tags.len()
            )));
        }
        Ok(tokens
            .into_iter()
            .zip(self.tags.iter().map(String::as_str))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tagged_tokens() {
        let response = Response::new(1, "Maglinis ng  kanal", "Sanitation", tags(&["VB", "CCP", "NN"]));
        let tagged = response.tagged_tokens().unwrap();
        assert_eq!(tagged, vec![("Maglinis", "VB"), ("ng", "CCP"), ("kanal", "NN")]);
    }

    #[test]
    fn test_tag_count_mismatch() {
        let response = Response::new(7, "Maglinis ng kanal", "Sanitation", tags(&["VB", "NN"]));
        let err = response.tagged_tokens().unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
        assert!(err.to_string().contains("#7"));
    }

    #[test]
    fn test_language_is_optional_in_json() {
        let json = r#"{"id": 3, "text": "a", "category": "Others", "tags": ["NN"]}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        assert_eq!(response.language, None);
        assert_eq!(response.tags, vec!["NN"]);
    }
}
