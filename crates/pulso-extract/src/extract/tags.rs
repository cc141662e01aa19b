//! Tag predicates for the Filipino part-of-speech tagset (`VBW`,
//! `NNC`, `JJD_CCP`, `CCA`, `PMC`).
//!
//! Tags are matched by substring, so `VBTS` is a verb and `NNCP` a noun.

/// Kind of word that can land an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadKind {
    /// Common or proper noun (`NN*`).
    Noun,
    /// Foreign word (`FW`).
    Foreign,
}

impl HeadKind {
    fn marker(&self) -> &'static str {
        match self {
            Self::Noun => "NN",
            Self::Foreign => "FW",
        }
    }

    /// Whether the following tag keeps the current noun group open.
    ///
    /// Another head of the same kind, a comma (`PMC`) or a conjunction (`CCA`)
    /// continues the group.
    pub fn continues(&self, next_tag: &str) -> bool {
        next_tag.contains(self.marker()) || next_tag.contains("PMC") || next_tag.contains("CCA")
    }
}

pub fn is_verb(tag: &str) -> bool {
    tag.contains("VB")
}

/// Descriptive adjectives (`JJD`, `JJD_CCP`) also open an insight.
pub fn is_descriptive(tag: &str) -> bool {
    tag.contains("JJD")
}

/// Whether a token with this tag starts recording.
///
/// A verb in the final position cannot reach a noun, so it does not open.
pub fn opens_insight(tag: &str, is_last: bool) -> bool {
    (is_verb(tag) && !is_last) || is_descriptive(tag)
}

/// Head kind of a tag. Nouns take precedence over foreign words.
pub fn head_kind(tag: &str) -> Option<HeadKind> {
    if tag.contains("NN") {
        Some(HeadKind::Noun)
    } else if tag.contains("FW") {
        Some(HeadKind::Foreign)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openers() {
        assert!(opens_insight("VBW", false));
        assert!(!opens_insight("VBW", true));
        assert!(opens_insight("JJD", true));
        assert!(opens_insight("JJD_CCP", false));
        assert!(!opens_insight("NNC", false));
    }

    #[test]
    fn test_head_kind() {
        assert_eq!(head_kind("NNC"), Some(HeadKind::Noun));
        assert_eq!(head_kind("FW"), Some(HeadKind::Foreign));
        assert_eq!(head_kind("CCP"), None);
    }

    #[test]
    fn test_continuation() {
        assert!(HeadKind::Noun.continues("NNP"));
        assert!(HeadKind::Noun.continues("PMC"));
        assert!(HeadKind::Noun.continues("CCA"));
        assert!(!HeadKind::Noun.continues("FW"));
        assert!(!HeadKind::Noun.continues("CCP"));
        assert!(HeadKind::Foreign.continues("FW"));
        assert!(!HeadKind::Foreign.continues("NNC"));
    }
}
