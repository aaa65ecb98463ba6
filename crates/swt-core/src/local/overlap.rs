//! Lexical overlap between passage key elements and a summary.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::model::{ConnectorKind, KeyElementMatch};

use super::connectors::ConnectorDetector;
use super::stemmer::stem;
use super::thesaurus::Thesaurus;
use super::tokenize;

/// Shortest token treated as a keyword.
const MIN_KEYWORD_LEN: usize = 4;

/// Topic and conclusion need this many matched keywords...
const MIN_MATCHED: usize = 2;
/// ...or this share of them.
const MIN_RATIO: f64 = 0.4;
/// Pivot keyword share, alongside a contrast marker.
const MIN_PIVOT_RATIO: f64 = 0.25;

pub(crate) static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "against", "also", "although", "among", "around",
        "because", "been", "before", "being", "below", "between", "both", "cannot", "could",
        "does", "doing", "down", "during", "each", "even", "every", "from", "further", "have",
        "having", "here", "however", "into", "itself", "just", "many", "more", "most", "much",
        "must", "neither", "only", "other", "others", "ought", "over", "same", "should", "since",
        "some", "such", "than", "that", "their", "theirs", "them", "themselves", "then", "there",
        "therefore", "these", "they", "this", "those", "though", "through", "thus", "under",
        "until", "upon", "very", "were", "what", "when", "where", "whereas", "whether", "which",
        "while", "whom", "whose", "will", "with", "within", "without", "would", "your", "yours",
        "still", "become", "becomes", "made", "make", "makes", "like", "well", "another",
    ]
    .into_iter()
    .collect()
});

/// Content-bearing words of `text`: at least four letters, not a stop word,
/// first occurrence order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(text)
        .into_iter()
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| t.chars().count() >= MIN_KEYWORD_LEN)
        .filter(|t| !STOP_WORDS.contains(t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Summary tokens with their stems, computed once per call.
struct SummaryTokens {
    lower: String,
    tokens: Vec<(String, String)>,
}

impl SummaryTokens {
    fn new(summary: &str) -> Self {
        let tokens = tokenize(summary)
            .into_iter()
            .map(|t| {
                let word = t.trim_matches('\'').to_string();
                let root = stem(&word);
                (word, root)
            })
            .filter(|(word, _)| !word.is_empty())
            .collect();
        Self {
            lower: summary.to_lowercase(),
            tokens,
        }
    }
}

/// Scores key elements against a summary using stems and synonyms.
pub struct OverlapScorer<'a> {
    thesaurus: &'a Thesaurus,
    connectors: &'a ConnectorDetector,
}

impl<'a> OverlapScorer<'a> {
    pub fn new(thesaurus: &'a Thesaurus, connectors: &'a ConnectorDetector) -> Self {
        Self {
            thesaurus,
            connectors,
        }
    }

    /// How one keyword is found in the summary, if at all.
    fn match_keyword(&self, keyword: &str, summary: &SummaryTokens) -> Option<String> {
        if summary.lower.contains(keyword) {
            return Some(keyword.to_string());
        }

        let root = stem(keyword);
        if let Some((word, _)) = summary.tokens.iter().find(|(_, s)| *s == root) {
            return Some(format!("{keyword}→{word} (stem)"));
        }

        summary
            .tokens
            .iter()
            .find(|(word, _)| self.thesaurus.is_related(keyword, word))
            .map(|(word, _)| format!("{keyword}→{word} (synonym)"))
    }

    /// Match one key element against the summary.
    ///
    /// An empty key element is captured vacuously. A pivot additionally
    /// needs a contrast connector in the summary.
    pub fn score_element(
        &self,
        key_element: &str,
        summary: &str,
        require_contrast: bool,
    ) -> KeyElementMatch {
        if key_element.trim().is_empty() {
            return KeyElementMatch {
                captured: true,
                score: 1,
                matched_words: Vec::new(),
                ratio: 1.0,
            };
        }

        let keywords = extract_keywords(key_element);
        let summary_tokens = SummaryTokens::new(summary);
        let matched_words: Vec<String> = keywords
            .iter()
            .filter_map(|kw| self.match_keyword(kw, &summary_tokens))
            .collect();

        let matched = matched_words.len();
        let ratio = if keywords.is_empty() {
            // Nothing to miss.
            1.0
        } else {
            matched as f64 / keywords.len() as f64
        };

        let captured = if require_contrast {
            self.connectors
                .contains_kind(summary, ConnectorKind::Contrast)
                && (matched >= 1 || ratio >= MIN_PIVOT_RATIO)
        } else {
            matched >= MIN_MATCHED || ratio >= MIN_RATIO
        };

        tracing::debug!(
            keywords = keywords.len(),
            matched,
            ratio,
            captured,
            require_contrast,
            "key element scored"
        );

        KeyElementMatch {
            captured,
            score: u8::from(captured),
            matched_words,
            ratio,
        }
    }
}
