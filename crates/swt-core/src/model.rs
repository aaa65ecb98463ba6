//! Core data model types for swt.
//!
//! These are the request and result types shared by the local scoring
//! engine, the remote AI graders, and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A source passage the summary is graded against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Passage {
    /// Identifier used by passage files; empty for ad-hoc passages.
    #[serde(default)]
    pub id: String,
    /// Optional human-readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// The full passage text.
    pub text: String,
    /// Labelled sub-claims the summary is expected to reflect.
    #[serde(default)]
    pub key_elements: KeyElements,
}

impl Passage {
    /// Build an ad-hoc passage from text and key elements.
    pub fn new(text: impl Into<String>, key_elements: KeyElements) -> Self {
        Self {
            id: String::new(),
            title: None,
            text: text.into(),
            key_elements,
        }
    }
}

/// The three labelled key elements of a passage. Any of them may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyElements {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub pivot: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl KeyElements {
    /// The text of one element, or `""` when it is not labelled.
    pub fn get(&self, kind: KeyElementKind) -> &str {
        let value = match kind {
            KeyElementKind::Topic => &self.topic,
            KeyElementKind::Pivot => &self.pivot,
            KeyElementKind::Conclusion => &self.conclusion,
        };
        value.as_deref().map(str::trim).unwrap_or("")
    }

    /// Number of elements with non-blank text.
    pub fn labelled_count(&self) -> usize {
        KeyElementKind::ALL
            .iter()
            .filter(|kind| !self.get(**kind).is_empty())
            .count()
    }
}

/// Which key element of a passage is being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyElementKind {
    Topic,
    Pivot,
    Conclusion,
}

impl KeyElementKind {
    pub const ALL: [KeyElementKind; 3] = [
        KeyElementKind::Topic,
        KeyElementKind::Pivot,
        KeyElementKind::Conclusion,
    ];

    /// The pivot is identified by a contrast marker rather than keyword density.
    pub fn requires_contrast(self) -> bool {
        matches!(self, KeyElementKind::Pivot)
    }

    /// Phrase used when telling a student what they missed.
    pub fn describe(self) -> &'static str {
        match self {
            KeyElementKind::Topic => "main topic",
            KeyElementKind::Pivot => "contrasting point",
            KeyElementKind::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for KeyElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyElementKind::Topic => write!(f, "topic"),
            KeyElementKind::Pivot => write!(f, "pivot"),
            KeyElementKind::Conclusion => write!(f, "conclusion"),
        }
    }
}

/// Outcome of matching one key element against a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyElementMatch {
    pub captured: bool,
    /// 1 when captured, otherwise 0.
    pub score: u8,
    /// Keywords that matched, tagged with how they matched.
    pub matched_words: Vec<String>,
    /// Matched keywords over total keywords, in `[0, 1]`.
    pub ratio: f64,
}

/// Confidence attached to a spelling correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
}

/// A known misspelling found in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingError {
    pub word: String,
    pub suggestion: String,
    pub confidence: Confidence,
}

/// A grammar rule hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    pub issue: String,
    pub suggestion: String,
    pub rule: String,
}

/// Result of the form rules (single sentence, word count, punctuation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCheck {
    pub word_count: usize,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Logical relation signalled by a connector phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    Contrast,
    Causal,
    Additive,
    Exemplifying,
    Concluding,
    Conditional,
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectorKind::Contrast => "contrast",
            ConnectorKind::Causal => "causal",
            ConnectorKind::Additive => "additive",
            ConnectorKind::Exemplifying => "exemplifying",
            ConnectorKind::Concluding => "concluding",
            ConnectorKind::Conditional => "conditional",
        };
        f.write_str(name)
    }
}

/// Result of connector detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorMatch {
    pub has_connector: bool,
    /// The first catalog phrase found in the text.
    pub connector_type: Option<String>,
    /// Category of that phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_kind: Option<ConnectorKind>,
}

// ---------------------------------------------------------------------------
// Trait scores
// ---------------------------------------------------------------------------

/// Form trait, 0 or 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormScore {
    pub value: f64,
    pub word_count: usize,
    #[serde(default)]
    pub errors: Vec<String>,
    pub notes: String,
}

/// Content trait, 0 to the configured content maximum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentScore {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<KeyElementMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<KeyElementMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<KeyElementMatch>,
    pub notes: String,
}

/// Grammar trait, 0 to 2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrammarScore {
    pub value: f64,
    pub spelling_errors: usize,
    pub grammar_issues: usize,
    pub has_connector: bool,
    pub notes: String,
}

/// Vocabulary trait, 0 to 2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyScore {
    pub value: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckReport {
    pub errors: Vec<SpellingError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarDetails {
    pub issues: Vec<GrammarIssue>,
    pub has_connector: bool,
    pub connector_type: Option<String>,
}

/// Which grading path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Local,
    Ai,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Local => write!(f, "local"),
            ScoringMode::Ai => write!(f, "ai"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(ScoringMode::Local),
            "ai" => Ok(ScoringMode::Ai),
            other => Err(format!("unknown scoring mode: {other}")),
        }
    }
}

/// The full grading envelope returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub form: FormScore,
    pub content: ContentScore,
    pub grammar: GrammarScore,
    pub vocabulary: VocabularyScore,
    #[serde(default)]
    pub spell_check: SpellCheckReport,
    #[serde(default)]
    pub grammar_details: GrammarDetails,
    /// Sum of the four trait values.
    pub raw_score: f64,
    /// `raw_score` rescaled to 0–90.
    pub overall_score: u32,
    pub band: String,
    pub feedback: String,
    pub scoring_mode: ScoringMode,
}
