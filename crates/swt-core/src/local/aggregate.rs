//! Folds trait sub-scores into the final result, band, and feedback.

use crate::config::{ScoringConfig, FORM_MAX, GRAMMAR_MAX, OVERALL_MAX, VOCABULARY_MAX};
use crate::model::{
    ConnectorMatch, ContentScore, FormCheck, FormScore, GrammarDetails, GrammarIssue,
    GrammarScore, KeyElementKind, KeyElementMatch, ScoreResult, ScoringMode, SpellCheckReport,
    SpellingError, VocabularyScore,
};

/// Band table, highest first: (minimum share of `max_raw`, label).
///
/// On the reference 8-point scale: 8 → Expert, 7 → Very Good, 6 → Good,
/// 4–5 → Competent, 2–3 → Limited, 0–1 → Insufficient.
pub const BANDS: &[(f64, &str)] = &[
    (1.0, "Expert"),
    (0.875, "Very Good"),
    (0.75, "Good"),
    (0.5, "Competent"),
    (0.25, "Limited"),
    (0.0, "Insufficient"),
];

/// Label of the lowest band.
pub const LOWEST_BAND: &str = "Insufficient";

const EPSILON: f64 = 1e-9;

/// Band for a raw score on a scale topping out at `max_raw`.
pub fn band_for(raw_score: f64, max_raw: f64) -> &'static str {
    if max_raw <= 0.0 {
        return LOWEST_BAND;
    }
    let share = raw_score / max_raw;
    BANDS
        .iter()
        .find(|(min, _)| share + EPSILON >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(LOWEST_BAND)
}

/// `raw_score` rescaled to 0–90.
pub fn overall_score(raw_score: f64, max_raw: f64) -> u32 {
    if max_raw <= 0.0 {
        return 0;
    }
    (raw_score.clamp(0.0, max_raw) / max_raw * OVERALL_MAX).round() as u32
}

/// Grammar trait from connector presence and the combined issue count.
pub fn grammar_value(has_connector: bool, issue_count: usize) -> f64 {
    if issue_count == 0 && has_connector {
        2.0
    } else if issue_count <= 1 || has_connector {
        1.0
    } else {
        0.0
    }
}

/// Everything the local pipeline measured for one form-valid summary.
pub struct TraitInputs {
    pub form: FormCheck,
    pub elements: [(KeyElementKind, KeyElementMatch); 3],
    pub connector: ConnectorMatch,
    pub spelling: Vec<SpellingError>,
    pub grammar: Vec<GrammarIssue>,
}

/// Combines trait scores into a [`ScoreResult`].
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    config: ScoringConfig,
}

impl ScoreAggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Terminal result for a summary that failed the form rules.
    pub fn form_failure(&self, form: FormCheck, mode: ScoringMode) -> ScoreResult {
        let feedback = if form.errors.is_empty() {
            "Form requirements not met.".to_string()
        } else {
            format!("Form requirements not met: {}", form.errors.join(" "))
        };
        ScoreResult {
            form: FormScore {
                value: 0.0,
                word_count: form.word_count,
                notes: "Summary does not meet the single-sentence form rules.".into(),
                errors: form.errors,
            },
            content: ContentScore {
                notes: "Not scored: form requirements not met.".into(),
                ..Default::default()
            },
            grammar: GrammarScore {
                notes: "Not scored: form requirements not met.".into(),
                ..Default::default()
            },
            vocabulary: VocabularyScore {
                value: 0.0,
                notes: "Not scored: form requirements not met.".into(),
            },
            spell_check: SpellCheckReport::default(),
            grammar_details: GrammarDetails::default(),
            raw_score: 0.0,
            overall_score: 0,
            band: LOWEST_BAND.to_string(),
            feedback,
            scoring_mode: mode,
        }
    }

    /// Fold four trait values into raw score, overall score and band.
    ///
    /// Each value is clamped into its trait range first, so the sum is
    /// monotonically non-decreasing in every trait.
    pub fn totals(
        &self,
        form: f64,
        content: f64,
        grammar: f64,
        vocabulary: f64,
    ) -> (f64, u32, &'static str) {
        let max_raw = self.config.max_raw();
        let raw = form.clamp(0.0, FORM_MAX)
            + content.clamp(0.0, self.config.content_scale.max())
            + grammar.clamp(0.0, GRAMMAR_MAX)
            + vocabulary.clamp(0.0, VOCABULARY_MAX);
        let raw = raw.min(max_raw);
        (raw, overall_score(raw, max_raw), band_for(raw, max_raw))
    }

    /// Result for a form-valid summary scored by the local pipeline.
    pub fn aggregate(&self, inputs: TraitInputs) -> ScoreResult {
        let captured: u8 = inputs.elements.iter().map(|(_, m)| m.score).sum();
        let content_value = self.config.content_scale.value(captured);
        let missing: Vec<KeyElementKind> = inputs
            .elements
            .iter()
            .filter(|(_, m)| !m.captured)
            .map(|(kind, _)| *kind)
            .collect();

        let issue_count = inputs.spelling.len() + inputs.grammar.len();
        let grammar = grammar_value(inputs.connector.has_connector, issue_count);
        let vocabulary = self.config.vocabulary_score;

        let (raw_score, overall, band) = self.totals(FORM_MAX, content_value, grammar, vocabulary);
        let feedback = feedback(&missing, &inputs.connector, &inputs.spelling, &inputs.grammar);

        let [(_, topic), (_, pivot), (_, conclusion)] = inputs.elements;

        ScoreResult {
            form: FormScore {
                value: FORM_MAX,
                word_count: inputs.form.word_count,
                errors: Vec::new(),
                notes: "Single sentence within the word limits.".into(),
            },
            content: ContentScore {
                value: content_value,
                topic: Some(topic),
                pivot: Some(pivot),
                conclusion: Some(conclusion),
                notes: content_notes(captured, &missing),
            },
            grammar: GrammarScore {
                value: grammar,
                spelling_errors: inputs.spelling.len(),
                grammar_issues: inputs.grammar.len(),
                has_connector: inputs.connector.has_connector,
                notes: format!(
                    "{issue_count} issue(s); {}.",
                    if inputs.connector.has_connector {
                        "ideas are linked with a connector"
                    } else {
                        "no connector found"
                    }
                ),
            },
            vocabulary: VocabularyScore {
                value: vocabulary,
                notes: "Paraphrase and passage wording are both accepted.".into(),
            },
            spell_check: SpellCheckReport {
                errors: inputs.spelling,
            },
            grammar_details: GrammarDetails {
                issues: inputs.grammar,
                has_connector: inputs.connector.has_connector,
                connector_type: inputs.connector.connector_type,
            },
            raw_score,
            overall_score: overall,
            band: band.to_string(),
            feedback,
            scoring_mode: ScoringMode::Local,
        }
    }
}

fn content_notes(captured: u8, missing: &[KeyElementKind]) -> String {
    if missing.is_empty() {
        format!("{captured}/3 key elements captured.")
    } else {
        let names: Vec<&str> = missing.iter().map(|k| k.describe()).collect();
        format!("{captured}/3 key elements captured; missing {}.", names.join(", "))
    }
}

fn feedback(
    missing: &[KeyElementKind],
    connector: &ConnectorMatch,
    spelling: &[SpellingError],
    grammar: &[GrammarIssue],
) -> String {
    let mut clauses = Vec::new();

    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|k| k.describe()).collect();
        clauses.push(format!(
            "Your summary does not clearly cover the passage's {}.",
            names.join(", ")
        ));
    }
    if !connector.has_connector {
        clauses.push(
            "Link your ideas with a connector such as \"however\", \"although\" or \"therefore\"."
                .to_string(),
        );
    }
    for error in spelling {
        clauses.push(format!(
            "Spelling: \"{}\" should be \"{}\".",
            error.word, error.suggestion
        ));
    }
    for issue in grammar {
        clauses.push(format!(
            "Grammar: {} (try \"{}\").",
            issue.issue, issue.suggestion
        ));
    }

    if clauses.is_empty() {
        "Well done: the summary covers the key ideas in one accurate, well-linked sentence."
            .to_string()
    } else {
        clauses.join(" ")
    }
}
