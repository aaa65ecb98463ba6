//! Offline heuristic scoring engine.
//!
//! Approximates semantic judgement with lexical techniques only: stemming,
//! synonym groups, dictionary spell checking, and pattern grammar rules.
//! Every function here is deterministic and free of I/O.

pub mod aggregate;
pub mod connectors;
pub mod form;
pub mod grammar;
pub mod overlap;
pub mod spelling;
pub mod stemmer;
pub mod thesaurus;

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::ScoringConfig;
use crate::model::{
    ConnectorMatch, FormCheck, GrammarIssue, KeyElementKind, Passage, ScoreResult, ScoringMode,
    SpellingError,
};

use aggregate::{ScoreAggregator, TraitInputs};
use connectors::ConnectorDetector;
use form::FormValidator;
use grammar::GrammarRuleEngine;
use overlap::OverlapScorer;
use spelling::SpellChecker;
use thesaurus::Thesaurus;

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}']+").expect("valid word pattern"));

/// Lower-cased word tokens (letters, digits, apostrophes).
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The immutable dictionaries and rule tables shared by every grading call.
pub struct Lexicon {
    pub thesaurus: Thesaurus,
    pub spelling: SpellChecker,
    pub grammar: GrammarRuleEngine,
    pub connectors: ConnectorDetector,
}

impl Lexicon {
    /// Build the curated lexicon. Called once at startup.
    pub fn standard() -> anyhow::Result<Self> {
        Ok(Self {
            thesaurus: Thesaurus::standard(),
            spelling: SpellChecker::standard(),
            grammar: GrammarRuleEngine::standard()?,
            connectors: ConnectorDetector::standard(),
        })
    }
}

/// Form, spelling, grammar and connector findings for a summary on its own.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCheck {
    pub form: FormCheck,
    pub spelling: Vec<SpellingError>,
    pub grammar: Vec<GrammarIssue>,
    pub connector: ConnectorMatch,
}

/// The local grading pipeline.
pub struct LocalScorer {
    lexicon: Arc<Lexicon>,
    form: FormValidator,
    aggregator: ScoreAggregator,
}

impl LocalScorer {
    pub fn new(lexicon: Arc<Lexicon>, config: ScoringConfig) -> Self {
        Self {
            lexicon,
            form: FormValidator::new(config.min_words, config.max_words),
            aggregator: ScoreAggregator::new(config),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        self.aggregator.config()
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    pub fn validate_form(&self, summary: &str) -> FormCheck {
        self.form.validate(summary)
    }

    /// Run the passage-independent checks.
    pub fn check(&self, summary: &str) -> SummaryCheck {
        SummaryCheck {
            form: self.form.validate(summary),
            spelling: self.lexicon.spelling.check(summary),
            grammar: self.lexicon.grammar.check(summary),
            connector: self.lexicon.connectors.detect(summary),
        }
    }

    /// Grade a summary against a passage.
    ///
    /// Form gates first: a summary that fails it scores zero on every trait
    /// and nothing else is evaluated.
    pub fn score(&self, summary: &str, passage: &Passage) -> ScoreResult {
        let form = self.form.validate(summary);
        if !form.is_valid {
            tracing::debug!(errors = ?form.errors, "form check failed");
            return self.aggregator.form_failure(form, ScoringMode::Local);
        }

        let overlap = OverlapScorer::new(&self.lexicon.thesaurus, &self.lexicon.connectors);
        let elements = KeyElementKind::ALL.map(|kind| {
            let matched = overlap.score_element(
                passage.key_elements.get(kind),
                summary,
                kind.requires_contrast(),
            );
            (kind, matched)
        });

        let result = self.aggregator.aggregate(TraitInputs {
            form,
            elements,
            connector: self.lexicon.connectors.detect(summary),
            spelling: self.lexicon.spelling.check(summary),
            grammar: self.lexicon.grammar.check(summary),
        });

        tracing::debug!(
            raw_score = result.raw_score,
            band = %result.band,
            "local scoring complete"
        );
        result
    }
}
