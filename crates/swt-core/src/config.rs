//! Scoring configuration.
//!
//! Differences between grading rule sets are expressed here as explicit
//! parameters instead of separate pipelines.

use serde::{Deserialize, Serialize};

/// Maximum value of the form trait.
pub const FORM_MAX: f64 = 1.0;
/// Maximum value of the grammar trait.
pub const GRAMMAR_MAX: f64 = 2.0;
/// Maximum value of the vocabulary trait.
pub const VOCABULARY_MAX: f64 = 2.0;
/// Ceiling of `overall_score`.
pub const OVERALL_MAX: f64 = 90.0;

/// How captured key elements translate into the content trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentScale {
    /// One point per captured element, 0–3.
    #[default]
    ThreePoint,
    /// Captured elements rescaled onto 0–2.
    TwoPoint,
}

impl ContentScale {
    pub fn max(self) -> f64 {
        match self {
            ContentScale::ThreePoint => 3.0,
            ContentScale::TwoPoint => 2.0,
        }
    }

    /// Content value for `captured` elements out of three.
    pub fn value(self, captured: u8) -> f64 {
        let captured = f64::from(captured.min(3));
        match self {
            ContentScale::ThreePoint => captured,
            ContentScale::TwoPoint => (captured * 2.0 / 3.0 * 100.0).round() / 100.0,
        }
    }
}

/// Tunable parameters of the local engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub content_scale: ContentScale,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    /// Vocabulary is not modelled; every form-valid summary receives this.
    #[serde(default = "default_vocabulary_score")]
    pub vocabulary_score: f64,
}

fn default_min_words() -> usize {
    5
}
fn default_max_words() -> usize {
    75
}
fn default_vocabulary_score() -> f64 {
    VOCABULARY_MAX
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            content_scale: ContentScale::default(),
            min_words: default_min_words(),
            max_words: default_max_words(),
            vocabulary_score: default_vocabulary_score(),
        }
    }
}

impl ScoringConfig {
    /// Upper bound of `raw_score` (8 on the three-point scale).
    pub fn max_raw(&self) -> f64 {
        FORM_MAX + self.content_scale.max() + GRAMMAR_MAX + VOCABULARY_MAX
    }

    /// Reject configurations that would break the score invariants.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.min_words >= 1, "min_words must be at least 1");
        anyhow::ensure!(
            self.min_words <= self.max_words,
            "min_words ({}) must not exceed max_words ({})",
            self.min_words,
            self.max_words
        );
        anyhow::ensure!(
            (0.0..=VOCABULARY_MAX).contains(&self.vocabulary_score),
            "vocabulary_score must be between 0 and {VOCABULARY_MAX}"
        );
        Ok(())
    }
}
