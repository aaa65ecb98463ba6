//! Grading entry point.
//!
//! Tries the remote AI grader once when one is configured and falls back to
//! the local scorer on any failure. Never returns an error.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::instrument;

use crate::config::{ScoringConfig, FORM_MAX, GRAMMAR_MAX, VOCABULARY_MAX};
use crate::error::GraderError;
use crate::local::form::word_count;
use crate::local::{Lexicon, LocalScorer};
use crate::model::{
    ContentScore, FormCheck, FormScore, GrammarScore, Passage, ScoreResult, ScoringMode,
    VocabularyScore,
};
use crate::traits::{AiAssessment, AiGradeRequest, AiGrader};

/// A configured remote grader and the model it should use.
struct RemoteGrader {
    grader: Arc<dyn AiGrader>,
    model: String,
}

/// Grades summaries, remote first when available.
pub struct GradingEngine {
    local: LocalScorer,
    remote: Option<RemoteGrader>,
}

impl GradingEngine {
    pub fn new(lexicon: Arc<Lexicon>, config: ScoringConfig) -> Self {
        Self {
            local: LocalScorer::new(lexicon, config),
            remote: None,
        }
    }

    /// Attach a remote grader. `grade` will try it before the local scorer.
    pub fn with_ai_grader(mut self, grader: Arc<dyn AiGrader>, model: impl Into<String>) -> Self {
        self.remote = Some(RemoteGrader {
            grader,
            model: model.into(),
        });
        self
    }

    pub fn has_ai_grader(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &LocalScorer {
        &self.local
    }

    /// Grade a summary against a passage.
    #[instrument(skip_all, fields(passage = %passage.id))]
    pub async fn grade(&self, summary: &str, passage: &Passage) -> ScoreResult {
        if let Some(remote) = &self.remote {
            if summary.trim().is_empty() {
                tracing::debug!("empty summary, skipping remote grader");
                return self.grade_local(summary, passage);
            }

            let request =
                AiGradeRequest::new(&remote.model, summary, passage, self.local.config());
            match remote.grader.grade(&request).await {
                Ok(assessment) => {
                    tracing::info!(grader = remote.grader.name(), "remote assessment accepted");
                    return self.from_assessment(summary, assessment);
                }
                Err(e) => {
                    let permanent = e
                        .downcast_ref::<GraderError>()
                        .is_some_and(GraderError::is_permanent);
                    tracing::warn!(
                        grader = remote.grader.name(),
                        permanent,
                        "remote grader failed, falling back to local scoring: {e:#}"
                    );
                }
            }
        }

        self.grade_local(summary, passage)
    }

    /// Grade with the local scorer only.
    ///
    /// A panic inside the scorer yields a zero-valued result instead of
    /// unwinding into the caller.
    pub fn grade_local(&self, summary: &str, passage: &Passage) -> ScoreResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.local.score(summary, passage))) {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("local scorer panicked");
                let mut result = self.local.aggregator().form_failure(
                    FormCheck {
                        word_count: word_count(summary),
                        is_valid: false,
                        errors: Vec::new(),
                    },
                    ScoringMode::Local,
                );
                result.feedback =
                    "The summary could not be scored automatically. Please try again.".to_string();
                result
            }
        }
    }

    /// Turn a remote assessment into a result, clamping every trait into
    /// its range. A zero form value zeroes the other traits.
    fn from_assessment(&self, summary: &str, assessment: AiAssessment) -> ScoreResult {
        let config = self.local.config();
        let words = word_count(summary);

        let form = assessment.form.value().clamp(0.0, FORM_MAX);
        if form <= 0.0 {
            let mut result = self.local.aggregator().form_failure(
                FormCheck {
                    word_count: words,
                    is_valid: false,
                    errors: Vec::new(),
                },
                ScoringMode::Ai,
            );
            if !assessment.feedback.trim().is_empty() {
                result.feedback = assessment.feedback;
            }
            return result;
        }

        let content = assessment
            .content
            .value()
            .clamp(0.0, config.content_scale.max());
        let grammar = assessment.grammar.value().clamp(0.0, GRAMMAR_MAX);
        let vocabulary = assessment.vocabulary.value().clamp(0.0, VOCABULARY_MAX);
        let (raw_score, overall_score, band) = self
            .local
            .aggregator()
            .totals(form, content, grammar, vocabulary);

        ScoreResult {
            form: FormScore {
                value: form,
                word_count: words,
                errors: Vec::new(),
                notes: assessment.form.notes().to_string(),
            },
            content: ContentScore {
                value: content,
                notes: assessment.content.notes().to_string(),
                ..Default::default()
            },
            grammar: GrammarScore {
                value: grammar,
                notes: assessment.grammar.notes().to_string(),
                ..Default::default()
            },
            vocabulary: VocabularyScore {
                value: vocabulary,
                notes: assessment.vocabulary.notes().to_string(),
            },
            spell_check: Default::default(),
            grammar_details: Default::default(),
            raw_score,
            overall_score,
            band: band.to_string(),
            feedback: assessment.feedback,
            scoring_mode: ScoringMode::Ai,
        }
    }
}
