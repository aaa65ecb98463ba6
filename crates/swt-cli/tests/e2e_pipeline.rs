//! End-to-end grading tests over the bundled passages.
//!
//! Each test parses a passage file from `passages/`, builds a grading engine
//! the way the CLI does and grades real summaries through it.

use std::path::Path;
use std::sync::Arc;

use swt_core::config::ContentScale;
use swt_core::{parser, GradingEngine, Lexicon, Passage, ScoringConfig, ScoringMode};
use swt_providers::MockGrader;

fn passage(name: &str) -> Passage {
    let path = Path::new("../../passages").join(format!("{name}.toml"));
    parser::parse_passage(&path).unwrap()
}

fn engine(config: ScoringConfig) -> GradingEngine {
    GradingEngine::new(Arc::new(Lexicon::standard().unwrap()), config)
}

const BEES_STRONG: &str = "Urban beekeeping has grown rapidly in cities, but honeybees compete \
with wild bees and may harm native species, so planting flowering plants helps pollinators more \
than adding hives.";

const BEES_NO_PIVOT: &str = "Urban beekeeping has grown rapidly in cities and planting flowering \
plants helps pollinators more than adding hives.";

const YOUTH_STRONG: &str = "Youth unemployment rates keep rising across Europe; however, although \
governments invested heavily in training programmes, education reform alone cannot solve the \
crisis.";

// --- Local pipeline ---

#[tokio::test]
async fn e2e_bundled_passages_are_clean() {
    let passages = parser::load_passage_directory(Path::new("../../passages")).unwrap();
    assert_eq!(passages.len(), 2);
    assert!(parser::validate_passages(&passages).is_empty());
}

#[tokio::test]
async fn e2e_strong_summary_reaches_expert() {
    let result = engine(ScoringConfig::default())
        .grade(BEES_STRONG, &passage("urban-beekeeping"))
        .await;

    assert_eq!(result.scoring_mode, ScoringMode::Local);
    assert_eq!(result.form.value, 1.0);
    assert_eq!(result.content.value, 3.0, "{:?}", result.content);
    assert_eq!(result.grammar.value, 2.0, "{:?}", result.grammar_details);
    assert_eq!(result.raw_score, 8.0);
    assert_eq!(result.overall_score, 90);
    assert_eq!(result.band, "Expert");
    assert_eq!(result.grammar_details.connector_type.as_deref(), Some("but"));
}

#[tokio::test]
async fn e2e_missing_contrast_loses_pivot() {
    let result = engine(ScoringConfig::default())
        .grade(BEES_NO_PIVOT, &passage("urban-beekeeping"))
        .await;

    let pivot = result.content.pivot.as_ref().unwrap();
    assert!(!pivot.captured);
    assert!(result.content.topic.as_ref().unwrap().captured);
    assert!(result.content.conclusion.as_ref().unwrap().captured);
    assert_eq!(result.content.value, 2.0);

    // No connector but no errors either.
    assert!(!result.grammar_details.has_connector);
    assert_eq!(result.grammar.value, 1.0);

    assert_eq!(result.raw_score, 6.0);
    assert_eq!(result.overall_score, 68);
    assert_eq!(result.band, "Good");
    assert!(result.feedback.to_lowercase().contains("contrasting point"), "{}", result.feedback);
}

#[tokio::test]
async fn e2e_overlong_summary_fails_form() {
    let summary = vec!["word"; 80].join(" ");
    let result = engine(ScoringConfig::default())
        .grade(&summary, &passage("youth-unemployment"))
        .await;

    assert_eq!(result.form.value, 0.0);
    assert_eq!(result.form.word_count, 80);
    assert_eq!(result.raw_score, 0.0);
    assert_eq!(result.overall_score, 0);
    assert_eq!(result.band, "Insufficient");
}

#[tokio::test]
async fn e2e_two_point_content_scale() {
    let config = ScoringConfig {
        content_scale: ContentScale::TwoPoint,
        ..ScoringConfig::default()
    };
    let result = engine(config)
        .grade(YOUTH_STRONG, &passage("youth-unemployment"))
        .await;

    assert_eq!(result.content.value, 2.0);
    assert_eq!(result.raw_score, 7.0);
    assert_eq!(result.overall_score, 90);
    assert_eq!(result.band, "Expert");
}

#[tokio::test]
async fn e2e_result_serializes_for_clients() {
    let result = engine(ScoringConfig::default())
        .grade(YOUTH_STRONG, &passage("youth-unemployment"))
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["scoring_mode"], "local");
    assert_eq!(json["grammar_details"]["hasConnector"], true);
    assert!(json["content"]["topic"]["matchedWords"].is_array());
}

// --- Remote grader ---

#[tokio::test]
async fn e2e_mock_grader_scores_in_ai_mode() {
    let mock = Arc::new(MockGrader::with_fixed_reply(
        r#"```json
{"form": 1, "content": {"value": 2, "notes": "pivot missed"}, "grammar": 2, "vocabulary": 2,
 "feedback": "Mention the effect on wild bees."}
```"#,
    ));
    let engine =
        engine(ScoringConfig::default()).with_ai_grader(mock.clone(), "claude-sonnet-4-20250514");

    let passage = passage("urban-beekeeping");
    let result = engine.grade(BEES_NO_PIVOT, &passage).await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(result.scoring_mode, ScoringMode::Ai);
    assert_eq!(result.content.value, 2.0);
    assert_eq!(result.content.notes, "pivot missed");
    assert_eq!(result.raw_score, 7.0);
    assert_eq!(result.overall_score, 79);
    assert_eq!(result.band, "Very Good");
    assert_eq!(result.feedback, "Mention the effect on wild bees.");
    assert!(result.spell_check.errors.is_empty());

    let request = mock.last_request().unwrap();
    assert_eq!(request.model, "claude-sonnet-4-20250514");
    assert_eq!(request.summary, BEES_NO_PIVOT);
    assert_eq!(request.passage_text, passage.text);
    assert_eq!(request.content_max, 3.0);
    assert_eq!(
        request.pivot.as_deref(),
        Some("honeybees compete with wild bees and harm native species")
    );
}

#[tokio::test]
async fn e2e_out_of_range_ai_values_are_clamped() {
    let mock = Arc::new(MockGrader::with_fixed_reply(
        r#"{"form": 3, "content": 9, "grammar": -1, "vocabulary": 2, "feedback": ""}"#,
    ));
    let result = engine(ScoringConfig::default())
        .with_ai_grader(mock, "gpt-4.1")
        .grade(YOUTH_STRONG, &passage("youth-unemployment"))
        .await;

    assert_eq!(result.form.value, 1.0);
    assert_eq!(result.content.value, 3.0);
    assert_eq!(result.grammar.value, 0.0);
    assert_eq!(result.raw_score, 6.0);
}

#[tokio::test]
async fn e2e_ai_form_failure_zeroes_everything() {
    let mock = Arc::new(MockGrader::with_fixed_reply(
        r#"{"form": 0, "content": 3, "grammar": 2, "vocabulary": 2, "feedback": "Write one sentence."}"#,
    ));
    let result = engine(ScoringConfig::default())
        .with_ai_grader(mock, "gpt-4.1")
        .grade(YOUTH_STRONG, &passage("youth-unemployment"))
        .await;

    assert_eq!(result.scoring_mode, ScoringMode::Ai);
    assert_eq!(result.raw_score, 0.0);
    assert_eq!(result.content.value, 0.0);
    assert_eq!(result.band, "Insufficient");
    assert_eq!(result.feedback, "Write one sentence.");
}

#[tokio::test]
async fn e2e_failing_grader_falls_back_to_local() {
    let mock = Arc::new(MockGrader::failing(503));
    let engine = engine(ScoringConfig::default()).with_ai_grader(mock.clone(), "gpt-4.1");

    let remote = engine.grade(BEES_STRONG, &passage("urban-beekeeping")).await;
    let local = engine.grade_local(BEES_STRONG, &passage("urban-beekeeping"));

    assert_eq!(mock.call_count(), 1);
    assert_eq!(remote.scoring_mode, ScoringMode::Local);
    assert_eq!(remote, local);
}

#[tokio::test]
async fn e2e_unparseable_reply_falls_back_to_local() {
    let mock = Arc::new(MockGrader::with_fixed_reply("I would give this a seven."));
    let result = engine(ScoringConfig::default())
        .with_ai_grader(mock.clone(), "gpt-4.1")
        .grade(YOUTH_STRONG, &passage("youth-unemployment"))
        .await;

    assert_eq!(mock.call_count(), 1);
    assert_eq!(result.scoring_mode, ScoringMode::Local);
    assert_eq!(result.raw_score, 8.0);
}

#[tokio::test]
async fn e2e_empty_summary_skips_remote_grader() {
    let mock = Arc::new(MockGrader::with_fixed_reply(
        r#"{"form": 1, "content": 3, "grammar": 2, "vocabulary": 2}"#,
    ));
    let result = engine(ScoringConfig::default())
        .with_ai_grader(mock.clone(), "gpt-4.1")
        .grade("   ", &passage("youth-unemployment"))
        .await;

    assert_eq!(mock.call_count(), 0);
    assert_eq!(result.scoring_mode, ScoringMode::Local);
    assert_eq!(result.overall_score, 0);
}
