//! The remote AI grader contract.
//!
//! Concrete graders live in `swt-providers`. They share the prompt built
//! here and the reply parser, so every backend is held to the same
//! response shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::error::GraderError;
use crate::model::{KeyElementKind, Passage};

// ---------------------------------------------------------------------------
// AI grader trait
// ---------------------------------------------------------------------------

/// A remote grading backend.
#[async_trait]
pub trait AiGrader: Send + Sync {
    /// Human-readable provider name (e.g. "anthropic").
    fn name(&self) -> &str;

    /// Grade one summary. Any error makes the caller fall back to local scoring.
    async fn grade(&self, request: &AiGradeRequest) -> anyhow::Result<AiAssessment>;
}

/// Everything a remote grader is told about one grading call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiGradeRequest {
    /// Model identifier (e.g. "claude-sonnet-4-20250514").
    pub model: String,
    pub passage_text: String,
    pub summary: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub pivot: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    /// Upper bound of the content trait the grader should use.
    pub content_max: f64,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl AiGradeRequest {
    pub fn new(
        model: impl Into<String>,
        summary: &str,
        passage: &Passage,
        config: &ScoringConfig,
    ) -> Self {
        let label = |kind| {
            let text = passage.key_elements.get(kind);
            (!text.is_empty()).then(|| text.to_string())
        };
        Self {
            model: model.into(),
            passage_text: passage.text.clone(),
            summary: summary.to_string(),
            topic: label(KeyElementKind::Topic),
            pivot: label(KeyElementKind::Pivot),
            conclusion: label(KeyElementKind::Conclusion),
            content_max: config.content_scale.max(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
        }
    }
}

pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// One trait as reported by a remote grader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitAssessment {
    Detailed {
        value: f64,
        #[serde(default)]
        notes: String,
    },
    Bare(f64),
}

impl TraitAssessment {
    pub fn value(&self) -> f64 {
        match self {
            TraitAssessment::Detailed { value, .. } | TraitAssessment::Bare(value) => *value,
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            TraitAssessment::Detailed { notes, .. } => notes,
            TraitAssessment::Bare(_) => "",
        }
    }
}

/// A remote grader's verdict, before range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    pub form: TraitAssessment,
    pub content: TraitAssessment,
    pub grammar: TraitAssessment,
    pub vocabulary: TraitAssessment,
    #[serde(default)]
    pub feedback: String,
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// System prompt shared by all remote graders.
pub const GRADING_SYSTEM_PROMPT: &str = "You are an examiner for the \"Summarize Written Text\" task. \
Score the candidate's one-sentence summary of the passage on four traits: \
form (0-1), content (0 to the stated maximum), grammar (0-2) and vocabulary (0-2). \
Respond ONLY with a JSON object of the form \
{\"form\": {\"value\": n, \"notes\": \"...\"}, \"content\": {...}, \"grammar\": {...}, \
\"vocabulary\": {...}, \"feedback\": \"...\"}.";

/// Render the user prompt for one grading request.
pub fn build_grading_prompt(request: &AiGradeRequest) -> String {
    let mut prompt = format!("Passage:\n{}\n\n", request.passage_text.trim());

    let labels = [
        ("Main topic", &request.topic),
        ("Contrasting point", &request.pivot),
        ("Conclusion", &request.conclusion),
    ];
    if labels.iter().any(|(_, text)| text.is_some()) {
        prompt.push_str("Key elements the summary should capture:\n");
        for (name, text) in labels {
            if let Some(text) = text {
                prompt.push_str(&format!("- {name}: {text}\n"));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "Content is scored out of {}.\n\nCandidate summary:\n{}\n",
        request.content_max,
        request.summary.trim()
    ));
    prompt
}

// ---------------------------------------------------------------------------
// Reply parsing
// ---------------------------------------------------------------------------

/// Pull the JSON object out of a model reply.
///
/// Prefers a fenced ```json block, then a generic fenced block, then the
/// outermost `{...}` span of the raw text.
pub fn extract_json_object(response: &str) -> Option<String> {
    let mut json_blocks = Vec::new();
    let mut generic_blocks = Vec::new();
    let mut in_block = false;
    let mut is_json_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_json_block = lang == "json";
            current_block.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            in_block = false;
            if is_json_block {
                json_blocks.push(std::mem::take(&mut current_block));
            } else {
                generic_blocks.push(std::mem::take(&mut current_block));
            }
            continue;
        }

        if in_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    let candidate = json_blocks
        .into_iter()
        .chain(generic_blocks)
        .find(|block| block.trim_start().starts_with('{'))
        .unwrap_or_else(|| response.to_string());

    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    (end > start).then(|| candidate[start..=end].to_string())
}

/// Parse a model reply into an [`AiAssessment`].
pub fn parse_assessment(response: &str) -> Result<AiAssessment, GraderError> {
    let json = extract_json_object(response).ok_or_else(|| {
        GraderError::MalformedAssessment("no JSON object in response".to_string())
    })?;
    let assessment: AiAssessment = serde_json::from_str(&json)
        .map_err(|e| GraderError::MalformedAssessment(e.to_string()))?;

    let values = [
        assessment.form.value(),
        assessment.content.value(),
        assessment.grammar.value(),
        assessment.vocabulary.value(),
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(GraderError::MalformedAssessment(
            "trait value is not a finite number".to_string(),
        ));
    }
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KeyElements;

    fn passage() -> Passage {
        Passage::new(
            "Youth unemployment is rising. Training has not helped.",
            KeyElements {
                topic: Some("rising youth unemployment".into()),
                pivot: None,
                conclusion: Some("training has not helped".into()),
            },
        )
    }

    #[test]
    fn request_carries_labels() {
        let request = AiGradeRequest::new(
            "test-model",
            "Unemployment rises although training continues.",
            &passage(),
            &ScoringConfig::default(),
        );
        assert_eq!(request.topic.as_deref(), Some("rising youth unemployment"));
        assert!(request.pivot.is_none());
        assert_eq!(request.content_max, 3.0);
        assert_eq!(request.temperature, 0.0);
    }

    #[test]
    fn prompt_lists_only_labelled_elements() {
        let request = AiGradeRequest::new(
            "test-model",
            "Unemployment rises although training continues.",
            &passage(),
            &ScoringConfig::default(),
        );
        let prompt = build_grading_prompt(&request);
        assert!(prompt.contains("- Main topic: rising youth unemployment"));
        assert!(prompt.contains("- Conclusion: training has not helped"));
        assert!(!prompt.contains("Contrasting point"));
        assert!(prompt.contains("Content is scored out of 3."));
        assert!(prompt.ends_with("Unemployment rises although training continues.\n"));
    }

    #[test]
    fn parse_bare_json_with_mixed_trait_shapes() {
        let reply = r#"{"form": 1, "content": {"value": 2, "notes": "misses pivot"},
            "grammar": 2, "vocabulary": {"value": 1.5}, "feedback": "Good."}"#;
        let assessment = parse_assessment(reply).unwrap();
        assert_eq!(assessment.form, TraitAssessment::Bare(1.0));
        assert_eq!(assessment.content.value(), 2.0);
        assert_eq!(assessment.content.notes(), "misses pivot");
        assert_eq!(assessment.vocabulary.value(), 1.5);
        assert_eq!(assessment.feedback, "Good.");
    }

    #[test]
    fn parse_fenced_json_block() {
        let reply = "Here is my assessment:\n\n```json\n{\"form\": 1, \"content\": 3, \
                     \"grammar\": 1, \"vocabulary\": 2, \"feedback\": \"ok\"}\n```\nThanks.";
        let assessment = parse_assessment(reply).unwrap();
        assert_eq!(assessment.content.value(), 3.0);
        assert_eq!(assessment.grammar.value(), 1.0);
    }

    #[test]
    fn parse_json_surrounded_by_prose() {
        let reply = "Sure. {\"form\": 0, \"content\": 0, \"grammar\": 0, \"vocabulary\": 0} Done.";
        let assessment = parse_assessment(reply).unwrap();
        assert_eq!(assessment.form.value(), 0.0);
        assert!(assessment.feedback.is_empty());
    }

    #[test]
    fn reject_reply_without_json() {
        let err = parse_assessment("I cannot grade this summary.").unwrap_err();
        assert!(matches!(err, GraderError::MalformedAssessment(_)));
    }

    #[test]
    fn reject_missing_trait() {
        let err = parse_assessment(r#"{"form": 1, "content": 2, "grammar": 2}"#).unwrap_err();
        assert!(err.to_string().contains("vocabulary"), "{err}");
    }

    #[test]
    fn reject_non_numeric_trait() {
        let reply = r#"{"form": "one", "content": 2, "grammar": 2, "vocabulary": 2}"#;
        assert!(parse_assessment(reply).is_err());
    }
}
