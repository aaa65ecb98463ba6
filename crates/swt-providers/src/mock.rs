//! Mock grader for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use swt_core::traits::{parse_assessment, AiAssessment, AiGradeRequest, AiGrader};
use swt_core::GraderError;

enum Behaviour {
    /// Raw model reply, parsed like a real provider's.
    Reply(String),
    /// Fail every call with an API error of this status.
    Fail(u16),
}

/// A grader that answers without network access.
pub struct MockGrader {
    behaviour: Behaviour,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<AiGradeRequest>>,
}

impl MockGrader {
    /// A mock whose model always replies with `reply`.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self::new(Behaviour::Reply(reply.to_string()))
    }

    /// A mock that fails every call with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::new(Behaviour::Fail(status))
    }

    fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this grader.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this grader.
    pub fn last_request(&self) -> Option<AiGradeRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl AiGrader for MockGrader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn grade(&self, request: &AiGradeRequest) -> anyhow::Result<AiAssessment> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.behaviour {
            Behaviour::Reply(reply) => Ok(parse_assessment(reply)?),
            Behaviour::Fail(status) => Err(GraderError::ApiError {
                status: *status,
                message: "mock failure".into(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use swt_core::model::{KeyElements, Passage};
    use swt_core::{GradingEngine, Lexicon, ScoringConfig, ScoringMode};

    const SUMMARY: &str =
        "Youth unemployment is rising although governments fund training programmes.";

    fn passage() -> Passage {
        Passage::new(
            "Youth unemployment is rising, although governments fund training.",
            KeyElements {
                topic: Some("rising youth unemployment".into()),
                ..Default::default()
            },
        )
    }

    fn engine() -> GradingEngine {
        GradingEngine::new(
            Arc::new(Lexicon::standard().unwrap()),
            ScoringConfig::default(),
        )
    }

    #[tokio::test]
    async fn fixed_reply() {
        let grader = MockGrader::with_fixed_reply(
            r#"{"form": 1, "content": 2, "grammar": 2, "vocabulary": 2, "feedback": "ok"}"#,
        );
        let request = AiGradeRequest::new("mock-model", SUMMARY, &passage(), &ScoringConfig::default());

        let assessment = grader.grade(&request).await.unwrap();
        assert_eq!(assessment.content.value(), 2.0);
        assert_eq!(grader.call_count(), 1);
        assert_eq!(grader.last_request().unwrap().summary, SUMMARY);
    }

    #[tokio::test]
    async fn engine_uses_mock_assessment() {
        let grader = Arc::new(MockGrader::with_fixed_reply(
            r#"{"form": 1, "content": 3, "grammar": 2, "vocabulary": 2, "feedback": "Excellent."}"#,
        ));
        let engine = engine().with_ai_grader(grader.clone(), "mock-model");

        let result = engine.grade(SUMMARY, &passage()).await;
        assert_eq!(result.scoring_mode, ScoringMode::Ai);
        assert_eq!(result.overall_score, 90);
        assert_eq!(result.feedback, "Excellent.");
        assert_eq!(grader.last_request().unwrap().model, "mock-model");
    }

    #[tokio::test]
    async fn engine_falls_back_on_failure() {
        let grader = Arc::new(MockGrader::failing(503));
        let engine = engine().with_ai_grader(grader.clone(), "mock-model");

        let result = engine.grade(SUMMARY, &passage()).await;
        assert_eq!(result.scoring_mode, ScoringMode::Local);
        assert_eq!(grader.call_count(), 1);
    }

    #[tokio::test]
    async fn engine_falls_back_on_malformed_reply() {
        let grader = Arc::new(MockGrader::with_fixed_reply("Sorry, I can't help with that."));
        let engine = engine().with_ai_grader(grader.clone(), "mock-model");

        let result = engine.grade(SUMMARY, &passage()).await;
        assert_eq!(result.scoring_mode, ScoringMode::Local);
        assert_eq!(grader.call_count(), 1);
    }
}
