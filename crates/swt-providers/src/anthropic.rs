//! Anthropic Messages API grader.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use swt_core::traits::{
    build_grading_prompt, parse_assessment, AiAssessment, AiGradeRequest, AiGrader,
    GRADING_SYSTEM_PROMPT,
};
use swt_core::GraderError;

use crate::http::{build_client, check_status, transport_error, DEFAULT_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Grades summaries with Claude models.
pub struct AnthropicGrader {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl AnthropicGrader {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        if api_key.trim().is_empty() {
            return Err(GraderError::MissingCredential("anthropic".into()).into());
        }
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
            client: build_client(timeout_secs)?,
        })
    }
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<AnthropicError>(body)
        .ok()
        .map(|e| e.error.message)
}

#[async_trait]
impl AiGrader for AnthropicGrader {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn grade(&self, request: &AiGradeRequest) -> anyhow::Result<AiAssessment> {
        let body = AnthropicRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: GRADING_SYSTEM_PROMPT,
            messages: vec![AnthropicMessage {
                role: "user",
                content: build_grading_prompt(request),
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let response = check_status(response, &request.model, error_message).await?;

        let api_response: AnthropicResponse = response.json().await.map_err(|e| {
            GraderError::MalformedAssessment(format!("failed to parse response: {e}"))
        })?;

        let text: String = api_response
            .content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        tracing::debug!(chars = text.len(), "assessment received");

        Ok(parse_assessment(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swt_core::model::{KeyElements, Passage};
    use swt_core::ScoringConfig;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> AiGradeRequest {
        let passage = Passage::new(
            "Youth unemployment is rising. Training has not helped.",
            KeyElements {
                topic: Some("rising youth unemployment".into()),
                ..Default::default()
            },
        );
        AiGradeRequest::new(
            "claude-sonnet-4-20250514",
            "Youth unemployment is rising although training continues.",
            &passage,
            &ScoringConfig::default(),
        )
    }

    fn grader(server: &MockServer, key: &str) -> AnthropicGrader {
        AnthropicGrader::new(key, Some(server.uri()), Some(5)).unwrap()
    }

    #[tokio::test]
    async fn successful_assessment() {
        let server = MockServer::start().await;

        let reply = "```json\n{\"form\": 1, \"content\": {\"value\": 2, \"notes\": \"no pivot\"}, \
                     \"grammar\": 2, \"vocabulary\": 2, \"feedback\": \"Nice.\"}\n```";
        let response_body = serde_json::json!({
            "content": [{"type": "text", "text": reply}],
            "model": "claude-sonnet-4-20250514",
            "usage": {"input_tokens": 50, "output_tokens": 20}
        });

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "temperature": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let assessment = grader(&server, "test-key").grade(&request()).await.unwrap();
        assert_eq!(assessment.content.value(), 2.0);
        assert_eq!(assessment.content.notes(), "no pivot");
        assert_eq!(assessment.feedback, "Nice.");
    }

    #[tokio::test]
    async fn authentication_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = grader(&server, "bad-key").grade(&request()).await.unwrap_err();
        assert!(err.to_string().contains("authentication"));
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn rate_limiting() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let err = grader(&server, "test-key").grade(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraderError>(),
            Some(GraderError::RateLimited { retry_after_ms: 7000 })
        ));
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = grader(&server, "test-key").grade(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "API error (HTTP 500): overloaded");
    }

    #[tokio::test]
    async fn reply_without_json_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "I would give this a solid seven."}]
            })))
            .mount(&server)
            .await;

        let err = grader(&server, "test-key").grade(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraderError>(),
            Some(GraderError::MalformedAssessment(_))
        ));
    }

    #[test]
    fn empty_key_is_missing_credential() {
        let err = AnthropicGrader::new("  ", None, None).err().unwrap();
        assert!(err.to_string().contains("no API key"));
    }
}
