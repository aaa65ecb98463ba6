//! OpenAI-compatible Chat Completions grader.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use swt_core::traits::{
    build_grading_prompt, parse_assessment, AiAssessment, AiGradeRequest, AiGrader,
    GRADING_SYSTEM_PROMPT,
};
use swt_core::GraderError;

use crate::http::{build_client, check_status, transport_error, DEFAULT_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Grades summaries through any OpenAI-compatible endpoint.
pub struct OpenAiGrader {
    api_key: String,
    base_url: String,
    org_id: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAiGrader {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        org_id: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        if api_key.trim().is_empty() {
            return Err(GraderError::MissingCredential("openai".into()).into());
        }
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            org_id,
            timeout_secs,
            client: build_client(timeout_secs)?,
        })
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<OpenAiMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Deserialize)]
struct OpenAiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OpenAiError>(body)
        .ok()
        .map(|e| e.error.message)
}

#[async_trait]
impl AiGrader for OpenAiGrader {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn grade(&self, request: &AiGradeRequest) -> anyhow::Result<AiAssessment> {
        let body = OpenAiRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![
                OpenAiMessage {
                    role: "system",
                    content: GRADING_SYSTEM_PROMPT.to_string(),
                },
                OpenAiMessage {
                    role: "user",
                    content: build_grading_prompt(request),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut req = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json");

        if let Some(org) = &self.org_id {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_secs))?;

        let response = check_status(response, &request.model, error_message).await?;

        let api_response: OpenAiResponse = response.json().await.map_err(|e| {
            GraderError::MalformedAssessment(format!("failed to parse response: {e}"))
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GraderError::MalformedAssessment("response has no content".into()))?;

        Ok(parse_assessment(&content)?)
    }
}
