/// LLM Client — the single point of entry for all Gemini API calls.
///
/// No other module may call the model API directly. Handlers depend on the
/// `TextGenerator` trait so tests can substitute a fake model.
///
/// One attempt per analysis: no retry, no backoff, no client timeout override.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-200 answer. Status and body are kept exactly as the server sent them.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("model returned an empty body")]
    EmptyBody,
}

/// Anything that can turn a prompt into model text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// The answer at `candidates[0].content.parts[0].text`, if the response has that shape.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Pulls the model text out of a 200 body. When the body does not have the expected
/// shape the whole body is returned, so the caller falls back to raw display.
fn answer_from_body(body: String) -> Result<String, LlmError> {
    let parsed = serde_json::from_str::<GenerateContentResponse>(&body);
    match parsed.as_ref().ok().and_then(|r| r.text()) {
        Some(text) => Ok(text.to_string()),
        None if body.trim().is_empty() => Err(LlmError::EmptyBody),
        None => {
            warn!("Model response did not contain candidates[0].content.parts[0].text; using raw body");
            Ok(body)
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(&self.api_url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Model call succeeded: {} byte body", body.len());
        answer_from_body(body)
    }
}
