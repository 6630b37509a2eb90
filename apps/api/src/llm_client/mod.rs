/// Generator client — the single point of entry for all generative-language API calls.
///
/// No other module may call the Gemini API directly. Handlers depend on the
/// `TextGenerator` trait so the backend can be swapped (and faked in tests).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

pub mod prompts;

/// The model is part of the endpoint path. Override the whole URL via `GENERATOR_API_URL`.
pub const DEFAULT_GENERATOR_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Network failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Generator returned no usable candidate")]
    EmptyCandidate,
}

impl GeneratorError {
    /// Network failures and non-2xx responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, GeneratorError::Http(_) | GeneratorError::Api { .. })
    }

    fn is_retryable(&self) -> bool {
        match self {
            GeneratorError::Http(_) => true,
            GeneratorError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Turns a prompt into generated text. Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
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

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate's first content part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    url: String,
    max_attempts: u32,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        url: String,
        timeout: Duration,
        max_attempts: u32,
    ) -> Result<Self, GeneratorError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            url,
            max_attempts: max_attempts.max(1),
        })
    }

    async fn call_once(&self, body: &GenerateRequest<'_>) -> Result<String, GeneratorError> {
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Generator API returned {}: {}", status, body);
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)?;
        parsed
            .text()
            .map(str::to_string)
            .ok_or(GeneratorError::EmptyCandidate)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    /// Single attempt by default. With `max_attempts > 1`, transport failures,
    /// 429 and 5xx are retried with exponential backoff.
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Generator call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            attempt += 1;

            match self.call_once(&body).await {
                Ok(text) => {
                    debug!("Generator call succeeded: {} chars", text.len());
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    warn!("Generator call failed: {e}");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
