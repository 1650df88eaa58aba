use async_trait::async_trait;
use log::{debug, info};

use crate::GenerationError;

pub const DEFAULT_MODEL: &str = "models/gemini-1.5-pro";

pub const DEFAULT_WORD_BOUND: u32 = 250;
pub const MIN_WORD_BOUND: u32 = 100;
pub const MAX_WORD_BOUND: u32 = 500;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Keep a user-chosen word bound inside the supported range
pub fn clamp_word_bound(words: u32) -> u32 {
    words.clamp(MIN_WORD_BOUND, MAX_WORD_BOUND)
}

/// Transcript text paired with the requested summary length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    transcript: String,
    word_bound: u32,
}

impl SummaryRequest {
    pub fn new(transcript: impl Into<String>, word_bound: u32) -> Self {
        Self {
            transcript: transcript.into(),
            word_bound,
        }
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn word_bound(&self) -> u32 {
        self.word_bound
    }

    pub fn instruction(&self) -> String {
        format!(
            "You are a YouTube video summarizer. You will be taking the transcript text
and summarizing the entire video and providing the important summary in bullet points
within {} words. Please provide the summary of the text given here in the following format:
- Point 1
- Point 2
- Point 3
...",
            self.word_bound
        )
    }

    /// The single prompt sent to the model: instruction followed directly by the transcript
    pub fn prompt(&self) -> String {
        let mut prompt = self.instruction();
        prompt.push_str(&self.transcript);
        prompt
    }
}

/// A hosted text model that turns one prompt into one reply
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Ask the model for bullet-point notes. The reply is returned as-is.
pub async fn generate_summary(
    model: &dyn GenerativeModel,
    transcript: &str,
    word_bound: u32,
) -> Result<String, GenerationError> {
    let request = SummaryRequest::new(transcript, word_bound);
    debug!(
        "Requesting summary within {} words for {} chars of transcript",
        request.word_bound(),
        request.transcript().len()
    );
    let summary = model.generate(&request.prompt()).await?;
    info!("Received summary ({} chars)", summary.len());
    Ok(summary)
}

/// Hosted API family, picked from the model name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    Anthropic,
    OpenAi,
}

impl Backend {
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("claude") {
            Backend::Anthropic
        } else if model.starts_with("gpt") {
            Backend::OpenAi
        } else {
            Backend::Gemini
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Gemini => "Gemini",
            Backend::Anthropic => "Anthropic",
            Backend::OpenAi => "OpenAI",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            Backend::Gemini => "GOOGLE_API_KEY",
            Backend::Anthropic => "ANTHROPIC_API_KEY",
            Backend::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// HTTP client for the hosted model. The API key is captured once at construction.
pub struct LlmClient {
    client: reqwest::Client,
    backend: Backend,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(client: reqwest::Client, model: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            backend: Backend::for_model(model),
            model: model.to_string(),
            api_key,
        }
    }

    /// Read the backend's key from the environment
    pub fn from_env(client: reqwest::Client, model: &str) -> Self {
        let api_key = std::env::var(Backend::for_model(model).api_key_var()).ok();
        Self::new(client, model, api_key)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        self.api_key.as_deref().ok_or(GenerationError::MissingApiKey {
            backend: self.backend.name(),
            env_var: self.backend.api_key_var(),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value, GenerationError> {
        let backend = self.backend.name();
        let resp = request
            .send()
            .await
            .map_err(|source| GenerationError::Transport { backend, source })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api { backend, status, body });
        }

        resp.json()
            .await
            .map_err(|source| GenerationError::Transport { backend, source })
    }

    async fn generate_gemini(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", gemini_model_path(&self.model));

        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        let request = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body);

        extract_gemini_text(&self.send(request).await?)
    }

    async fn generate_anthropic(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 4096,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let request = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body);

        extract_anthropic_text(&self.send(request).await?)
    }

    async fn generate_openai(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key()?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let request = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&body);

        extract_openai_text(&self.send(request).await?)
    }
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!("Generating via {} API with model {}", self.backend.name(), self.model);
        match self.backend {
            Backend::Gemini => self.generate_gemini(prompt).await,
            Backend::Anthropic => self.generate_anthropic(prompt).await,
            Backend::OpenAi => self.generate_openai(prompt).await,
        }
    }
}

/// Gemini endpoints address models as `models/<name>`
fn gemini_model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

fn extract_gemini_text(json: &serde_json::Value) -> Result<String, GenerationError> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array());

    if let Some(parts) = parts {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text")?.as_str())
            .collect();
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Err(GenerationError::Malformed { backend: "Gemini" })
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String, GenerationError> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|block| block.get("text")?.as_str())
            .collect();
        if !text.is_empty() {
            return Ok(text);
        }
    }
    Err(GenerationError::Malformed { backend: "Anthropic" })
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String, GenerationError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or(GenerationError::Malformed { backend: "OpenAI" })
}
