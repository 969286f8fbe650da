use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::types::{GenerateText, RemoteConfig};
use super::GenerationError;
use crate::pipeline::prompt::SYSTEM_PROMPT;

/// Hosted chat-completion backend (DeepSeek, OpenAI-compatible API).
///
/// Sends the prompt as a user message alongside a fixed system-role
/// instruction and returns the service's generated text verbatim.
pub struct RemoteApiBackend {
    config: RemoteConfig,
    client: reqwest::blocking::Client,
}

/// Request body for POST {base_url}/chat/completions
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl RemoteApiBackend {
    pub fn new(mut config: RemoteConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        config.base_url = base_url;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn chat_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

impl GenerateText for RemoteApiBackend {
    fn preflight(&self) -> Result<(), GenerationError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GenerationError::Authentication(
                "API key is missing".to_string(),
            ));
        }
        Ok(())
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.preflight()?;

        let url = format!("{}/chat/completions", self.config.base_url);
        let request = self.chat_request(prompt);

        tracing::info!(
            model = %self.config.model,
            url = %url,
            "requesting gap analysis from remote backend"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        seconds: self.config.timeout_secs,
                    }
                } else if e.is_connect() {
                    GenerationError::Unavailable(format!(
                        "cannot reach {}: {e}",
                        self.config.base_url
                    ))
                } else {
                    GenerationError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Authentication(format!(
                "credential rejected (status {status}): {body}"
            )));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Unavailable(format!(
                "service returned status {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GenerationError::Unavailable(error.message));
        }

        let content = parsed
            .choices
            .and_then(|c| c.into_iter().next())
            .map(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(content)
    }
}
