use serde::{Deserialize, Serialize};

use super::types::{GenerateText, LocalConfig};
use super::GenerationError;

/// Rough token estimate used for the completion budget.
const CHARS_PER_TOKEN: usize = 4;

/// Locally resident model behind an Ollama-compatible runtime.
///
/// The configured length cap bounds prompt and completion combined, so
/// the completion budget is whatever the prompt leaves over. A prompt
/// that exhausts the budget fails fast instead of generating nothing.
pub struct LocalInferenceBackend {
    config: LocalConfig,
    client: reqwest::blocking::Client,
}

/// Request body for POST {base_url}/api/generate
#[derive(Serialize)]
struct LocalGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: LocalOptions,
}

#[derive(Serialize)]
struct LocalOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct LocalGenerateResponse {
    response: String,
}

/// Response body from {base_url}/api/tags
#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

/// Some local models echo the prompt at the start of their output.
/// Reports never include the echoed prefix.
fn strip_prompt_echo<'a>(completion: &'a str, prompt: &str) -> &'a str {
    match completion.strip_prefix(prompt) {
        Some(rest) => rest.trim_start(),
        None => completion,
    }
}

impl LocalInferenceBackend {
    pub fn new(mut config: LocalConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        config.base_url = base_url;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Completion tokens left once the prompt has taken its share of
    /// the combined length cap.
    fn completion_budget(&self, prompt: &str) -> Result<u32, GenerationError> {
        let prompt_tokens = estimate_tokens(prompt);
        let max_length = self.config.max_length as usize;
        if prompt_tokens >= max_length {
            return Err(GenerationError::PromptBudgetExhausted {
                prompt_tokens,
                max_length,
            });
        }
        Ok((max_length - prompt_tokens) as u32)
    }

    /// Probe the runtime's model catalog before sampling.
    fn ensure_model_available(&self) -> Result<(), GenerationError> {
        let url = format!("{}/api/tags", self.config.base_url);

        let response = self.client.get(&url).send().map_err(|e| {
            GenerationError::ModelLoad(format!(
                "local runtime unreachable at {}: {e}",
                self.config.base_url
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::ModelLoad(format!(
                "local runtime returned status {status}"
            )));
        }

        let parsed: TagsResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        let available = parsed
            .models
            .iter()
            .any(|m| m.name.starts_with(&self.config.model));
        if !available {
            return Err(GenerationError::ModelLoad(format!(
                "model {} is not installed on the local runtime",
                self.config.model
            )));
        }

        Ok(())
    }
}

impl GenerateText for LocalInferenceBackend {
    fn preflight(&self) -> Result<(), GenerationError> {
        // No credential to check; runtime liveness is probed at
        // generation time so a cold start is reported as ModelLoad.
        Ok(())
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let num_predict = self.completion_budget(prompt)?;
        self.ensure_model_available()?;

        let url = format!("{}/api/generate", self.config.base_url);
        let request = LocalGenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: LocalOptions {
                temperature: self.config.temperature,
                num_predict,
            },
        };

        tracing::info!(
            model = %self.config.model,
            num_predict,
            "running local inference"
        );

        let response = self.client.post(&url).json(&request).send().map_err(|e| {
            if e.is_timeout() {
                GenerationError::Generation(format!(
                    "local inference timed out after {}s",
                    self.config.timeout_secs
                ))
            } else {
                GenerationError::Generation(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Generation(format!(
                "local runtime returned status {status}: {body}"
            )));
        }

        let parsed: LocalGenerateResponse = response
            .json()
            .map_err(|e| GenerationError::ResponseParsing(e.to_string()))?;

        let text = strip_prompt_echo(&parsed.response, prompt);
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_with_max_length(max_length: u32) -> LocalInferenceBackend {
        let mut cfg = LocalConfig::new();
        cfg.max_length = max_length;
        LocalInferenceBackend::new(cfg)
    }

    #[test]
    fn constructor_trims_trailing_slash() {
        let mut cfg = LocalConfig::new();
        cfg.base_url = "http://localhost:11434/".to_string();
        let backend = LocalInferenceBackend::new(cfg);
        assert_eq!(backend.config.base_url, "http://localhost:11434");
    }

    #[test]
    fn preflight_has_no_preconditions() {
        let backend = backend_with_max_length(2048);
        assert!(backend.preflight().is_ok());
    }

    #[test]
    fn prompt_leaves_its_remainder_for_the_completion() {
        let backend = backend_with_max_length(100);
        // 200 chars ~ 50 tokens, leaving 50 of 100.
        let prompt = "x".repeat(200);
        assert_eq!(backend.completion_budget(&prompt).unwrap(), 50);
    }

    #[test]
    fn oversized_prompt_exhausts_the_budget() {
        let backend = backend_with_max_length(100);
        // 400 chars ~ 100 tokens, the whole cap.
        let prompt = "x".repeat(400);
        let result = backend.completion_budget(&prompt);
        assert!(matches!(
            result,
            Err(GenerationError::PromptBudgetExhausted {
                prompt_tokens: 100,
                max_length: 100,
            })
        ));
    }

    #[test]
    fn generate_fails_fast_on_exhausted_budget() {
        // No HTTP involved: the budget check precedes the catalog probe.
        let backend = backend_with_max_length(10);
        let prompt = "x".repeat(4000);
        assert!(matches!(
            backend.generate(&prompt),
            Err(GenerationError::PromptBudgetExhausted { .. })
        ));
    }

    #[test]
    fn echoed_prompt_is_stripped() {
        let completion = "the prompt text\n\nGAP: expiry too long.";
        assert_eq!(
            strip_prompt_echo(completion, "the prompt text"),
            "GAP: expiry too long."
        );
    }

    #[test]
    fn output_without_echo_is_untouched() {
        let completion = "GAP: expiry too long.";
        assert_eq!(strip_prompt_echo(completion, "the prompt"), completion);
    }

    #[test]
    fn echo_only_output_becomes_empty() {
        assert_eq!(strip_prompt_echo("the prompt", "the prompt"), "");
    }

    #[test]
    fn token_estimate_uses_four_chars_per_token() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(4096)), 1024);
    }

    #[test]
    fn request_enables_sampling_without_streaming() {
        let request = LocalGenerateRequest {
            model: "llama3:8b",
            prompt: "p",
            stream: false,
            options: LocalOptions {
                temperature: 0.7,
                num_predict: 1024,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["options"]["num_predict"], 1024);
        assert!((value["options"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn tags_response_deserializes() {
        let raw = r#"{"models":[{"name":"llama3:8b"},{"name":"mistral:7b"}]}"#;
        let parsed: TagsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.models.len(), 2);
        assert!(parsed.models.iter().any(|m| m.name.starts_with("llama3")));
    }
}
