use std::cell::RefCell;

use super::local::LocalInferenceBackend;
use super::remote::RemoteApiBackend;
use super::GenerationError;
use crate::config;

/// Capability shared by every generation backend.
pub trait GenerateText {
    /// Cheap precondition check, run by the orchestrator before any
    /// extraction work begins.
    fn preflight(&self) -> Result<(), GenerationError>;

    /// Produce report text for the given prompt.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Remote chat-completion backend parameters.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model: String,
    /// Opaque bearer credential. Never logged, never serialized into a
    /// request body.
    pub api_key: String,
    pub temperature: f32,
    /// Cap on generated output tokens.
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: config::REMOTE_BASE_URL.to_string(),
            model: config::DEFAULT_REMOTE_MODEL.to_string(),
            api_key: api_key.into(),
            temperature: config::DEFAULT_TEMPERATURE,
            max_tokens: config::DEFAULT_MAX_OUTPUT_TOKENS,
            timeout_secs: config::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Local inference backend parameters.
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// Cap on prompt and completion combined. Long prompts shrink the
    /// completion budget.
    pub max_length: u32,
    pub timeout_secs: u64,
}

impl LocalConfig {
    pub fn new() -> Self {
        Self {
            base_url: config::LOCAL_BASE_URL.to_string(),
            model: config::DEFAULT_LOCAL_MODEL.to_string(),
            temperature: config::DEFAULT_TEMPERATURE,
            max_length: config::DEFAULT_MAX_TOTAL_TOKENS,
            timeout_secs: config::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Deployment-time backend selection.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    Remote(RemoteConfig),
    Local(LocalConfig),
}

/// Tagged dispatch over the two backend variants.
///
/// Selection happens once, from configuration. The pipeline only sees
/// the `GenerateText` capability, so swapping variants changes nothing
/// upstream of the generation stage.
pub enum GenerationBackend {
    Remote(RemoteApiBackend),
    Local(LocalInferenceBackend),
}

impl GenerationBackend {
    pub fn from_config(config: BackendConfig) -> Self {
        match config {
            BackendConfig::Remote(c) => Self::Remote(RemoteApiBackend::new(c)),
            BackendConfig::Local(c) => Self::Local(LocalInferenceBackend::new(c)),
        }
    }
}

impl GenerateText for GenerationBackend {
    fn preflight(&self) -> Result<(), GenerationError> {
        match self {
            Self::Remote(b) => b.preflight(),
            Self::Local(b) => b.preflight(),
        }
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match self {
            Self::Remote(b) => b.generate(prompt),
            Self::Local(b) => b.generate(prompt),
        }
    }
}

/// Canned-response backend for tests. Records every prompt it receives.
pub struct StubBackend {
    response: String,
    prompts: RefCell<Vec<String>>,
}

impl StubBackend {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl GenerateText for StubBackend {
    fn preflight(&self) -> Result<(), GenerationError> {
        Ok(())
    }

    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self.response.clone())
    }
}
