use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use gapscope::config;
use gapscope::pipeline::generation::{BackendConfig, LocalConfig, RemoteConfig};

#[derive(Debug, Parser)]
#[command(
    name = "gapscope",
    version,
    about = "Generate an ISO 27001 policy gap analysis report from an ISMS policy PDF"
)]
pub struct Cli {
    /// Path to the ISMS policy PDF
    #[arg(value_name = "POLICY_PDF")]
    pub policy_pdf: PathBuf,

    /// Path to a plain-text file holding the ISO 27001 excerpt
    #[arg(value_name = "EXCERPT_FILE")]
    pub excerpt_file: PathBuf,

    /// Where to write the generated report
    #[arg(long, short = 'o', default_value = config::REPORT_FILE_NAME)]
    pub output: PathBuf,

    /// Generation backend
    #[arg(long, value_enum, default_value = "remote")]
    pub backend: BackendKind,

    /// Model identifier (defaults depend on the backend)
    #[arg(long)]
    pub model: Option<String>,

    /// API key for the remote backend
    #[arg(long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Sampling temperature
    #[arg(long, default_value_t = config::DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Output token cap (remote backend)
    #[arg(long, default_value_t = config::DEFAULT_MAX_OUTPUT_TOKENS)]
    pub max_tokens: u32,

    /// Combined prompt+completion token cap (local backend)
    #[arg(long, default_value_t = config::DEFAULT_MAX_TOTAL_TOKENS)]
    pub max_length: u32,

    /// Remote API base URL
    #[arg(long, default_value = config::REMOTE_BASE_URL)]
    pub remote_url: String,

    /// Local runtime base URL
    #[arg(long, default_value = config::LOCAL_BASE_URL)]
    pub local_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Hosted chat-completion service
    Remote,
    /// Ollama-compatible local runtime
    Local,
}

impl Cli {
    /// Map the argument surface onto a typed backend configuration.
    pub fn backend_config(&self) -> BackendConfig {
        match self.backend {
            BackendKind::Remote => {
                let mut cfg = RemoteConfig::new(self.api_key.clone().unwrap_or_default());
                cfg.base_url = self.remote_url.clone();
                if let Some(model) = &self.model {
                    cfg.model = model.clone();
                }
                cfg.temperature = self.temperature;
                cfg.max_tokens = self.max_tokens;
                cfg.timeout_secs = self.timeout;
                BackendConfig::Remote(cfg)
            }
            BackendKind::Local => {
                let mut cfg = LocalConfig::new();
                cfg.base_url = self.local_url.clone();
                if let Some(model) = &self.model {
                    cfg.model = model.clone();
                }
                cfg.temperature = self.temperature;
                cfg.max_length = self.max_length;
                cfg.timeout_secs = self.timeout;
                BackendConfig::Local(cfg)
            }
        }
    }
}
