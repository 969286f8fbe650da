/// Application-level constants
pub const APP_NAME: &str = "Gapscope";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the generated report artifact.
pub const REPORT_FILE_NAME: &str = "policy_gap_analysis_report.txt";

/// Hosted chat-completion service (DeepSeek, OpenAI-compatible).
pub const REMOTE_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_REMOTE_MODEL: &str = "deepseek-chat";

/// Local inference runtime (Ollama-compatible).
pub const LOCAL_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LOCAL_MODEL: &str = "llama3:8b";

/// Sampling temperature shared by both backends.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Output cap for the remote backend, in completion tokens.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Length cap for the local backend. Bounds prompt and completion
/// combined, so the prompt eats into the generation budget.
pub const DEFAULT_MAX_TOTAL_TOKENS: u32 = 2048;

/// HTTP timeout applied by the backend clients.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "gapscope=info".to_string()
}
