pub mod local;
pub mod remote;
pub mod types;

pub use local::*;
pub use remote::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("generation service unavailable: {0}")]
    Unavailable(String),

    #[error("generation request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("local model failed to load: {0}")]
    ModelLoad(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("prompt uses {prompt_tokens} of the {max_length} token budget, leaving no room for output")]
    PromptBudgetExhausted {
        prompt_tokens: usize,
        max_length: usize,
    },

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("backend returned an empty completion")]
    EmptyCompletion,
}
