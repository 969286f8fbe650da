pub mod extraction;
pub mod generation;
pub mod prompt;
pub mod report;

use thiserror::Error;

use extraction::ExtractionError;
use generation::GenerationError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid run request: {0}")]
    Validation(String),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}
