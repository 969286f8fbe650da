pub mod pdf;
pub mod types;

pub use pdf::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("document payload is empty")]
    EmptyDocument,

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("document contains no readable pages")]
    NoPages,
}
