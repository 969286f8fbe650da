use super::types::DocumentExtractor;
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers.
pub struct PdfTextExtractor;

impl DocumentExtractor for PdfTextExtractor {
    /// Visit each page in document order and concatenate its text,
    /// appending a newline after every page, the last one included.
    fn extract(&self, payload: &[u8]) -> Result<String, ExtractionError> {
        if payload.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(payload)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        if page_texts.is_empty() {
            return Err(ExtractionError::NoPages);
        }

        let mut full_text = String::new();
        for text in &page_texts {
            full_text.push_str(text);
            full_text.push('\n');
        }

        Ok(full_text)
    }
}
