use super::ExtractionError;

/// Document text extraction abstraction (allows mocking for tests).
///
/// Implementations must be all-or-nothing: on any failure no partial
/// text is returned, and any parser state is released before the call
/// returns.
pub trait DocumentExtractor {
    fn extract(&self, payload: &[u8]) -> Result<String, ExtractionError>;
}
