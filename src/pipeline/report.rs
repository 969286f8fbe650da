use super::extraction::DocumentExtractor;
use super::generation::GenerateText;
use super::prompt::build_gap_analysis_prompt;
use super::PipelineError;

/// Stages of a single report run.
///
/// A run walks Idle → Extracting → Prompting → Generating → Done.
/// Error absorbs failures from any of the working stages; Done and
/// Error are terminal for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Extracting,
    Prompting,
    Generating,
    Done,
    Error,
}

impl PipelineError {
    /// The stage in which the run failed.
    pub fn failed_during(&self) -> PipelineState {
        match self {
            PipelineError::Validation(_) => PipelineState::Idle,
            PipelineError::Extraction(_) => PipelineState::Extracting,
            PipelineError::Generation(_) => PipelineState::Generating,
        }
    }
}

/// Report pipeline orchestrator.
///
/// Sequences extraction → prompt build → generation over injected
/// collaborators. One invocation is one run; nothing is retried and no
/// state survives between runs.
pub struct ReportPipeline<'a, X: DocumentExtractor, G: GenerateText> {
    extractor: &'a X,
    backend: &'a G,
}

impl<'a, X: DocumentExtractor, G: GenerateText> ReportPipeline<'a, X, G> {
    pub fn new(extractor: &'a X, backend: &'a G) -> Self {
        Self { extractor, backend }
    }

    /// Run the full pipeline for one document/excerpt pair.
    ///
    /// Preconditions are checked before any extraction work: the
    /// payload must be non-empty, the excerpt non-blank, and the
    /// backend's preflight (remote credential presence) must pass.
    /// Any stage failure aborts the run; no partial report is returned.
    pub fn run(&self, document: &[u8], excerpt: &str) -> Result<String, PipelineError> {
        if document.is_empty() {
            return Err(PipelineError::Validation(
                "document payload is empty".to_string(),
            ));
        }
        if excerpt.trim().is_empty() {
            return Err(PipelineError::Validation(
                "reference excerpt is blank".to_string(),
            ));
        }
        self.backend
            .preflight()
            .map_err(|e| PipelineError::Validation(e.to_string()))?;

        tracing::info!(state = ?PipelineState::Extracting, bytes = document.len(), "extracting document text");
        let policy_text = self.extractor.extract(document)?;

        tracing::info!(state = ?PipelineState::Prompting, "building gap analysis prompt");
        let prompt = build_gap_analysis_prompt(&policy_text, excerpt);

        tracing::info!(state = ?PipelineState::Generating, "invoking generation backend");
        let report = self.backend.generate(&prompt)?;

        tracing::info!(state = ?PipelineState::Done, chars = report.len(), "gap analysis report ready");
        Ok(report)
    }
}
