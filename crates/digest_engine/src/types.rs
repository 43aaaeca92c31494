use digest_core::{PipelinePhase, Progress};

use crate::ModelError;

/// Prefix of the summary recorded for a document whose extraction failed.
pub const FAILED_SUMMARY_PREFIX: &str = "Error processing this document:";

/// Outcome of extracting one document. Failures are kept, never dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub document_name: String,
    /// Extracted text, or a description of the error when `failed`.
    pub summary: String,
    pub failed: bool,
    /// The source carried page markers, so the summary cites pages.
    pub page_annotated: bool,
}

impl ExtractionResult {
    pub fn succeeded(
        document_name: impl Into<String>,
        summary: impl Into<String>,
        page_annotated: bool,
    ) -> Self {
        Self {
            document_name: document_name.into(),
            summary: summary.into(),
            failed: false,
            page_annotated,
        }
    }

    pub fn failed(document_name: impl Into<String>, error: &ModelError, page_annotated: bool) -> Self {
        Self {
            document_name: document_name.into(),
            summary: format!("{FAILED_SUMMARY_PREFIX} {error}"),
            failed: true,
            page_annotated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    pub text: String,
}

/// What a completed run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutput {
    /// Single-text path: one summary, no extractions.
    Summary(SynthesisResult),
    Synthesis {
        extractions: Vec<ExtractionResult>,
        synthesis: SynthesisResult,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PhaseChanged(PipelinePhase),
    DocumentExtracted {
        document_name: String,
        progress: Progress,
        failed: bool,
    },
}
