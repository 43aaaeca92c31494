#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Caller asked for a run over `documents` sources, `pdfs` of them PDFs.
    RunRequested {
        mode: crate::Mode,
        documents: usize,
        pdfs: usize,
    },
    /// One document finished extraction, successfully or not.
    DocumentProcessed { failed: bool },
    /// Every document has been attempted.
    ExtractionFinished { succeeded: usize },
    /// The synthesis (or single-text summary) call returned text.
    SynthesisSucceeded,
    /// Unrecoverable failure in the active stage.
    StageFailed { message: String },
    /// Start over from idle.
    Reset,
}
