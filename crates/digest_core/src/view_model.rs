use crate::{Mode, PipelinePhase, Progress};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunViewModel {
    pub phase: PipelinePhase,
    pub mode: Option<Mode>,
    pub progress: Progress,
    pub failed_extractions: usize,
    pub error: Option<String>,
    pub dirty: bool,
}
