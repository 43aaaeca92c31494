use crate::view_model::RunViewModel;
use crate::Mode;

/// Single authoritative phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    Extracting,
    Synthesizing,
    Complete,
    Error,
}

impl PipelinePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelinePhase::Complete | PipelinePhase::Error)
    }
}

/// Documents handled so far out of the run's total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

/// State of one run. Owned by whoever drives the run and only changed
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    phase: PipelinePhase,
    mode: Option<Mode>,
    progress: Progress,
    failed_extractions: usize,
    error: Option<String>,
    dirty: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> RunViewModel {
        RunViewModel {
            phase: self.phase,
            mode: self.mode,
            progress: self.progress,
            failed_extractions: self.failed_extractions,
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin(&mut self, mode: Mode, documents: usize) {
        self.mode = Some(mode);
        self.progress = Progress {
            completed: 0,
            total: documents,
        };
        self.phase = match mode {
            Mode::SummarizeText => PipelinePhase::Synthesizing,
            Mode::ExtractAndSynthesize => PipelinePhase::Extracting,
        };
        self.dirty = true;
    }

    pub(crate) fn record_document(&mut self, failed: bool) {
        if self.progress.completed < self.progress.total {
            self.progress.completed += 1;
        }
        if failed {
            self.failed_extractions += 1;
        }
        self.dirty = true;
    }

    pub(crate) fn advance(&mut self, phase: PipelinePhase) {
        self.phase = phase;
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.phase = PipelinePhase::Error;
        self.error = Some(message);
        self.dirty = true;
    }
}
