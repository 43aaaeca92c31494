use std::sync::Arc;
use std::time::Duration;

use digest_core::{
    update, Document, Effect, Msg, PipelinePhase, RunConfig, RunState, MAX_CONTENT_LENGTH,
};
use digest_logging::{digest_error, digest_info};

use crate::{
    Delay, EngineEvent, ExtractionStage, ModelClient, PipelineError, ProgressSink, RunOutput,
    SynthesisStage, TokioDelay,
};

/// Message returned for runs whose inputs do not fit the requested mode.
const INVALID_REQUEST: &str = "Invalid request mode or missing parameters.";

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Longest body, in characters, sent in a single model call.
    pub max_content_length: usize,
    /// Pause between consecutive extraction calls.
    pub inter_call_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_content_length: MAX_CONTENT_LENGTH,
            inter_call_delay: Duration::from_secs(2),
        }
    }
}

/// Applies `msg` to the run state and reports any phase change to `sink`.
pub(crate) fn apply(state: &mut RunState, msg: Msg, sink: &dyn ProgressSink) -> Vec<Effect> {
    let before = state.phase();
    let (next, effects) = update(std::mem::take(state), msg);
    *state = next;
    if state.phase() != before {
        sink.emit(EngineEvent::PhaseChanged(state.phase()));
    }
    effects
}

/// Drives a run from idle to a terminal phase.
///
/// The pipeline holds no per-run data, so one instance can serve many runs.
#[derive(Clone)]
pub struct Pipeline {
    client: Arc<dyn ModelClient>,
    delay: Arc<dyn Delay>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(client: Arc<dyn ModelClient>, settings: PipelineSettings) -> Self {
        Self {
            client,
            delay: Arc::new(TokioDelay),
            settings,
        }
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub async fn run(
        &self,
        documents: &[Document],
        config: &RunConfig,
        sink: &dyn ProgressSink,
    ) -> Result<RunOutput, PipelineError> {
        let mut state = RunState::new();
        self.run_with_state(documents, config, &mut state, sink).await
    }

    /// Runs the pipeline, leaving the final phase and error in `state`.
    ///
    /// A state left over from an earlier run is reset to idle first. A missing
    /// credential fails before the run starts and before any call is made.
    pub async fn run_with_state(
        &self,
        documents: &[Document],
        config: &RunConfig,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<RunOutput, PipelineError> {
        if state.phase() != PipelinePhase::Idle {
            apply(state, Msg::Reset, sink);
        }
        self.client.ensure_configured()?;

        digest_info!(
            "Starting run mode={} tone={} documents={}",
            config.mode.as_str(),
            config.tone.as_str(),
            documents.len()
        );
        let mut effects = apply(
            state,
            Msg::RunRequested {
                mode: config.mode,
                documents: documents.len(),
                pdfs: documents.iter().filter(|document| document.is_pdf()).count(),
            },
            sink,
        );
        if effects.is_empty() {
            return Err(PipelineError::InvalidRequest(INVALID_REQUEST.to_string()));
        }

        let synthesis_stage = SynthesisStage::new(self.client.as_ref(), &self.settings);
        let mut extractions = Vec::new();
        while let Some(effect) = effects.pop() {
            match effect {
                Effect::Extract => {
                    let stage = ExtractionStage::new(
                        self.client.as_ref(),
                        self.delay.as_ref(),
                        &self.settings,
                    );
                    extractions = match stage.run(documents, config, state, sink).await {
                        Ok(results) => results,
                        Err(err) => return Err(fail(state, err, sink)),
                    };
                    let succeeded = extractions.iter().filter(|result| !result.failed).count();
                    digest_info!(
                        "Extraction finished: {} succeeded, {} failed",
                        succeeded,
                        extractions.len() - succeeded
                    );
                    effects = apply(state, Msg::ExtractionFinished { succeeded }, sink);
                    if state.phase() == PipelinePhase::Error {
                        digest_error!("All document extractions failed");
                        return Err(PipelineError::NoSuccessfulExtractions);
                    }
                }
                Effect::Synthesize => {
                    let synthesis = match synthesis_stage.run(&extractions, config).await {
                        Ok(synthesis) => synthesis,
                        Err(err) => return Err(fail(state, err, sink)),
                    };
                    apply(state, Msg::SynthesisSucceeded, sink);
                    return Ok(RunOutput::Synthesis {
                        extractions,
                        synthesis,
                    });
                }
                Effect::Summarize => {
                    let document = documents.first().ok_or_else(|| {
                        PipelineError::InvalidRequest(INVALID_REQUEST.to_string())
                    })?;
                    let summary = match synthesis_stage.summarize(document, config).await {
                        Ok(summary) => summary,
                        Err(err) => return Err(fail(state, err, sink)),
                    };
                    apply(state, Msg::SynthesisSucceeded, sink);
                    return Ok(RunOutput::Summary(summary));
                }
            }
        }

        Err(PipelineError::InvalidRequest(INVALID_REQUEST.to_string()))
    }
}

fn fail(state: &mut RunState, err: PipelineError, sink: &dyn ProgressSink) -> PipelineError {
    digest_error!("Run failed: {}", err);
    apply(
        state,
        Msg::StageFailed {
            message: err.to_string(),
        },
        sink,
    );
    err
}
