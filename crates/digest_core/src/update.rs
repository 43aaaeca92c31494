use digest_logging::digest_debug;

use crate::{Effect, Mode, Msg, PipelinePhase, RunState};

/// Message reported when no document survived extraction.
pub(crate) const ALL_EXTRACTIONS_FAILED: &str = "All document extractions failed.";

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase are ignored, so a run only moves
/// forward until [`Msg::Reset`].
pub fn update(mut state: RunState, msg: Msg) -> (RunState, Vec<Effect>) {
    let phase = state.phase();
    let effects = match msg {
        Msg::RunRequested {
            mode,
            documents,
            pdfs,
        } => {
            if phase != PipelinePhase::Idle || documents == 0 {
                return (state, Vec::new());
            }
            // A lone pasted text must be summarized; every other mix is extracted.
            let lone_text = documents == 1 && pdfs == 0;
            if (mode == Mode::SummarizeText) != lone_text {
                return (state, Vec::new());
            }
            state.begin(mode, documents);
            match mode {
                Mode::SummarizeText => vec![Effect::Summarize],
                Mode::ExtractAndSynthesize => vec![Effect::Extract],
            }
        }
        Msg::DocumentProcessed { failed } => {
            if phase == PipelinePhase::Extracting {
                state.record_document(failed);
            }
            Vec::new()
        }
        Msg::ExtractionFinished { succeeded } => {
            if phase != PipelinePhase::Extracting {
                return (state, Vec::new());
            }
            if succeeded == 0 {
                state.fail(ALL_EXTRACTIONS_FAILED.to_string());
                Vec::new()
            } else {
                state.advance(PipelinePhase::Synthesizing);
                vec![Effect::Synthesize]
            }
        }
        Msg::SynthesisSucceeded => {
            if phase == PipelinePhase::Synthesizing {
                state.advance(PipelinePhase::Complete);
            }
            Vec::new()
        }
        Msg::StageFailed { message } => {
            if matches!(
                phase,
                PipelinePhase::Extracting | PipelinePhase::Synthesizing
            ) {
                state.fail(message);
            }
            Vec::new()
        }
        Msg::Reset => {
            state.reset();
            Vec::new()
        }
    };

    if state.phase() != phase {
        digest_debug!("Run phase {:?} -> {:?}", phase, state.phase());
    }
    (state, effects)
}
