//! Digest engine: model calls and the extraction/synthesis pipeline.
mod client;
mod delay;
mod error;
mod extraction;
mod pipeline;
mod progress;
mod synthesis;
mod types;

pub use client::{AnthropicClient, ModelClient, ModelSettings};
pub use delay::{Delay, TokioDelay};
pub use error::{ModelError, PipelineError};
pub use extraction::ExtractionStage;
pub use pipeline::{Pipeline, PipelineSettings};
pub use progress::{LogProgressSink, ProgressSink};
pub use synthesis::{combine_extractions, SynthesisStage};
pub use types::{EngineEvent, ExtractionResult, RunOutput, SynthesisResult};
