//! Digest core: documents, prompts, payload limits and the pure run state machine.
mod config;
mod document;
mod effect;
mod guard;
mod msg;
mod prompt;
mod state;
mod update;
mod view_model;

pub use config::{Mode, RunConfig, Tone};
pub use document::{Document, Page, PASTED_CONTENT_NAME};
pub use effect::Effect;
pub use guard::{enforce_limit, MAX_CONTENT_LENGTH};
pub use msg::Msg;
pub use prompt::PromptBuilder;
pub use state::{PipelinePhase, Progress, RunState};
pub use update::update;
pub use view_model::RunViewModel;
