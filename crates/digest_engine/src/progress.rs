use digest_logging::digest_info;

use crate::EngineEvent;

/// Receives run progress as it happens.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Writes every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::PhaseChanged(phase) => digest_info!("Run phase: {:?}", phase),
            EngineEvent::DocumentExtracted {
                document_name,
                progress,
                failed,
            } => digest_info!(
                "Extracted {}/{} name={} failed={}",
                progress.completed,
                progress.total,
                document_name,
                failed
            ),
        }
    }
}
