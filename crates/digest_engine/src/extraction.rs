use digest_core::{enforce_limit, Document, Msg, Progress, PromptBuilder, RunConfig, RunState};
use digest_logging::{digest_error, digest_info};

use crate::pipeline::apply;
use crate::{
    Delay, EngineEvent, ExtractionResult, ModelClient, ModelError, PipelineError,
    PipelineSettings, ProgressSink,
};

/// Runs the extraction prompt once per document, strictly one call at a time.
pub struct ExtractionStage<'a> {
    client: &'a dyn ModelClient,
    delay: &'a dyn Delay,
    settings: &'a PipelineSettings,
}

impl<'a> ExtractionStage<'a> {
    pub fn new(
        client: &'a dyn ModelClient,
        delay: &'a dyn Delay,
        settings: &'a PipelineSettings,
    ) -> Self {
        Self {
            client,
            delay,
            settings,
        }
    }

    /// Extracts every document in order and returns one result per document.
    ///
    /// A failed call is recorded in its result and the loop moves on. Only a
    /// configuration error stops the stage, since no later call could succeed.
    /// The inter-call delay is awaited between calls, never after the last one.
    pub async fn run(
        &self,
        documents: &[Document],
        config: &RunConfig,
        state: &mut RunState,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<ExtractionResult>, PipelineError> {
        let total = documents.len();
        let prompts = PromptBuilder::new(config);
        let mut results = Vec::with_capacity(total);

        for (index, document) in documents.iter().enumerate() {
            if index > 0 {
                self.delay.wait(self.settings.inter_call_delay).await;
            }
            digest_info!("Extracting {}/{}: {}", index + 1, total, document.name());

            let page_annotated = document.is_page_annotated();
            let body = document.body();
            let body = enforce_limit(&body, self.settings.max_content_length);
            let prompt = prompts.extraction(&body, page_annotated);

            let result = match self.client.complete(&prompt).await {
                Ok(summary) => {
                    digest_info!("Extracted: {}", document.name());
                    ExtractionResult::succeeded(document.name(), summary, page_annotated)
                }
                Err(ModelError::Config(message)) => return Err(PipelineError::Config(message)),
                Err(err) => {
                    digest_error!("Failed to extract {}: {}", document.name(), err);
                    ExtractionResult::failed(document.name(), &err, page_annotated)
                }
            };

            apply(
                state,
                Msg::DocumentProcessed {
                    failed: result.failed,
                },
                sink,
            );
            sink.emit(EngineEvent::DocumentExtracted {
                document_name: result.document_name.clone(),
                progress: Progress {
                    completed: index + 1,
                    total,
                },
                failed: result.failed,
            });
            results.push(result);
        }

        Ok(results)
    }
}
