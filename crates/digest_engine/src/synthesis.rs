use digest_core::{enforce_limit, Document, PromptBuilder, RunConfig};
use digest_logging::digest_info;

use crate::{ExtractionResult, ModelClient, PipelineError, PipelineSettings, SynthesisResult};

/// Joins the successful extractions, in order, into labeled blocks.
///
/// Returns `None` when every extraction failed.
pub fn combine_extractions(extractions: &[ExtractionResult]) -> Option<String> {
    let blocks: Vec<String> = extractions
        .iter()
        .filter(|extraction| !extraction.failed)
        .map(|extraction| {
            format!(
                "--- Paper: {} ---\n\n{}",
                extraction.document_name, extraction.summary
            )
        })
        .collect();
    if blocks.is_empty() {
        None
    } else {
        Some(blocks.join("\n\n"))
    }
}

/// Makes the single closing model call of a run.
pub struct SynthesisStage<'a> {
    client: &'a dyn ModelClient,
    settings: &'a PipelineSettings,
}

impl<'a> SynthesisStage<'a> {
    pub fn new(client: &'a dyn ModelClient, settings: &'a PipelineSettings) -> Self {
        Self { client, settings }
    }

    /// Synthesizes the successful extractions. Fails without calling the
    /// model when none succeeded.
    pub async fn run(
        &self,
        extractions: &[ExtractionResult],
        config: &RunConfig,
    ) -> Result<SynthesisResult, PipelineError> {
        let combined =
            combine_extractions(extractions).ok_or(PipelineError::NoSuccessfulExtractions)?;
        let page_annotated = extractions
            .iter()
            .any(|extraction| !extraction.failed && extraction.page_annotated);
        let combined = enforce_limit(&combined, self.settings.max_content_length);

        digest_info!(
            "Starting synthesis over {} extraction(s)",
            extractions.iter().filter(|e| !e.failed).count()
        );
        let prompt = PromptBuilder::new(config).synthesis(&combined, page_annotated);
        let text = self.client.complete(&prompt).await?;
        digest_info!("Synthesis complete");
        Ok(SynthesisResult { text })
    }

    /// Single-text path: one tone-driven summary of one document.
    pub async fn summarize(
        &self,
        document: &Document,
        config: &RunConfig,
    ) -> Result<SynthesisResult, PipelineError> {
        let body = document.body();
        let body = enforce_limit(&body, self.settings.max_content_length);
        let prompt = PromptBuilder::new(config).summary(&body);
        let text = self.client.complete(&prompt).await?;
        digest_info!("Summary complete for {}", document.name());
        Ok(SynthesisResult { text })
    }
}
