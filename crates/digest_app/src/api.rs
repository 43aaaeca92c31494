//! Wire types for the single request/response contract.

use std::collections::HashMap;

use digest_core::{Document, Mode, Page, RunConfig, Tone};
use digest_engine::{ExtractionResult, PipelineError, RunOutput};
use serde::{Deserialize, Serialize};

const INVALID_REQUEST: &str = "Invalid request mode or missing parameters.";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestRequest {
    pub mode: Option<String>,
    pub content: Option<String>,
    pub pdfs: Option<Vec<PdfPayload>>,
    pub tone: Option<String>,
    pub writing_sample: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfPayload {
    pub name: String,
    #[serde(default)]
    pub pages: Vec<PagePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagePayload {
    pub page: u32,
    pub content: String,
}

impl DigestRequest {
    /// Turns the request into the documents and configuration of one run.
    ///
    /// Pasted content joins the PDFs as its own document unless the mode is
    /// `summarize_text`. Without a mode the path follows the document mix, and
    /// an explicit mode must agree with it. Page numbers start at 1. Repeated
    /// file names get a ` (n)` suffix.
    pub fn into_run(self) -> Result<(Vec<Document>, RunConfig), PipelineError> {
        let invalid = || PipelineError::InvalidRequest(INVALID_REQUEST.to_string());
        let requested = match self.mode.as_deref() {
            Some(raw) => Some(Mode::parse(raw).ok_or_else(invalid)?),
            None => None,
        };
        let content = self.content.filter(|text| !text.trim().is_empty());

        let documents = match requested {
            Some(Mode::SummarizeText) => vec![Document::pasted(content.ok_or_else(invalid)?)],
            _ => {
                let mut names = UniqueNames::default();
                let mut documents = Vec::new();
                for pdf in self.pdfs.unwrap_or_default() {
                    if pdf.pages.iter().any(|page| page.page == 0) {
                        return Err(invalid());
                    }
                    let pages = pdf
                        .pages
                        .into_iter()
                        .map(|page| Page::new(page.page, page.content))
                        .collect();
                    documents.push(Document::pdf(names.claim(&pdf.name), pages));
                }
                if let Some(text) = content {
                    documents.push(Document::pasted(text));
                }
                documents
            }
        };
        let inferred = Mode::for_documents(&documents).ok_or_else(invalid)?;
        let mode = requested.unwrap_or(inferred);
        if mode != inferred {
            return Err(invalid());
        }

        let config = RunConfig {
            tone: Tone::parse(self.tone.as_deref()),
            writing_sample: self.writing_sample,
            mode,
        };
        Ok((documents, config))
    }
}

#[derive(Default)]
struct UniqueNames {
    seen: HashMap<String, usize>,
}

impl UniqueNames {
    fn claim(&mut self, name: &str) -> String {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name.to_string()
        } else {
            format!("{name} ({count})")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionJson {
    pub name: String,
    pub summary: String,
    pub failed: bool,
}

impl From<ExtractionResult> for ExtractionJson {
    fn from(result: ExtractionResult) -> Self {
        Self {
            name: result.document_name,
            summary: result.summary,
            failed: result.failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DigestResponse {
    Summary {
        summary: String,
    },
    Synthesis {
        extractions: Vec<ExtractionJson>,
        #[serde(rename = "synthesisResult")]
        synthesis_result: String,
    },
}

impl From<RunOutput> for DigestResponse {
    fn from(output: RunOutput) -> Self {
        match output {
            RunOutput::Summary(summary) => DigestResponse::Summary {
                summary: summary.text,
            },
            RunOutput::Synthesis {
                extractions,
                synthesis,
            } => DigestResponse::Synthesis {
                extractions: extractions.into_iter().map(ExtractionJson::from).collect(),
                synthesis_result: synthesis.text,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
