/// Name given to the synthetic document wrapping pasted text.
pub const PASTED_CONTENT_NAME: &str = "Pasted Content";

/// One page of a parsed PDF. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub text: String,
}

impl Page {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DocumentSource {
    Pasted { text: String },
    Pdf { pages: Vec<Page> },
}

/// A single source handed to the pipeline, reduced to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    source: DocumentSource,
}

impl Document {
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            name: PASTED_CONTENT_NAME.to_string(),
            source: DocumentSource::Pasted { text: text.into() },
        }
    }

    /// Builds a PDF document. Pages are kept in the order given.
    pub fn pdf(name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            name: name.into(),
            source: DocumentSource::Pdf { pages },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self.source, DocumentSource::Pdf { .. })
    }

    /// True when the body carries `--- Page N ---` markers the model can cite.
    pub fn is_page_annotated(&self) -> bool {
        self.is_pdf()
    }

    /// Text sent to the model: pasted text verbatim, or every page prefixed
    /// with its page marker and separated by a blank line.
    pub fn body(&self) -> String {
        match &self.source {
            DocumentSource::Pasted { text } => text.clone(),
            DocumentSource::Pdf { pages } => pages
                .iter()
                .map(|page| format!("--- Page {} ---\n{}", page.number, page.text))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}
