use crate::Document;

/// Summarization voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Academic,
    Linkedin,
    Layman,
    /// Match the voice of a user-supplied writing sample.
    Personalized,
}

impl Tone {
    /// Maps a wire value to a tone. Missing or unknown values fall back to
    /// [`Tone::Academic`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("linkedin") => Tone::Linkedin,
            Some("layman") => Tone::Layman,
            Some("personalized") => Tone::Personalized,
            _ => Tone::Academic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Academic => "academic",
            Tone::Linkedin => "linkedin",
            Tone::Layman => "layman",
            Tone::Personalized => "personalized",
        }
    }
}

/// Which pipeline path a run takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One pasted text, one model call.
    SummarizeText,
    /// Per-document extraction followed by one synthesis call.
    ExtractAndSynthesize,
}

impl Mode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "summarize_text" => Some(Mode::SummarizeText),
            "extract_and_synthesize" => Some(Mode::ExtractAndSynthesize),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::SummarizeText => "summarize_text",
            Mode::ExtractAndSynthesize => "extract_and_synthesize",
        }
    }

    /// Picks the path for a document set: a lone pasted text is summarized
    /// directly, anything else goes through extraction. `None` when empty.
    pub fn for_documents(documents: &[Document]) -> Option<Self> {
        match documents {
            [] => None,
            [only] if !only.is_pdf() => Some(Mode::SummarizeText),
            _ => Some(Mode::ExtractAndSynthesize),
        }
    }
}

/// Per-run parameters. Built once and never mutated while the run is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub tone: Tone,
    pub writing_sample: Option<String>,
    pub mode: Mode,
}

impl RunConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            tone: Tone::default(),
            writing_sample: None,
            mode,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_writing_sample(mut self, sample: impl Into<String>) -> Self {
        self.writing_sample = Some(sample.into());
        self
    }

    /// The writing sample to imitate, only for a personalized tone with a
    /// non-blank sample.
    pub fn style_sample(&self) -> Option<&str> {
        if self.tone != Tone::Personalized {
            return None;
        }
        self.writing_sample
            .as_deref()
            .filter(|sample| !sample.trim().is_empty())
    }

    /// Tone whose fixed wording applies. A personalized tone without a usable
    /// sample reads as academic.
    pub fn effective_tone(&self) -> Tone {
        match self.tone {
            Tone::Personalized if self.style_sample().is_none() => Tone::Academic,
            tone => tone,
        }
    }
}
