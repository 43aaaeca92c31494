/// Work the driver must perform after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the extraction stage over every document.
    Extract,
    /// Run the synthesis stage over the collected extractions.
    Synthesize,
    /// Summarize the single pasted text in one call.
    Summarize,
}
