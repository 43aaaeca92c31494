//! Prompt assembly for the three kinds of model call a run makes.
//!
//! Every builder method is pure string construction: unset configuration falls
//! back to the academic voice and nothing here can fail.

use crate::{RunConfig, Tone};

const ACADEMIC_CLAUSE: &str = "Write in a formal, academic tone suitable for a research paper or scientific context.";

const LINKEDIN_CLAUSE: &str = "Write for a professional social feed: conversational but credible, short paragraphs, \
a strong opening line, and concrete takeaways a busy practitioner can act on. Keep hype out of it.";

const LAYMAN_CLAUSE: &str = "Explain it in a very human and accessible way, as if to a curious friend who is smart \
but not an expert in the field. Use simple terms and analogies, focus on the key takeaways and their real-world \
implications, and avoid jargon completely.";

const SUMMARY_INTRO: &str = "You are a research assistant. Summarize the following text.";

const TEXT_HEADER: &str = "Here is the text to analyze:";

const SYNTHESIS_INPUT_HEADER: &str = "**Here is the structured input from multiple papers:**";

const EXTRACTION_SECTIONS: [(&str, &[&str]); 7] = [
    ("1. Research Question", &["What problem is being investigated?"]),
    (
        "2. Background",
        &["Prior context, motivation, and gaps in previous work."],
    ),
    (
        "3. Methodology",
        &[
            "Study type (e.g., RCT, observational, simulation).",
            "Sample size and characteristics.",
            "Data collection tools and procedures.",
            "Controls, variables, and models.",
        ],
    ),
    (
        "4. Key Findings",
        &[
            "All experimental results.",
            "Quantitative outcomes, effect sizes, and statistical metrics (e.g. p-values).",
            "Any differences across groups or conditions.",
        ],
    ),
    (
        "5. Conclusions",
        &["What the authors claim based on their results."],
    ),
    ("6. Limitations", &["Any constraints or cautions mentioned."]),
    (
        "7. Future Directions",
        &["Any proposed next steps or open questions."],
    ),
];

const SYNTHESIS_SECTIONS: [(&str, &[&str]); 7] = [
    (
        "1. Combined Research Question(s)",
        &["What core questions or hypotheses are explored across the papers?"],
    ),
    (
        "2. Shared Background & Motivation",
        &[
            "What is the overall context or significance of this research area?",
            "Recurring gaps or goals across the literature.",
        ],
    ),
    (
        "3. Methodologies (Across All Papers)",
        &[
            "All experimental or analytical methods used, including sample sizes, populations, models, and tools.",
            "Methodological similarities and differences between papers.",
        ],
    ),
    (
        "4. Key Findings (Synthesized)",
        &[
            "All key results, including quantitative metrics (e.g., effect sizes, p-values).",
            "Which findings appear across multiple papers and which are unique.",
        ],
    ),
    (
        "5. Authors' Conclusions (Across Studies)",
        &[
            "What the authors concluded individually or collectively.",
            "A clear distinction between well-supported claims and speculative statements.",
        ],
    ),
    (
        "6. Limitations",
        &["All limitations mentioned across the papers, grouped by type where possible."],
    ),
    (
        "7. Suggested Future Directions",
        &["Future research ideas or open questions that appear across the studies."],
    ),
];

/// Builds final prompt strings for one run.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    config: &'a RunConfig,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Fixed wording for a tone. Personalized has no wording of its own and
    /// reads as academic here.
    pub fn tone_clause(tone: Tone) -> &'static str {
        match tone {
            Tone::Academic | Tone::Personalized => ACADEMIC_CLAUSE,
            Tone::Linkedin => LINKEDIN_CLAUSE,
            Tone::Layman => LAYMAN_CLAUSE,
        }
    }

    /// Per-document extraction prompt. When `page_annotated`, every extracted
    /// point must carry a `(p. N)` citation.
    pub fn extraction(&self, body: &str, page_annotated: bool) -> String {
        let cite = if page_annotated { " (p. X)" } else { "" };
        let mut prompt = String::from("You are a scientific analysis assistant. ");
        if page_annotated {
            prompt.push_str(
                "You will receive the full text of a research paper, with page breaks clearly marked as \
\"--- Page X ---\".\n\nYour task is to extract and organize all essential scientific information from the \
paper. **For every piece of information you extract, you MUST cite the page number it came from in \
parentheses, like this: (p. 5).**",
            );
        } else {
            prompt.push_str(
                "You will receive the full text of a research document.\n\nYour task is to extract and \
organize all essential scientific information from it.",
            );
        }
        prompt.push_str("\n\nFollow this format strictly:\n\n---\n\n");
        for label in ["Title", "Authors", "Journal/DOI"] {
            prompt.push_str(&format!("**{label}:**\n[Extracted if available]{cite}\n\n"));
        }
        prompt.push_str("---\n");
        push_sections(&mut prompt, &EXTRACTION_SECTIONS, cite, |h| format!("### {h}"));
        prompt.push_str("\n---\n\n**Instructions:**\n- Be exhaustive and precise.\n");
        if page_annotated {
            prompt.push_str("- **Cite the page number for every single point.**\n");
        }
        prompt.push_str(
            "- Do NOT skip anything, especially in methods or findings.\n\
- If a section is not present, write \"Not stated.\"\n\
- Use bullet points when listing multiple items.",
        );
        prompt.push_str(&format!("\n\n{TEXT_HEADER}\n\n{body}"));
        prompt
    }

    /// Cross-document synthesis prompt over the combined extraction blocks.
    ///
    /// With `page_annotated` inputs every point must cite `[filename, p. N]`,
    /// several citations per point when more than one source agrees. A writing
    /// sample, when in effect, is prepended and overrides the tone wording but
    /// never the citation rules.
    pub fn synthesis(&self, combined: &str, page_annotated: bool) -> String {
        let cite = if page_annotated {
            " [Cite sources with page numbers]"
        } else {
            ""
        };
        let mut prompt = String::new();
        if let Some(sample) = self.config.style_sample() {
            prompt.push_str(
                "Your final output must be written in the style of the sample text provided below. \
All other instructions in the prompt remain the same, including the mandatory citation format.\n\n",
            );
            push_sample(&mut prompt, sample);
            prompt.push_str("\n\n");
        }
        prompt.push_str(
            "You are a scientific writing assistant. You have been given structured research findings from \
multiple documents, each introduced by a \"--- Paper: <name> ---\" line. Your task is to create a single, \
unified summary that synthesizes all important information.",
        );
        if page_annotated {
            prompt.push_str(
                "\n\n---\n**CRITICAL CITATION REQUIREMENT:**\n\nFor **every statement** you make, you **MUST** \
include an inline citation naming the source paper and the exact page number, like this: \
**[filename.pdf, p. 5]**. If a point is supported by more than one paper, cite them all, like this: \
**[miller_2022.pdf, p. 12; chen_2021.pdf, p. 15]**.\n\n**An uncited statement, or a citation without a page \
number, makes the output useless. Be meticulous.**\n---",
            );
        }
        prompt.push_str("\n\nUse this exact structure for your output:\n");
        push_sections(&mut prompt, &SYNTHESIS_SECTIONS, cite, |h| format!("**{h}**"));
        prompt.push_str(
            "\n---\n\n**Instructions:**\n\
- You are synthesizing high-detail research, not just summarizing.\n\
- Include minor but important data points.\n\
- Do NOT oversimplify or omit important nuance.\n",
        );
        if page_annotated {
            prompt.push_str("- The input already carries page numbers for each fact. Use them.\n");
        }
        if self.config.style_sample().is_none() {
            prompt.push_str(&format!(
                "- {}\n",
                Self::tone_clause(self.config.effective_tone())
            ));
        }
        prompt.push_str(&format!("\n---\n\n{SYNTHESIS_INPUT_HEADER}\n\n{combined}"));
        prompt
    }

    /// Plain summarization prompt for a single pasted text.
    pub fn summary(&self, content: &str) -> String {
        let mut prompt = format!("{SUMMARY_INTRO}\n\n");
        match self.config.style_sample() {
            Some(sample) => {
                prompt.push_str(
                    "Your response must adopt the writing style, tone, and voice of the following sample text:\n\n",
                );
                push_sample(&mut prompt, sample);
            }
            None => prompt.push_str(Self::tone_clause(self.config.effective_tone())),
        }
        prompt.push_str(&format!("\n\n{TEXT_HEADER}\n\n{content}"));
        prompt
    }
}

fn push_sections(
    prompt: &mut String,
    sections: &[(&str, &[&str])],
    cite: &str,
    heading: impl Fn(&str) -> String,
) {
    for (title, points) in sections {
        prompt.push_str(&format!("\n{}\n", heading(*title)));
        for point in *points {
            prompt.push_str(&format!("- {point}{cite}\n"));
        }
    }
}

fn push_sample(prompt: &mut String, sample: &str) {
    prompt.push_str("--- WRITING STYLE SAMPLE ---\n");
    prompt.push_str(sample);
    prompt.push_str("\n--- END SAMPLE ---");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;

    fn config(tone: Tone) -> RunConfig {
        RunConfig::new(Mode::ExtractAndSynthesize).with_tone(tone)
    }

    #[test]
    fn extraction_requires_page_citations_when_annotated() {
        let config = config(Tone::Academic);
        let prompt = PromptBuilder::new(&config).extraction("--- Page 1 ---\nbody", true);
        assert!(prompt.contains("(p. 5)"));
        assert!(prompt.contains("### 7. Future Directions"));
        assert!(prompt.ends_with("--- Page 1 ---\nbody"));
    }

    #[test]
    fn extraction_without_pages_has_no_citation_rule() {
        let config = config(Tone::Academic);
        let prompt = PromptBuilder::new(&config).extraction("body", false);
        assert!(!prompt.contains("(p. X)"));
        assert!(!prompt.contains("Cite the page number"));
        assert!(prompt.contains("### 3. Methodology"));
    }

    #[test]
    fn synthesis_sections_are_all_present() {
        let config = config(Tone::Academic);
        let prompt = PromptBuilder::new(&config).synthesis("blocks", true);
        for (heading, _) in SYNTHESIS_SECTIONS {
            assert!(prompt.contains(heading), "missing {heading}");
        }
        assert!(prompt.contains("[filename.pdf, p. 5]"));
        assert!(prompt.ends_with("blocks"));
    }

    #[test]
    fn style_sample_prefixes_synthesis_and_keeps_citations() {
        let config = config(Tone::Personalized).with_writing_sample("Short. Punchy. Mine.");
        let prompt = PromptBuilder::new(&config).synthesis("blocks", true);
        assert!(prompt.starts_with("Your final output must be written in the style"));
        assert!(prompt.contains("Short. Punchy. Mine."));
        assert!(prompt.contains("CRITICAL CITATION REQUIREMENT"));
        assert!(!prompt.contains(ACADEMIC_CLAUSE));
    }

    #[test]
    fn each_tone_has_distinct_wording() {
        let clauses = [Tone::Academic, Tone::Linkedin, Tone::Layman].map(PromptBuilder::tone_clause);
        assert_ne!(clauses[0], clauses[1]);
        assert_ne!(clauses[1], clauses[2]);
        assert_ne!(clauses[0], clauses[2]);
    }
}
