//! Prompt construction for narrative valuations
//!
//! # Narrative protocol, version 1
//!
//! The response MUST start with a line holding only the estimated fair
//! market value in US dollars, as a bare number (for example `125.50`).
//! Everything after that line is free-form analysis. The response SHOULD
//! end with a tag line `ESTIMATED_VALUE: <number>` repeating the verdict,
//! which is read when the first line cannot be parsed.

use appraisal_domain::{format_usd, NarrativeRequest};

/// Version of the narrative response contract
pub const NARRATIVE_PROTOCOL_VERSION: u32 = 1;

/// Default verdict tag named in the prompt
pub const DEFAULT_VERDICT_TAG: &str = "ESTIMATED_VALUE";

/// Builds the narrative valuation prompt
pub struct PromptBuilder<'a> {
    request: &'a NarrativeRequest,
    verdict_tag: String,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(request: &'a NarrativeRequest) -> Self {
        Self {
            request,
            verdict_tag: DEFAULT_VERDICT_TAG.to_string(),
        }
    }

    /// Use a different verdict tag
    pub fn with_verdict_tag(mut self, tag: impl Into<String>) -> Self {
        self.verdict_tag = tag.into();
        self
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(VALUATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("Item title: {}\n", self.request.title));
        if let Some(description) = &self.request.description {
            if !description.trim().is_empty() {
                prompt.push_str(&format!("Description: {}\n", description.trim()));
            }
        }
        if let Some(price) = self.request.current_price {
            prompt.push_str(&format!(
                "Current bid: {} (use it as an anchor, not as the answer)\n",
                format_usd(price, 2)
            ));
        }
        if !self.request.image_refs.is_empty() {
            prompt.push_str("Images:\n");
            for image in &self.request.image_refs {
                prompt.push_str(&format!("- {}\n", image));
            }
        }
        prompt.push('\n');

        if !self.request.market_context.trim().is_empty() {
            prompt.push_str("Market research:\n---\n");
            prompt.push_str(self.request.market_context.trim());
            prompt.push_str("\n---\n\n");
        }

        prompt.push_str(&format!(
            "Response format (protocol v{}):\n\
             Line 1: the estimated value as a bare number, e.g. 125.50\n\
             Following lines: your analysis\n\
             Last line: {}: <the same number>",
            NARRATIVE_PROTOCOL_VERSION, self.verdict_tag
        ));

        prompt
    }
}

const VALUATION_INSTRUCTIONS: &str = "You are an expert appraiser of auction items. \
Estimate the fair market value of the item below in US dollars.
Weigh completed sales above asking prices and forum speculation.
In your analysis cover what the item is, notable features, condition \
concerns and the reasoning behind your number.";
