//! # Difficulty Classifier
//!
//! Turns a list of [`TrackSummary`] values into Easy / Medium / Hard tiers for
//! one instrument:
//!
//! 1. [`build_prompt`] embeds the instrument and the tracks into a single
//!    instruction that asks for a strict Markdown layout.
//! 2. The [`LlmProvider`] is called once. No streaming, no retries.
//! 3. [`parse_classification`] reads the answer back into a [`Classification`],
//!    tolerating missing, repeated or malformed sections.

mod markup;
mod parse;
mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    llm::{CompletionOptions, LlmError, LlmProvider},
    types::{Classification, TrackSummary},
};

pub use markup::{Block, to_blocks};
pub use parse::{parse_classification, split_title_artist};
pub use prompt::build_prompt;

#[async_trait]
pub trait DifficultyClassifier: Send + Sync {
    async fn classify(
        &self,
        summaries: &[TrackSummary],
        instrument: &str,
    ) -> Result<Classification, LlmError>;
}

/// Classifier backed by a language model.
pub struct LlmClassifier {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
}

impl LlmClassifier {
    pub fn new(provider: Arc<dyn LlmProvider>, options: CompletionOptions) -> Self {
        LlmClassifier { provider, options }
    }
}

#[async_trait]
impl DifficultyClassifier for LlmClassifier {
    async fn classify(
        &self,
        summaries: &[TrackSummary],
        instrument: &str,
    ) -> Result<Classification, LlmError> {
        if summaries.is_empty() {
            return Ok(Classification::new());
        }

        let prompt = build_prompt(summaries, instrument);
        let response = self.provider.complete(&prompt, &self.options).await?;
        let classification = parse_classification(&response);

        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            songs = summaries.len(),
            parsed = classification.len(),
            "classified tracks"
        );

        Ok(classification)
    }
}
