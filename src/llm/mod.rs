//! Language model providers.
//!
//! [`LlmProvider`] is the seam the classifier talks to; [`GeminiProvider`] is
//! the only backend today.

mod gemini;
mod provider;

pub use gemini::GeminiProvider;
pub use provider::{CompletionOptions, LlmError, LlmProvider, ModelInfo};
