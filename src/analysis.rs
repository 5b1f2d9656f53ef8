//! Free-form question answering over a text sample.

use crate::llm_client::{Completion, CompletionRequest};
use crate::prompts::structured::build_structured_prompt;
use tracing::debug;

/// Ask `question` about `text` and return the trimmed analysis, or `None` on failure.
pub async fn ask<C: Completion>(client: &C, text: &str, question: &str) -> Option<String> {
    let request = CompletionRequest::new(build_structured_prompt(text, question));
    let analysis = client.complete_or_none(&request).await?;
    debug!(chars = analysis.len(), "Analysis received");
    Some(analysis.trim().to_string())
}
