//! Category + confidence classification over a completion capability.
//!
//! Builds the classification prompt, runs one completion with the default
//! generation parameters and reads the labeled lines back out of the reply.

use crate::error::{ClassifyError, Result};
use crate::extract::extract_section;
use crate::llm_client::{Completion, CompletionRequest};
use crate::prompts::classification::{
    build_classification_prompt, CATEGORY_MARKER, CONFIDENCE_MARKER, REASONING_MARKER,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Threshold accepted by [`classify_with_confidence`] when the caller has none
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Categories used by the interactive front end
pub const DEFAULT_CATEGORIES: &[&str] = &["Positive", "Negative", "Neutral"];

/// Fields read from one model reply. Each is `None` if its marker was missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Option<String>,
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ClassificationResult {
    /// Read the labeled lines out of a raw reply.
    pub fn from_reply(reply: &str) -> Self {
        Self {
            category: extract_section(reply, CATEGORY_MARKER),
            confidence: extract_section(reply, CONFIDENCE_MARKER),
            reasoning: extract_section(reply, REASONING_MARKER),
        }
    }

    /// Numeric reading of the confidence label: high 0.9, medium 0.6, low 0.3.
    pub fn confidence_score(&self) -> Option<f64> {
        let label = self.confidence.as_deref()?.trim_matches(&['[', ']'][..]);
        match label.to_ascii_lowercase().as_str() {
            "high" => Some(0.9),
            "medium" => Some(0.6),
            "low" => Some(0.3),
            _ => None,
        }
    }

    /// Whether the confidence label reaches `threshold`. Unknown labels never do.
    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.confidence_score().is_some_and(|score| score >= threshold)
    }
}

/// Reject input that cannot produce a meaningful classification.
pub fn validate_input<S: AsRef<str>>(text: &str, categories: &[S]) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ClassifyError::Validation("text to classify is empty".to_string()));
    }
    if categories.iter().all(|c| c.as_ref().trim().is_empty()) {
        return Err(ClassifyError::Validation("no categories given".to_string()));
    }
    Ok(())
}

async fn classify_reply<C, S>(client: &C, text: &str, categories: &[S]) -> Result<ClassificationResult>
where
    C: Completion,
    S: AsRef<str>,
{
    let request = CompletionRequest::new(build_classification_prompt(text, categories));
    let reply = client.complete(&request).await?;
    let result = ClassificationResult::from_reply(&reply);

    debug!(
        category = ?result.category,
        confidence = ?result.confidence,
        "Text classified"
    );

    Ok(result)
}

/// Classify `text`, reporting why it failed.
///
/// A reply with neither a category nor a confidence line is a
/// [`ClassifyError::FormatMismatch`].
pub async fn try_classify<C, S>(client: &C, text: &str, categories: &[S]) -> Result<ClassificationResult>
where
    C: Completion,
    S: AsRef<str>,
{
    let result = classify_reply(client, text, categories).await?;
    if result.category.is_none() && result.confidence.is_none() {
        return Err(ClassifyError::FormatMismatch(
            "reply has no CATEGORY or CONFIDENCE line".to_string(),
        ));
    }
    Ok(result)
}

/// Classify `text` into one of `categories`, or `None` if the completion failed.
///
/// Missing fields stay `None` inside the result. `confidence_threshold` is not
/// applied here; callers can gate with [`ClassificationResult::meets_threshold`].
pub async fn classify_with_confidence<C, S>(
    client: &C,
    text: &str,
    categories: &[S],
    confidence_threshold: f64,
) -> Option<ClassificationResult>
where
    C: Completion,
    S: AsRef<str>,
{
    debug!(threshold = confidence_threshold, "Classifying text");

    match classify_reply(client, text, categories).await {
        Ok(result) => Some(result),
        Err(e) => {
            warn!(error = %e, "Classification failed");
            None
        }
    }
}
