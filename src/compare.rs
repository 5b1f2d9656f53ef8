//! Side-by-side classification of one text across several models.

use crate::classifier::{classify_with_confidence, ClassificationResult, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::error::Result;
use crate::llm_client::{Completion, LlmClient, LlmConfig};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Per-model results, keyed by model identifier
pub type ModelComparison = BTreeMap<String, Option<ClassificationResult>>;

/// Classify `text` once per model, building a fresh client for each with `make_client`.
///
/// Models run sequentially. A model whose client cannot be built or whose
/// classification fails maps to `None` without affecting the others.
pub async fn compare_models_with<C, F, M, S>(
    mut make_client: F,
    models: &[M],
    text: &str,
    categories: &[S],
) -> ModelComparison
where
    C: Completion,
    F: FnMut(&str) -> Result<C>,
    M: AsRef<str>,
    S: AsRef<str>,
{
    let mut results = BTreeMap::new();

    for model in models.iter().map(AsRef::as_ref) {
        info!(model = %model, "Classifying with model");

        let result = match make_client(model) {
            Ok(client) => {
                classify_with_confidence(&client, text, categories, DEFAULT_CONFIDENCE_THRESHOLD).await
            }
            Err(e) => {
                warn!(model = %model, error = %e, "Failed to build client");
                None
            }
        };
        results.insert(model.to_string(), result);
    }

    results
}

/// Classify `text` with each model, reusing the provider and credential from `base`.
pub async fn compare_models<M, S>(
    base: &LlmConfig,
    models: &[M],
    text: &str,
    categories: &[S],
) -> ModelComparison
where
    M: AsRef<str>,
    S: AsRef<str>,
{
    compare_models_with(
        |model| LlmClient::new(base.with_model(model)),
        models,
        text,
        categories,
    )
    .await
}
