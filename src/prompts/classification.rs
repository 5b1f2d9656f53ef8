//! Classification prompt and the markers used to read its answer back.

/// Marker preceding the chosen category in the model reply
pub const CATEGORY_MARKER: &str = "1. CATEGORY: ";

/// Marker preceding the confidence label
pub const CONFIDENCE_MARKER: &str = "2. CONFIDENCE: ";

/// Marker preceding the free-text reasoning
pub const REASONING_MARKER: &str = "3. REASONING: ";

/// Build the classification prompt for `text` over `categories`.
///
/// Categories are joined with `", "` in the given order. The reply format asks
/// for one line per marker so the section extractor can split on newlines.
pub fn build_classification_prompt<S: AsRef<str>>(text: &str, categories: &[S]) -> String {
    let categories = categories
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Classify the following text into exactly one of these categories: {categories}.
Response format:
{CATEGORY_MARKER}[one of: {categories}]
{CONFIDENCE_MARKER}[high|medium|low]
{REASONING_MARKER}[explanation]
Text to classify:
{text}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_classification_prompt() {
        let prompt =
            build_classification_prompt("I love this product", &["Positive", "Negative", "Neutral"]);
        assert!(prompt.contains("1. CATEGORY: [one of: Positive, Negative, Neutral]"));
        assert!(prompt.contains("2. CONFIDENCE: [high|medium|low]"));
        assert!(prompt.contains("3. REASONING: [explanation]"));
        assert!(prompt.ends_with("Text to classify:\nI love this product\n"));
    }

    #[test]
    fn test_category_order_preserved() {
        let categories = vec!["zeta".to_string(), "alpha".to_string(), "mid".to_string()];
        let prompt = build_classification_prompt("x", &categories);
        assert!(prompt.contains("categories: zeta, alpha, mid."));
    }

    #[test]
    fn test_text_is_not_escaped() {
        let text = "{categories} and 2. CONFIDENCE: low";
        let prompt = build_classification_prompt(text, &["A"]);
        assert!(prompt.contains(text));
    }
}
