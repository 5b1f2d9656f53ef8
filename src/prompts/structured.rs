//! Generic analysis-report prompt for free-form questions about a text.

/// Heading the model is asked to continue from
pub const ANALYSIS_HEADING: &str = "## Analysis";

/// Build a report-style prompt with "Input Text", "Question" and "Analysis" sections.
pub fn build_structured_prompt(text: &str, question: &str) -> String {
    format!(
        "# Analysis Report
## Input Text
{text}
## Question
{question}
{ANALYSIS_HEADING}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_structured_prompt() {
        let prompt = build_structured_prompt("The sky is green.", "Is this factual?");
        assert_eq!(
            prompt,
            "# Analysis Report\n## Input Text\nThe sky is green.\n## Question\nIs this factual?\n## Analysis\n"
        );
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = build_structured_prompt("t", "q");
        let input = prompt.find("## Input Text").unwrap();
        let question = prompt.find("## Question").unwrap();
        let analysis = prompt.find(ANALYSIS_HEADING).unwrap();
        assert!(input < question && question < analysis);
    }
}
