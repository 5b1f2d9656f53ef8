//! Accuracy measurement over labeled samples.
//!
//! Samples are classified strictly one after another. A failed or
//! unparseable classification counts as incorrect.

use crate::classifier::{classify_with_confidence, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::error::{ClassifyError, Result};
use crate::llm_client::Completion;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// One labeled input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationSample {
    pub text: String,
    pub expected: String,
}

impl CalibrationSample {
    pub fn new(text: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expected: expected.into(),
        }
    }
}

/// Outcome of a calibration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub total: usize,
    pub correct: usize,
    /// `correct / total`, or 0 for an empty run
    pub accuracy: f64,
}

/// Load samples from a headered CSV with `text` and `expected` columns.
pub fn load_samples(path: &Path) -> Result<Vec<CalibrationSample>> {
    let mut reader = csv::Reader::from_path(path)?;
    let samples = reader
        .deserialize()
        .collect::<std::result::Result<Vec<CalibrationSample>, _>>()?;

    if samples.is_empty() {
        return Err(ClassifyError::Config(format!(
            "No calibration samples in {}",
            path.display()
        )));
    }

    info!(count = samples.len(), path = %path.display(), "Loaded calibration samples");
    Ok(samples)
}

/// Classify every sample and count exact category matches.
pub async fn calibrate_report<C, S>(
    client: &C,
    test_data: &[CalibrationSample],
    categories: &[S],
) -> CalibrationReport
where
    C: Completion,
    S: AsRef<str>,
{
    let mut correct = 0;

    for (idx, sample) in test_data.iter().enumerate() {
        let result =
            classify_with_confidence(client, &sample.text, categories, DEFAULT_CONFIDENCE_THRESHOLD)
                .await;
        let predicted = result.and_then(|r| r.category);
        let hit = predicted.as_deref() == Some(sample.expected.as_str());
        if hit {
            correct += 1;
        }

        debug!(
            idx = idx,
            expected = %sample.expected,
            predicted = ?predicted,
            hit = hit,
            "Calibration sample"
        );
    }

    let total = test_data.len();
    let accuracy = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };

    info!(total = total, correct = correct, accuracy = accuracy, "Calibration complete");

    CalibrationReport {
        total,
        correct,
        accuracy,
    }
}

/// Fraction of samples classified as their expected category, in `[0, 1]`.
pub async fn calibrate_confidence_threshold<C, S>(
    client: &C,
    test_data: &[CalibrationSample],
    categories: &[S],
) -> f64
where
    C: Completion,
    S: AsRef<str>,
{
    calibrate_report(client, test_data, categories).await.accuracy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reply_for, KeywordCompletion, StubCompletion};
    use std::io::Write;

    const CATEGORIES: [&str; 3] = ["Positive", "Negative", "Neutral"];

    #[tokio::test]
    async fn test_empty_samples_is_zero() {
        let stub = StubCompletion::replying(&reply_for("Positive", "high"));
        let accuracy = calibrate_confidence_threshold(&stub, &[], &CATEGORIES).await;
        assert_eq!(accuracy, 0.0);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_correct_is_one() {
        let stub = StubCompletion::replying(&reply_for("Positive", "high"));
        let samples = vec![
            CalibrationSample::new("great", "Positive"),
            CalibrationSample::new("superb", "Positive"),
        ];
        let accuracy = calibrate_confidence_threshold(&stub, &samples, &CATEGORIES).await;
        assert_eq!(accuracy, 1.0);
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_mixed_results_and_failures() {
        let client = KeywordCompletion {
            rules: vec![("love", "Positive"), ("hate", "Negative"), ("fine", "Positive")],
        };
        let samples = vec![
            CalibrationSample::new("I love it", "Positive"),
            CalibrationSample::new("I hate it", "Negative"),
            CalibrationSample::new("it is fine", "Neutral"),
            CalibrationSample::new("no rule for this", "Neutral"),
        ];
        let report = calibrate_report(&client, &samples, &CATEGORIES).await;
        assert_eq!(report.total, 4);
        assert_eq!(report.correct, 2);
        assert_eq!(report.accuracy, 0.5);
    }

    #[tokio::test]
    async fn test_match_is_exact() {
        let stub = StubCompletion::replying(&reply_for("positive", "high"));
        let samples = vec![CalibrationSample::new("great", "Positive")];
        assert_eq!(calibrate_confidence_threshold(&stub, &samples, &CATEGORIES).await, 0.0);
    }

    #[test]
    fn test_load_samples() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,expected").unwrap();
        writeln!(file, "\"I love this, truly\",Positive").unwrap();
        writeln!(file, "Awful service,Negative").unwrap();
        file.flush().unwrap();

        let samples = load_samples(file.path()).unwrap();
        assert_eq!(
            samples,
            vec![
                CalibrationSample::new("I love this, truly", "Positive"),
                CalibrationSample::new("Awful service", "Negative"),
            ]
        );
    }

    #[test]
    fn test_load_samples_rejects_empty_and_malformed() {
        let mut empty = tempfile::NamedTempFile::new().unwrap();
        writeln!(empty, "text,expected").unwrap();
        empty.flush().unwrap();
        assert!(matches!(load_samples(empty.path()), Err(ClassifyError::Config(_))));

        let mut malformed = tempfile::NamedTempFile::new().unwrap();
        writeln!(malformed, "body,label").unwrap();
        writeln!(malformed, "x,y").unwrap();
        malformed.flush().unwrap();
        assert!(matches!(load_samples(malformed.path()), Err(ClassifyError::Csv(_))));

        assert!(load_samples(Path::new("/nonexistent/samples.csv")).is_err());
    }
}
