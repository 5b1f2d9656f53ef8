//! Stub completion capabilities shared by unit tests.

use crate::error::{ClassifyError, Result};
use crate::llm_client::{Completion, CompletionRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Returns the same reply for every prompt, or fails when `reply` is `None`.
pub struct StubCompletion {
    reply: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubCompletion {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Completion for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| ClassifyError::Validation("stubbed provider failure".to_string()))
    }
}

/// Replies with the category of the first rule whose keyword occurs in the classified text.
///
/// Fails when no rule matches.
pub struct KeywordCompletion {
    pub rules: Vec<(&'static str, &'static str)>,
}

impl Completion for KeywordCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let text = request
            .prompt
            .rsplit("Text to classify:\n")
            .next()
            .unwrap_or_default();
        self.rules
            .iter()
            .find(|(needle, _)| text.contains(needle))
            .map(|(_, category)| format!("1. CATEGORY: {category}\n2. CONFIDENCE: medium\n"))
            .ok_or_else(|| ClassifyError::Validation("no rule matched".to_string()))
    }
}

/// Category reply in the expected three-line format
pub fn reply_for(category: &str, confidence: &str) -> String {
    format!("1. CATEGORY: {category}\n2. CONFIDENCE: {confidence}\n3. REASONING: stub")
}
