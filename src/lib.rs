//! # textclassify
//!
//! LLM-backed text classification with confidence labels.
//!
//! ## Modules
//!
//! - [`llm_client`] - Completion capability over an OpenAI-compatible chat API
//! - [`prompts`] - Classification and structured-report prompt templates
//! - [`extract`] - Marker-anchored field extraction from model replies
//! - [`classifier`] - Category + confidence classification
//! - [`calibration`] - Accuracy over labeled samples
//! - [`compare`] - One text across several models
//! - [`analysis`] - Free-form questions about a text
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use textclassify::{classifier, LlmClient, LlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = LlmClient::new(LlmConfig::new(std::env::var("GROQ_API_KEY")?))?;
//!     let result = classifier::classify_with_confidence(
//!         &client,
//!         "I love this product",
//!         classifier::DEFAULT_CATEGORIES,
//!         classifier::DEFAULT_CONFIDENCE_THRESHOLD,
//!     )
//!     .await;
//!     println!("{:?}", result);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod calibration;
pub mod classifier;
pub mod compare;
pub mod error;
pub mod extract;
pub mod llm_client;
pub mod prompts;

#[cfg(test)]
mod testing;

pub use error::{ClassifyError, Result};
pub use llm_client::{Completion, CompletionRequest, LlmClient, LlmConfig};
