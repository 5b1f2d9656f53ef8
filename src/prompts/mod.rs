//! Prompt module for LLM-based operations.
//!
//! Templates are pure functions of their inputs. User text is inserted verbatim,
//! with no escaping.

pub mod classification;
pub mod structured;

pub use classification::*;
pub use structured::*;
