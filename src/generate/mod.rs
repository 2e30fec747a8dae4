//! Generation module: prompt assembly and the hosted text-generation client.
//!
//! This module provides:
//! * [`TextGenerator`] — async trait implemented by all generation backends.
//! * [`GeminiClient`] — REST client for the hosted generation service.
//! * [`PromptBuilder`] — combines text, output type, language and optional
//!   instructions into one request string.
//! * [`GenerateError`] / [`PromptError`] — error variants for generation.

pub mod client;
pub mod prompt;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiClient, GenerateError, TextGenerator};
pub use prompt::{PromptBuilder, PromptError};
