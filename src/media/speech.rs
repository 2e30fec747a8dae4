//! Speech synthesis.
//!
//! [`SpeechSynthesizer`] is the capability seam; [`TranslateTts`] fetches MP3
//! audio from a translate-style `translate_tts` endpoint.  One request covers
//! the whole text as a single continuous track; there is no chunking.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SpeechConfig;
use crate::lang::LanguageCode;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("speech synthesis timed out")]
    Timeout,

    /// The service answered with a non-success status (commonly an
    /// unsupported language code).
    #[error("speech service rejected the request: {0}")]
    Rejected(String),

    /// The service returned zero audio bytes.
    #[error("speech service returned no audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for SpeechError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else {
            SpeechError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async trait for text-to-speech synthesis.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn SpeechSynthesizer>`).
///
/// # Arguments
/// * `text`     – The full text to speak, as one track.
/// * `language` – Voice language, from the fixed language table.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return encoded MP3 bytes.
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, SpeechError>;
}

// ---------------------------------------------------------------------------
// TranslateTts
// ---------------------------------------------------------------------------

/// Fetches speech audio from a translate-style `translate_tts` endpoint.
///
/// The endpoint takes the text and language code as query parameters and
/// answers with raw MP3 bytes.
pub struct TranslateTts {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl TranslateTts {
    /// Build a `TranslateTts` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.
    pub fn from_config(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for TranslateTts {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, SpeechError> {
        let url = format!("{}/translate_tts", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::Rejected(format!(
                "{status} for language {}",
                language.code()
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        Ok(bytes.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
