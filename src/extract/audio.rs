//! Audio transcription for uploaded audio files.
//!
//! [`SpeechRecognizer`] is the capability seam; [`ApiRecognizer`] calls any
//! OpenAI-compatible `/v1/audio/transcriptions` endpoint.  All connection
//! details come from [`TranscriptionConfig`]; nothing is hardcoded.
//!
//! Transcription failure is never fatal to extraction: the caller substitutes
//! [`TRANSCRIPTION_SENTINEL`] so the user still gets a value in the input
//! slot (see [`transcribe_or_sentinel`]).

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranscriptionConfig;

/// Fallback text substituted when the recognizer cannot produce a transcript.
pub const TRANSCRIPTION_SENTINEL: &str = "Could not understand the audio.";

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Errors that can occur during audio transcription.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// No API key in config and none in the environment.
    #[error("transcription API key is not configured")]
    MissingApiKey,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("transcription request timed out")]
    Timeout,

    /// The HTTP response could not be parsed as expected JSON.
    #[error("failed to parse transcription response: {0}")]
    Parse(String),

    /// The service returned a response with no transcript text.
    #[error("transcription service returned an empty transcript")]
    EmptyTranscript,
}

impl From<reqwest::Error> for TranscribeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranscribeError::Timeout
        } else {
            TranscribeError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Async trait for audio-to-text transcription.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn SpeechRecognizer>`).
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe a complete audio file (the whole file is in memory).
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError>;
}

/// Transcribe `audio`, substituting [`TRANSCRIPTION_SENTINEL`] on any error.
///
/// This never fails: a broken transcription service degrades to the sentinel
/// value instead of aborting the extraction action.
pub async fn transcribe_or_sentinel(recognizer: &dyn SpeechRecognizer, audio: &[u8]) -> String {
    match recognizer.transcribe(audio).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("transcription failed ({e}); substituting sentinel text");
            TRANSCRIPTION_SENTINEL.to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// ApiRecognizer
// ---------------------------------------------------------------------------

/// Calls an OpenAI-compatible `/v1/audio/transcriptions` endpoint.
///
/// The audio bytes are uploaded as a multipart form together with the model
/// identifier; the response is `{"text": "..."}`.
pub struct ApiRecognizer {
    client: reqwest::Client,
    config: TranscriptionConfig,
}

impl ApiRecognizer {
    /// Build an `ApiRecognizer` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.
    pub fn from_config(config: &TranscriptionConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// API key from config, falling back to `OPENAI_API_KEY`.
    fn api_key(&self) -> Option<String> {
        self.config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

#[async_trait]
impl SpeechRecognizer for ApiRecognizer {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscribeError> {
        let key = self.api_key().ok_or(TranscribeError::MissingApiKey)?;

        let url = format!("{}/v1/audio/transcriptions", self.config.base_url);

        let file_part = reqwest::multipart::Part::bytes(audio.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| TranscribeError::Request(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone());

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .multipart(form)
            .send()
            .await?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranscribeError::Parse(e.to_string()))?;

        let text = json["text"]
            .as_str()
            .ok_or(TranscribeError::EmptyTranscript)?
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(TranscribeError::EmptyTranscript);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Always succeeds with a fixed transcript.
    struct AlwaysOk(String);

    #[async_trait]
    impl SpeechRecognizer for AlwaysOk {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
            Ok(self.0.clone())
        }
    }

    /// Always returns the given error kind.
    struct AlwaysFails(fn() -> TranscribeError);

    #[async_trait]
    impl SpeechRecognizer for AlwaysFails {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
            Err((self.0)())
        }
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn sentinel_passes_through_success() {
        let recognizer = AlwaysOk("hello from the tape".into());
        let text = transcribe_or_sentinel(&recognizer, &[0u8; 16]).await;
        assert_eq!(text, "hello from the tape");
    }

    #[tokio::test]
    async fn sentinel_on_request_error() {
        let recognizer = AlwaysFails(|| TranscribeError::Request("connection refused".into()));
        let text = transcribe_or_sentinel(&recognizer, &[0u8; 16]).await;
        assert_eq!(text, TRANSCRIPTION_SENTINEL);
    }

    #[tokio::test]
    async fn sentinel_on_timeout() {
        let recognizer = AlwaysFails(|| TranscribeError::Timeout);
        let text = transcribe_or_sentinel(&recognizer, &[0u8; 16]).await;
        assert_eq!(text, TRANSCRIPTION_SENTINEL);
    }

    #[tokio::test]
    async fn sentinel_on_missing_key() {
        let recognizer = AlwaysFails(|| TranscribeError::MissingApiKey);
        let text = transcribe_or_sentinel(&recognizer, &[0u8; 16]).await;
        assert_eq!(text, TRANSCRIPTION_SENTINEL);
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _recognizer = ApiRecognizer::from_config(&TranscriptionConfig::default());
    }

    /// Verify that `ApiRecognizer` is object-safe (usable as `dyn SpeechRecognizer`).
    #[test]
    fn recognizer_is_object_safe() {
        let recognizer: Box<dyn SpeechRecognizer> =
            Box::new(ApiRecognizer::from_config(&TranscriptionConfig::default()));
        drop(recognizer);
    }

    #[test]
    fn configured_key_wins_over_missing_env() {
        let config = TranscriptionConfig {
            api_key: Some("test-key".into()),
            ..TranscriptionConfig::default()
        };
        let recognizer = ApiRecognizer::from_config(&config);
        assert_eq!(recognizer.api_key().as_deref(), Some("test-key"));
    }

    #[test]
    fn empty_configured_key_counts_as_missing() {
        let config = TranscriptionConfig {
            api_key: Some(String::new()),
            ..TranscriptionConfig::default()
        };
        let recognizer = ApiRecognizer::from_config(&config);
        // Empty string falls through to the environment lookup; the result
        // must never be Some("").
        assert_ne!(recognizer.api_key().as_deref(), Some(""));
    }
}
