//! Pipeline action handlers — ingest, generate, speak, render-video.
//!
//! [`Pipeline`] owns the capability objects behind `Arc<dyn …>` seams and
//! exposes one method per user action.  Each method takes the [`Session`]
//! by value and returns it together with the action's outcome:
//!
//! ```text
//! ingest:       (Session, ContentSource) -> (Session, Result<(), _>)
//! generate:     (Session)               -> (Session, Result<String, _>)
//! speak:        (Session, language)     -> (Session, Result<Vec<u8>, _>)
//! render_video: (Session, language, out) -> (Session, Result<(), _>)
//! ```
//!
//! On success the returned session carries the update; on failure it is the
//! session exactly as it came in, so a failed action can never destroy a
//! previous result.  Actions run to completion, one at a time; there is no
//! background work and no cancellation.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::extract::{
    ApiRecognizer, ContentExtractor, ContentSource, ExtractError, SpeechRecognizer,
};
use crate::generate::{
    GeminiClient, GenerateError, PromptBuilder, PromptError, TextGenerator,
};
use crate::lang::LanguageCode;
use crate::media::{
    SpeechError, SpeechSynthesizer, TranslateTts, VideoError, VideoRenderer,
};

use super::state::Session;

// ---------------------------------------------------------------------------
// ActionError
// ---------------------------------------------------------------------------

/// One diagnostic per failed action, split by who has to fix it.
///
/// * `Validation` — the input is not usable yet; the user corrects it and
///   tries again.
/// * `Configuration` — the installation is incomplete (missing credential,
///   missing encoder); retrying without fixing it cannot succeed.
/// * `Service` — an external collaborator failed; the result slot keeps its
///   previous value.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Service(String),
}

impl From<PromptError> for ActionError {
    fn from(e: PromptError) -> Self {
        ActionError::Validation(e.to_string())
    }
}

impl From<ExtractError> for ActionError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Unsupported(_) | ExtractError::TooLarge { .. } => {
                ActionError::Validation(e.to_string())
            }
            ExtractError::Archive(_) | ExtractError::Xml(_) | ExtractError::Pdf(_) => {
                ActionError::Service(e.to_string())
            }
        }
    }
}

impl From<GenerateError> for ActionError {
    fn from(e: GenerateError) -> Self {
        match e {
            GenerateError::MissingApiKey => ActionError::Configuration(e.to_string()),
            _ => ActionError::Service(e.to_string()),
        }
    }
}

impl From<SpeechError> for ActionError {
    fn from(e: SpeechError) -> Self {
        ActionError::Service(e.to_string())
    }
}

impl From<VideoError> for ActionError {
    fn from(e: VideoError) -> Self {
        match e {
            VideoError::EmptyText => ActionError::Validation(e.to_string()),
            VideoError::FontNotFound | VideoError::EncoderMissing(_) => {
                ActionError::Configuration(e.to_string())
            }
            _ => ActionError::Service(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Drives the full content → prompt → generation → media pipeline.
///
/// Create with [`Pipeline::from_config`] for the real service clients, or
/// [`Pipeline::new`] to supply fakes in tests.
pub struct Pipeline {
    extractor: ContentExtractor,
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    renderer: VideoRenderer,
}

impl Pipeline {
    /// Wire the pipeline with explicit capability objects.
    pub fn new(
        extractor: ContentExtractor,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        renderer: VideoRenderer,
    ) -> Self {
        Self {
            extractor,
            generator,
            synthesizer,
            renderer,
        }
    }

    /// Wire the pipeline with the real service clients from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let recognizer: Arc<dyn SpeechRecognizer> =
            Arc::new(ApiRecognizer::from_config(&config.transcription));
        let generator: Arc<dyn TextGenerator> =
            Arc::new(GeminiClient::from_config(&config.generation));
        let synthesizer: Arc<dyn SpeechSynthesizer> =
            Arc::new(TranslateTts::from_config(&config.speech));

        Self {
            extractor: ContentExtractor::new(recognizer),
            generator,
            renderer: VideoRenderer::new(Arc::clone(&synthesizer), config.video.clone()),
            synthesizer,
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Extract `source` and fold the text into `session.input_text`.
    ///
    /// Replaces any previously held input; the rest of the session is
    /// untouched.
    pub async fn ingest(
        &self,
        mut session: Session,
        source: ContentSource,
    ) -> (Session, Result<(), ActionError>) {
        match self.extractor.extract(&source).await {
            Ok(text) => {
                log::info!("ingest: {} chars of input text", text.len());
                session.input_text = text;
                (session, Ok(()))
            }
            Err(e) => {
                log::warn!("ingest failed: {e}");
                (session, Err(e.into()))
            }
        }
    }

    /// Build the prompt from the session and call the generation service.
    ///
    /// On success `session.last_result` holds the generated text (also
    /// returned for display).  Empty input fails validation before any
    /// service call; a service failure leaves any previous result in place.
    pub async fn generate(&self, mut session: Session) -> (Session, Result<String, ActionError>) {
        let builder = PromptBuilder::new(session.output_type, session.selected_language);
        let extra = (!session.extra_instructions.trim().is_empty())
            .then_some(session.extra_instructions.as_str());

        let prompt = match builder.build(&session.input_text, extra) {
            Ok(prompt) => prompt,
            Err(e) => return (session, Err(e.into())),
        };

        match self.generator.generate(&prompt).await {
            Ok(text) => {
                log::info!("generate: received {} chars", text.len());
                session.last_result = Some(text.clone());
                (session, Ok(text))
            }
            Err(e) => {
                log::warn!("generate failed: {e}");
                (session, Err(e.into()))
            }
        }
    }

    /// Synthesize the last result as one continuous audio track.
    ///
    /// `speech_language` is a display name or code from the fixed table; it
    /// may differ from the generation language.  Requires a prior
    /// successful generation.
    pub async fn speak(
        &self,
        mut session: Session,
        speech_language: &str,
    ) -> (Session, Result<Vec<u8>, ActionError>) {
        let Some(text) = session.last_result.clone().filter(|t| !t.is_empty()) else {
            return (
                session,
                Err(ActionError::Validation(
                    "nothing to listen to yet — generate an output first".into(),
                )),
            );
        };

        let Some(language) = LanguageCode::lookup(speech_language) else {
            return (
                session,
                Err(ActionError::Validation(format!(
                    "unknown speech language: {speech_language}"
                ))),
            );
        };

        match self.synthesizer.synthesize(&text, language).await {
            Ok(audio) => {
                session.speech_requested = true;
                (session, Ok(audio))
            }
            Err(e) => {
                log::warn!("speak failed: {e}");
                (session, Err(e.into()))
            }
        }
    }

    /// Render the last result as a narrated slideshow video at `output`.
    ///
    /// Requires a prior successful generation, like [`Pipeline::speak`].
    pub async fn render_video(
        &self,
        session: Session,
        speech_language: &str,
        output: &Path,
    ) -> (Session, Result<(), ActionError>) {
        let Some(text) = session.last_result.clone().filter(|t| !t.is_empty()) else {
            return (
                session,
                Err(ActionError::Validation(
                    "nothing to render yet — generate an output first".into(),
                )),
            );
        };

        let Some(language) = LanguageCode::lookup(speech_language) else {
            return (
                session,
                Err(ActionError::Validation(format!(
                    "unknown speech language: {speech_language}"
                ))),
            );
        };

        match self.renderer.render(&text, language, output).await {
            Ok(()) => (session, Ok(())),
            Err(e) => {
                log::warn!("render_video failed: {e}");
                (session, Err(e.into()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
