//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Settings for the hosted generative-text service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the API endpoint.
    pub base_url: String,
    /// API key.  `None` means "read `GEMINI_API_KEY` from the environment".
    pub api_key: Option<String>,
    /// Model identifier sent to the API (e.g. `"gemini-1.5-flash"`).
    pub model: String,
    /// Maximum seconds to wait for a generation response before timing out.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            api_key: None,
            model: "gemini-1.5-flash".into(),
            timeout_secs: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-synthesis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Base URL of the synthesis endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for synthesized audio.
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.google.com".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// TranscriptionConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-recognition service used when an audio file is
/// uploaded as input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Base URL of an OpenAI-compatible `/v1/audio/transcriptions` endpoint.
    pub base_url: String,
    /// API key.  `None` means "read `OPENAI_API_KEY` from the environment".
    pub api_key: Option<String>,
    /// Transcription model identifier (e.g. `"whisper-1"`).
    pub model: String,
    /// Maximum seconds to wait for a transcript.
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "whisper-1".into(),
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// VideoConfig
// ---------------------------------------------------------------------------

/// Settings for the slideshow-video renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Maximum characters per slide; text is split on word boundaries.
    pub chunk_chars: usize,
    /// Maximum characters per rendered line within a slide.
    pub line_chars: usize,
    /// Seconds each slide stays on screen.
    pub slide_secs: u32,
    /// Output frame rate.  Content is static per slide, so 1 fps is enough.
    pub fps: u32,
    /// TTF font used for slide text.  `None` means "search the usual system
    /// font locations".
    pub font_path: Option<PathBuf>,
    /// Name or path of the `ffmpeg` binary used for the final encode.
    pub ffmpeg_path: String,
    /// Trim the container to the shorter of the two streams.
    ///
    /// The narration track covers the whole text while the video track lasts
    /// `slide count × slide_secs`; the two are not otherwise reconciled, so
    /// with `false` playback may truncate audio or leave trailing silence.
    pub sync_audio_to_video: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 480,
            chunk_chars: 200,
            line_chars: 40,
            slide_secs: 3,
            fps: 1,
            font_path: None,
            ffmpeg_path: "ffmpeg".into(),
            sync_audio_to_video: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use text_to_media::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative-text service settings.
    pub generation: GenerationConfig,
    /// Speech-synthesis service settings.
    pub speech: SpeechConfig,
    /// Speech-recognition service settings.
    pub transcription: TranscriptionConfig,
    /// Slideshow-video renderer settings.
    pub video: VideoConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
