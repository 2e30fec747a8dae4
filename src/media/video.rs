//! Narrated slideshow-video rendering.
//!
//! # Pipeline
//!
//! ```text
//! text ──chunk──▶ slides (PNG, one per chunk, fixed duration each)
//!      ──tts────▶ narration.mp3 (one track for the ENTIRE text)
//!                     │
//!                     ▼
//!            ffmpeg concat encode ──▶ output .mp4 (low fixed fps)
//! ```
//!
//! Every intermediate file (slide images, concat list, narration audio)
//! lives inside one per-call temporary directory that is removed when the
//! call returns, on success and on every failure path alike.
//!
//! The narration track and the video track have independent durations
//! (`full text` vs `slide count × slide_secs`).  They are only reconciled
//! when `sync_audio_to_video` is set, which trims the container to the
//! shorter stream.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use thiserror::Error;

use crate::config::VideoConfig;
use crate::lang::LanguageCode;

use super::slides::{chunk_text, write_slides};
use super::speech::{SpeechError, SpeechSynthesizer};

/// Prefix of the per-call temporary directory.
const WORKDIR_PREFIX: &str = "text-to-media-render";

// ---------------------------------------------------------------------------
// VideoError
// ---------------------------------------------------------------------------

/// Errors that can occur during video rendering.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The text produced zero slides (empty input).
    #[error("there is no text to render")]
    EmptyText,

    /// No usable TTF font, neither configured nor in the usual locations.
    #[error("no usable font found — set video.font_path in settings.toml")]
    FontNotFound,

    /// A slide image could not be rendered or written.
    #[error("slide rendering failed: {0}")]
    Raster(String),

    /// The narration track could not be synthesized.
    #[error("narration synthesis failed: {0}")]
    Speech(#[from] SpeechError),

    /// The encoder binary could not be started at all.
    #[error("ffmpeg not found ({0}) — install ffmpeg or set video.ffmpeg_path")]
    EncoderMissing(String),

    /// The encoder ran but exited unsuccessfully.
    #[error("video encoding failed: {0}")]
    Encode(String),

    /// Filesystem error around the temporary work directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (e.g. a worker task failed to join).
    #[error("internal error: {0}")]
    Internal(String),
}

// ---------------------------------------------------------------------------
// VideoRenderer
// ---------------------------------------------------------------------------

/// Renders generated text into a narrated slideshow video.
///
/// Owns the [`SpeechSynthesizer`] used for the narration track; everything
/// else comes from [`VideoConfig`].
pub struct VideoRenderer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    config: VideoConfig,
}

impl VideoRenderer {
    /// Create a renderer narrating through `synthesizer`.
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, config: VideoConfig) -> Self {
        Self {
            synthesizer,
            config,
        }
    }

    /// Probe whether the configured encoder binary can be executed.
    pub fn is_encoder_available(&self) -> bool {
        Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Render `text` to an MP4 at `output`, narrated in `language`.
    ///
    /// Blocking work (rasterization, encoding) runs on the blocking thread
    /// pool; the call as a whole still runs to completion before returning.
    pub async fn render(
        &self,
        text: &str,
        language: LanguageCode,
        output: &Path,
    ) -> Result<(), VideoError> {
        self.render_in(&std::env::temp_dir(), text, language, output)
            .await
    }

    /// Render with the temporary work directory created under `parent`
    /// (useful for tests).
    pub async fn render_in(
        &self,
        parent: &Path,
        text: &str,
        language: LanguageCode,
        output: &Path,
    ) -> Result<(), VideoError> {
        // The work directory owns every intermediate file.  Dropping it at
        // the end of this scope (any exit path, including `?`) deletes them.
        let workdir = tempfile::Builder::new()
            .prefix(WORKDIR_PREFIX)
            .tempdir_in(parent)?;

        let chunks = chunk_text(text, self.config.chunk_chars);
        if chunks.is_empty() {
            return Err(VideoError::EmptyText);
        }
        log::info!(
            "video: rendering {} slides at {}x{}",
            chunks.len(),
            self.config.width,
            self.config.height
        );

        // ── 1. Slide images (blocking → thread pool) ─────────────────────
        let config = self.config.clone();
        let dir = workdir.path().to_path_buf();
        let slide_paths = tokio::task::spawn_blocking(move || write_slides(&chunks, &config, &dir))
            .await
            .map_err(|e| VideoError::Internal(e.to_string()))??;

        // ── 2. Narration for the entire text (one track, no chunking) ────
        let audio_bytes = self.synthesizer.synthesize(text, language).await?;
        let audio_path = workdir.path().join("narration.mp3");
        std::fs::write(&audio_path, &audio_bytes)?;
        log::debug!("video: narration track is {} bytes", audio_bytes.len());

        // ── 3. Concat list for the encoder ───────────────────────────────
        let list_path = workdir.path().join("slides.txt");
        std::fs::write(&list_path, concat_list(&slide_paths, self.config.slide_secs))?;

        // ── 4. Encode (blocking → thread pool) ───────────────────────────
        let args = encode_args(
            &list_path,
            &audio_path,
            output,
            self.config.fps,
            self.config.sync_audio_to_video,
        );
        let ffmpeg = self.config.ffmpeg_path.clone();
        let encode = tokio::task::spawn_blocking(move || run_encoder(&ffmpeg, &args))
            .await
            .map_err(|e| VideoError::Internal(e.to_string()))?;
        encode?;

        log::info!("video: wrote {}", output.display());
        Ok(())
        // `workdir` drops here; intermediate files are gone either way.
    }
}

// ---------------------------------------------------------------------------
// Encoder plumbing
// ---------------------------------------------------------------------------

/// Build the concat-demuxer input list: one entry per slide with a fixed
/// display duration.
fn concat_list(slides: &[PathBuf], slide_secs: u32) -> String {
    let mut list = String::from("ffconcat version 1.0\n");
    for path in slides {
        list.push_str(&format!("file '{}'\nduration {}\n", path.display(), slide_secs));
    }
    // The demuxer drops the trailing duration unless the last entry appears
    // again.
    if let Some(last) = slides.last() {
        list.push_str(&format!("file '{}'\n", last.display()));
    }
    list
}

/// Assemble the full encoder argument list.
fn encode_args(
    list: &Path,
    audio: &Path,
    output: &Path,
    fps: u32,
    sync_audio_to_video: bool,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list.display().to_string(),
        "-i".into(),
        audio.display().to_string(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-r".into(),
        fps.to_string(),
        "-c:a".into(),
        "aac".into(),
    ];
    if sync_audio_to_video {
        args.push("-shortest".into());
    }
    args.push(output.display().to_string());
    args
}

/// Run the encoder to completion and map its exit status.
fn run_encoder(ffmpeg: &str, args: &[String]) -> Result<(), VideoError> {
    let result = Command::new(ffmpeg).args(args).output();

    let output = match result {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(VideoError::EncoderMissing(ffmpeg.to_string()));
        }
        Err(e) => return Err(VideoError::Encode(e.to_string())),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // ffmpeg's stderr is long; keep the tail where the actual error is.
        let tail: String = stderr
            .lines()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(VideoError::Encode(tail));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
