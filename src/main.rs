//! Command-line entry point — text-to-media.
//!
//! # Run sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Wire the [`Pipeline`] with the real service clients.
//! 4. Ingest the input (pasted `--text` or uploaded `--input` file).
//! 5. Generate the requested output type in the target language and print
//!    it.
//! 6. Optionally synthesize speech (`--speak`) and/or render a narrated
//!    slideshow video (`--video`).
//!
//! One failed step never aborts silently: every action reports its
//! diagnostic, and a failure in a media step still leaves the generated
//! text on stdout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use text_to_media::config::AppConfig;
use text_to_media::extract::ContentSource;
use text_to_media::lang::LanguageCode;
use text_to_media::pipeline::{OutputType, Pipeline, Session};

/// Note shown when the Video output type is selected.
const VIDEO_NOTE: &str = "Note: videos are text-to-slide renderings with narration.";

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Transform text or documents into summaries, quizzes, speech and video.
#[derive(Debug, Parser)]
#[command(name = "text-to-media", version, about)]
struct Cli {
    /// Paste the input text directly.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Or upload a file (DOCX / PPTX / PDF / MP3 / WAV / TXT).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Target language for the generated output (name or code).
    #[arg(long, default_value = "English")]
    language: String,

    /// What to generate: summary, quiz, test, video, audio, animation or
    /// translation.
    #[arg(long, default_value = "summary")]
    output_type: OutputType,

    /// Extra instructions or comments appended to the prompt.
    #[arg(long)]
    instructions: Option<String>,

    /// Also synthesize the result as speech audio.
    #[arg(long)]
    speak: bool,

    /// Also render the result as a narrated slideshow video.
    #[arg(long)]
    video: bool,

    /// Speech language for --speak / --video (defaults to --language).
    #[arg(long)]
    speech_language: Option<String>,

    /// Where to write the synthesized audio.
    #[arg(long, default_value = "output_audio.mp3")]
    audio_out: PathBuf,

    /// Where to write the rendered video.
    #[arg(long, default_value = "output_video.mp4")]
    video_out: PathBuf,

    /// Use an explicit settings file instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path).context("loading settings")?,
        None => AppConfig::load().context("loading settings")?,
    };

    let Some(language) = LanguageCode::lookup(&cli.language) else {
        bail!(
            "unknown language: {} (supported: {})",
            cli.language,
            LanguageCode::all()
                .map(|l| l.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
    };

    let pipeline = Pipeline::from_config(&config);

    let mut session = Session::new();
    session.selected_language = language;
    session.output_type = cli.output_type;
    if let Some(instructions) = &cli.instructions {
        session.extra_instructions = instructions.clone();
    }

    if cli.output_type == OutputType::Video {
        println!("{VIDEO_NOTE}");
    }

    // ── Ingest ───────────────────────────────────────────────────────────
    let source = match (&cli.text, &cli.input) {
        (Some(text), _) => ContentSource::Text(text.clone()),
        (None, Some(path)) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ContentSource::from_path(path, bytes)?
        }
        (None, None) => bail!("provide input with --text or --input"),
    };

    let (session, ingested) = pipeline.ingest(session, source).await;
    ingested.context("ingesting input")?;

    // ── Generate ─────────────────────────────────────────────────────────
    let (session, generated) = pipeline.generate(session).await;
    let result = generated.context("generating output")?;

    println!("{result}");

    // ── Optional media renderings ────────────────────────────────────────
    let speech_language = cli
        .speech_language
        .clone()
        .unwrap_or_else(|| cli.language.clone());

    let session = if cli.speak {
        let (session, spoken) = pipeline.speak(session, &speech_language).await;
        match spoken {
            Ok(audio) => {
                std::fs::write(&cli.audio_out, audio)
                    .with_context(|| format!("writing {}", cli.audio_out.display()))?;
                eprintln!("wrote {}", cli.audio_out.display());
            }
            // The text result is already on stdout; a failed narration is
            // reported without discarding it.
            Err(e) => eprintln!("speech synthesis failed: {e}"),
        }
        session
    } else {
        session
    };

    if cli.video {
        let (_, rendered) = pipeline
            .render_video(session, &speech_language, &cli.video_out)
            .await;
        match rendered {
            Ok(()) => eprintln!("wrote {}", cli.video_out.display()),
            Err(e) => eprintln!("video rendering failed: {e}"),
        }
    }

    Ok(())
}
