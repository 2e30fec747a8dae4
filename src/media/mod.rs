//! Media rendering: speech audio and narrated slideshow video.
//!
//! Two independent renderers share the same generated text:
//!
//! * [`SpeechSynthesizer`] / [`TranslateTts`] — one continuous MP3 track for
//!   the whole text.
//! * [`VideoRenderer`] — text chunked into slides, one still image per
//!   chunk, concatenated at a fixed per-slide duration with the synthesized
//!   narration attached as the soundtrack.
//!
//! Speech failures never disturb the text result they were asked to speak;
//! video rendering guarantees its temporary images and audio are deleted on
//! every exit path.

pub mod slides;
pub mod speech;
pub mod video;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use slides::chunk_text;
pub use speech::{SpeechError, SpeechSynthesizer, TranslateTts};
pub use video::{VideoError, VideoRenderer};
