//! text-to-media — a content-to-multimedia pipeline.
//!
//! Takes pasted text or an uploaded document (DOCX / PPTX / PDF / audio),
//! asks a hosted generative-text service for a user-selected output type
//! (summary, quiz, translation, …) in a target language, and optionally
//! turns the generated text into speech audio or a narrated slideshow
//! video.
//!
//! # Modules
//!
//! * [`extract`] — heterogeneous input → plain text, with a sentinel value
//!   for failed audio transcription.
//! * [`generate`] — prompt assembly and the generation-service client.
//! * [`media`] — speech synthesis and slideshow-video rendering.
//! * [`pipeline`] — the [`Session`](pipeline::Session) value and the four
//!   user actions that transform it.
//! * [`lang`] — the fixed table of supported languages.
//! * [`config`] — TOML settings and platform paths.
//!
//! The "intelligence" (generation, speech synthesis, transcription) lives
//! behind async capability traits, so tests substitute fakes and the core
//! pipeline never touches a vendor SDK directly.

pub mod config;
pub mod extract;
pub mod generate;
pub mod lang;
pub mod media;
pub mod pipeline;
