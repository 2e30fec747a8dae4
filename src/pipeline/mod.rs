//! Pipeline module: session state plus the four user actions.
//!
//! # Architecture
//!
//! ```text
//! ContentSource ──▶ ingest ──▶ Session.input_text
//!                                   │
//!                                   ▼
//!                 generate  (PromptBuilder → TextGenerator)
//!                                   │
//!                                   ▼
//!                          Session.last_result ──▶ display
//!                                   ├─▶ speak        (SpeechSynthesizer)
//!                                   └─▶ render_video (VideoRenderer)
//! ```
//!
//! Every action is a `(Session, Input) -> (Session, Output)` transformation
//! driven by [`Pipeline`]; a failed action hands the session back unchanged
//! together with an [`ActionError`] diagnostic.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use text_to_media::config::AppConfig;
//! use text_to_media::extract::ContentSource;
//! use text_to_media::pipeline::{Pipeline, Session};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let pipeline = Pipeline::from_config(&config);
//!
//!     let session = Session::new();
//!     let (session, _) = pipeline
//!         .ingest(session, ContentSource::Text("Rivers shape valleys.".into()))
//!         .await;
//!     let (session, result) = pipeline.generate(session).await;
//!
//!     match result {
//!         Ok(text) => println!("{text}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//!     drop(session);
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{ActionError, Pipeline};
pub use state::{OutputType, ParseOutputTypeError, Session};
