//! Configuration module for text-to-media.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each external
//! service plus the video renderer, `AppPaths` for cross-platform config
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, GenerationConfig, SpeechConfig, TranscriptionConfig, VideoConfig};
