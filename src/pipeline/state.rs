//! Session state and the output-type selector.
//!
//! [`Session`] is the single source of truth for one user-interaction
//! context: current input text, optional extra instructions, the selected
//! language and output type, the last generated result, and the
//! listen-toggle flag.
//!
//! A `Session` is a plain value.  Action handlers take it in and hand it
//! back ([`crate::pipeline::Pipeline`]), so every action reads as
//! `(Session, Input) -> (Session, Output)` and a failed action returns the
//! session exactly as it received it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::lang::LanguageCode;

// ---------------------------------------------------------------------------
// OutputType
// ---------------------------------------------------------------------------

/// User-selected transformation category; parametrizes the generation
/// prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Summary,
    Quiz,
    Test,
    Video,
    Audio,
    Animation,
    Translation,
}

impl OutputType {
    /// All selectable output types, in display order.
    pub const ALL: [OutputType; 7] = [
        OutputType::Summary,
        OutputType::Quiz,
        OutputType::Test,
        OutputType::Video,
        OutputType::Audio,
        OutputType::Animation,
        OutputType::Translation,
    ];

    /// Label shown in selectors and embedded in the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            OutputType::Summary => "Summary",
            OutputType::Quiz => "Quiz",
            OutputType::Test => "Test",
            OutputType::Video => "Video",
            OutputType::Audio => "Audio",
            OutputType::Animation => "Animation",
            OutputType::Translation => "Translation",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse failure for [`OutputType`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown output type: {0} (expected one of summary, quiz, test, video, audio, animation, translation)")]
pub struct ParseOutputTypeError(String);

impl FromStr for OutputType {
    type Err = ParseOutputTypeError;

    /// Case-insensitive parse of the selector label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(OutputType::Summary),
            "quiz" => Ok(OutputType::Quiz),
            "test" => Ok(OutputType::Test),
            "video" => Ok(OutputType::Video),
            "audio" => Ok(OutputType::Audio),
            "animation" => Ok(OutputType::Animation),
            "translation" => Ok(OutputType::Translation),
            other => Err(ParseOutputTypeError(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Per-interaction state store.
///
/// Created with empty defaults at session start, mutated only by the action
/// handlers in [`crate::pipeline::Pipeline`], and dropped when the session
/// ends; nothing is persisted.
///
/// Two invariants hold across all actions:
/// * `last_result` is `Some` (and non-empty) only after a successful
///   generation.
/// * `speech_requested` can only become true while `last_result` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Current input text (pasted or extracted from an upload).
    pub input_text: String,

    /// Free-form extra instructions appended to the prompt; empty means
    /// absent.
    pub extra_instructions: String,

    /// Target language for generation.
    pub selected_language: LanguageCode,

    /// Selected transformation category.
    pub output_type: OutputType,

    /// The most recent successfully generated text.
    pub last_result: Option<String>,

    /// Whether the user has asked to hear the result.
    pub speech_requested: bool,
}

impl Session {
    /// Create a fresh session with empty defaults.
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            extra_instructions: String::new(),
            selected_language: LanguageCode::ENGLISH,
            output_type: OutputType::Summary,
            last_result: None,
            speech_requested: false,
        }
    }

    /// Returns `true` once a generation has succeeded in this session.
    pub fn has_result(&self) -> bool {
        self.last_result.as_deref().is_some_and(|r| !r.is_empty())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
