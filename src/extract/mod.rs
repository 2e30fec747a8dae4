//! Content extraction: heterogeneous input → plain text.
//!
//! # Architecture
//!
//! ```text
//! ContentSource (closed enum, one variant per declared content kind)
//!        │
//!        ▼
//! ContentExtractor::extract()
//!        ├─ Text  → identity
//!        ├─ Docx  → docx::extract   (zip + quick-xml, one paragraph per line)
//!        ├─ Pptx  → pptx::extract   (slides in order, one paragraph per line)
//!        ├─ Pdf   → pdf::extract    (pages in order, bad page = empty line)
//!        └─ Audio → SpeechRecognizer, sentinel text on failure
//! ```
//!
//! The whole input is read into memory before extraction; there is no
//! streaming path.  Extraction is stateless: the same bytes always produce
//! the same text.

pub mod audio;
pub mod docx;
pub mod pdf;
pub mod pptx;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

pub use audio::{
    transcribe_or_sentinel, ApiRecognizer, SpeechRecognizer, TranscribeError,
    TRANSCRIPTION_SENTINEL,
};

/// Upload cap: anything larger is rejected before any parsing starts.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024; // 1 GiB

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// Errors that can occur while turning an input into plain text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The declared content kind has no extraction strategy.
    #[error("unsupported content type: {0}")]
    Unsupported(String),

    /// The upload exceeds [`MAX_UPLOAD_BYTES`].
    #[error("file is too large ({size} bytes, limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// The zip container (DOCX/PPTX) could not be read.
    #[error("could not read document archive: {0}")]
    Archive(String),

    /// A document XML part could not be parsed.
    #[error("could not parse document XML: {0}")]
    Xml(String),

    /// The PDF could not be loaded at all (per-page failures degrade to
    /// empty lines instead).
    #[error("could not read PDF: {0}")]
    Pdf(String),
}

// ---------------------------------------------------------------------------
// ContentSource
// ---------------------------------------------------------------------------

/// One uploaded (or pasted) input, tagged with its declared content kind.
///
/// The set is closed: anything the user can hand over is one of these five
/// variants, and an unrecognised upload fails loudly at construction
/// ([`ContentSource::from_path`]) instead of being passed through untouched.
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Pasted text, used verbatim.
    Text(String),
    /// A `.docx` word-processing document.
    Docx(Vec<u8>),
    /// A `.pptx` presentation.
    Pptx(Vec<u8>),
    /// A `.pdf` document.
    Pdf(Vec<u8>),
    /// An audio recording (`.mp3` / `.wav`) to transcribe.
    Audio(Vec<u8>),
}

impl ContentSource {
    /// Classify `bytes` by the extension of the file they came from.
    pub fn from_path(path: &Path, bytes: Vec<u8>) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" | "md" => Ok(ContentSource::Text(
                String::from_utf8_lossy(&bytes).into_owned(),
            )),
            "docx" => Ok(ContentSource::Docx(bytes)),
            "pptx" => Ok(ContentSource::Pptx(bytes)),
            "pdf" => Ok(ContentSource::Pdf(bytes)),
            "mp3" | "wav" => Ok(ContentSource::Audio(bytes)),
            other => Err(ExtractError::Unsupported(if other.is_empty() {
                format!("{} has no file extension", path.display())
            } else {
                format!(".{other}")
            })),
        }
    }

    /// Size of the raw input in bytes.
    fn len(&self) -> usize {
        match self {
            ContentSource::Text(s) => s.len(),
            ContentSource::Docx(b)
            | ContentSource::Pptx(b)
            | ContentSource::Pdf(b)
            | ContentSource::Audio(b) => b.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentExtractor
// ---------------------------------------------------------------------------

/// Normalizes any [`ContentSource`] into plain text.
///
/// Holds the [`SpeechRecognizer`] used for audio inputs; the document
/// parsers are pure functions and need no state.
pub struct ContentExtractor {
    recognizer: Arc<dyn SpeechRecognizer>,
    max_bytes: usize,
}

impl ContentExtractor {
    /// Create an extractor that transcribes audio with `recognizer`.
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self::with_limit(recognizer, MAX_UPLOAD_BYTES)
    }

    /// Create an extractor with an explicit upload cap (useful for tests).
    pub fn with_limit(recognizer: Arc<dyn SpeechRecognizer>, max_bytes: usize) -> Self {
        Self {
            recognizer,
            max_bytes,
        }
    }

    /// Produce plain text from `source`.
    ///
    /// Audio transcription failure does not surface here: the sentinel text
    /// takes the transcript's place, because the user still expects the
    /// input slot to fill.
    pub async fn extract(&self, source: &ContentSource) -> Result<String, ExtractError> {
        let size = source.len();
        if size > self.max_bytes {
            return Err(ExtractError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        match source {
            ContentSource::Text(text) => Ok(text.clone()),
            ContentSource::Docx(bytes) => docx::extract(bytes),
            ContentSource::Pptx(bytes) => pptx::extract(bytes),
            ContentSource::Pdf(bytes) => pdf::extract(bytes),
            ContentSource::Audio(bytes) => {
                Ok(transcribe_or_sentinel(self.recognizer.as_ref(), bytes).await)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedTranscript(&'static str);

    #[async_trait]
    impl SpeechRecognizer for FixedTranscript {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl SpeechRecognizer for BrokenRecognizer {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscribeError> {
            Err(TranscribeError::Request("service down".into()))
        }
    }

    fn extractor(recognizer: impl SpeechRecognizer + 'static) -> ContentExtractor {
        ContentExtractor::new(Arc::new(recognizer))
    }

    #[tokio::test]
    async fn pasted_text_is_identity() {
        let ex = extractor(FixedTranscript("unused"));
        let text = ex
            .extract(&ContentSource::Text("as is,\nline two".into()))
            .await
            .unwrap();
        assert_eq!(text, "as is,\nline two");
    }

    #[tokio::test]
    async fn audio_uses_the_recognizer() {
        let ex = extractor(FixedTranscript("spoken words"));
        let text = ex
            .extract(&ContentSource::Audio(vec![0u8; 64]))
            .await
            .unwrap();
        assert_eq!(text, "spoken words");
    }

    #[tokio::test]
    async fn audio_failure_becomes_sentinel_not_error() {
        let ex = extractor(BrokenRecognizer);
        let text = ex
            .extract(&ContentSource::Audio(vec![0u8; 64]))
            .await
            .unwrap();
        assert_eq!(text, TRANSCRIPTION_SENTINEL);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected_before_parsing() {
        let ex = ContentExtractor::with_limit(Arc::new(FixedTranscript("unused")), 8);

        let err = ex
            .extract(&ContentSource::Pdf(vec![0u8; 9]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::TooLarge { size: 9, limit: 8 }));

        // Exactly at the limit is accepted (and then fails as a PDF, not as
        // an oversized upload).
        let err = ex
            .extract(&ContentSource::Pdf(vec![0u8; 8]))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn from_path_classifies_known_extensions() {
        let cases = [
            ("notes.docx", "Docx"),
            ("deck.pptx", "Pptx"),
            ("paper.PDF", "Pdf"),
            ("talk.mp3", "Audio"),
            ("talk.wav", "Audio"),
            ("memo.txt", "Text"),
        ];
        for (name, expected) in cases {
            let source = ContentSource::from_path(Path::new(name), vec![1, 2, 3]).unwrap();
            let tag = match source {
                ContentSource::Text(_) => "Text",
                ContentSource::Docx(_) => "Docx",
                ContentSource::Pptx(_) => "Pptx",
                ContentSource::Pdf(_) => "Pdf",
                ContentSource::Audio(_) => "Audio",
            };
            assert_eq!(tag, expected, "for {name}");
        }
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let err = ContentSource::from_path(Path::new("archive.tar.gz"), vec![]).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(msg) if msg.contains(".gz")));

        let err = ContentSource::from_path(Path::new("no_extension"), vec![]).unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(_)));
    }
}
