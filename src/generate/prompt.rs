//! Prompt builder for the generation request.
//!
//! [`PromptBuilder`] combines the extracted text, the selected output type,
//! the target language and any optional free-form instructions into the one
//! string sent to the generation service.
//!
//! This is also where the system's single required-field check lives: a
//! prompt is refused outright when the source text trims to empty, and in
//! that case no request may be made at all.

use thiserror::Error;

use crate::lang::LanguageCode;
use crate::pipeline::OutputType;

// ---------------------------------------------------------------------------
// PromptError
// ---------------------------------------------------------------------------

/// Validation failure raised before any service call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    /// The source text is empty or whitespace-only.
    #[error("please enter or upload some content")]
    EmptyText,
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds the generation prompt for one output type / language pair.
///
/// # Example
/// ```
/// use text_to_media::generate::PromptBuilder;
/// use text_to_media::lang::LanguageCode;
/// use text_to_media::pipeline::OutputType;
///
/// let builder = PromptBuilder::new(OutputType::Summary, LanguageCode::ENGLISH);
/// let prompt = builder.build("Photosynthesis converts light into energy.", None).unwrap();
/// assert!(prompt.starts_with("Generate a Summary of the following text in English:"));
/// ```
pub struct PromptBuilder {
    output_type: OutputType,
    language: LanguageCode,
}

impl PromptBuilder {
    /// Create a builder for the given output type and target language.
    pub fn new(output_type: OutputType, language: LanguageCode) -> Self {
        Self {
            output_type,
            language,
        }
    }

    /// Build the prompt string.
    ///
    /// Structure (in order):
    /// 1. `Generate a {output type} of the following text in {language}:`
    /// 2. Blank line, then the source text verbatim.
    /// 3. `Instructions: {extra}` appended only when `extra` is non-empty
    ///    after trimming.
    ///
    /// Returns [`PromptError::EmptyText`] when `text` trims to empty.
    pub fn build(&self, text: &str, extra_instructions: Option<&str>) -> Result<String, PromptError> {
        if text.trim().is_empty() {
            return Err(PromptError::EmptyText);
        }

        let mut prompt = format!(
            "Generate a {} of the following text in {}:\n\n{}",
            self.output_type, self.language, text
        );

        if let Some(extra) = extra_instructions {
            let extra = extra.trim();
            if !extra.is_empty() {
                prompt.push_str("\n\nInstructions: ");
                prompt.push_str(extra);
            }
        }

        Ok(prompt)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(output_type: OutputType, lang: &str) -> PromptBuilder {
        PromptBuilder::new(output_type, LanguageCode::lookup(lang).unwrap())
    }

    #[test]
    fn prompt_names_output_type_and_language() {
        let prompt = builder(OutputType::Quiz, "Deutsch")
            .build("Der Rhein ist ein Fluss.", None)
            .unwrap();

        assert!(prompt.starts_with("Generate a Quiz of the following text in Deutsch:"));
    }

    /// The source text must appear verbatim after the clause, whatever it
    /// contains.
    #[test]
    fn source_text_is_embedded_verbatim() {
        let text = "line one\n  indented line\nspecial: {braces} & ampersand";
        let prompt = builder(OutputType::Summary, "English")
            .build(text, None)
            .unwrap();

        assert!(prompt.ends_with(&format!(":\n\n{text}")));
    }

    #[test]
    fn instructions_are_appended_when_present() {
        let prompt = builder(OutputType::Translation, "Français")
            .build("Hello there.", Some("Keep it informal."))
            .unwrap();

        assert!(prompt.ends_with("\n\nInstructions: Keep it informal."));
        assert!(prompt.contains("Hello there."));
    }

    #[test]
    fn whitespace_only_instructions_are_dropped() {
        let with_blank = builder(OutputType::Summary, "English")
            .build("Some text.", Some("   \n\t "))
            .unwrap();
        let without = builder(OutputType::Summary, "English")
            .build("Some text.", None)
            .unwrap();

        assert_eq!(with_blank, without);
        assert!(!with_blank.contains("Instructions:"));
    }

    #[test]
    fn instructions_are_trimmed() {
        let prompt = builder(OutputType::Summary, "English")
            .build("Some text.", Some("  shorter please  "))
            .unwrap();
        assert!(prompt.ends_with("Instructions: shorter please"));
    }

    #[test]
    fn empty_text_is_refused() {
        assert_eq!(
            builder(OutputType::Summary, "English").build("", None),
            Err(PromptError::EmptyText)
        );
    }

    #[test]
    fn whitespace_only_text_is_refused() {
        assert_eq!(
            builder(OutputType::Summary, "English").build("  \n \t  ", None),
            Err(PromptError::EmptyText)
        );
    }

    /// Every output type spells itself the way the user saw it in the
    /// selector.
    #[test]
    fn all_output_types_render_in_the_prompt() {
        for output_type in OutputType::ALL {
            let prompt = builder(output_type, "English").build("text", None).unwrap();
            assert!(
                prompt.contains(&format!("Generate a {output_type} ")),
                "missing output type in: {prompt}"
            );
        }
    }
}
