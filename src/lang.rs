//! Fixed table of supported languages.
//!
//! Maps human-readable language names (in their native script, as they are
//! shown to the user) to ISO-639-style codes.  The same table backs both the
//! generation-target selector and the speech-synthesis selector, so a
//! language that can be generated can also be spoken.
//!
//! The table is a closed, compile-time constant.  Nothing is added or removed
//! at runtime.

use std::fmt;

// ---------------------------------------------------------------------------
// Language table
// ---------------------------------------------------------------------------

/// All supported languages, in display order.
///
/// `rwr` (Marwari) is not an official ISO-639-1 code but is accepted by the
/// speech-synthesis backend, so it stays in the table.
const TABLE: &[LanguageCode] = &[
    LanguageCode { name: "English", code: "en" },
    LanguageCode { name: "हिंदी", code: "hi" },
    LanguageCode { name: "Español", code: "es" },
    LanguageCode { name: "Français", code: "fr" },
    LanguageCode { name: "Deutsch", code: "de" },
    LanguageCode { name: "中文", code: "zh" },
    LanguageCode { name: "日本語", code: "ja" },
    LanguageCode { name: "한국어", code: "ko" },
    LanguageCode { name: "Русский", code: "ru" },
    LanguageCode { name: "اردو", code: "ur" },
    LanguageCode { name: "বাংলা", code: "bn" },
    LanguageCode { name: "తెలుగు", code: "te" },
    LanguageCode { name: "தமிழ்", code: "ta" },
    LanguageCode { name: "ગુજરાતી", code: "gu" },
    LanguageCode { name: "मराठी", code: "mr" },
    LanguageCode { name: "ਪੰਜਾਬੀ", code: "pa" },
    LanguageCode { name: "ಕನ್ನಡ", code: "kn" },
    LanguageCode { name: "मारवाड़ी", code: "rwr" },
    LanguageCode { name: "O‘zbekcha", code: "uz" },
    LanguageCode { name: "ქართული", code: "ka" },
    LanguageCode { name: "العربية", code: "ar" },
    LanguageCode { name: "Türkçe", code: "tr" },
    LanguageCode { name: "ภาษาไทย", code: "th" },
    LanguageCode { name: "فارسی", code: "fa" },
    LanguageCode { name: "Shqip", code: "sq" },
    LanguageCode { name: "Nederlands", code: "nl" },
    LanguageCode { name: "Svenska", code: "sv" },
    LanguageCode { name: "Italiano", code: "it" },
    LanguageCode { name: "Việt", code: "vi" },
    LanguageCode { name: "ລາວ", code: "lo" },
];

// ---------------------------------------------------------------------------
// LanguageCode
// ---------------------------------------------------------------------------

/// One entry of the fixed language table.
///
/// Values are only ever obtained through [`LanguageCode::lookup`] (or the
/// [`LanguageCode::ENGLISH`] constant), so holding a `LanguageCode` is proof
/// that the language is in the supported set.
///
/// ```
/// use text_to_media::lang::LanguageCode;
///
/// let th = LanguageCode::lookup("ภาษาไทย").unwrap();
/// assert_eq!(th.code(), "th");
///
/// // Lookup also accepts the code itself.
/// assert_eq!(LanguageCode::lookup("th"), Some(th));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageCode {
    name: &'static str,
    code: &'static str,
}

impl LanguageCode {
    /// Default language for new sessions.
    pub const ENGLISH: LanguageCode = LanguageCode {
        name: "English",
        code: "en",
    };

    /// Find a table entry by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        TABLE.iter().copied().find(|l| l.name == name)
    }

    /// Find a table entry by ISO-639-style code.
    pub fn from_code(code: &str) -> Option<Self> {
        TABLE.iter().copied().find(|l| l.code == code)
    }

    /// Find a table entry by display name, falling back to code.
    ///
    /// This is the lookup the CLI uses, so both `--language English` and
    /// `--language en` work.
    pub fn lookup(name_or_code: &str) -> Option<Self> {
        Self::from_name(name_or_code).or_else(|| Self::from_code(name_or_code))
    }

    /// Human-readable display name (native script).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// ISO-639-style code passed to the speech services.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// All supported languages, in display order.
    pub fn all() -> impl Iterator<Item = LanguageCode> {
        TABLE.iter().copied()
    }
}

impl fmt::Display for LanguageCode {
    /// Displays the human-readable name; prompts embed the name, not the code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_thirty_entries() {
        assert_eq!(LanguageCode::all().count(), 30);
    }

    #[test]
    fn lookup_by_name() {
        let lang = LanguageCode::from_name("Deutsch").expect("Deutsch is in the table");
        assert_eq!(lang.code(), "de");
        assert_eq!(lang.name(), "Deutsch");
    }

    #[test]
    fn lookup_by_code() {
        let lang = LanguageCode::from_code("ja").expect("ja is in the table");
        assert_eq!(lang.name(), "日本語");
    }

    #[test]
    fn lookup_accepts_name_or_code() {
        assert_eq!(
            LanguageCode::lookup("Svenska"),
            LanguageCode::lookup("sv"),
        );
        assert!(LanguageCode::lookup("Svenska").is_some());
    }

    #[test]
    fn unknown_language_is_none() {
        assert!(LanguageCode::from_name("Klingon").is_none());
        assert!(LanguageCode::from_code("tlh").is_none());
        assert!(LanguageCode::lookup("").is_none());
    }

    #[test]
    fn english_constant_matches_table() {
        assert_eq!(
            LanguageCode::from_name("English"),
            Some(LanguageCode::ENGLISH)
        );
    }

    /// Every name and every code in the table must be unique, otherwise
    /// lookups would silently shadow entries.
    #[test]
    fn names_and_codes_are_unique() {
        use std::collections::HashSet;

        let names: HashSet<_> = LanguageCode::all().map(|l| l.name()).collect();
        let codes: HashSet<_> = LanguageCode::all().map(|l| l.code()).collect();

        assert_eq!(names.len(), LanguageCode::all().count());
        assert_eq!(codes.len(), LanguageCode::all().count());
    }

    #[test]
    fn display_shows_the_name() {
        assert_eq!(LanguageCode::ENGLISH.to_string(), "English");
    }

    #[test]
    fn marwari_keeps_its_non_iso_code() {
        let lang = LanguageCode::from_name("मारवाड़ी").expect("Marwari is in the table");
        assert_eq!(lang.code(), "rwr");
    }
}
