//! Single-line card snippets
//!
//! A snippet is the post content with newlines folded into spaces and every
//! character outside an allowed [`Charset`] blanked out. Characters are only
//! ever substituted, so a snippet has exactly as many characters as its source.

use crate::config::SummaryConfig;

/// Accented letters kept by the Hungarian table
pub const HUNGARIAN_LETTERS: &[char] = &['ö', 'ü', 'ó', 'ő', 'ú', 'é', 'á', 'ű', 'í'];

/// Punctuation kept in every table
const PUNCTUATION: &[char] = &[' ', ',', '.'];

/// The set of characters that survive summarizing
///
/// ASCII letters, ASCII digits, space, comma and period are always allowed;
/// anything else has to be listed in the locale table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    extra: Vec<char>,
}

impl Charset {
    /// ASCII letters, digits, space, comma and period only
    pub fn ascii() -> Self {
        Self { extra: Vec::new() }
    }

    /// ASCII plus the lowercase Hungarian accented letters
    pub fn hungarian() -> Self {
        Self::ascii().with_extra(HUNGARIAN_LETTERS.iter().copied())
    }

    /// Look up a locale table by name
    pub fn for_locale(locale: &str) -> Option<Self> {
        match locale {
            "hu" => Some(Self::hungarian()),
            "ascii" | "en" => Some(Self::ascii()),
            _ => None,
        }
    }

    /// Extend the table with more characters
    pub fn with_extra<I: IntoIterator<Item = char>>(mut self, chars: I) -> Self {
        for c in chars {
            if !self.contains(c) {
                self.extra.push(c);
            }
        }
        self
    }

    /// Whether `c` is kept in a snippet
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || PUNCTUATION.contains(&c) || self.extra.contains(&c)
    }

    /// Locale specific characters of this table
    pub fn extra(&self) -> &[char] {
        &self.extra
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::hungarian()
    }
}

/// Turns raw post content into a card snippet
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    charset: Charset,
}

impl Summarizer {
    /// Create a summarizer with the default (Hungarian) table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a summarizer over a given table
    pub fn with_charset(charset: Charset) -> Self {
        Self { charset }
    }

    /// Build from configuration, falling back to the default table for an unknown locale
    pub fn from_config(config: &SummaryConfig) -> Self {
        let charset = Charset::for_locale(&config.locale).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown summary locale {:?}, using the Hungarian table",
                config.locale
            );
            Charset::hungarian()
        });
        Self::with_charset(charset.with_extra(config.extra_chars.chars()))
    }

    /// The table of characters kept in snippets
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Summarize content; absent content summarizes like the empty string
    pub fn summarize(&self, content: Option<&str>) -> String {
        content
            .unwrap_or_default()
            .chars()
            .map(|c| match c {
                '\n' => ' ',
                c if self.charset.contains(c) => c,
                _ => ' ',
            })
            .collect()
    }
}
