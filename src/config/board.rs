//! Board configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    // Board
    pub title: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,

    /// Predeclared categories, numbered from 1 in this order
    pub categories: Vec<String>,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub summary: SummaryConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: "Postboard".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),

            categories: Vec::new(),

            markdown: MarkdownConfig::default(),
            summary: SummaryConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BoardConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BoardConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// How HTML written by the author inside post content is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RawHtml {
    /// Show the markup as literal text
    #[default]
    Escape,
    /// Keep the markup and let the allow-list sanitizer filter it
    Sanitize,
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub raw_html: RawHtml,
    /// Turn soft line breaks into `<br>`
    pub breaks: bool,
    pub tables: bool,
    pub strikethrough: bool,
    /// Highlight fenced code blocks with class-based spans
    pub highlight: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            raw_html: RawHtml::Escape,
            breaks: false,
            tables: true,
            strikethrough: true,
            highlight: false,
        }
    }
}

/// Card snippet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Locale table of accented letters kept in snippets (`hu` or `ascii`)
    pub locale: String,
    /// Additional characters kept in snippets
    pub extra_chars: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            locale: "hu".to_string(),
            extra_chars: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.title, "Postboard");
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.markdown.raw_html, RawHtml::Escape);
        assert!(config.markdown.tables);
        assert!(!config.markdown.breaks);
        assert_eq!(config.summary.locale, "hu");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Közösség
posts_dir: content/posts
categories:
  - Általános
  - Kérdések
markdown:
  raw_html: sanitize
  breaks: true
summary:
  extra_chars: "?!"
"#;
        let config: BoardConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Közösség");
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.categories, vec!["Általános", "Kérdések"]);
        assert_eq!(config.markdown.raw_html, RawHtml::Sanitize);
        assert!(config.markdown.breaks);
        // untouched keys keep their defaults
        assert!(config.markdown.strikethrough);
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.summary.locale, "hu");
        assert_eq!(config.summary.extra_chars, "?!");
    }
}
