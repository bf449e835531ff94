//! postboard: content pipeline for a community posting board
//!
//! Post content is stored as markdown. This crate turns it into the two
//! forms the board displays: sanitized HTML for the post page and the
//! authoring preview, and a single-line plain text snippet for post cards.
//! It also loads posts from markdown files with front-matter and drives the
//! pipeline from the command line.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::Path;

/// Render post content to HTML that is safe to insert into a page
///
/// The markdown output passes through an allow-list sanitizer; raw HTML
/// written by the author is shown as text.
pub fn render_content_to_html(content: &str) -> String {
    content::MarkdownRenderer::new().render(content)
}

/// Single-line card snippet of post content; absent content gives an empty snippet
pub fn summarize_content(content: Option<&str>) -> String {
    content::Summarizer::new().summarize(content)
}

/// The main board application
#[derive(Clone)]
pub struct Board {
    /// Board configuration
    pub config: config::BoardConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding post files
    pub posts_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Board {
    /// Create a new Board instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BoardConfig::load(&config_path)?
        } else {
            config::BoardConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        })
    }

    /// Markdown renderer configured for this board
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.markdown)
    }

    /// Summarizer configured for this board
    pub fn summarizer(&self) -> content::Summarizer {
        content::Summarizer::from_config(&self.config.summary)
    }

    /// Write the public output
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, title, None)
    }
}
