//! Markdown rendering for post pages and the authoring preview
//!
//! The output of [`MarkdownRenderer::render`] is always run through an
//! allow-list HTML sanitizer, so callers can insert it into a page as raw HTML.
//! Unsafe link destinations are dropped before the HTML is even produced.

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

use crate::config::{MarkdownConfig, RawHtml};

lazy_static! {
    static ref BAD_PROTOCOL: Regex = Regex::new(r"^(vbscript|javascript|file|data):").unwrap();
    static ref GOOD_DATA: Regex = Regex::new(r"^data:image/(gif|png|jpeg|webp);").unwrap();
}

/// Highlighting failure; the renderer falls back to a plain code block
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Highlight error: {0}")]
    Syntect(#[from] syntect::Error),
}

/// Markdown renderer with sanitized output
pub struct MarkdownRenderer {
    options: Options,
    raw_html: RawHtml,
    breaks: bool,
    syntax_set: Option<SyntaxSet>,
    sanitizer: ammonia::Builder<'static>,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }

    /// Create a renderer from configuration
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        if config.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if config.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }

        // Only load syntax definitions when they are going to be used
        let syntax_set = config
            .highlight
            .then(SyntaxSet::load_defaults_newlines);

        Self {
            options,
            raw_html: config.raw_html,
            breaks: config.breaks,
            syntax_set,
            sanitizer: sanitizer(),
        }
    }

    /// Render markdown to sanitized HTML
    ///
    /// Never fails: malformed markdown renders as best-effort HTML and the
    /// empty string renders as the empty string.
    pub fn render(&self, markdown: &str) -> String {
        self.sanitizer.clean(&self.render_unsanitized(markdown)).to_string()
    }

    fn render_unsanitized(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        // One entry per open link/image, true when its tags are dropped
        let mut dropped: Vec<bool> = Vec::new();
        // Language and collected text of the code block being highlighted
        let mut code_block: Option<(String, String)> = None;
        // Source of the HTML block being escaped
        let mut html_block: Option<String> = None;

        for event in parser {
            let destination_safe = match &event {
                Event::Start(Tag::Link { dest_url, .. })
                | Event::Start(Tag::Image { dest_url, .. }) => Some(is_safe_url(dest_url)),
                _ => None,
            };

            match event {
                Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                    let safe = destination_safe.unwrap_or(false);
                    if safe {
                        events.push(event);
                    } else {
                        tracing::debug!("Dropping link with unsafe destination");
                    }
                    dropped.push(!safe);
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    if !dropped.pop().unwrap_or(false) {
                        events.push(event);
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) if self.syntax_set.is_some() => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .unwrap_or_default()
                            .to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    if let Some((lang, code)) = code_block.take() {
                        events.push(Event::Html(CowStr::from(self.code_block(&code, &lang))));
                    }
                }
                Event::Start(Tag::HtmlBlock) if self.raw_html == RawHtml::Escape => {
                    html_block = Some(String::new());
                }
                Event::Html(raw) if html_block.is_some() => {
                    if let Some(block) = html_block.as_mut() {
                        block.push_str(&raw);
                    }
                }
                Event::End(TagEnd::HtmlBlock) if html_block.is_some() => {
                    // Escaped tags are plain paragraph text, markdown inside them included
                    if let Some(block) = html_block.take() {
                        let html = self.render_unsanitized(&escape_block_tags(&block));
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Html(raw) | Event::InlineHtml(raw) if self.raw_html == RawHtml::Escape => {
                    events.push(Event::Text(raw));
                }
                Event::SoftBreak if self.breaks => events.push(Event::HardBreak),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Render a highlighted code block, or a plain one if highlighting fails
    fn code_block(&self, code: &str, lang: &str) -> String {
        let class = if lang.is_empty() {
            String::new()
        } else {
            format!(r#" class="language-{}""#, html_escape(lang))
        };

        let body = match self.highlight_code(code, lang) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::warn!("{}", e);
                html_escape(code)
            }
        };

        format!("<pre><code{}>{}</code></pre>\n", class, body)
    }

    fn highlight_code(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
        let Some(syntax_set) = self.syntax_set.as_ref() else {
            return Ok(html_escape(code));
        };

        let syntax = syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Allow-list applied to every rendered document
fn sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("span", &["class"]);
    builder
}

/// Backslash-escape every `<` that starts a line, so the block parses as a paragraph
fn escape_block_tags(block: &str) -> String {
    block
        .split_inclusive('\n')
        .map(|line| {
            let body = line.trim_start_matches([' ', '\t']);
            if body.starts_with('<') {
                let indent = &line[..line.len() - body.len()];
                format!("{}\\{}", indent, body)
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Reject script-capable URL schemes, allowing inline raster images
fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_lowercase();
    if BAD_PROTOCOL.is_match(&url) {
        return GOOD_DATA.is_match(&url);
    }
    true
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
