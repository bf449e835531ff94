//! Post model and the view models built from it

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{MarkdownRenderer, Summarizer};

/// Author of a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar glyph or image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A category a post is tagged with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// A community post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,

    pub title: String,

    /// Raw markdown content
    pub content: String,

    pub author: Author,

    pub categories: Vec<Category>,

    /// Publication date
    pub date: DateTime<Local>,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: u32, title: String, content: String, date: DateTime<Local>) -> Self {
        Self {
            id,
            title,
            content,
            author: Author::default(),
            categories: Vec::new(),
            date,
            source: PathBuf::new(),
        }
    }

    /// Whether the signed-in user with this email wrote the post and may edit or delete it
    pub fn is_authored_by(&self, email: &str) -> bool {
        self.author.email.as_deref() == Some(email)
    }

    /// The list item for this post
    pub fn card(&self, summarizer: &Summarizer) -> PostCard {
        PostCard {
            id: self.id,
            title: self.title.clone(),
            snippet: summarizer.summarize(Some(&self.content)),
            categories: self.categories.clone(),
        }
    }

    /// The full page for this post
    pub fn view(&self, renderer: &MarkdownRenderer) -> PostView {
        PostView {
            id: self.id,
            title: self.title.clone(),
            html: renderer.render(&self.content),
            author: self.author.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// What a post list shows for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: u32,
    pub title: String,
    /// Single-line plain text snippet of the content
    pub snippet: String,
    pub categories: Vec<Category>,
}

/// What the post page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: u32,
    pub title: String,
    /// Sanitized HTML of the content
    pub html: String,
    pub author: Author,
    pub categories: Vec<Category>,
}
