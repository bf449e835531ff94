//! Content module - posts, drafts, and the render/summary pipeline

mod draft;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod summary;

pub use draft::{DraftError, PostDraft, SUBMIT_LABEL};
pub use frontmatter::{AuthorField, FrontMatter};
pub use loader::{CategoryRegistry, ContentLoader};
pub use markdown::{HighlightError, MarkdownRenderer};
pub use post::{Author, Category, Post, PostCard, PostView};
pub use summary::{Charset, Summarizer, HUNGARIAN_LETTERS};
