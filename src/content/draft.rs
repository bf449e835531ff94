//! Post creation and edit form state

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MarkdownRenderer;

/// Label of the submit button when the draft is valid
pub const SUBMIT_LABEL: &str = "Kész";

/// Why a draft cannot be submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("A cím nem lehet üres!")]
    EmptyTitle,

    #[error("A tartalom nem lehet üres")]
    EmptyContent,
}

/// A post being written or edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Selected category ids
    #[serde(default)]
    pub categories: Vec<u32>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            categories: Vec::new(),
        }
    }

    /// Check the title, then the content. Only emptiness is checked.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.content.is_empty() {
            return Err(DraftError::EmptyContent);
        }
        Ok(())
    }

    /// The preview tab is only available once there is content
    pub fn preview_available(&self) -> bool {
        !self.content.is_empty()
    }

    /// Rendered preview, if available
    pub fn preview(&self, renderer: &MarkdownRenderer) -> Option<String> {
        self.preview_available()
            .then(|| renderer.render(&self.content))
    }

    /// Whether the form can be submitted while a previous submit may be in flight
    pub fn can_submit(&self, busy: bool) -> bool {
        !busy && self.validate().is_ok()
    }

    /// The submit button shows the validation message instead of its label
    pub fn submit_label(&self) -> String {
        match self.validate() {
            Ok(()) => SUBMIT_LABEL.to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// Tick or untick a category checkbox
    pub fn toggle_category(&mut self, id: u32, checked: bool) {
        if checked {
            if !self.categories.contains(&id) {
                self.categories.push(id);
            }
        } else {
            self.categories.retain(|&c| c != id);
        }
    }

    /// Reset after a successful submit
    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
        self.categories.clear();
    }
}
