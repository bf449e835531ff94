//! Validate a draft file with the post form rules

use anyhow::Result;
use std::path::Path;

use super::read_source;
use crate::content::{CategoryRegistry, ContentLoader, FrontMatter, PostDraft};
use crate::Board;

/// Build the form state a draft file corresponds to
///
/// Returns the draft and the category names that no post or configuration
/// knows about; those are left out of the draft.
pub fn draft_from_source(
    source: &str,
    registry: &CategoryRegistry,
) -> Result<(PostDraft, Vec<String>)> {
    let (front, body) = FrontMatter::parse(source)?;

    let mut draft = PostDraft::new(front.title.unwrap_or_default(), body);
    let mut unknown = Vec::new();
    for name in front.categories {
        match registry.get(&name) {
            Some(category) => draft.toggle_category(category.id, true),
            None => unknown.push(name),
        }
    }

    Ok((draft, unknown))
}

pub fn run(board: &Board, input: &Path) -> Result<()> {
    let (_, registry) = ContentLoader::new(board).load()?;
    let source = read_source(Some(input))?;
    let (draft, unknown) = draft_from_source(&source, &registry)?;

    for name in &unknown {
        tracing::warn!("Unknown category {:?} in {:?}", name, input);
    }

    draft.validate()?;
    println!("{:?}: {}", input, draft.submit_label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DraftError;

    #[test]
    fn test_draft_from_source() {
        let registry = CategoryRegistry::new(&["Általános", "Kérdések"]);
        let source = "---\ntitle: Kérdés\ncategories: [Kérdések, Sport]\n---\nMiért?";
        let (draft, unknown) = draft_from_source(source, &registry).unwrap();
        assert_eq!(draft.title, "Kérdés");
        assert_eq!(draft.content, "Miért?");
        assert_eq!(draft.categories, vec![2]);
        assert_eq!(unknown, vec!["Sport"]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_missing_title_fails() {
        let registry = CategoryRegistry::default();
        let (draft, _) = draft_from_source("Csak tartalom", &registry).unwrap();
        assert_eq!(draft.validate(), Err(DraftError::EmptyTitle));
    }

    #[test]
    fn test_run_reports_form_message() {
        let dir = tempfile::TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        let input = dir.path().join("draft.md");
        std::fs::write(&input, "---\ntitle: Üres\n---\n").unwrap();

        let err = run(&board, &input).unwrap_err();
        assert_eq!(err.to_string(), "A tartalom nem lehet üres");
    }
}
