//! Create a new post file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentLoader, DraftError};
use crate::Board;

/// Scaffold written when `scaffolds/post.md` does not exist
const DEFAULT_SCAFFOLD: &str = "---
id: {{ id }}
title: {{ title }}
date: {{ date }}
categories: []
---
";

/// Create a post file and return its path
pub fn create_post(board: &Board, title: &str, path: Option<&str>) -> Result<PathBuf> {
    if title.is_empty() {
        return Err(DraftError::EmptyTitle.into());
    }

    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&board.posts_dir)?;

    let filename = match path {
        Some(p) => format!("{}.md", p),
        None => board
            .config
            .new_post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string()),
    };
    let file_path = board.posts_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let next_id = ContentLoader::new(board)
        .load_posts()?
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| anyhow::anyhow!("No post id left to assign"))?;

    let scaffold_path = board.base_dir.join("scaffolds").join("post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ id }}", &next_id.to_string())
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    fs::write(&file_path, content)?;
    tracing::info!("Created post {} at {:?}", next_id, file_path);

    Ok(file_path)
}

/// Quote a title so YAML reads it back verbatim
fn yaml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();

        let path = create_post(&board, "Első: \"bejegyzés\"", None).unwrap();
        assert!(path.starts_with(&board.posts_dir));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, body) = FrontMatter::parse(&content).unwrap();
        assert_eq!(fm.id, Some(1));
        assert_eq!(fm.title.as_deref(), Some("Első: \"bejegyzés\""));
        assert!(fm.parse_date().is_some());
        assert!(body.trim().is_empty());

        let second = create_post(&board, "Második", Some("masodik")).unwrap();
        let content = fs::read_to_string(&second).unwrap();
        let (fm, _) = FrontMatter::parse(&content).unwrap();
        assert_eq!(fm.id, Some(2));
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        let err = create_post(&board, "", None).unwrap_err();
        assert_eq!(err.to_string(), "A cím nem lehet üres!");
    }

    #[test]
    fn test_no_id_after_u32_max() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        fs::create_dir_all(&board.posts_dir).unwrap();
        fs::write(
            board.posts_dir.join("utolso.md"),
            "---\nid: 4294967295\ntitle: Utolsó\n---\nx",
        )
        .unwrap();

        let err = create_post(&board, "Még egy", None).unwrap_err();
        assert_eq!(err.to_string(), "No post id left to assign");
        assert!(!board.posts_dir.join("meg-egy.md").exists());
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        create_post(&board, "Ugyanaz", None).unwrap();
        assert!(create_post(&board, "Ugyanaz", None).is_err());
    }
}
