//! Content loader - loads posts from the posts directory

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Author, Category, FrontMatter, Post};
use crate::Board;

/// Assigns stable ids to category names
///
/// Configured categories are numbered first, from 1; names first seen in
/// posts get the following ids in the order they are met.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    ids: IndexMap<String, u32>,
}

impl CategoryRegistry {
    pub fn new<S: AsRef<str>>(declared: &[S]) -> Self {
        let mut registry = Self::default();
        for name in declared {
            registry.resolve(name.as_ref());
        }
        registry
    }

    /// The category for a name, registering it if new
    pub fn resolve(&mut self, name: &str) -> Category {
        let next = self.ids.len() as u32 + 1;
        let id = *self.ids.entry(name.to_string()).or_insert(next);
        Category {
            id,
            name: name.to_string(),
        }
    }

    /// Look up a name without registering it
    pub fn get(&self, name: &str) -> Option<Category> {
        self.ids.get(name).map(|&id| Category {
            id,
            name: name.to_string(),
        })
    }

    /// All known categories in id order
    pub fn categories(&self) -> Vec<Category> {
        self.ids
            .iter()
            .map(|(name, &id)| Category {
                id,
                name: name.clone(),
            })
            .collect()
    }
}

/// A post file before ids are assigned
struct PostFile {
    front: FrontMatter,
    body: String,
    path: PathBuf,
    modified: Option<DateTime<Local>>,
}

/// Loads posts from the posts directory
pub struct ContentLoader<'a> {
    board: &'a Board,
}

impl<'a> ContentLoader<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Load all posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        Ok(self.load()?.0)
    }

    /// Load all posts together with the category registry they were resolved against
    pub fn load(&self) -> Result<(Vec<Post>, CategoryRegistry)> {
        let mut registry = CategoryRegistry::new(&self.board.config.categories);
        let posts_dir = &self.board.posts_dir;
        if !posts_dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", posts_dir);
            return Ok((Vec::new(), registry));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match read_post_file(path) {
                    Ok(file) => files.push(file),
                    Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
                }
            }
        }

        let mut taken = HashSet::new();
        // `None` once the highest explicit id is u32::MAX
        let mut next_id = files
            .iter()
            .filter_map(|f| f.front.id)
            .max()
            .unwrap_or(0)
            .checked_add(1);

        let mut posts = Vec::with_capacity(files.len());
        for file in files {
            let id = match file.front.id {
                Some(id) if !taken.insert(id) => {
                    tracing::warn!("Skipping {:?}: post id {} is already used", file.path, id);
                    continue;
                }
                Some(id) => id,
                None => {
                    let Some(id) = next_id else {
                        tracing::warn!("Skipping {:?}: no post id left to assign", file.path);
                        continue;
                    };
                    next_id = id.checked_add(1);
                    taken.insert(id);
                    tracing::debug!("Assigned id {} to {:?}", id, file.path);
                    id
                }
            };
            posts.push(build_post(id, file, &mut registry));
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok((posts, registry))
    }

    /// Find one post by id
    pub fn find_post(&self, id: u32) -> Result<Option<Post>> {
        Ok(self.load_posts()?.into_iter().find(|p| p.id == id))
    }
}

fn read_post_file(path: &Path) -> Result<PostFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let (front, body) = FrontMatter::parse(&content)?;
    let body = body.to_string();

    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Local>::from);

    Ok(PostFile {
        front,
        body,
        path: path.to_path_buf(),
        modified,
    })
}

fn build_post(id: u32, file: PostFile, registry: &mut CategoryRegistry) -> Post {
    let PostFile {
        front,
        body,
        path,
        modified,
    } = file;

    let date = front
        .parse_date()
        .unwrap_or_else(|| modified.unwrap_or_else(Local::now));

    let title = front.title.clone().unwrap_or_else(|| file_stem(&path));

    let mut post = Post::new(id, title, body, date);
    post.author = front.author.map(Author::from).unwrap_or_default();
    post.categories = front
        .categories
        .iter()
        .map(|name| registry.resolve(name))
        .collect();
    post.source = path;
    post
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn board_with(files: &[(&str, &str)], config: &str) -> (TempDir, Board) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), config).unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        for (name, content) in files {
            fs::write(posts.join(name), content).unwrap();
        }
        let board = Board::new(dir.path()).unwrap();
        (dir, board)
    }

    #[test]
    fn test_category_registry() {
        let mut registry = CategoryRegistry::new(&["Általános", "Kérdések"]);
        assert_eq!(registry.resolve("Kérdések").id, 2);
        assert_eq!(registry.resolve("Hírek").id, 3);
        assert_eq!(registry.resolve("Általános").id, 1);
        assert_eq!(registry.get("Sport"), None);
        assert_eq!(registry.categories().len(), 3);
    }

    #[test]
    fn test_load_posts() {
        let (_dir, board) = board_with(
            &[
                (
                    "a.md",
                    "---\nid: 4\ntitle: Régi\ndate: 2024-01-01\ncategories: Hírek\n---\nRégi tartalom",
                ),
                (
                    "b.md",
                    "---\ntitle: Új\ndate: 2024-06-01\ncategories: [Kérdések, Hírek]\n---\nÚj tartalom",
                ),
                ("notes.txt", "not a post"),
            ],
            "categories: [Általános, Kérdések]\n",
        );

        let (posts, registry) = ContentLoader::new(&board).load().unwrap();
        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].title, "Új");
        assert_eq!(posts[0].id, 5);
        assert_eq!(
            posts[0].categories.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![2, 3]
        );

        assert_eq!(posts[1].title, "Régi");
        assert_eq!(posts[1].id, 4);
        assert_eq!(posts[1].content, "Régi tartalom");
        assert_eq!(posts[1].categories[0].name, "Hírek");

        assert_eq!(registry.categories().len(), 3);
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let (_dir, board) = board_with(&[("cim-nelkul.md", "Csak szöveg.")], "");
        let posts = ContentLoader::new(&board).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "cim-nelkul");
        assert_eq!(posts[0].id, 1);
    }

    #[test]
    fn test_duplicate_id_is_skipped() {
        let (_dir, board) = board_with(
            &[
                ("a.md", "---\nid: 1\ntitle: Első\n---\nx"),
                ("b.md", "---\nid: 1\ntitle: Második\n---\ny"),
            ],
            "",
        );
        let posts = ContentLoader::new(&board).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Első");
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let (_dir, board) = board_with(
            &[("a.md", ";;;\n{\"title\": \"broken\"}"), ("b.md", "---\ntitle: Jó\n---\nok")],
            "",
        );
        let posts = ContentLoader::new(&board).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Jó");
    }

    #[test]
    fn test_leading_brace_is_content() {
        let (_dir, board) = board_with(&[("halmaz.md", "{x} is a set")], "");
        let posts = ContentLoader::new(&board).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "halmaz");
        assert_eq!(posts[0].content, "{x} is a set");
    }

    #[test]
    fn test_ids_run_out_at_u32_max() {
        let (_dir, board) = board_with(
            &[
                ("a.md", "---\nid: 4294967295\ntitle: Utolsó\n---\nx"),
                ("b.md", "---\ntitle: Nincs hely\n---\ny"),
            ],
            "",
        );
        let posts = ContentLoader::new(&board).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, u32::MAX);
    }

    #[test]
    fn test_find_post() {
        let (_dir, board) = board_with(&[("a.md", "---\nid: 12\ntitle: Tizenkettő\n---\nx")], "");
        let loader = ContentLoader::new(&board);
        assert_eq!(loader.find_post(12).unwrap().unwrap().title, "Tizenkettő");
        assert!(loader.find_post(13).unwrap().is_none());
    }

    #[test]
    fn test_missing_posts_dir() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&board).load_posts().unwrap().is_empty());
    }
}
