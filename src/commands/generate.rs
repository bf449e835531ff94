//! Write the public output: card index and one page per post

use anyhow::Result;
use std::fs;

use crate::content::{ContentLoader, PostCard};
use crate::Board;

/// Card index file, relative to the public directory
pub const INDEX_FILE: &str = "index.json";

/// Write `index.json` with every card and `posts/<id>.json` with every page
pub fn run(board: &Board) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(board).load_posts()?;
    tracing::info!("Loaded {} posts of {}", posts.len(), board.config.title);

    let renderer = board.renderer();
    let summarizer = board.summarizer();

    let posts_out = board.public_dir.join("posts");
    fs::create_dir_all(&posts_out)?;

    let cards: Vec<PostCard> = posts.iter().map(|p| p.card(&summarizer)).collect();
    fs::write(
        board.public_dir.join(INDEX_FILE),
        serde_json::to_string_pretty(&cards)?,
    )?;

    for post in &posts {
        let view = post.view(&renderer);
        let path = posts_out.join(format!("{}.json", post.id));
        fs::write(&path, serde_json::to_string_pretty(&view)?)?;
        tracing::debug!("Wrote {:?}", path);
    }

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate() {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("a.md"),
            "---\nid: 1\ntitle: Első\nauthor: Anna\ncategories: Hírek\n---\n# Hír\n\nRészletek <i>itt</i>.",
        )
        .unwrap();
        let board = Board::new(dir.path()).unwrap();

        run(&board).unwrap();

        let index: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(board.public_dir.join(INDEX_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(index[0]["id"], 1);
        assert_eq!(index[0]["title"], "Első");
        assert_eq!(index[0]["snippet"], "  Hír  Részletek  i itt  i .");
        assert_eq!(index[0]["categories"][0]["name"], "Hírek");

        let page: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(board.public_dir.join("posts/1.json")).unwrap(),
        )
        .unwrap();
        let html = page["html"].as_str().unwrap();
        assert!(html.contains("<h1>Hír</h1>"));
        assert!(html.contains("&lt;i&gt;itt&lt;/i&gt;"));
        assert_eq!(page["author"]["name"], "Anna");
    }
}
