//! List posts as cards, or categories with post counts

use anyhow::Result;
use indexmap::IndexMap;

use crate::content::{ContentLoader, PostCard};
use crate::Board;

/// One line of the post list
pub fn format_card(card: &PostCard) -> String {
    let categories = card
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "#{} {} - {} [{}]",
        card.id,
        card.title,
        card.snippet.trim(),
        categories
    )
}

/// List board content by type
pub fn run(board: &Board, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(board);

    match content_type {
        "post" | "posts" => {
            let summarizer = board.summarizer();
            let posts = loader.load_posts()?;
            println!("{} - Posts ({}):", board.config.title, posts.len());
            for post in &posts {
                println!("  {}", format_card(&post.card(&summarizer)));
            }
        }
        "category" | "categories" => {
            let (posts, registry) = loader.load()?;
            let mut counts: IndexMap<u32, (String, usize)> = registry
                .categories()
                .into_iter()
                .map(|c| (c.id, (c.name, 0)))
                .collect();
            for post in &posts {
                for category in &post.categories {
                    if let Some((_, count)) = counts.get_mut(&category.id) {
                        *count += 1;
                    }
                }
            }
            println!("{} - Categories ({}):", board.config.title, counts.len());
            for (id, (name, count)) in counts {
                println!("  {} {} ({})", id, name, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    #[test]
    fn test_format_card() {
        let card = PostCard {
            id: 3,
            title: "Kérdés".to_string(),
            snippet: "  Hogyan kell   ".to_string(),
            categories: vec![
                Category {
                    id: 1,
                    name: "Általános".to_string(),
                },
                Category {
                    id: 2,
                    name: "Kérdések".to_string(),
                },
            ],
        };
        assert_eq!(
            format_card(&card),
            "#3 Kérdés - Hogyan kell [Általános, Kérdések]"
        );
    }

    #[test]
    fn test_unknown_type() {
        let dir = tempfile::TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        assert!(run(&board, "tag").is_err());
        assert!(run(&board, "post").is_ok());
    }
}
