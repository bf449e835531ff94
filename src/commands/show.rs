//! Print the rendered page of one post

use anyhow::Result;

use crate::content::{ContentLoader, Post, PostView};
use crate::Board;

/// Text page for a post: header lines, then the HTML body
pub fn format_view(view: &PostView) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", view.title));

    let mut author = view.author.name.clone();
    if let Some(email) = &view.author.email {
        author.push_str(&format!(" <{}>", email));
    }
    if !author.is_empty() {
        out.push_str(&format!("Author: {}\n", author));
    }

    if !view.categories.is_empty() {
        let names: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
        out.push_str(&format!("Categories: {}\n", names.join(", ")));
    }

    out.push('\n');
    out.push_str(&view.html);
    out
}

/// Whether `viewer` may edit and delete `post`
pub fn permission_line(post: &Post, viewer: &str) -> String {
    if post.is_authored_by(viewer) {
        format!("{} may edit and delete this post", viewer)
    } else {
        format!("{} may only read this post", viewer)
    }
}

pub fn run(board: &Board, id: u32, viewer: Option<&str>) -> Result<()> {
    let loader = ContentLoader::new(board);
    let Some(post) = loader.find_post(id)? else {
        anyhow::bail!("No post with id {}", id);
    };

    let view = post.view(&board.renderer());
    print!("{}", format_view(&view));

    if let Some(viewer) = viewer {
        println!("\n{}", permission_line(&post, viewer));
    }

    Ok(())
}
