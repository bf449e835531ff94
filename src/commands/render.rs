//! Render post content to HTML, once or on every change (live preview)

use anyhow::Result;
use notify::Watcher;
use std::fs;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use super::read_source;
use crate::content::{FrontMatter, MarkdownRenderer};
use crate::Board;

/// Render the markdown body of a post file, ignoring its front-matter
pub fn render_source(renderer: &MarkdownRenderer, source: &str) -> Result<String> {
    let (_, body) = FrontMatter::parse(source)?;
    Ok(renderer.render(body))
}

/// Render a file (or stdin) to a file (or stdout)
pub fn run(board: &Board, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let renderer = board.renderer();
    let source = read_source(input)?;
    let html = render_source(&renderer, &source)?;
    write_output(output, &html)
}

fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html)?;
            tracing::info!("Rendered {} bytes to {:?}", html.len(), path);
        }
        None => print!("{}", html),
    }
    Ok(())
}

fn render_file(renderer: &MarkdownRenderer, input: &Path, output: Option<&Path>) -> Result<()> {
    let source = read_source(Some(input))?;
    let html = render_source(renderer, &source)?;
    write_output(output, &html)
}

/// Re-render `input` every time it changes
pub async fn watch(board: &Board, input: &Path, output: Option<&Path>) -> Result<()> {
    let renderer = board.renderer();
    render_file(&renderer, input, output)?;

    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Editors often replace the file instead of writing it, so watch its directory
    let watch_dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    watcher.watch(watch_dir, notify::RecursiveMode::NonRecursive)?;

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", input);

    let mut last_render = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let touches_input = event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == input.file_name());
                if !touches_input || !input.exists() {
                    continue;
                }
                if last_render.elapsed() > Duration::from_millis(300) {
                    tracing::info!("{:?} changed, rendering...", input);
                    if let Err(e) = render_file(&renderer, input, output) {
                        tracing::error!("Render failed: {:#}", e);
                    }
                    last_render = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_source_strips_frontmatter() {
        let renderer = MarkdownRenderer::new();
        let html = render_source(&renderer, "---\ntitle: Cím\n---\n# Fejléc\n\nSzöveg").unwrap();
        assert!(!html.contains("title"));
        assert!(html.contains("<h1>Fejléc</h1>"));
        assert!(html.contains("<p>Szöveg</p>"));
    }

    #[test]
    fn test_render_source_with_leading_brace() {
        let html = render_source(&MarkdownRenderer::new(), "{x} is a set").unwrap();
        assert!(html.contains("<p>{x} is a set</p>"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        let input = dir.path().join("draft.md");
        let output = dir.path().join("out/draft.html");
        fs::write(&input, "*dőlt*").unwrap();

        run(&board, Some(&input), Some(&output)).unwrap();
        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<em>dőlt</em>"));
    }
}
