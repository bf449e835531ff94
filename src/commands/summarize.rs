//! Print the card snippet of post content

use anyhow::Result;
use std::path::Path;

use super::read_source;
use crate::content::{FrontMatter, Summarizer};
use crate::Board;

/// Snippet of the markdown body of a post file
pub fn summarize_source(summarizer: &Summarizer, source: &str) -> Result<String> {
    let (_, body) = FrontMatter::parse(source)?;
    Ok(summarizer.summarize(Some(body)))
}

pub fn run(board: &Board, input: Option<&Path>) -> Result<()> {
    let source = read_source(input)?;
    println!("{}", summarize_source(&board.summarizer(), &source)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_source() {
        let summarizer = Summarizer::new();
        let snippet =
            summarize_source(&summarizer, "---\ntitle: Cím\n---\n## Szia\nvilág!").unwrap();
        assert_eq!(snippet, "   Szia világ ");
    }

    #[test]
    fn test_summarize_source_with_leading_brace() {
        let snippet = summarize_source(&Summarizer::new(), "{x} is a set").unwrap();
        assert_eq!(snippet, " x  is a set");
    }
}
