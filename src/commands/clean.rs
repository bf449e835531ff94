//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Board;

/// Remove everything `generate` wrote
pub fn run(board: &Board) -> Result<()> {
    if board.public_dir.exists() {
        fs::remove_dir_all(&board.public_dir)?;
        tracing::info!("Deleted: {:?}", board.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", board.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = TempDir::new().unwrap();
        let board = Board::new(dir.path()).unwrap();
        fs::create_dir_all(board.public_dir.join("posts")).unwrap();
        fs::write(board.public_dir.join("index.json"), "[]").unwrap();

        run(&board).unwrap();
        assert!(!board.public_dir.exists());

        // cleaning twice is fine
        run(&board).unwrap();
    }
}
