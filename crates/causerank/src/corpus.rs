//! Corpus loading
//!
//! The corpus is a UTF-8 text file with one page per line:
//! `title \t text`. Lines without a tab become untitled pages. The
//! loaded [`Index`] is read-only for the lifetime of the process.

use causerank_core::{Index, Page};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Corpus loading errors
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corpus is empty: {0}")]
    Empty(String),
}

pub type Result<T> = std::result::Result<T, CorpusError>;

/// Parse corpus text into pages
pub fn parse_corpus(content: &str) -> Vec<Page> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| match line.split_once('\t') {
            Some((title, text)) => Page {
                title: title.to_string(),
                text: text.to_string(),
            },
            None => Page {
                title: format!("page-{}", line_no + 1),
                text: line.to_string(),
            },
        })
        .collect()
}

/// Load the corpus file into an index.
///
/// Runs once at startup, before the worker pool is created.
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<Index> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let pages = parse_corpus(&content);
    if pages.is_empty() {
        return Err(CorpusError::Empty(path.display().to_string()));
    }
    Ok(Index::new(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corpus_tab_separated() {
        let pages = parse_corpus("Birds\tBirds sing to mark territory.\nRain\tRain falls.\n");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "Birds");
        assert_eq!(pages[1].text, "Rain falls.");
    }

    #[test]
    fn test_parse_corpus_untitled_and_blank_lines() {
        let pages = parse_corpus("just text\n\n  \nTitled\tbody\n");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "page-1");
        assert_eq!(pages[0].text, "just text");
        assert_eq!(pages[1].title, "Titled");
    }

    #[tokio::test]
    async fn test_load_corpus_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        tokio::fs::write(&path, "\n\n").await.unwrap();

        let result = load_corpus(&path).await;
        assert!(matches!(result, Err(CorpusError::Empty(_))));
    }

    #[tokio::test]
    async fn test_load_corpus_reads_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.tsv");
        tokio::fs::write(&path, "A\tfirst page\nB\tsecond page\n")
            .await
            .unwrap();

        let index = load_corpus(&path).await.unwrap();
        assert_eq!(index.len(), 2);
    }
}
