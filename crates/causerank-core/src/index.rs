//! The shared read-only corpus index

use serde::{Deserialize, Serialize};

/// One corpus page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page title
    pub title: String,
    /// Page body text
    pub text: String,
}

/// Precomputed read-only structure over the corpus.
///
/// Constructed once at startup and shared as `Arc<Index>` by every
/// worker for the lifetime of the process. It exposes no mutation;
/// nothing may write to it after the pool is created.
#[derive(Debug)]
pub struct Index {
    pages: Vec<Page>,
}

impl Index {
    /// Build an index over the given pages
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Number of pages in the corpus
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in corpus order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}
