//! Search Module
//!
//! Minimal in-memory document index backing the search endpoint. Documents
//! are seeded at startup; matching is case-insensitive substring search
//! over title, summary, and tags, with results split by document kind.

use serde::{Deserialize, Serialize};

// == Document Kind ==
/// Which content collection a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Article,
    Project,
}

// == Document ==
/// One searchable piece of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: String,
    pub slug: String,
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document {
    /// Case-insensitive substring match over title, summary, and tags.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.summary.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

// == Search Results ==
/// Matches partitioned by kind, the shape the search endpoint returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub articles: Vec<Document>,
    pub projects: Vec<Document>,
}

// == Search Index ==
/// Read-only collection of documents searched by the API layer.
#[derive(Debug, Default)]
pub struct SearchIndex {
    documents: Vec<Document>,
}

impl SearchIndex {
    /// Creates an index over the given documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Parses an index from a JSON array of documents.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        Ok(Self::new(documents))
    }

    /// Runs a query and partitions the matches by kind.
    pub fn search(&self, query: &str) -> SearchResults {
        let needle = query.trim().to_lowercase();
        let mut results = SearchResults::default();

        for document in &self.documents {
            if document.matches(&needle) {
                match document.kind {
                    DocumentKind::Article => results.articles.push(document.clone()),
                    DocumentKind::Project => results.projects.push(document.clone()),
                }
            }
        }

        results
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

// == Cache Key ==
/// Normalized cache key for a search query, so `" Rust "` and `"rust"`
/// share one cached result.
pub fn search_cache_key(query: &str) -> String {
    format!("search:all:{}", query.trim().to_lowercase())
}
