//! Content record model shared by pages and posts

use indexmap::IndexMap;
use serde::Serialize;

/// One loaded page or post.
///
/// Created during loading, mutated once (markup to HTML, URL and link
/// assignment), read-only through rendering. Pages carry `url`; posts
/// carry `permalink`, `date` and `tags`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentRecord {
    /// Arbitrary front-matter metadata, keys lowercased.
    #[serde(flatten)]
    pub meta: IndexMap<String, String>,

    /// Rendered HTML body.
    pub content: String,

    /// Canonical site-relative URL (pages only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Canonical date-structured URL (posts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,

    /// `YYYY-MM-DD` string taken from the filename, kept unparsed.
    /// Lexicographic order on the fixed-width form is date order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Trimmed tag list; empty when the front matter has no `tags` key.
    pub tags: Vec<String>,

    /// Index of the chronologically newer neighbor in the sorted posts
    /// sequence. Links are navigational only; the sequence owns the
    /// records, so these are indices rather than owned references.
    #[serde(skip)]
    pub previous: Option<usize>,

    /// Index of the chronologically older neighbor.
    #[serde(skip)]
    pub next: Option<usize>,
}

impl ContentRecord {
    /// Create a record from parsed metadata and a rendered body.
    pub fn new(meta: IndexMap<String, String>, content: String) -> Self {
        Self {
            meta,
            content,
            ..Default::default()
        }
    }

    /// Look up a front-matter value by (case-insensitive) key.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Resolve the newer neighbor against the owning posts sequence.
    pub fn previous_in<'a>(&self, posts: &'a [ContentRecord]) -> Option<&'a ContentRecord> {
        self.previous.and_then(|i| posts.get(i))
    }

    /// Resolve the older neighbor against the owning posts sequence.
    pub fn next_in<'a>(&self, posts: &'a [ContentRecord]) -> Option<&'a ContentRecord> {
        self.next.and_then(|i| posts.get(i))
    }
}
