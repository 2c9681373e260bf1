//! Front-matter parsing

use indexmap::IndexMap;
use thiserror::Error;

/// Marker opening and closing a front-matter block.
const DELIMITER: &str = "---";

/// Why a front-matter parse did not produce a record.
///
/// `Missing` is a sentinel, not a fault: the file simply has no
/// front-matter block. The other variants mean the block is malformed.
/// Callers treat all three as "skip this file" but log them differently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("file does not start with a front-matter delimiter")]
    Missing,

    #[error("front-matter block is not closed before end of file")]
    Unterminated,

    #[error("front-matter line is not a single key:value pair: {0:?}")]
    BadLine(String),
}

/// Front-matter metadata from a post or page.
///
/// Keys are lowercased; values are lowercased and trimmed. Insertion
/// order follows the order of lines in the block.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrontMatter {
    #[serde(flatten)]
    meta: IndexMap<String, String>,
}

impl FrontMatter {
    /// Parse front-matter from raw file content.
    /// Returns (front_matter, trimmed body content).
    pub fn parse(raw: &str) -> Result<(Self, String), FrontMatterError> {
        let rest = raw.strip_prefix(DELIMITER).ok_or(FrontMatterError::Missing)?;

        let mut meta = IndexMap::new();
        let mut pos = 0;
        let mut closed = false;

        while pos < rest.len() {
            let end = rest[pos..]
                .find('\n')
                .map(|i| pos + i + 1)
                .unwrap_or(rest.len());
            let line = rest[pos..end].trim_end_matches('\n').trim_end_matches('\r');
            pos = end;

            if line == DELIMITER {
                closed = true;
                break;
            }
            if line.is_empty() {
                continue;
            }

            // Exactly one colon per metadata line.
            let trimmed = line.trim();
            let (key, value) = match trimmed.split_once(':') {
                Some((key, value)) if !value.contains(':') => (key, value),
                _ => return Err(FrontMatterError::BadLine(trimmed.to_string())),
            };
            meta.insert(key.trim().to_lowercase(), value.trim().to_lowercase());
        }

        if !closed {
            return Err(FrontMatterError::Unterminated);
        }

        let content = rest[pos..].trim().to_string();
        Ok((Self { meta }, content))
    }

    /// Look up a metadata value by (case-insensitive) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.meta.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Number of metadata entries.
    pub fn len(&self) -> usize {
        self.meta.len()
    }

    /// Whether the block carried no metadata at all.
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// Consume the record, yielding the ordered key/value map.
    pub fn into_entries(self) -> IndexMap<String, String> {
        self.meta
    }
}
