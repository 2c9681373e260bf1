//! Content loader - loads pages and posts from source directories

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::Converter;
use super::{ContentRecord, ConverterSet, FrontMatter, FrontMatterError};
use crate::helpers::path2url;

lazy_static! {
    /// `YYYY-MM-DD-title` with exact digit widths. A string match only;
    /// calendar validity is not checked.
    static ref POST_NAME: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.+)$").unwrap();
}

/// Loads content records from a directory tree.
pub struct ContentLoader {
    converters: ConverterSet,
}

impl ContentLoader {
    /// Create a loader with the default converter registry.
    pub fn new() -> Self {
        Self {
            converters: ConverterSet::new(),
        }
    }

    /// Create a loader with a custom converter registry.
    pub fn with_converters(converters: ConverterSet) -> Self {
        Self { converters }
    }

    /// Load all pages under `root`, in directory-walk order.
    ///
    /// Each page URL is the file's path relative to the common ancestor
    /// of all discovered files, with the extension replaced by `.html`.
    pub fn load_pages(&self, root: &Path) -> Result<Vec<ContentRecord>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.into_path())
            .collect();
        let prefix = common_ancestor(&files);

        let mut pages = Vec::new();
        for path in &files {
            let Some(convert) = self.converters.for_path(path) else {
                continue;
            };
            let Some(mut page) = self.read_record(path, convert) else {
                continue;
            };

            let relative = path.strip_prefix(&prefix).unwrap_or(path);
            let html_path = relative.with_extension("html");
            page.url = Some(path2url(&html_path.to_string_lossy()));
            pages.push(page);
        }

        Ok(pages)
    }

    /// Load all posts under `root`, sorted by date descending and
    /// cross-linked to their chronological neighbors.
    ///
    /// File base names must match `YYYY-MM-DD-title`; anything else is
    /// silently excluded.
    pub fn load_posts(&self, root: &Path) -> Result<Vec<ContentRecord>> {
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(convert) = self.converters.for_path(path) else {
                continue;
            };
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            let Some(caps) = POST_NAME.captures(stem) else {
                continue;
            };
            let Some(mut post) = self.read_record(path, convert) else {
                continue;
            };

            let (year, month, day, title) = (&caps[1], &caps[2], &caps[3], &caps[4]);
            post.date = Some(format!("{year}-{month}-{day}"));
            post.permalink = Some(path2url(&format!("{year}/{month}/{day}/{title}.html")));
            post.tags = post.meta_value("tags").map(split_tags).unwrap_or_default();
            posts.push(post);
        }

        // Stable sort: ties keep walk order. The fixed-width date string
        // compares in date order.
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        link_posts(&mut posts);

        Ok(posts)
    }

    /// Read one file: parse front matter and convert the body.
    ///
    /// Per-file failures never abort the build: missing front matter is
    /// logged at debug, malformed blocks and read errors at warn, and
    /// the file is skipped either way.
    fn read_record(&self, path: &Path, convert: Converter) -> Option<ContentRecord> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                return None;
            }
        };

        match FrontMatter::parse(&raw) {
            Ok((fm, body)) => Some(ContentRecord::new(fm.into_entries(), convert(&body))),
            Err(FrontMatterError::Missing) => {
                tracing::debug!("No front matter in {:?}, skipping", path);
                None
            }
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Link each post to its neighbors in the sorted sequence: `previous`
/// is the newer post at index - 1, `next` the older one at index + 1.
fn link_posts(posts: &mut [ContentRecord]) {
    let n = posts.len();
    for (i, post) in posts.iter_mut().enumerate() {
        post.previous = (i > 0).then(|| i - 1);
        post.next = (i + 1 < n).then_some(i + 1);
    }
}

/// Split a front-matter `tags` value on commas, trimming each segment.
fn split_tags(value: &str) -> Vec<String> {
    value.split(',').map(|t| t.trim().to_string()).collect()
}

/// Deepest directory containing every listed file.
fn common_ancestor(paths: &[PathBuf]) -> PathBuf {
    let mut parents = paths.iter().filter_map(|p| p.parent());
    let Some(first) = parents.next() else {
        return PathBuf::new();
    };

    let mut prefix = first.to_path_buf();
    for parent in parents {
        prefix = prefix
            .components()
            .zip(parent.components())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.as_os_str())
            .collect();
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn post_file(title: &str) -> String {
        format!("---\ntitle: {title}\n---\n# {title}\n")
    }

    #[test]
    fn test_post_filename_filter() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "2023-01-05-hello.md", &post_file("hello"));
        write_file(dir.path(), "notes.md", &post_file("notes"));
        // Invalid calendar values still match the digit pattern.
        write_file(dir.path(), "2023-13-40-bad.md", &post_file("bad"));

        let posts = ContentLoader::new().load_posts(dir.path()).unwrap();
        let mut dates: Vec<_> = posts.iter().map(|p| p.date.clone().unwrap()).collect();
        dates.sort();
        assert_eq!(dates, vec!["2023-01-05", "2023-13-40"]);
    }

    #[test]
    fn test_chronological_ordering_and_linking() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "2023-01-01-first.md", &post_file("first"));
        write_file(dir.path(), "2023-01-03-third.md", &post_file("third"));
        write_file(dir.path(), "2023-01-02-second.md", &post_file("second"));

        let posts = ContentLoader::new().load_posts(dir.path()).unwrap();
        let dates: Vec<_> = posts.iter().map(|p| p.date.as_deref().unwrap()).collect();
        assert_eq!(dates, vec!["2023-01-03", "2023-01-02", "2023-01-01"]);

        let middle = &posts[1];
        assert_eq!(
            middle.previous_in(&posts).unwrap().date.as_deref(),
            Some("2023-01-03")
        );
        assert_eq!(
            middle.next_in(&posts).unwrap().date.as_deref(),
            Some("2023-01-01")
        );
        assert!(posts[0].previous.is_none());
        assert!(posts[2].next.is_none());
    }

    #[test]
    fn test_post_permalink_and_content() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "2023-01-05-hello.md", &post_file("hello"));

        let posts = ContentLoader::new().load_posts(dir.path()).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(
            posts[0].permalink.as_deref(),
            Some("/2023/01/05/hello.html")
        );
        assert!(posts[0].content.contains("<h1>hello</h1>"));
    }

    #[test]
    fn test_tag_parsing() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "2023-01-05-tagged.md",
            "---\ntags: a, b ,c\n---\nbody",
        );
        write_file(dir.path(), "2023-01-06-untagged.md", "---\n---\nbody");

        let posts = ContentLoader::new().load_posts(dir.path()).unwrap();
        assert_eq!(posts[1].tags, vec!["a", "b", "c"]);
        assert!(posts[0].tags.is_empty());
    }

    #[test]
    fn test_page_url_derivation() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "about.md", &post_file("about"));
        write_file(dir.path(), "blog/index.md", &post_file("blog"));

        let pages = ContentLoader::new().load_pages(dir.path()).unwrap();
        let mut urls: Vec<_> = pages.iter().map(|p| p.url.clone().unwrap()).collect();
        urls.sort();
        assert_eq!(urls, vec!["/about.html", "/blog/"]);
    }

    #[test]
    fn test_malformed_file_skipped_build_continues() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "good.md", &post_file("good"));
        write_file(dir.path(), "bad.md", "---\nkey: has: two colons\n---\nbody");
        write_file(dir.path(), "unterminated.md", "---\nkey: value\nbody");
        write_file(dir.path(), "plain.md", "no front matter at all");

        let pages = ContentLoader::new().load_pages(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].meta_value("title"), Some("good"));
    }

    #[test]
    fn test_unrecognized_extensions_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "page.md", &post_file("page"));
        write_file(dir.path(), "style.css", "body {}");
        write_file(dir.path(), "raw.html", "<p>raw</p>");

        let pages = ContentLoader::new().load_pages(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_missing_directory_yields_empty() {
        let dir = TempDir::new().unwrap();
        let loader = ContentLoader::new();
        assert!(loader.load_pages(&dir.path().join("nope")).unwrap().is_empty());
        assert!(loader.load_posts(&dir.path().join("nope")).unwrap().is_empty());
    }
}
