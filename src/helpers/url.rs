//! URL helper functions
//!
//! Bidirectional mapping between logical site URLs and output
//! filesystem paths, with the `index.html` canonicalization rule.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Escape everything except unreserved characters and path separators.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Convert a relative output path to a root-relative, percent-encoded URL.
///
/// A path ending in `/index.html` (or `/index.htm`) collapses to the
/// directory URL with a trailing slash.
///
/// # Examples
/// ```ignore
/// path2url("blog/index.html") // -> "/blog/"
/// path2url("about.html")      // -> "/about.html"
/// ```
pub fn path2url(path: &str) -> String {
    let path = path.replace('\\', "/");
    let collapsed = match path
        .strip_suffix("/index.html")
        .or_else(|| path.strip_suffix("/index.htm"))
    {
        Some(dir) => format!("{}/", dir),
        None => path,
    };

    let absolute = format!("/{}", collapsed.trim_start_matches('/'));
    utf8_percent_encode(&absolute, PATH_SEGMENT).to_string()
}

/// Convert a root-relative URL back to a relative output path.
///
/// A URL ending in `/` gets `index.html` appended before decoding.
///
/// # Examples
/// ```ignore
/// url2path("/blog/")     // -> "blog/index.html"
/// url2path("/about.html") // -> "about.html"
/// ```
pub fn url2path(url: &str) -> String {
    let mut url = url.to_string();
    if url.ends_with('/') {
        url.push_str("index.html");
    }
    let decoded = percent_decode_str(&url).decode_utf8_lossy();
    decoded.trim_start_matches('/').to_string()
}
