//! Markup conversion, selected by file extension

use pulldown_cmark::{html, Options, Parser};
use std::collections::HashMap;
use std::path::Path;

/// A pluggable markup-to-HTML converter.
pub type Converter = fn(&str) -> String;

/// Registry of converters keyed by file extension.
///
/// All recognized extensions route to the Markdown converter; plain
/// `.txt` files are treated as Markdown too.
pub struct ConverterSet {
    converters: HashMap<&'static str, Converter>,
}

impl ConverterSet {
    /// Create the default registry.
    pub fn new() -> Self {
        let mut converters: HashMap<&'static str, Converter> = HashMap::new();
        for ext in ["txt", "md", "mkd", "markdown"] {
            converters.insert(ext, markdown_to_html);
        }
        Self { converters }
    }

    /// Register a converter for an extension (without the leading dot).
    pub fn register(&mut self, ext: &'static str, converter: Converter) {
        self.converters.insert(ext, converter);
    }

    /// Find the converter for a file path, if its extension is recognized.
    pub fn for_path(&self, path: &Path) -> Option<Converter> {
        let ext = path.extension()?.to_str()?;
        self.converters.get(ext).copied()
    }

    /// Whether the file's extension belongs to the recognized markup set.
    pub fn recognizes(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }
}

impl Default for ConverterSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Render markdown to HTML.
pub fn markdown_to_html(markup: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markup, options);

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        let out = markdown_to_html("# Title\n\nSome *emphasis*.");
        assert!(out.contains("<h1>Title</h1>"));
        assert!(out.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_recognized_extensions() {
        let set = ConverterSet::new();
        for name in ["a.md", "a.markdown", "a.mkd", "a.txt"] {
            assert!(set.recognizes(Path::new(name)), "{name} not recognized");
        }
        assert!(!set.recognizes(Path::new("a.html")));
        assert!(!set.recognizes(Path::new("no_extension")));
    }

    #[test]
    fn test_custom_converter() {
        fn upper(s: &str) -> String {
            s.to_uppercase()
        }
        let mut set = ConverterSet::new();
        set.register("up", upper);
        let conv = set.for_path(Path::new("x.up")).unwrap();
        assert_eq!(conv("abc"), "ABC");
    }
}
