//! Content module - front matter, records, converters, and loading

mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::{markdown_to_html, Converter, ConverterSet};
pub use record::ContentRecord;
