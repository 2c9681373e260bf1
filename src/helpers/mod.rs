//! Helper functions shared across the build pipeline

mod url;

pub use url::{path2url, url2path};
