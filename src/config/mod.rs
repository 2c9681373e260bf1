//! Site configuration (config.json)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Main site configuration, loaded once at startup and read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Arbitrary nested site metadata, exposed to every template.
    #[serde(default)]
    pub site_info: serde_json::Map<String, Value>,

    /// Output directory for the generated tree.
    pub output: PathBuf,
}

impl Config {
    /// Load configuration from a file. Missing or malformed
    /// configuration is fatal for the whole build.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
        let config: Config =
            serde_json::from_str(&content).with_context(|| format!("parsing config {:?}", path))?;
        Ok(config)
    }

    /// Dotted-path lookup into `site_info`, e.g. `lookup("author.name")`.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.site_info.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "site_info": { "title": "My Blog", "author": { "name": "someone" } },
            "output": "_build"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.output, PathBuf::from("_build"));
        assert_eq!(config.site_info["title"], "My Blog");
    }

    #[test]
    fn test_dotted_lookup() {
        let json = r#"{
            "site_info": { "author": { "name": "someone", "links": { "home": "x" } } },
            "output": "out"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.lookup("author.name").unwrap(), "someone");
        assert_eq!(config.lookup("author.links.home").unwrap(), "x");
        assert!(config.lookup("author.missing").is_none());
        assert!(config.lookup("nope").is_none());
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let json = r#"{ "site_info": {} }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(Config::load("/nonexistent/config.json").is_err());
    }
}
