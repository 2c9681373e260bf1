//! sitegen: a minimal batch static site generator
//!
//! Reads pages from `_pages/` and dated posts from `_posts/`, converts
//! their markup bodies to HTML, renders them through Tera templates from
//! `_templates/`, and writes a static tree plus a copy of `_static/`.
//! The build is a single-pass, single-threaded batch job.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod site;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The site application: configuration plus derived directories.
pub struct Site {
    /// Site configuration from `config.json`.
    pub config: config::Config,
    /// Base directory holding the content directories.
    pub base_dir: PathBuf,
    /// Pages source directory.
    pub pages_dir: PathBuf,
    /// Posts source directory.
    pub posts_dir: PathBuf,
    /// Static assets directory, copied verbatim to the output root.
    pub static_dir: PathBuf,
    /// Template source directory.
    pub templates_dir: PathBuf,
    /// Output directory from the configuration.
    pub output_dir: PathBuf,
}

impl Site {
    /// Create a site rooted at `base_dir`, reading `config.json` there.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::Config::load(base_dir.join("config.json"))?;

        let output_dir = base_dir.join(&config.output);

        Ok(Self {
            pages_dir: base_dir.join("_pages"),
            posts_dir: base_dir.join("_posts"),
            static_dir: base_dir.join("_static"),
            templates_dir: base_dir.join("_templates"),
            output_dir,
            config,
            base_dir,
        })
    }

    /// Build the site into the output directory.
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the output directory.
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
