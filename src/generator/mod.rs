//! Generator module - writes the rendered site to the output tree

use anyhow::{anyhow, Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::helpers::url2path;
use crate::site::SiteModel;
use crate::templates::TemplateRenderer;

/// Writes one rendered file per page and post, the home page, and a
/// copy of the static assets.
pub struct Generator<'a> {
    site: &'a SiteModel,
    renderer: &'a TemplateRenderer,
    output_dir: PathBuf,
    static_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a generator for one build.
    pub fn new(
        site: &'a SiteModel,
        renderer: &'a TemplateRenderer,
        output_dir: &Path,
        static_dir: &Path,
    ) -> Self {
        Self {
            site,
            renderer,
            output_dir: output_dir.to_path_buf(),
            static_dir: static_dir.to_path_buf(),
        }
    }

    /// Generate the entire output tree.
    ///
    /// Pre-existing directories are tolerated everywhere; any other I/O
    /// or template failure aborts the build.
    pub fn generate(&self) -> Result<()> {
        self.copy_static()?;
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating output directory {:?}", self.output_dir))?;

        self.generate_pages()?;
        self.generate_posts()?;
        self.generate_home()?;

        Ok(())
    }

    /// Copy the static assets tree verbatim into the output root.
    ///
    /// Skipped silently when the destination already exists; a previous
    /// build's copy is never overwritten.
    fn copy_static(&self) -> Result<()> {
        if self.output_dir.exists() {
            tracing::debug!(
                "Output {:?} already exists, skipping static copy",
                self.output_dir
            );
            return Ok(());
        }
        if !self.static_dir.exists() {
            tracing::debug!("No static directory at {:?}", self.static_dir);
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(&self.static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(&self.static_dir).unwrap_or(path);
            let dest = self.output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("copying static asset to {:?}", dest))?;
            copied += 1;
        }
        tracing::info!("Copied {} static assets", copied);

        Ok(())
    }

    /// Write one `page.html`-rendered file per page under `pages/`.
    fn generate_pages(&self) -> Result<()> {
        if self.site.pages.is_empty() {
            return Ok(());
        }
        let pages_root = self.output_dir.join("pages");

        for (i, page) in self.site.pages.iter().enumerate() {
            let url = page
                .url
                .as_deref()
                .ok_or_else(|| anyhow!("page without a URL"))?;
            let context = self.site.page_context(i)?;
            let html = self.renderer.render("page.html", &context)?;
            self.write_output(&pages_root.join(url2path(url)), &html)?;
        }
        tracing::info!("Generated {} pages", self.site.pages.len());

        Ok(())
    }

    /// Write one `post.html`-rendered file per post under `posts/`.
    fn generate_posts(&self) -> Result<()> {
        if self.site.posts.is_empty() {
            return Ok(());
        }
        let posts_root = self.output_dir.join("posts");

        for (i, post) in self.site.posts.iter().enumerate() {
            let permalink = post
                .permalink
                .as_deref()
                .ok_or_else(|| anyhow!("post without a permalink"))?;
            let context = self.site.post_context(i)?;
            let html = self.renderer.render("post.html", &context)?;
            self.write_output(&posts_root.join(url2path(permalink)), &html)?;
        }
        tracing::info!("Generated {} posts", self.site.posts.len());

        Ok(())
    }

    /// Render the home page at the output root.
    fn generate_home(&self) -> Result<()> {
        let context = self.site.base_context()?;
        let html = self.renderer.render("index.html", &context)?;
        self.write_output(&self.output_dir.join("index.html"), &html)
    }

    /// Create parent directories as needed and (over)write one file.
    fn write_output(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {:?}", parent))?;
        }
        fs::write(path, html).with_context(|| format!("writing {:?}", path))?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }
}
