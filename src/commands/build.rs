//! Build the static site

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::site::SiteModel;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Run one full build: load content, construct the renderer, write the
/// output tree.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new();
    let model = SiteModel::load(
        &loader,
        site.config.site_info.clone(),
        &site.pages_dir,
        &site.posts_dir,
    )?;
    tracing::info!(
        "Loaded {} pages and {} posts",
        model.pages.len(),
        model.posts.len()
    );

    let renderer = TemplateRenderer::new(&site.templates_dir)?;

    let generator = Generator::new(&model, &renderer, &site.output_dir, &site.static_dir);
    generator.generate()?;

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}
