//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_static::{BuildConfig, StaticBuilder};

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;

    let config = BuildConfig {
        content_path: file_config.content_path(),
        public_dir: file_config.public_dir(),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.site.output)),
        templates_dir: file_config.templates_dir(),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.site.base_url,
        site_url: file_config.site.url,
    };

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} page with {} projects and {} public files in {}ms",
        result.pages,
        result.projects,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
