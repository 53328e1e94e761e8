//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use folio_content::{load_or_builtin, ContentError, SiteContent};

use crate::assets::AssetPipeline;
use crate::page::{normalize_base_url, PageRenderer, RenderOptions};
use crate::templates::TemplateEngine;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content YAML file; the built-in content is used when it is missing
    pub content_path: PathBuf,

    /// Directory of static files copied verbatim (profile photo)
    pub public_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Directory of template overrides
    pub templates_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Absolute origin used in the sitemap, e.g. `https://example.com`
    pub site_url: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content/portfolio.yaml"),
            public_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("dist"),
            templates_dir: None,
            minify: true,
            base_url: "/".to_string(),
            site_url: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of public files copied
    pub assets: usize,

    /// Number of projects on the page
    pub projects: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read input: {0}")]
    ReadError(String),

    #[error(transparent)]
    ContentError(#[from] ContentError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: PageRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(mut config: BuildConfig) -> Self {
        config.base_url = normalize_base_url(&config.base_url);

        let templates = match &config.templates_dir {
            Some(dir) if dir.is_dir() => TemplateEngine::with_overrides(dir),
            Some(dir) => {
                tracing::warn!("Templates directory not found: {}", dir.display());
                TemplateEngine::new()
            }
            None => TemplateEngine::new(),
        };

        let renderer = PageRenderer::new(
            templates,
            RenderOptions {
                base_url: config.base_url.clone(),
                dev: false,
            },
        );

        Self { config, renderer }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let content = load_or_builtin(&self.config.content_path)?;
        self.build_content(&content).await
    }

    /// Build the static site from already-loaded content.
    pub async fn build_content(&self, content: &SiteContent) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.build_page(content)?;

        self.generate_assets()?;

        let assets = self.copy_public_files()?;
        self.check_photo(content);

        self.generate_sitemap()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: 1,
            assets,
            projects: content.projects.items.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render and write `index.html`.
    fn build_page(&self, content: &SiteContent) -> Result<(), BuildError> {
        let html = self
            .renderer
            .render_now(content)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let path = self.config.output_dir.join("index.html");
        fs::write(&path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;
        tracing::debug!("Wrote {}", path.display());

        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let js = AssetPipeline::generate_js();
        fs::write(assets_dir.join("main.js"), js)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy every file of the public directory into the output directory.
    fn copy_public_files(&self) -> Result<usize, BuildError> {
        let public_dir = &self.config.public_dir;
        if !public_dir.exists() {
            tracing::warn!("Public directory not found: {}", public_dir.display());
            return Ok(0);
        }

        let files: Vec<PathBuf> = WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();

        files
            .par_iter()
            .map(|source| self.copy_public_file(source))
            .collect::<Result<Vec<()>, BuildError>>()?;

        tracing::info!("Copied {} files from {}", files.len(), public_dir.display());

        Ok(files.len())
    }

    fn copy_public_file(&self, source: &Path) -> Result<(), BuildError> {
        let relative = source
            .strip_prefix(&self.config.public_dir)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", source.display(), e)))?;
        let target = self.config.output_dir.join(relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::copy(source, &target)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;

        Ok(())
    }

    /// The page still builds without a photo; browsers show a broken image.
    fn check_photo(&self, content: &SiteContent) {
        let photo = self
            .config
            .public_dir
            .join(content.profile.photo.trim_start_matches('/'));

        if !photo.is_file() {
            tracing::warn!("Profile photo not found: {}", photo.display());
        }
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self) -> Result<(), BuildError> {
        let origin = self
            .config
            .site_url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .unwrap_or("");
        let page_url = format!("{}{}", origin, self.config.base_url);

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}</loc>
  </url>
</urlset>"#,
            page_url
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}sitemap.xml", page_url);
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}
