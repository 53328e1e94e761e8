//! Initialize a portfolio project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_content::BUILTIN_CONTENT;

/// Run the init command in the current directory.
pub async fn run(yes: bool) -> Result<()> {
    init_in(Path::new("."), yes)
}

fn init_in(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let content_dir = root.join("content");

    if content_dir.exists() {
        if !yes {
            tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&content_dir).context("Failed to create content directory")?;
    }

    let config_path = root.join("folio.toml");
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write folio.toml")?;
        tracing::info!("Created folio.toml");
    }

    let content_path = content_dir.join("portfolio.yaml");
    if !content_path.exists() || yes {
        fs::write(&content_path, BUILTIN_CONTENT)
            .context("Failed to write portfolio.yaml")?;
        tracing::info!("Created content/portfolio.yaml");
    }

    let public_dir = root.join("public");
    if !public_dir.exists() {
        fs::create_dir_all(&public_dir).context("Failed to create public directory")?;
        tracing::info!("Created public/ (add your profile.jpg here)");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# folio configuration

[site]
# Portfolio content
content = "content/portfolio.yaml"

# Static files copied into the build (profile photo)
public = "public"

# Output directory for the built site
output = "dist"

# Base URL (for deployment under a sub-path)
base_url = "/"

# Absolute site origin, used in sitemap.xml
# url = "https://example.com"

# Directory with layout.html / page.html / components.html overrides
# templates = "templates"

[build]
# Minify CSS
minify = true
"#;
