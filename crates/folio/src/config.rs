//! Configuration file (folio.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_public")]
    pub public: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Absolute origin for the sitemap
    pub url: Option<String>,
    /// Template override directory
    pub templates: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            public: default_public(),
            output: default_output(),
            base_url: default_base_url(),
            url: None,
            templates: None,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_content() -> String {
    "content/portfolio.yaml".to_string()
}
fn default_public() -> String {
    "public".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    pub fn content_path(&self) -> PathBuf {
        PathBuf::from(&self.site.content)
    }

    pub fn public_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.public)
    }

    pub fn templates_dir(&self) -> Option<PathBuf> {
        self.site.templates.as_ref().map(PathBuf::from)
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("{} not found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("folio.toml")).unwrap();

        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.site.content, "content/portfolio.yaml");
        assert_eq!(config.site.output, "dist");
        assert!(config.build.minify);
        assert_eq!(config.templates_dir(), None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(
            &path,
            "[site]\nurl = \"https://luca.dev\"\ntemplates = \"theme\"\n\n[build]\nminify = false\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://luca.dev"));
        assert_eq!(config.templates_dir(), Some(PathBuf::from("theme")));
        assert_eq!(config.site.public, "public");
        assert!(!config.build.minify);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, "[site\ncontent = 1").unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }
}
