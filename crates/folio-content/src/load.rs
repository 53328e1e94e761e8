//! Content file loading.

use std::fs;
use std::path::Path;

use crate::model::SiteContent;
use crate::validate::{validate, ValidationIssue};

/// The content shipped with folio, written out by `folio init`.
pub const BUILTIN_CONTENT: &str = include_str!("../content/portfolio.yaml");

/// Errors that can occur when loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid content YAML: {0}")]
    Parse(String),

    #[error("Content has {} problem(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse and validate content from YAML source.
pub fn parse_content(source: &str) -> Result<SiteContent, ContentError> {
    let content: SiteContent =
        serde_yaml::from_str(source).map_err(|e| ContentError::Parse(e.to_string()))?;

    let issues = validate(&content);
    if !issues.is_empty() {
        return Err(ContentError::Invalid(issues));
    }

    Ok(content)
}

/// Load content from a YAML file.
pub fn load_content(path: &Path) -> Result<SiteContent, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let content = parse_content(&source)?;
    tracing::debug!(
        "Loaded {} projects from {}",
        content.projects.items.len(),
        path.display()
    );

    Ok(content)
}

/// Load content from `path` when it exists, otherwise the built-in content.
pub fn load_or_builtin(path: &Path) -> Result<SiteContent, ContentError> {
    if path.exists() {
        load_content(path)
    } else {
        tracing::info!(
            "{} not found, using built-in content",
            path.display()
        );
        Ok(builtin_content())
    }
}

/// The built-in content.
pub fn builtin_content() -> SiteContent {
    parse_content(BUILTIN_CONTENT).expect("Built-in content must be valid")
}
