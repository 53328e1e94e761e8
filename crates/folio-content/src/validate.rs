//! Content integrity checks.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{SiteContent, PAGE_ANCHORS};

/// A single integrity problem found in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    /// Two projects share a title
    #[error("project title '{0}' is used more than once")]
    DuplicateProjectTitle(String),

    /// A link fragment has no matching section on the page
    #[error("'#{0}' does not match any section (expected one of: {anchors})", anchors = PAGE_ANCHORS.join(", "))]
    UnknownNavTarget(String),

    /// The same anchor appears twice in the menu
    #[error("menu entry '#{0}' is listed twice")]
    DuplicateNavId(String),
}

/// Check content for problems the templates cannot catch.
///
/// Returns every issue found, in content order.
pub fn validate(content: &SiteContent) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut titles = HashSet::new();
    for project in &content.projects.items {
        if !titles.insert(project.title.as_str()) {
            issues.push(ValidationIssue::DuplicateProjectTitle(
                project.title.clone(),
            ));
        }
    }

    let mut ids = HashSet::new();
    for entry in &content.nav {
        if !PAGE_ANCHORS.contains(&entry.id.as_str()) {
            issues.push(ValidationIssue::UnknownNavTarget(entry.id.clone()));
        } else if !ids.insert(entry.id.as_str()) {
            issues.push(ValidationIssue::DuplicateNavId(entry.id.clone()));
        }
    }

    // External CTA targets are opaque; only in-page fragments are checked.
    if let Some(fragment) = content.profile.cta.href.strip_prefix('#') {
        if !PAGE_ANCHORS.contains(&fragment) {
            issues.push(ValidationIssue::UnknownNavTarget(fragment.to_string()));
        }
    }

    issues
}
