//! Content records for a single portfolio page.

use serde::{Deserialize, Serialize};

/// Separator used when a mental-model sequence is shown as one line.
pub const POINT_SEPARATOR: &str = " • ";

/// Anchor ids the page composer emits, in page order.
pub const PAGE_ANCHORS: [&str; 7] = [
    "intro",
    "background",
    "philosophy",
    "skills",
    "experience",
    "projects",
    "contact",
];

/// Root of a portfolio content file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteContent {
    /// Document metadata
    pub site: SiteMeta,

    /// Sidebar profile blurb
    pub profile: Profile,

    /// Contact channels
    pub links: LinkSet,

    /// Sidebar navigation entries
    pub nav: Vec<NavSection>,

    pub hero: Hero,
    pub background: ProseSection,
    pub philosophy: ProseSection,
    pub skills: SkillsSection,
    pub experience: ProseSection,
    pub projects: ProjectsSection,
    pub contact: ProseSection,
    pub footer: Footer,
}

/// Document metadata used by the layout shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteMeta {
    /// Browser title
    pub title: String,

    /// Meta description for search engines
    pub description: String,

    /// Document language
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

/// Profile shown at the top of the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub role: String,

    /// Photo path relative to the public directory
    #[serde(default = "default_photo")]
    pub photo: String,

    #[serde(default = "default_photo_alt")]
    pub photo_alt: String,

    /// Call-to-action link under the navigation
    #[serde(default)]
    pub cta: CallToAction,
}

fn default_photo() -> String {
    "profile.jpg".to_string()
}

fn default_photo_alt() -> String {
    "Profile photo".to_string()
}

/// Sidebar call-to-action anchor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

impl Default for CallToAction {
    fn default() -> Self {
        Self {
            label: "Get in touch".to_string(),
            href: "#contact".to_string(),
        }
    }
}

/// Contact channel URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkSet {
    /// `mailto:` link
    pub email: String,
    pub linkedin: String,
    pub github: String,

    /// Scheduling link
    pub calendly: String,
}

/// A sidebar menu entry pointing at an in-page anchor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavSection {
    /// Anchor id without the leading `#`
    pub id: String,

    /// Menu label
    pub title: String,
}

/// Hero block at the top of the main column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hero {
    pub headline: String,
    pub tagline: String,

    #[serde(default)]
    pub paragraphs: Vec<String>,

    /// Rendered as pills
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A titled section whose body is markdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProseSection {
    pub title: String,
    pub body: String,
}

/// Skills grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillsSection {
    pub title: String,
    pub items: Vec<Skill>,
}

/// One label/value entry in the skills grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub label: String,
    pub value: String,
}

/// Project list with its introduction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectsSection {
    pub title: String,

    #[serde(default)]
    pub intro: String,

    pub items: Vec<Project>,
}

/// Page footer; the year is prepended at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Footer {
    pub owner: String,
}

/// A portfolio case study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    /// Unique within one project list
    pub title: String,
    pub subtitle: String,
    pub context: String,

    /// Kept with the record, never displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livenote: Option<String>,

    pub mental_model: MentalModel,
    pub technical_choice: TechnicalChoice,
    pub deliberate_non_choice: String,
    pub snapshot: Snapshot,

    /// Free-text label such as "Live" or "Coming soon"
    pub status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ProjectLinks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Project {
    /// Whether the card carries a "Featured" badge.
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// Demo URL, if any.
    pub fn demo_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.demo.as_deref())
    }

    /// GitHub URL, if any.
    pub fn github_url(&self) -> Option<&str> {
        self.links.as_ref().and_then(|l| l.github.as_deref())
    }
}

/// Input / transformation / output framing of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MentalModel {
    #[serde(default)]
    pub input: Vec<String>,

    #[serde(default)]
    pub transformation: Vec<String>,

    #[serde(default)]
    pub output: Vec<String>,
}

impl MentalModel {
    pub fn input_text(&self) -> String {
        join_points(&self.input)
    }

    pub fn transformation_text(&self) -> String {
        join_points(&self.transformation)
    }

    pub fn output_text(&self) -> String {
        join_points(&self.output)
    }
}

/// Join a sequence of points with [`POINT_SEPARATOR`].
///
/// An empty sequence yields an empty string.
pub fn join_points(points: &[String]) -> String {
    points.join(POINT_SEPARATOR)
}

/// The main technical decision and its rationale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicalChoice {
    pub choice: String,
    pub why: String,
}

impl TechnicalChoice {
    /// Choice and rationale as displayed on the card.
    pub fn display_text(&self) -> String {
        format!("{} {}", self.choice, self.why)
    }
}

/// Quick-scan summary panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub hook: String,
    pub problem: String,
    pub approach: String,
    pub tech_stack: String,
    pub impact: String,
}

/// Outbound project links.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,

    /// Kept with the record, never displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn joins_points_with_bullet() {
        let points = vec!["A".to_string(), "B".to_string()];
        assert_eq!(join_points(&points), "A • B");
    }

    #[test]
    fn empty_points_join_to_empty_text() {
        let model = MentalModel::default();

        assert_eq!(model.input_text(), "");
        assert_eq!(model.transformation_text(), "");
        assert_eq!(model.output_text(), "");
    }

    #[test]
    fn featured_defaults_to_false() {
        let yaml = r#"
title: Triage
subtitle: Sorting
context: Inbox
mental_model: {}
technical_choice: { choice: Rules, why: Clarity }
deliberate_non_choice: No chatbot
snapshot: { hook: h, problem: p, approach: a, tech_stack: t, impact: i }
status: Coming soon
"#;

        let project: Project = serde_yaml::from_str(yaml).unwrap();

        assert!(!project.is_featured());
        assert_eq!(project.links, None);
        assert_eq!(project.demo_url(), None);
        assert_eq!(project.github_url(), None);
    }

    #[test]
    fn technical_choice_text_joins_choice_and_why() {
        let choice = TechnicalChoice {
            choice: "Hard rules.".to_string(),
            why: "Trust first.".to_string(),
        };

        assert_eq!(choice.display_text(), "Hard rules. Trust first.");
    }
}
