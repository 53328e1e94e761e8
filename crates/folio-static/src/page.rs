//! Page composition: content records to the template context.

use chrono::Datelike;
use serde::Serialize;

use folio_content::{Hero, LinkSet, NavSection, Project, ProseSection, SiteContent, Skill};

use crate::templates::TemplateEngine;

/// Errors that can occur while rendering the page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),
}

/// Options that vary between the built site and the dev server.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Base URL prefixed to assets
    pub base_url: String,

    /// Include the live reload client
    pub dev: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            dev: false,
        }
    }
}

/// Context for rendering `page.html`.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub lang: String,
    pub title: String,
    pub description: String,
    pub base_url: String,
    pub dev: bool,
    pub profile: ProfileView,
    pub nav: Vec<NavSection>,
    pub hero: Hero,
    pub background: ProseView,
    pub philosophy: ProseView,
    pub skills: SkillsView,
    pub experience: ProseView,
    pub projects: ProjectsView,
    pub contact: ProseView,
    pub links: LinkSet,
    /// Footer year
    pub year: i32,
    pub footer_owner: String,
}

/// Sidebar profile with resolved photo URL.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub role: String,
    pub photo_url: String,
    pub photo_alt: String,
    pub cta_label: String,
    pub cta_href: String,
}

/// A prose section with its markdown rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ProseView {
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillsView {
    pub title: String,
    pub entries: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsView {
    pub title: String,
    pub intro: String,
    pub cards: Vec<ProjectCardView>,
}

/// Everything a project card displays, already joined into display text.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCardView {
    pub title: String,
    pub subtitle: String,
    pub context: String,
    pub status: String,
    pub demo: Option<String>,
    pub github: Option<String>,
    pub featured: bool,
    pub input: String,
    pub transformation: String,
    pub output: String,
    pub technical_choice: String,
    pub deliberate_non_choice: String,
    pub snapshot: folio_content::Snapshot,
}

impl From<&Project> for ProjectCardView {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            subtitle: project.subtitle.clone(),
            context: project.context.clone(),
            status: project.status.clone(),
            demo: project.demo_url().map(str::to_string),
            github: project.github_url().map(str::to_string),
            featured: project.is_featured(),
            input: project.mental_model.input_text(),
            transformation: project.mental_model.transformation_text(),
            output: project.mental_model.output_text(),
            technical_choice: project.technical_choice.display_text(),
            deliberate_non_choice: project.deliberate_non_choice.clone(),
            snapshot: project.snapshot.clone(),
        }
    }
}

impl ProseView {
    fn from_section(section: &ProseSection) -> Self {
        Self {
            title: section.title.clone(),
            html: render_markdown(&section.body),
        }
    }
}

impl PageContext {
    /// Build the template context for `content` with a fixed footer year.
    pub fn new(content: &SiteContent, options: &RenderOptions, year: i32) -> Self {
        let base_url = normalize_base_url(&options.base_url);
        let photo_url = format!(
            "{}{}",
            base_url,
            content.profile.photo.trim_start_matches('/')
        );

        Self {
            lang: content.site.lang.clone(),
            title: content.site.title.clone(),
            description: content.site.description.clone(),
            dev: options.dev,
            profile: ProfileView {
                name: content.profile.name.clone(),
                role: content.profile.role.clone(),
                photo_url,
                photo_alt: content.profile.photo_alt.clone(),
                cta_label: content.profile.cta.label.clone(),
                cta_href: content.profile.cta.href.clone(),
            },
            nav: content.nav.clone(),
            hero: content.hero.clone(),
            background: ProseView::from_section(&content.background),
            philosophy: ProseView::from_section(&content.philosophy),
            skills: SkillsView {
                title: content.skills.title.clone(),
                entries: content.skills.items.clone(),
            },
            experience: ProseView::from_section(&content.experience),
            projects: ProjectsView {
                title: content.projects.title.clone(),
                intro: content.projects.intro.clone(),
                cards: content
                    .projects
                    .items
                    .iter()
                    .map(ProjectCardView::from)
                    .collect(),
            },
            contact: ProseView::from_section(&content.contact),
            links: content.links.clone(),
            year,
            footer_owner: content.footer.owner.clone(),
            base_url,
        }
    }
}

/// Renders the portfolio page.
pub struct PageRenderer {
    templates: TemplateEngine,
    options: RenderOptions,
}

impl PageRenderer {
    pub fn new(templates: TemplateEngine, mut options: RenderOptions) -> Self {
        options.base_url = normalize_base_url(&options.base_url);
        Self { templates, options }
    }

    /// Render the page with the given footer year.
    pub fn render(&self, content: &SiteContent, year: i32) -> Result<String, RenderError> {
        let context = PageContext::new(content, &self.options, year);
        Ok(self.templates.render("page.html", &context)?)
    }

    /// Render the page with the current calendar year.
    pub fn render_now(&self, content: &SiteContent) -> Result<String, RenderError> {
        self.render(content, current_year())
    }

    /// Render a single project card.
    pub fn render_project(&self, project: &Project) -> Result<String, RenderError> {
        Ok(self.templates.project_card(&ProjectCardView::from(project))?)
    }
}

/// Ensure a base URL starts and ends with `/` so paths can be appended.
///
/// Absolute URLs (`https://...`) only get the trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.contains("://") || trimmed.starts_with('/') {
        format!("{}/", trimmed)
    } else if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// The current calendar year in local time.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Render markdown prose to HTML.
pub fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
