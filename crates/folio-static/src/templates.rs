//! Template engine for rendering the portfolio page.

use std::path::Path;

use minijinja::value::Value;
use minijinja::{
    context, escape_formatter, path_loader, AutoEscape, Environment, Error, ErrorKind, Output,
    State,
};

/// Name given to one-off component renders; the `.html` suffix keeps
/// auto-escaping on.
const FRAGMENT_NAME: &str = "fragment.html";

/// Built-in templates, by name.
const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("layout.html", LAYOUT_TEMPLATE),
    ("page.html", PAGE_TEMPLATE),
    ("components.html", COMPONENTS_TEMPLATE),
];

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = base_environment();

        for (name, source) in BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .expect("Built-in template must parse");
        }

        Self { env }
    }

    /// Create a template engine where files in `dir` replace built-in
    /// templates of the same name.
    ///
    /// Any other file in `dir` can be included or imported from templates.
    pub fn with_overrides(dir: &Path) -> Self {
        let mut env = base_environment();
        env.set_loader(path_loader(dir));

        for (name, source) in BUILTIN_TEMPLATES {
            if dir.join(name).is_file() {
                tracing::info!("Using {} from {}", name, dir.display());
                continue;
            }
            env.add_template(name, source)
                .expect("Built-in template must parse");
        }

        Self { env }
    }

    /// Render a named template with a serializable context.
    pub fn render<S: serde::Serialize>(
        &self,
        template: &str,
        ctx: S,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(ctx)
    }

    /// Render a pill.
    pub fn pill(&self, label: &str) -> Result<String, minijinja::Error> {
        self.env.render_named_str(
            FRAGMENT_NAME,
            r#"{% from "components.html" import pill %}{{ pill(label) }}"#,
            context! { label => label },
        )
    }

    /// Render a label/value box.
    pub fn info_box(&self, label: &str, value: &str) -> Result<String, minijinja::Error> {
        self.env.render_named_str(
            FRAGMENT_NAME,
            r#"{% from "components.html" import info_box %}{{ info_box(label, value) }}"#,
            context! { label => label, value => value },
        )
    }

    /// Render a section card around already-rendered `body_html`.
    pub fn section_card(
        &self,
        id: &str,
        title: &str,
        body_html: &str,
    ) -> Result<String, minijinja::Error> {
        self.env.render_named_str(
            FRAGMENT_NAME,
            r#"{% from "components.html" import section_card %}{% call section_card(id, title) %}{{ body | safe }}{% endcall %}"#,
            context! { id => id, title => title, body => body_html },
        )
    }

    /// Render one project card.
    pub fn project_card<S: serde::Serialize>(
        &self,
        project: &S,
    ) -> Result<String, minijinja::Error> {
        self.env.render_named_str(
            FRAGMENT_NAME,
            r#"{% from "components.html" import project_card %}{{ project_card(project) }}"#,
            context! { project => Value::from_serialize(project) },
        )
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_formatter(html_formatter);
    env
}

/// Escape text for HTML element content and quoted attribute values.
///
/// Unlike minijinja's default escaping, `/` is left alone so URLs stay
/// readable in the generated markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_formatter(out: &mut Output, state: &State, value: &Value) -> Result<(), Error> {
    if let (AutoEscape::Html, Some(text)) = (state.auto_escape(), value.as_str()) {
        if !value.is_safe() {
            return out
                .write_str(&escape_html(text))
                .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write output"));
        }
    }
    escape_formatter(out, state, value)
}

const LAYOUT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ description }}">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body class="site">
  {% block content %}{% endblock %}
  <script src="{{ base_url }}assets/main.js"></script>
  {% if dev %}<script src="{{ base_url }}__hmr.js"></script>{% endif %}
</body>
</html>"##;

const PAGE_TEMPLATE: &str = r##"{% extends "layout.html" %}

{% block content %}
{% from "components.html" import pill, info_box, section_card, project_card %}
<main class="page">
  <div class="page-grid">
    <aside class="sidebar">
      <div class="sidebar-card">
        <div class="profile">
          <div>
            <p class="profile-name">{{ profile.name }}</p>
            <p class="profile-role">{{ profile.role }}</p>
          </div>
          <img class="avatar" src="{{ profile.photo_url }}" alt="{{ profile.photo_alt }}">
        </div>

        <nav class="menu">
          <p class="eyebrow">Menu</p>
          <ul>
          {% for section in nav %}
            <li><a href="#{{ section.id }}">{{ section.title }}</a></li>
          {% endfor %}
          </ul>
        </nav>

        <div class="sidebar-cta">
          <a class="button button-primary button-block" href="{{ profile.cta_href }}">{{ profile.cta_label }}</a>
        </div>
      </div>
    </aside>

    <div class="content">
      <section id="intro" class="hero">
        <div class="hero-head">
          <div class="hero-text">
            <h1>{{ hero.headline }}</h1>
            <p class="tagline">{{ hero.tagline }}</p>
            {% for paragraph in hero.paragraphs %}
            <p class="lead">{{ paragraph }}</p>
            {% endfor %}
          </div>
          <img class="hero-photo" src="{{ profile.photo_url }}" alt="{{ profile.photo_alt }}">
        </div>
        <div class="pills">
          {% for tag in hero.tags %}{{ pill(tag) }}{% endfor %}
        </div>
      </section>

      {% call section_card("background", background.title) %}{{ background.html | safe }}{% endcall %}

      {% call section_card("philosophy", philosophy.title) %}{{ philosophy.html | safe }}{% endcall %}

      {% call section_card("skills", skills.title) %}
        <div class="grid grid-2">
          {% for skill in skills.entries %}{{ info_box(skill.label, skill.value) }}{% endfor %}
        </div>
      {% endcall %}

      {% call section_card("experience", experience.title) %}{{ experience.html | safe }}{% endcall %}

      {% call section_card("projects", projects.title) %}
        {% if projects.intro %}<p class="muted">{{ projects.intro }}</p>{% endif %}
        <div class="project-list">
          {% for project in projects.cards %}{{ project_card(project) }}{% endfor %}
        </div>
      {% endcall %}

      {% call section_card("contact", contact.title) %}
        {{ contact.html | safe }}
        <div class="contact-links">
          <a class="button button-primary" href="{{ links.email }}">Email</a>
          <a class="button" href="{{ links.linkedin }}" target="_blank" rel="noreferrer">LinkedIn</a>
          <a class="button" href="{{ links.github }}" target="_blank" rel="noreferrer">GitHub</a>
          <a class="button" href="{{ links.calendly }}" target="_blank" rel="noreferrer">Calendly</a>
        </div>
      {% endcall %}

      <footer class="footer">© {{ year }} {{ footer_owner }}</footer>
    </div>
  </div>
</main>
{% endblock %}"##;

const COMPONENTS_TEMPLATE: &str = r##"{% macro pill(label) -%}
<span class="pill">{{ label }}</span>
{%- endmacro %}

{% macro info_box(label, value) -%}
<div class="info-box">
  <p class="info-label">{{ label }}</p>
  <p class="info-value">{{ value }}</p>
</div>
{%- endmacro %}

{% macro section_card(id, title) -%}
<section id="{{ id }}" class="section-card">
  <div class="card-head">
    <h2>{{ title }}</h2>
    <span class="badge">Section</span>
  </div>
  <div class="section-body">
    {{ caller() }}
  </div>
</section>
{%- endmacro %}

{% macro project_card(project) -%}
<article class="project-card">
  <div class="card-head">
    <div>
      <p class="project-title">{{ project.title }}</p>
      <p class="project-subtitle">{{ project.subtitle }}</p>
    </div>
    <span class="badge">{{ project.status }}</span>
  </div>

  <div class="project-body">
    <p class="project-context">{{ project.context }}</p>

    {% if project.demo or project.github or project.featured %}
    <div class="project-links">
      {% if project.demo %}<a class="button button-primary" href="{{ project.demo }}" target="_blank" rel="noreferrer">Live Demo</a>{% endif %}
      {% if project.github %}<a class="button" href="{{ project.github }}" target="_blank" rel="noreferrer">GitHub</a>{% endif %}
      {% if project.featured %}<span class="badge badge-featured">Featured</span>{% endif %}
    </div>
    {% endif %}

    <div class="grid grid-3">
      {{ info_box("Input", project.input) }}
      {{ info_box("Transformation", project.transformation) }}
      {{ info_box("Output", project.output) }}
    </div>

    <div class="grid grid-2">
      {{ info_box("Technical choice", project.technical_choice) }}
      {{ info_box("What I deliberately didn’t do", project.deliberate_non_choice) }}
    </div>

    <div class="snapshot">
      <p class="eyebrow">Snapshot</p>
      <div class="grid grid-2">
        {{ info_box("Hook", project.snapshot.hook) }}
        {{ info_box("Problem", project.snapshot.problem) }}
        {{ info_box("Approach", project.snapshot.approach) }}
        {{ info_box("Tech Stack", project.snapshot.tech_stack) }}
      </div>
      <div class="snapshot-impact">
        {{ info_box("Impact", project.snapshot.impact) }}
      </div>
    </div>
  </div>
</article>
{%- endmacro %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn escapes_markup_but_not_slashes() {
        assert_eq!(
            escape_html(r#"<a href="https://x.io/a?b=1&c='2'">"#),
            "&lt;a href=&quot;https://x.io/a?b=1&amp;c=&#39;2&#39;&quot;&gt;"
        );
    }

    #[test]
    fn renders_pill() {
        let engine = TemplateEngine::new();
        let html = engine.pill("Data Quality & Validation").unwrap();

        assert_eq!(
            html,
            r#"<span class="pill">Data Quality &amp; Validation</span>"#
        );
    }

    #[test]
    fn renders_info_box() {
        let engine = TemplateEngine::new();
        let html = engine.info_box("Languages", "Python, SQL").unwrap();

        assert!(html.contains(r#"<p class="info-label">Languages</p>"#));
        assert!(html.contains(r#"<p class="info-value">Python, SQL</p>"#));
    }

    #[test]
    fn info_box_escapes_values() {
        let engine = TemplateEngine::new();
        let html = engine.info_box("Label", "<script>alert(1)</script>").unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn renders_section_card() {
        let engine = TemplateEngine::new();
        let html = engine
            .section_card("background", "Background", "<p>Hello</p>")
            .unwrap();

        assert!(html.contains(r#"<section id="background" class="section-card">"#));
        assert!(html.contains("<h2>Background</h2>"));
        assert!(html.contains(r#"<span class="badge">Section</span>"#));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn overrides_replace_builtin_templates() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("components.html"),
            r#"{% macro pill(label) %}<b>{{ label }}</b>{% endmacro %}"#,
        )
        .unwrap();

        let engine = TemplateEngine::with_overrides(temp.path());

        assert_eq!(engine.pill("Rust").unwrap(), "<b>Rust</b>");
        // Templates without an override still come from the built-ins.
        assert!(engine.env.get_template("layout.html").is_ok());
    }

    #[test]
    fn overrides_can_include_extra_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("banner.html"), "<div>banner</div>").unwrap();
        fs::write(
            temp.path().join("components.html"),
            r#"{% macro pill(label) %}{% include "banner.html" %}{{ label }}{% endmacro %}"#,
        )
        .unwrap();

        let engine = TemplateEngine::with_overrides(temp.path());

        assert_eq!(engine.pill("Hi").unwrap(), "<div>banner</div>Hi");
    }
}
