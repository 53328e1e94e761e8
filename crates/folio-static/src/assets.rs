//! Asset pipeline for CSS and JavaScript processing.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

// Dark theme: translucent white borders and panels over a black page.
const DEFAULT_CSS: &str = r#"/* folio theme */

:root {
  --background: #000;
  --foreground: #fff;
  --text: rgba(255, 255, 255, 0.8);
  --text-muted: rgba(255, 255, 255, 0.6);
  --text-faint: rgba(255, 255, 255, 0.4);
  --panel: rgba(255, 255, 255, 0.05);
  --panel-hover: rgba(255, 255, 255, 0.1);
  --panel-dark: rgba(0, 0, 0, 0.3);
  --border: rgba(255, 255, 255, 0.1);
  --border-strong: rgba(255, 255, 255, 0.2);
  --radius: 1rem;
  --radius-sm: 0.75rem;
  --sidebar-width: 240px;
  --content-max-width: 72rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body.site {
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
  -webkit-font-smoothing: antialiased;
}

a {
  color: inherit;
}

.page {
  max-width: var(--content-max-width);
  margin: 0 auto;
  padding: 4rem 1.5rem;
}

.page-grid {
  display: grid;
  grid-template-columns: 1fr;
  gap: 2.5rem;
}

.content {
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

/* Sidebar */
.sidebar-card {
  border: 1px solid var(--border);
  background: var(--panel);
  border-radius: var(--radius);
  padding: 1.25rem;
}

.profile {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
}

.profile-name {
  font-size: 0.875rem;
  color: var(--text-muted);
}

.profile-role {
  font-size: 1.125rem;
  font-weight: 600;
}

.avatar {
  width: 3rem;
  height: 3rem;
  border-radius: 9999px;
  border: 1px solid var(--border-strong);
  object-fit: cover;
}

.eyebrow {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--text-faint);
  margin-bottom: 0.75rem;
}

.menu {
  margin-top: 1.5rem;
}

.menu ul {
  list-style: none;
}

.menu a {
  display: block;
  padding: 0.5rem 0.75rem;
  border-radius: var(--radius-sm);
  color: rgba(255, 255, 255, 0.7);
  text-decoration: none;
  transition: background 0.15s, color 0.15s;
}

.menu a:hover,
.menu a.active {
  background: var(--panel-hover);
  color: var(--foreground);
}

.sidebar-cta {
  margin-top: 1.5rem;
  padding-top: 1.5rem;
  border-top: 1px solid var(--border);
}

/* Buttons and badges */
.button {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  padding: 0.5rem 1rem;
  font-size: 0.875rem;
  border-radius: var(--radius-sm);
  border: 1px solid rgba(255, 255, 255, 0.15);
  background: var(--panel);
  text-decoration: none;
  transition: background 0.15s;
}

.button:hover {
  background: var(--panel-hover);
}

.button-primary {
  background: var(--foreground);
  color: var(--background);
  border-color: var(--foreground);
  font-weight: 500;
}

.button-primary:hover {
  background: rgba(255, 255, 255, 0.9);
}

.button-block {
  width: 100%;
}

.badge {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: rgba(255, 255, 255, 0.5);
  border: 1px solid var(--border);
  border-radius: 9999px;
  padding: 0.25rem 0.75rem;
  white-space: nowrap;
}

.badge-featured {
  background: var(--panel);
  color: var(--text-muted);
}

.pills {
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.pill {
  border: 1px solid var(--border);
  background: var(--panel);
  border-radius: 9999px;
  padding: 0.25rem 0.75rem;
  font-size: 0.875rem;
  color: rgba(255, 255, 255, 0.7);
}

/* Hero */
.hero {
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

.hero-head {
  display: flex;
  align-items: flex-start;
  justify-content: space-between;
  gap: 2rem;
}

.hero-text {
  display: flex;
  flex-direction: column;
  gap: 1rem;
}

.hero h1 {
  font-size: 2.25rem;
  font-weight: 700;
  letter-spacing: -0.025em;
  line-height: 1.15;
}

.tagline {
  font-size: 1.125rem;
  font-style: italic;
  color: rgba(255, 255, 255, 0.7);
}

.lead {
  font-size: 1.125rem;
  color: var(--text-muted);
  max-width: 42rem;
}

.hero-photo {
  display: none;
  width: 7rem;
  height: 7rem;
  border-radius: var(--radius);
  border: 1px solid var(--border-strong);
  object-fit: cover;
}

/* Section cards */
.section-card {
  border: 1px solid var(--border);
  background: var(--panel);
  border-radius: var(--radius);
  padding: 1.5rem;
  transition: transform 0.2s, background 0.2s, border-color 0.2s;
}

.section-card:hover {
  transform: translateY(-0.25rem);
  background: var(--panel-hover);
  border-color: var(--border-strong);
}

.section-card:hover .badge {
  color: rgba(255, 255, 255, 0.7);
  border-color: var(--border-strong);
}

.card-head {
  display: flex;
  align-items: flex-start;
  justify-content: space-between;
  gap: 1.5rem;
}

.card-head h2 {
  font-size: 1.25rem;
  font-weight: 600;
  letter-spacing: -0.025em;
}

.section-body {
  margin-top: 1rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
  color: var(--text);
}

.section-body ul {
  padding-left: 1.5rem;
}

.section-body li + li {
  margin-top: 0.5rem;
}

.muted {
  color: rgba(255, 255, 255, 0.7);
}

/* Grids and info boxes */
.grid {
  display: grid;
  grid-template-columns: 1fr;
  gap: 1rem;
}

.info-box {
  border: 1px solid var(--border);
  background: var(--panel-dark);
  border-radius: var(--radius);
  padding: 1rem;
}

.info-label {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--text-faint);
}

.info-value {
  margin-top: 0.5rem;
  font-size: 0.875rem;
  color: var(--text);
  line-height: 1.6;
}

/* Project cards */
.project-list {
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
  margin-top: 1.25rem;
}

.project-card {
  border: 1px solid var(--border);
  background: rgba(0, 0, 0, 0.2);
  border-radius: var(--radius);
  padding: 1.5rem;
  transition: background 0.15s, border-color 0.15s;
}

.project-card:hover {
  background: var(--panel);
  border-color: var(--border-strong);
}

.project-title {
  font-size: 1.125rem;
  font-weight: 600;
}

.project-subtitle {
  margin-top: 0.25rem;
  font-size: 0.875rem;
  color: var(--text-muted);
}

.project-body {
  margin-top: 1.25rem;
  display: flex;
  flex-direction: column;
  gap: 1.25rem;
}

.project-context {
  color: rgba(255, 255, 255, 0.75);
}

.project-links,
.contact-links {
  display: flex;
  flex-wrap: wrap;
  gap: 0.75rem;
}

.snapshot {
  border: 1px solid var(--border);
  background: rgba(0, 0, 0, 0.4);
  border-radius: var(--radius);
  padding: 1.25rem;
}

.snapshot-impact {
  margin-top: 1rem;
}

.footer {
  padding-top: 2.5rem;
  font-size: 0.875rem;
  color: var(--text-faint);
}

/* Responsive */
@media (min-width: 768px) {
  .page {
    padding: 6rem 1.5rem;
  }

  .page-grid {
    grid-template-columns: var(--sidebar-width) 1fr;
  }

  .sidebar {
    position: sticky;
    top: 2.5rem;
    align-self: start;
  }

  .hero h1 {
    font-size: 3rem;
  }

  .lead {
    font-size: 1.25rem;
  }

  .section-card {
    padding: 2rem;
  }

  .card-head h2 {
    font-size: 1.5rem;
  }

  .grid-2 {
    grid-template-columns: repeat(2, 1fr);
  }

  .grid-3 {
    grid-template-columns: repeat(3, 1fr);
  }
}

@media (min-width: 1024px) {
  .hero-photo {
    display: block;
  }
}
"#;

const DEFAULT_JS: &str = r#"// folio - runtime JavaScript
(function() {
  'use strict';

  // Highlight the menu entry of the section in view
  const links = document.querySelectorAll('.menu a');
  if (!links.length || !('IntersectionObserver' in window)) return;

  const byId = new Map();
  links.forEach(link => {
    byId.set(link.getAttribute('href').slice(1), link);
  });

  const observer = new IntersectionObserver(entries => {
    entries.forEach(entry => {
      if (!entry.isIntersecting) return;
      links.forEach(link => link.classList.remove('active'));
      const link = byId.get(entry.target.id);
      if (link) link.classList.add('active');
    });
  }, { rootMargin: '0px 0px -60% 0px' });

  byId.forEach((_, id) => {
    const section = document.getElementById(id);
    if (section) observer.observe(section);
  });
})();
"#;
