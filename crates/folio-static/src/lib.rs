//! Page templates and static site builder for folio portfolios.
//!
//! Renders a portfolio content file into a single self-contained page plus its
//! stylesheet, script and public assets.

pub mod assets;
pub mod builder;
pub mod page;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use page::{
    current_year, normalize_base_url, render_markdown, PageContext, PageRenderer, RenderError,
    RenderOptions,
};
pub use templates::{escape_html, TemplateEngine};
