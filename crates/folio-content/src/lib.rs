//! Portfolio content model.
//!
//! A portfolio is one YAML file describing the profile, navigation, prose
//! sections and project case studies of a single page. This crate loads that
//! file and checks the invariants templates rely on.

pub mod load;
pub mod model;
pub mod validate;

pub use load::{
    builtin_content, load_content, load_or_builtin, parse_content, ContentError, BUILTIN_CONTENT,
};
pub use model::{
    join_points, CallToAction, Footer, Hero, LinkSet, MentalModel, NavSection, Profile, Project,
    ProjectLinks, ProjectsSection, ProseSection, SiteContent, SiteMeta, Skill, SkillsSection,
    Snapshot, TechnicalChoice, PAGE_ANCHORS, POINT_SEPARATOR,
};
pub use validate::{validate, ValidationIssue};
