//! mdxdoc: compile a declaration graph into MDX reference pages.
//!
//! The graph (classes, interfaces, functions, enums, type aliases, modules
//! and their members) comes in as JSON. Out come one page per declaration,
//! an overview page and a navigation manifest.

pub mod config;
pub mod document;
pub mod error;
pub mod link;
pub mod model;
pub mod overview;
pub mod refs;
pub mod render;
pub mod repair;
pub mod site;
pub mod slug;
pub mod typefmt;

pub use config::Config;
pub use document::{Block, RenderedDocument, Tag};
pub use error::{Error, Result};
pub use link::inject;
pub use model::{Declaration, Kind, Signature, Type};
pub use overview::summarize;
pub use refs::{build, Location, NavGroup, ReferenceMap};
pub use render::DeclarationRenderer;
pub use repair::repair;
pub use site::{load_project, render_site, Page, Site};
pub use typefmt::format_type;
