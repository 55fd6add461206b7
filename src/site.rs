//! Site assembly: the full pipeline from a declaration tree to finished pages.
//!
//! Stages run in a fixed order:
//!
//! 1. **Resolve**: one traversal builds the shared [`ReferenceMap`]
//! 2. **Render**: each page-worthy declaration becomes a [`RenderedDocument`]
//! 3. **Link**: code-span mentions of known names become links
//! 4. **Repair**: tags balanced, deep headings demoted, spacing normalized
//! 5. **Summarize**: the overview is built from the finished pages, then
//!    linked and repaired the same way

use crate::config::Config;
use crate::document::RenderedDocument;
use crate::error::{Error, Result};
use crate::link::LinkInjector;
use crate::model::{Declaration, Kind};
use crate::overview::summarize;
use crate::refs::{self, navigation, Location, NavGroup, References};
use crate::render::DeclarationRenderer;
use crate::repair::repair;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    pub kind: Kind,
    pub location: Location,
    pub document: RenderedDocument,
}

impl Page {
    /// Relative output file: `<location>.mdx`.
    pub fn file_name(&self) -> String {
        format!("{}.mdx", self.location.path)
    }
}

/// Everything a writer needs: detail pages, overview, navigation groups.
#[derive(Debug, Clone)]
pub struct Site {
    pub pages: Vec<Page>,
    pub overview: Page,
    pub navigation: Vec<NavGroup>,
}

/// Read a JSON declaration tree.
pub fn load_project(path: &Path) -> Result<Declaration> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Render every page-worthy declaration under `root`, plus the overview.
pub fn render_site(root: &Declaration, config: &Config) -> Site {
    let References { map, pages: page_refs } = refs::build(root, config);
    debug!(names = map.len(), "reference map built");

    let renderer = DeclarationRenderer::new(&map, config);
    let injector = LinkInjector::new(&map);

    // Same traversal and visibility rules as the resolver, so the two line up.
    let mut rendered: Vec<(&Declaration, Page)> = Vec::new();
    for (decl, page_ref) in page_declarations(root, config).into_iter().zip(&page_refs) {
        let location = page_ref.location.clone();
        let document = repair(injector.inject(renderer.render(decl)));
        debug!(name = %decl.name, path = %location.path, blocks = document.blocks.len(), "rendered page");
        rendered.push((
            decl,
            Page {
                name: decl.name.clone(),
                kind: decl.kind,
                location,
                document,
            },
        ));
    }

    let details: Vec<(&Declaration, &RenderedDocument)> = rendered
        .iter()
        .map(|(decl, page)| (*decl, &page.document))
        .collect();
    let overview = repair(injector.inject(summarize(&details, &map, config)));
    debug!(entries = details.len(), "overview summarized");

    Site {
        pages: rendered.into_iter().map(|(_, page)| page).collect(),
        overview: Page {
            name: config.overview_title.clone(),
            kind: Kind::Project,
            location: Location::new(config.overview_path.as_str()),
            document: overview,
        },
        navigation: navigation(&page_refs),
    }
}

/// Page-worthy declarations in traversal order, honoring visibility.
fn page_declarations<'d>(root: &'d Declaration, config: &Config) -> Vec<&'d Declaration> {
    fn walk<'d>(decl: &'d Declaration, config: &Config, out: &mut Vec<&'d Declaration>) {
        if decl.flags.private && !config.include_private {
            return;
        }
        if decl.kind.is_page_worthy() {
            out.push(decl);
        }
        for child in &decl.children {
            walk(child, config, out);
        }
    }

    let mut out = Vec::new();
    walk(root, config, &mut out);
    out
}
