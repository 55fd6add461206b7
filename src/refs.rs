//! Name → output-location resolution.
//!
//! One traversal of the declaration tree builds an immutable [`ReferenceMap`]
//! that every later stage borrows. The same traversal yields the
//! `(name, kind, location)` triples used for navigation.

use crate::config::Config;
use crate::model::{Declaration, Kind};
use crate::slug::slugify;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Output location: a page path relative to the output root, without
/// extension, plus an optional in-page anchor. The resolver only produces
/// whole-page locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            anchor: None,
        }
    }
}

/// Read-only name → location map for one rendering run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    entries: HashMap<String, Location>,
    prefix: String,
}

impl ReferenceMap {
    pub fn new(prefix: &str) -> Self {
        Self {
            entries: HashMap::new(),
            prefix: prefix.to_string(),
        }
    }

    /// Record a location. A repeated name replaces the earlier entry.
    pub fn insert(&mut self, name: &str, location: Location) -> Option<Location> {
        self.entries.insert(name.to_string(), location)
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Link target for a name: prefix + path, plus `#anchor` when present.
    pub fn href(&self, name: &str) -> Option<String> {
        self.get(name).map(|loc| self.href_for(loc))
    }

    pub fn href_for(&self, loc: &Location) -> String {
        match &loc.anchor {
            Some(anchor) => format!("{}{}#{}", self.prefix, loc.path, anchor),
            None => format!("{}{}", self.prefix, loc.path),
        }
    }

    /// Known names, longest first, ties broken alphabetically.
    pub fn names_longest_first(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names
    }
}

/// One page-worthy declaration found by the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub name: String,
    pub kind: Kind,
    pub location: Location,
}

/// Result of the resolver pass.
#[derive(Debug, Clone, Default)]
pub struct References {
    pub map: ReferenceMap,
    /// Every page-worthy declaration, in visit order (duplicates kept).
    /// Locations are unique across the list.
    pub pages: Vec<PageRef>,
}

/// Build the reference map with one depth-first traversal of `root`.
pub fn build(root: &Declaration, config: &Config) -> References {
    let mut refs = References {
        map: ReferenceMap::new(&config.link_prefix),
        pages: Vec::new(),
    };
    visit(root, config, &mut refs, &mut HashSet::new());
    refs
}

fn visit(
    decl: &Declaration,
    config: &Config,
    refs: &mut References,
    taken: &mut HashSet<String>,
) {
    if decl.flags.private && !config.include_private {
        return;
    }

    if let Some(location) = location_for(decl, config) {
        let location = unique_location(location, taken, &decl.name);
        if let Some(previous) = refs.map.insert(&decl.name, location.clone()) {
            warn!(
                name = %decl.name,
                previous = %previous.path,
                replacement = %location.path,
                "duplicate declaration name; last one wins"
            );
        }
        refs.pages.push(PageRef {
            name: decl.name.clone(),
            kind: decl.kind,
            location,
        });
    }

    for child in &decl.children {
        visit(child, config, refs, taken);
    }
}

/// Claim `location`, suffixing `-2`, `-3`, ... when another declaration
/// already slugged to the same path.
fn unique_location(location: Location, taken: &mut HashSet<String>, name: &str) -> Location {
    if taken.insert(location.path.clone()) {
        return location;
    }
    let mut n = 2;
    let path = loop {
        let candidate = format!("{}-{}", location.path, n);
        if taken.insert(candidate.clone()) {
            break candidate;
        }
        n += 1;
    };
    warn!(
        name = %name,
        path = %location.path,
        replacement = %path,
        "output path already taken; suffixed"
    );
    Location::new(path)
}

/// Location for a page-worthy declaration: `<folder>/<slug>`.
pub fn location_for(decl: &Declaration, config: &Config) -> Option<Location> {
    if !decl.kind.is_page_worthy() {
        return None;
    }
    let folder = config.folders.folder_for(decl.kind)?;
    Some(Location::new(format!("{}/{}", folder, slugify(&decl.name))))
}

/// Navigation group as handed to the manifest writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavGroup {
    pub group: &'static str,
    pub pages: Vec<PageRef>,
}

/// Group order of the navigation manifest.
pub const NAV_ORDER: &[(Kind, &str)] = &[
    (Kind::Enum, "Enumerations"),
    (Kind::Class, "Classes"),
    (Kind::Interface, "Interfaces"),
    (Kind::TypeAlias, "TypeAliases"),
    (Kind::Function, "Functions"),
    (Kind::Module, "Modules"),
];

/// Page triples grouped by kind in [`NAV_ORDER`]; empty groups are omitted.
pub fn navigation(pages: &[PageRef]) -> Vec<NavGroup> {
    NAV_ORDER
        .iter()
        .filter_map(|(kind, title)| {
            let members: Vec<PageRef> =
                pages.iter().filter(|p| p.kind == *kind).cloned().collect();
            (!members.is_empty()).then_some(NavGroup {
                group: title,
                pages: members,
            })
        })
        .collect()
}
