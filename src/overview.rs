//! Overview page: one short entry per documented declaration.
//!
//! Each detail page is reduced to its title, a one-line description and a
//! link back to the full page. Enumerations keep their member table since
//! it is already compact.

use crate::config::Config;
use crate::document::{quote, Block, RenderedDocument, Tag};
use crate::model::{Declaration, Kind};
use crate::refs::ReferenceMap;
use crate::render::{ACCORDION, ACCORDION_GROUP};
use crate::slug::markdown_link;

/// Group headings of the overview, in page order.
const GROUPS: &[(Kind, &str)] = &[
    (Kind::Enum, "Enumerations"),
    (Kind::Class, "Classes"),
    (Kind::Interface, "Interfaces"),
    (Kind::TypeAlias, "Type Aliases"),
    (Kind::Function, "Functions"),
    (Kind::Module, "Modules"),
];

pub const VIEW_FULL: &str = "View full documentation";

/// A summarized section of one detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    title: String,
    description: Option<String>,
    /// Enum member table rows, verbatim.
    table: Vec<String>,
    href: Option<String>,
}

/// Build the overview from finished detail pages.
///
/// Entries are grouped by kind. With more than one group, each group sits in
/// its own `<Accordion>`; a single group renders flat under `##`.
pub fn summarize(
    details: &[(&Declaration, &RenderedDocument)],
    refs: &ReferenceMap,
    config: &Config,
) -> RenderedDocument {
    let mut doc = RenderedDocument::new();
    doc.push(Block::Frontmatter(vec![(
        "title".to_string(),
        quote(&config.overview_title),
    )]));
    doc.blank();

    let groups: Vec<(&str, Vec<Entry>)> = GROUPS
        .iter()
        .filter_map(|(kind, title)| {
            let entries: Vec<Entry> = details
                .iter()
                .filter(|(decl, _)| decl.kind == *kind)
                .flat_map(|(decl, page)| entries_for(decl, page, refs))
                .collect();
            (!entries.is_empty()).then_some((*title, entries))
        })
        .collect();

    match groups.as_slice() {
        [] => {}
        [(title, entries)] => {
            doc.heading(2, *title);
            for entry in entries {
                write_entry(entry, &mut doc);
            }
        }
        _ => {
            doc.open(Tag::new(ACCORDION_GROUP));
            for (title, entries) in &groups {
                doc.open(Tag::new(ACCORDION).attr("title", title));
                for entry in entries {
                    write_entry(entry, &mut doc);
                }
                doc.close(ACCORDION);
            }
            doc.close(ACCORDION_GROUP);
            doc.blank();
        }
    }

    doc
}

fn write_entry(entry: &Entry, doc: &mut RenderedDocument) {
    doc.heading(3, entry.title.as_str());
    if let Some(description) = &entry.description {
        doc.text(description.as_str());
        doc.blank();
    }
    if !entry.table.is_empty() {
        for row in &entry.table {
            doc.text(row.as_str());
        }
        doc.blank();
    }
    if let Some(href) = &entry.href {
        doc.text(markdown_link(VIEW_FULL, href));
        doc.blank();
    }
}

fn entries_for(decl: &Declaration, page: &RenderedDocument, refs: &ReferenceMap) -> Vec<Entry> {
    let own_href = refs.href(&decl.name);

    if decl.kind == Kind::Enum {
        return vec![Entry {
            title: page.title().unwrap_or_else(|| decl.name.clone()),
            description: None,
            table: members_table(&page.blocks),
            href: own_href,
        }];
    }

    // Pages with level-1 headings hold one section per heading; otherwise the
    // whole page is one section under its frontmatter title.
    let starts: Vec<usize> = page
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| matches!(b, Block::Heading { level: 1, .. }))
        .map(|(i, _)| i)
        .collect();

    if starts.is_empty() {
        return vec![Entry {
            title: page.title().unwrap_or_else(|| decl.name.clone()),
            description: lead_line(&page.blocks),
            table: Vec::new(),
            href: own_href,
        }];
    }

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(page.blocks.len());
            let title = match &page.blocks[start] {
                Block::Heading { text, .. } => text.clone(),
                _ => decl.name.clone(),
            };
            Entry {
                href: refs.href(&title).or_else(|| own_href.clone()),
                description: lead_line(&page.blocks[start + 1..end]),
                table: Vec::new(),
                title,
            }
        })
        .collect()
}

/// Rows of the first table under `## Members`. Tables elsewhere on the page
/// (summary, remarks) are not part of the member listing.
fn members_table(blocks: &[Block]) -> Vec<String> {
    let Some(start) = blocks
        .iter()
        .position(|b| matches!(b, Block::Heading { level: 2, text } if text == "Members"))
    else {
        return Vec::new();
    };
    blocks[start + 1..]
        .iter()
        .skip_while(|b| b.is_blank())
        .map_while(|b| match b {
            Block::Text(line) if line.starts_with('|') => Some(line.clone()),
            _ => None,
        })
        .collect()
}

/// First prose line of a section, before its first sub-heading.
///
/// Lines inside containers, blockquotes, table rows and lines that are a
/// single code span are skipped.
fn lead_line(blocks: &[Block]) -> Option<String> {
    let mut depth = 0usize;
    for block in blocks {
        match block {
            Block::Heading { .. } => return None,
            Block::Open(_) => depth += 1,
            Block::Close(_) => depth = depth.saturating_sub(1),
            Block::Text(line) if depth == 0 => {
                let line = line.trim();
                if is_lead_candidate(line) {
                    return Some(line.to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn is_lead_candidate(line: &str) -> bool {
    if line.is_empty() || line.starts_with('>') || line.starts_with('|') {
        return false;
    }
    let code_only = line.len() > 1
        && line.starts_with('`')
        && line.ends_with('`')
        && !line[1..line.len() - 1].contains('`');
    !code_only
}
