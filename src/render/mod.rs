//! Declaration renderer: one MDX page per page-worthy declaration.
//!
//! Page skeleton (every kind):
//!
//! 1. frontmatter (`title`, `description`)
//! 2. deprecation `<Warning>`
//! 3. kind-specific body (see `kinds`)
//! 4. `## Remarks`, `## Example`

mod fields;
mod kinds;
pub mod params;

use crate::config::Config;
use crate::document::{quote, Block, RenderedDocument, Tag};
use crate::model::{Comment, Declaration, Kind};
use crate::refs::ReferenceMap;
use tracing::debug;

pub use fields::{EXPANDABLE, PARAM_FIELD, RESPONSE_FIELD};

pub const ACCORDION_GROUP: &str = "AccordionGroup";
pub const ACCORDION: &str = "Accordion";
pub const CODE_GROUP: &str = "CodeGroup";
pub const WARNING: &str = "Warning";

/// Renders declarations against a shared, read-only reference map.
pub struct DeclarationRenderer<'a> {
    refs: &'a ReferenceMap,
    config: &'a Config,
}

impl<'a> DeclarationRenderer<'a> {
    pub fn new(refs: &'a ReferenceMap, config: &'a Config) -> Self {
        Self { refs, config }
    }

    /// Render a declaration's detail page. Never fails: unknown kinds get
    /// the summary-only fallback.
    pub fn render(&self, decl: &Declaration) -> RenderedDocument {
        let mut doc = RenderedDocument::new();
        self.frontmatter(decl, &mut doc);
        self.deprecation(decl.comment.as_ref(), &mut doc);

        match decl.kind {
            Kind::Class => self.class(decl, &mut doc),
            Kind::Interface => self.interface(decl, &mut doc),
            Kind::Function => self.function(decl, &mut doc),
            Kind::Enum => self.enumeration(decl, &mut doc),
            Kind::TypeAlias => self.type_alias(decl, &mut doc),
            Kind::Module => self.module(decl, &mut doc),
            other => {
                debug!(name = %decl.name, kind = ?other, "no layout for kind; summary only");
                self.summary(decl, &mut doc);
            }
        }

        self.remarks(decl.comment.as_ref(), &mut doc);
        self.examples(decl.comment.as_ref(), &mut doc);
        doc
    }

    fn frontmatter(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        let mut pairs = vec![("title".to_string(), quote(&decl.name))];
        if let Some(summary) = summary_of(decl) {
            let sentence = first_sentence(summary);
            if !sentence.is_empty() {
                pairs.push(("description".to_string(), quote(&sentence)));
            }
        }
        doc.push(Block::Frontmatter(pairs));
        doc.push(Block::Blank);
    }

    fn deprecation(&self, comment: Option<&Comment>, doc: &mut RenderedDocument) {
        let Some(message) = comment.and_then(|c| c.deprecated.as_deref()) else {
            return;
        };
        doc.open(Tag::new(WARNING));
        if message.trim().is_empty() {
            doc.text("**Deprecated.**");
        } else {
            doc.text(format!("**Deprecated.** {}", message.trim()));
        }
        doc.close(WARNING);
        doc.blank();
    }

    /// Summary paragraph of the declaration itself.
    fn summary(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        if let Some(summary) = summary_of(decl) {
            doc.push_markdown(summary, 1);
            doc.blank();
        }
    }

    fn remarks(&self, comment: Option<&Comment>, doc: &mut RenderedDocument) {
        let Some(remarks) = comment
            .and_then(|c| c.remarks.as_deref())
            .filter(|r| !r.trim().is_empty())
        else {
            return;
        };
        doc.heading(2, "Remarks");
        // Remarks headings nest below the section heading.
        doc.push_markdown(remarks, 2);
        doc.blank();
    }

    fn examples(&self, comment: Option<&Comment>, doc: &mut RenderedDocument) {
        let Some(examples) = comment
            .map(|c| c.examples.as_slice())
            .filter(|e| !e.is_empty())
        else {
            return;
        };

        doc.heading(2, if examples.len() > 1 { "Examples" } else { "Example" });

        let parsed: Vec<RenderedDocument> =
            examples.iter().map(|e| RenderedDocument::parse(e)).collect();
        let all_fences = parsed.iter().all(|p| {
            p.blocks.iter().all(|b| matches!(b, Block::Fence { .. } | Block::Blank))
                && p.blocks.iter().any(|b| matches!(b, Block::Fence { .. }))
        });

        if examples.len() > 1 && all_fences {
            doc.open(Tag::new(CODE_GROUP));
            let fences = parsed
                .into_iter()
                .flat_map(|p| p.blocks)
                .filter(|b| matches!(b, Block::Fence { .. }));
            for (i, block) in fences.enumerate() {
                doc.push(title_fence(block, i + 1));
            }
            doc.close(CODE_GROUP);
        } else {
            for example in examples {
                doc.push_markdown(example, 2);
                doc.blank();
            }
        }
        doc.blank();
    }
}

/// Give an untitled fence a tab title so `<CodeGroup>` can label it.
fn title_fence(block: Block, index: usize) -> Block {
    match block {
        Block::Fence { info, lines } if !info.contains(' ') => {
            let lang = if info.is_empty() { "text" } else { info.as_str() };
            Block::Fence {
                info: format!("{} Example {}", lang, index),
                lines,
            }
        }
        other => other,
    }
}

/// Declaration summary, falling back to the first signature's summary.
pub(crate) fn summary_of(decl: &Declaration) -> Option<&str> {
    decl.summary().or_else(|| {
        decl.signatures
            .iter()
            .find_map(|s| s.comment.as_ref()?.summary.as_deref())
            .filter(|s| !s.trim().is_empty())
    })
}

/// First sentence of a summary, on one line.
pub(crate) fn first_sentence(text: &str) -> String {
    let first_para = text.split("\n\n").next().unwrap_or("");
    let flat = first_para.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.find(". ") {
        Some(pos) => flat[..=pos].to_string(),
        None => flat,
    }
}
