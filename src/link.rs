//! Link injection: turn code-span mentions of known declarations into links.
//!
//! Only `Text` blocks are touched. Fenced literals, headings, frontmatter and
//! tag lines pass through unchanged. Three shapes are rewritten:
//!
//! - `` `Name` `` standing alone → `[Name](href)` (the code span is dropped,
//!   links don't render inside one)
//! - `` **param**: `Name` `` and `` param?: `Name` `` → same, after a parameter prefix
//! - `` `Promise<Name>` `` → `Promise\<[Name](href)\>`: the span is
//!   de-literalized, known names inside the argument list are linked and the
//!   rest is escaped
//!
//! Existing links are left alone, so running the pass twice changes nothing.

use crate::document::{Block, RenderedDocument};
use crate::refs::ReferenceMap;
use crate::slug::{escape_mdx, markdown_link};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static RE_CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

/// `**name**: ` or `name?: ` immediately before a code span.
static RE_PARAM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\*\*[\w$]+\*\*|[\w$]+\??):\s*$").unwrap());

/// Inject links for every name in `refs`.
pub fn inject(doc: RenderedDocument, refs: &ReferenceMap) -> RenderedDocument {
    LinkInjector::new(refs).inject(doc)
}

pub struct LinkInjector<'a> {
    refs: &'a ReferenceMap,
    /// Alternation of known names, longest first, so a short name never
    /// claims the prefix of a longer one.
    names: Option<Regex>,
}

impl<'a> LinkInjector<'a> {
    pub fn new(refs: &'a ReferenceMap) -> Self {
        let names = refs.names_longest_first();
        let names = if names.is_empty() {
            None
        } else {
            let alternation = names
                .iter()
                .map(|n| regex::escape(n))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{})\b", alternation)).ok()
        };
        Self { refs, names }
    }

    pub fn inject(&self, mut doc: RenderedDocument) -> RenderedDocument {
        if self.refs.is_empty() {
            return doc;
        }
        for block in &mut doc.blocks {
            if let Block::Text(line) = block {
                *line = self.link_line(line);
            }
        }
        doc
    }

    /// Rewrite one line of prose.
    pub fn link_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut last = 0;
        let labels = link_labels(line);

        for span in RE_CODE_SPAN.find_iter(line) {
            let (start, end) = (span.start(), span.end());
            if labels.iter().any(|label| label.contains(&start)) {
                continue;
            }
            let content = &line[start + 1..end - 1];
            let before = line[..start].chars().next_back();
            let after = line[end..].chars().next();

            let replacement = if self.refs.contains(content)
                && (is_boundary(before) || RE_PARAM_PREFIX.is_match(&line[..start]))
                && is_boundary(after)
            {
                self.refs.href(content).map(|href| markdown_link(content, &href))
            } else {
                self.link_type_arguments(content)
            };

            if let Some(replacement) = replacement {
                out.push_str(&line[last..start]);
                out.push_str(&replacement);
                last = end;
            }
        }

        out.push_str(&line[last..]);
        out
    }

    /// De-literalize a generic type span when a known name sits inside its
    /// argument list. Returns `None` when nothing would be linked.
    fn link_type_arguments(&self, content: &str) -> Option<String> {
        if !content.contains('<') {
            return None;
        }
        let names = self.names.as_ref()?;

        let matches: Vec<_> = names
            .find_iter(content)
            .filter(|m| generic_depth(&content[..m.start()]) > 0)
            .collect();
        if matches.is_empty() {
            return None;
        }

        let mut out = String::new();
        let mut last = 0;
        for m in matches {
            out.push_str(&escape_mdx(&content[last..m.start()]));
            let href = self.refs.href(m.as_str())?;
            out.push_str(&markdown_link(m.as_str(), &href));
            last = m.end();
        }
        out.push_str(&escape_mdx(&content[last..]));
        Some(out)
    }
}

/// Byte ranges of existing link labels: the text between `[` and `](...)`.
fn link_labels(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut labels = Vec::new();
    let mut open = Vec::new();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'[' => open.push(i),
            b']' => {
                if let Some(start) = open.pop() {
                    if bytes.get(i + 1) == Some(&b'(') && line[i + 1..].contains(')') {
                        labels.push(start + 1..i);
                    }
                }
            }
            _ => {}
        }
    }
    labels
}

/// Whitespace, punctuation or line edge around a code span.
fn is_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some('`') => false,
        Some(c) => c.is_whitespace() || c.is_ascii_punctuation(),
    }
}

/// Angle-bracket nesting depth at the end of `prefix`. `=>` is not a closer.
fn generic_depth(prefix: &str) -> i32 {
    let mut depth = 0;
    let mut prev = None;
    for c in prefix.chars() {
        match c {
            '<' => depth += 1,
            '>' if prev != Some('=') => depth -= 1,
            _ => {}
        }
        prev = Some(c);
    }
    depth
}
