//! Structured rendered document: an ordered list of blocks.
//!
//! Every pass after the renderer works on blocks, never on raw text, so a
//! fenced literal can't be mistaken for a heading or a container tag.

use std::fmt;

/// One line-level unit of an MDX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `key: value` pairs between `---` fences. Values are stored already serialized.
    Frontmatter(Vec<(String, String)>),
    Heading { level: u8, text: String },
    /// A single line of prose, list item, or table row.
    Text(String),
    /// Fenced literal block. Never rewritten by any pass.
    Fence { info: String, lines: Vec<String> },
    /// `<Name attrs>` on a line of its own.
    Open(Tag),
    /// `</Name>` on a line of its own.
    Close(String),
    /// `<Name attrs />` on a line of its own.
    SelfClosing(Tag),
    Blank,
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text(text.into())
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn close(name: &str) -> Self {
        Block::Close(name.to_string())
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Block::Blank)
    }
}

/// A container tag: component name plus its raw attribute text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Everything between the name and the closing `>` (or `/>`), leading space included.
    pub attrs: String,
}

impl Tag {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attrs: String::new(),
        }
    }

    /// Append `key="value"`, escaping the value.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.push_str(&format!(
            " {}=\"{}\"",
            key,
            crate::slug::escape_attr(value)
        ));
        self
    }

    /// Append a bare boolean attribute such as `required`.
    pub fn flag(mut self, key: &str) -> Self {
        self.attrs.push(' ');
        self.attrs.push_str(key);
        self
    }
}

/// Ordered block sequence produced by the renderer and refined by later passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Text(text.into()));
    }

    pub fn heading(&mut self, level: u8, text: impl Into<String>) {
        self.blocks.push(Block::heading(level, text));
        self.blank();
    }

    pub fn open(&mut self, tag: Tag) {
        self.blocks.push(Block::Open(tag));
    }

    pub fn close(&mut self, name: &str) {
        self.blocks.push(Block::close(name));
    }

    pub fn fence(&mut self, info: &str, body: &str) {
        self.blocks.push(Block::Fence {
            info: info.to_string(),
            lines: body.lines().map(str::to_string).collect(),
        });
    }

    /// Push a blank line unless the document already ends with one (or is empty).
    pub fn blank(&mut self) {
        if self.blocks.last().is_some_and(|b| !b.is_blank()) {
            self.blocks.push(Block::Blank);
        }
    }

    /// Parse rich text and append it, pushing headings `shift` levels deeper.
    pub fn push_markdown(&mut self, text: &str, shift: u8) {
        let parsed = Self::parse(text);
        for block in parsed.blocks {
            match block {
                Block::Heading { level, text } => self.blocks.push(Block::Heading {
                    level: level.saturating_add(shift),
                    text,
                }),
                // Frontmatter inside a comment is not ours to keep.
                Block::Frontmatter(_) => {}
                other => self.blocks.push(other),
            }
        }
    }

    /// Title from the frontmatter, unquoted.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Frontmatter(pairs) => pairs
                .iter()
                .find(|(k, _)| k == "title")
                .map(|(_, v)| unquote(v)),
            _ => None,
        })
    }

    /// Parse MDX text into blocks.
    pub fn parse(text: &str) -> Self {
        let mut blocks = Vec::new();
        let mut lines = text.lines().peekable();

        // Frontmatter only counts at the very top
        if lines.peek().map(|l| l.trim_end()) == Some("---") {
            let mut probe = lines.clone();
            probe.next();
            let mut pairs = Vec::new();
            let mut closed = false;
            for line in probe.by_ref() {
                if line.trim_end() == "---" {
                    closed = true;
                    break;
                }
                if let Some((k, v)) = line.split_once(':') {
                    pairs.push((k.trim().to_string(), v.trim().to_string()));
                }
            }
            if closed {
                blocks.push(Block::Frontmatter(pairs));
                lines = probe;
            }
        }

        while let Some(line) = lines.next() {
            let trimmed = line.trim_start();

            if let Some((marker, len)) = opening_fence(trimmed) {
                let info = trimmed[len..].trim().to_string();
                let mut body = Vec::new();
                for inner in lines.by_ref() {
                    if closes_fence(inner, marker, len) {
                        break;
                    }
                    body.push(inner.to_string());
                }
                blocks.push(Block::Fence { info, lines: body });
                continue;
            }

            blocks.push(classify_line(line));
        }

        Self { blocks }
    }

    /// Serialize back to MDX text.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block {
                Block::Frontmatter(pairs) => {
                    out.push_str("---\n");
                    for (k, v) in pairs {
                        out.push_str(&format!("{}: {}\n", k, v));
                    }
                    out.push_str("---\n");
                }
                Block::Heading { level, text } => {
                    out.push_str(&"#".repeat(usize::from(*level)));
                    out.push(' ');
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Text(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Block::Fence { info, lines } => {
                    // Longer than any backtick run the body starts a line with.
                    let longest = lines
                        .iter()
                        .map(|l| fence_run(l.trim_start(), '`'))
                        .max()
                        .unwrap_or(0);
                    let fence = "`".repeat(longest.max(2) + 1);
                    out.push_str(&fence);
                    out.push_str(info);
                    out.push('\n');
                    for line in lines {
                        out.push_str(line);
                        out.push('\n');
                    }
                    out.push_str(&fence);
                    out.push('\n');
                }
                Block::Open(tag) => out.push_str(&format!("<{}{}>\n", tag.name, tag.attrs)),
                Block::Close(name) => out.push_str(&format!("</{}>\n", name)),
                Block::SelfClosing(tag) => {
                    out.push_str(&format!("<{}{} />\n", tag.name, tag.attrs))
                }
                Block::Blank => out.push('\n'),
            }
        }
        out
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}

/// Leading run of `c`.
fn fence_run(line: &str, c: char) -> usize {
    line.chars().take_while(|&x| x == c).count()
}

/// Fence opener: three or more backticks or tildes. Backtick info strings
/// may not contain a backtick.
fn opening_fence(trimmed: &str) -> Option<(char, usize)> {
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = fence_run(trimmed, marker);
    if len < 3 || (marker == '`' && trimmed[len..].contains('`')) {
        return None;
    }
    Some((marker, len))
}

/// A closer uses the opener's character, at least as many of them, and nothing else.
fn closes_fence(line: &str, marker: char, len: usize) -> bool {
    let trimmed = line.trim();
    let run = fence_run(trimmed, marker);
    run >= len && run == trimmed.len()
}

/// Classify a single non-fence line.
fn classify_line(line: &str) -> Block {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Block::Blank;
    }

    let hashes = trimmed.len() - trimmed.trim_start_matches('#').len();
    if hashes > 0 && trimmed[hashes..].starts_with(' ') {
        let level = u8::try_from(hashes).unwrap_or(u8::MAX);
        return Block::heading(level, trimmed[hashes..].trim());
    }

    if let Some(block) = parse_tag_line(trimmed) {
        return block;
    }

    Block::Text(line.trim_end().to_string())
}

/// Recognize a line that is exactly one open, close, or self-closing tag.
///
/// The closing `>` must be the only unquoted `>` on the line, so inline
/// markup like `<b>x</b>` stays text.
fn parse_tag_line(line: &str) -> Option<Block> {
    if let Some(rest) = line.strip_prefix("</") {
        let name = rest.strip_suffix('>')?.trim();
        return is_tag_name(name).then(|| Block::Close(name.to_string()));
    }

    let rest = line.strip_prefix('<')?;
    let name_len = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '.' || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    let name = &rest[..name_len];
    if !is_tag_name(name) {
        return None;
    }

    let after = &rest[name_len..];
    let mut in_quote = false;
    let mut end = None;
    for (i, c) in after.char_indices() {
        match c {
            '"' => in_quote = !in_quote,
            '>' if !in_quote => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }
    let end = end?;
    if end + 1 != after.len() {
        return None;
    }
    if !after.is_empty() && !after.starts_with([' ', '/', '>']) {
        return None;
    }

    let inner = &after[..end];
    match inner.strip_suffix('/') {
        Some(attrs) => Some(Block::SelfClosing(Tag {
            name: name.to_string(),
            attrs: attrs.trim_end().to_string(),
        })),
        None => Some(Block::Open(Tag {
            name: name.to_string(),
            attrs: inner.to_string(),
        })),
    }
}

fn is_tag_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-')
}

/// Strip one pair of surrounding double quotes and undo `\"` / `\\` escapes.
pub fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}

/// Quote a frontmatter value.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
