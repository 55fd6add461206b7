//! Slug and markdown-link helpers shared by the resolver and the link passes.

/// Page slug for a declaration name.
///
/// Same rules as GitHub heading anchors:
/// - lowercase
/// - drop every char that isn't alphanumeric, space, or hyphen
/// - spaces become hyphens
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' {
            slug.push(c);
        }
    }
    slug.trim().replace(' ', "-")
}

/// `[text](href)`
pub fn markdown_link(text: &str, href: &str) -> String {
    format!("[{}]({})", text, href)
}

/// Check if text contains a markdown link `[...](...)`.
pub fn contains_markdown_link(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' {
            if let Some(close) = text[i + 1..].find(']') {
                let after = i + 1 + close + 1;
                if after < bytes.len() && bytes[after] == b'(' {
                    return true;
                }
            }
        }
        i += 1;
    }
    false
}

/// Escape `<`, `>`, `{`, `}` so prose survives MDX's JSX and expression parsing.
pub fn escape_mdx(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a value for use inside a double-quoted JSX attribute.
pub fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}
