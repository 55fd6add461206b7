//! Parameter heuristics: location classifier and synthesized descriptions.
//!
//! Both are name-substring lookup tables, checked in order. They are
//! approximations; a wrong guess only changes a label or a sentence.

use crate::model::Type;

/// Where a parameter would travel in an HTTP-shaped API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Body,
}

impl ParamLocation {
    /// Attribute name used on `<ParamField>`.
    pub fn attr(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Body => "body",
        }
    }
}

/// Names containing "id" that are still not path identifiers.
const ID_EXCLUSIONS: &[&str] = &["userid", "accountid"];

const LOCATION_TABLE: &[(&[&str], ParamLocation)] = &[
    (
        &["header", "authorization", "auth", "apikey"],
        ParamLocation::Header,
    ),
    (
        &["query", "limit", "offset", "page", "sort", "filter"],
        ParamLocation::Query,
    ),
    (&["body", "data", "payload", "request"], ParamLocation::Body),
];

/// Classify a parameter by name. Falls back to [`ParamLocation::Path`].
pub fn classify(name: &str) -> ParamLocation {
    let lower = name.to_lowercase();

    if lower.contains("id") && !ID_EXCLUSIONS.iter().any(|x| lower.contains(x)) {
        return ParamLocation::Path;
    }

    LOCATION_TABLE
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|t| lower.contains(t)))
        .map(|(_, loc)| *loc)
        .unwrap_or(ParamLocation::Path)
}

/// Name substring → sentence, first match wins.
const DESCRIPTION_LEXICON: &[(&[&str], &str)] = &[
    (&["id"], "The unique identifier"),
    (&["url", "endpoint"], "The URL of the target endpoint"),
    (
        &["key", "token", "auth"],
        "The credential used to authenticate the request",
    ),
    (
        &["options", "config"],
        "Configuration options for the operation",
    ),
    (&["data", "body", "payload"], "The data to send"),
    (&["limit"], "The maximum number of items to return"),
    (&["offset", "skip"], "The number of items to skip"),
    (&["timeout"], "The timeout in milliseconds"),
];

/// Synthesize a description for an undocumented parameter.
///
/// `display_type` is the formatted type, used when no name rule applies.
pub fn synthesize_description(name: &str, display_type: &str) -> String {
    let lower = name.to_lowercase();
    if let Some((_, sentence)) = DESCRIPTION_LEXICON
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|t| lower.contains(t)))
    {
        return ensure_period(sentence);
    }

    let sentence = match display_type {
        "string" => format!("The {} string", name),
        "number" | "bigint" => format!("The {} value", name),
        "boolean" => format!("Whether {} is enabled", name),
        t if t.contains("=>") => "Callback invoked by the operation".to_string(),
        t if t.ends_with("[]") => format!("The list of {}", name),
        _ => format!("The {} parameter", name),
    };
    ensure_period(&sentence)
}

/// Fallback description for a return field.
pub fn synthesize_return(ty: &Type) -> String {
    match ty {
        Type::Reference { name, .. } if name == "Promise" => {
            "A promise that resolves with the result.".to_string()
        }
        _ => "The return value.".to_string(),
    }
}

/// Normalize text to end with exactly one terminating period.
pub fn ensure_period(text: &str) -> String {
    let trimmed = text.trim_end();
    let base = trimmed.trim_end_matches('.').trim_end();
    if base.is_empty() {
        return String::new();
    }
    format!("{}.", base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_examples() {
        assert_eq!(classify("userId"), ParamLocation::Path);
        assert_eq!(classify("limit"), ParamLocation::Query);
        assert_eq!(classify("authorization"), ParamLocation::Header);
        assert_eq!(classify("payload"), ParamLocation::Body);
    }

    #[test]
    fn classifier_order() {
        assert_eq!(classify("orderId"), ParamLocation::Path);
        assert_eq!(classify("apiKey"), ParamLocation::Header);
        assert_eq!(classify("pageSize"), ParamLocation::Query);
        assert_eq!(classify("requestBody"), ParamLocation::Body);
        assert_eq!(classify("name"), ParamLocation::Path);
    }

    #[test]
    fn lexicon_matches_in_order() {
        assert_eq!(synthesize_description("id", "string"), "The unique identifier.");
        assert_eq!(
            synthesize_description("baseUrl", "string"),
            "The URL of the target endpoint."
        );
        assert_eq!(
            synthesize_description("accessToken", "string"),
            "The credential used to authenticate the request."
        );
        assert_eq!(
            synthesize_description("options", "RequestOptions"),
            "Configuration options for the operation."
        );
        assert_eq!(synthesize_description("skip", "number"), "The number of items to skip.");
        assert_eq!(synthesize_description("timeout", "number"), "The timeout in milliseconds.");
    }

    #[test]
    fn type_fallbacks() {
        assert_eq!(synthesize_description("name", "string"), "The name string.");
        assert_eq!(synthesize_description("count", "number"), "The count value.");
        assert_eq!(synthesize_description("verbose", "boolean"), "Whether verbose is enabled.");
        assert_eq!(
            synthesize_description("onDone", "() => void"),
            "Callback invoked by the operation."
        );
        assert_eq!(synthesize_description("tags", "string[]"), "The list of tags.");
        assert_eq!(synthesize_description("mode", "Mode"), "The mode parameter.");
    }

    #[test]
    fn period_normalization() {
        assert_eq!(ensure_period("Hello"), "Hello.");
        assert_eq!(ensure_period("Hello."), "Hello.");
        assert_eq!(ensure_period("Hello...  "), "Hello.");
        assert_eq!(ensure_period("   "), "");
    }

    #[test]
    fn return_fallbacks() {
        let promise = Type::generic("Promise", vec![Type::intrinsic("void")]);
        assert_eq!(synthesize_return(&promise), "A promise that resolves with the result.");
        assert_eq!(synthesize_return(&Type::intrinsic("string")), "The return value.");
    }
}
