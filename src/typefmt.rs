//! Type-expression formatter: [`Type`] tree to display string.
//!
//! Pure and recursive. The upstream graph is acyclic, so recursion depth is
//! bounded by the input; there is no artificial depth limit.

use crate::model::{Declaration, Signature, Type};
use crate::refs::ReferenceMap;
use crate::slug::markdown_link;

/// Format a type, linking references found in `refs` when given.
///
/// An absent type formats as `any`.
pub fn format_type(ty: Option<&Type>, refs: Option<&ReferenceMap>) -> String {
    match ty {
        Some(ty) => TypeFormatter { refs }.format(ty),
        None => "any".to_string(),
    }
}

#[derive(Clone, Copy)]
struct TypeFormatter<'a> {
    refs: Option<&'a ReferenceMap>,
}

impl TypeFormatter<'_> {
    fn format(self, ty: &Type) -> String {
        match ty {
            Type::Intrinsic { name } => name.clone(),
            Type::Reference {
                name,
                type_arguments,
            } => {
                let mut out = self.link(name);
                if !type_arguments.is_empty() {
                    out.push('<');
                    out.push_str(&self.join(type_arguments, ", "));
                    out.push('>');
                }
                out
            }
            Type::Array { element } => format!("{}[]", self.grouped(element)),
            Type::Union { members } => self.join(members, " | "),
            Type::Intersection { members } => self.join(members, " & "),
            Type::Literal { value } => literal(value),
            Type::Tuple { elements } => format!("[{}]", self.join(elements, ", ")),
            Type::Reflection { signature, members } => {
                if let Some(sig) = signature {
                    self.arrow(sig)
                } else if let Some(members) = members {
                    self.object(members)
                } else {
                    "object".to_string()
                }
            }
            Type::Conditional {
                check,
                extends,
                true_branch,
                false_branch,
            } => format!(
                "{} extends {} ? {} : {}",
                self.format(check),
                self.format(extends),
                self.format(true_branch),
                self.format(false_branch)
            ),
            Type::IndexedAccess { object, index } => {
                format!("{}[{}]", self.grouped(object), self.format(index))
            }
            Type::Query { name } => format!("typeof {}", self.link(name)),
            Type::Predicate { subject, target } => {
                format!("{} is {}", subject, format_type(target.as_deref(), self.refs))
            }
            Type::Unknown => "unknown".to_string(),
        }
    }

    fn join(self, types: &[Type], sep: &str) -> String {
        types
            .iter()
            .map(|t| self.format(t))
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Format, parenthesized when the type binds looser than a postfix `[]`.
    fn grouped(self, ty: &Type) -> String {
        let needs_parens = match ty {
            Type::Union { members } | Type::Intersection { members } => members.len() > 1,
            Type::Conditional { .. } => true,
            Type::Reflection { signature, .. } => signature.is_some(),
            _ => false,
        };
        if needs_parens {
            format!("({})", self.format(ty))
        } else {
            self.format(ty)
        }
    }

    fn arrow(self, sig: &Signature) -> String {
        let params = sig
            .parameters
            .iter()
            .map(|p| {
                format!(
                    "{}{}: {}",
                    p.name,
                    if p.optional { "?" } else { "" },
                    format_type(p.ty.as_ref(), self.refs)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let ret = match &sig.return_type {
            Some(ty) => self.format(ty),
            None => "void".to_string(),
        };
        format!("({}) => {}", params, ret)
    }

    fn object(self, members: &[Declaration]) -> String {
        if members.is_empty() {
            return "{}".to_string();
        }
        let fields = members
            .iter()
            .map(|m| {
                let ty = match (&m.type_expression, m.signatures.first()) {
                    (Some(ty), _) => self.format(ty),
                    (None, Some(sig)) => self.arrow(sig),
                    (None, None) => "any".to_string(),
                };
                format!("{}{}: {}", m.name, if m.flags.optional { "?" } else { "" }, ty)
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!("{{ {} }}", fields)
    }

    fn link(self, name: &str) -> String {
        match self.refs.and_then(|r| r.href(name)) {
            Some(href) => markdown_link(name, &href),
            None => name.to_string(),
        }
    }
}

/// Canonical textual form of a literal: strings quoted, everything else as JSON.
fn literal(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}
