//! Per-kind page bodies.

use super::params::ensure_period;
use super::{DeclarationRenderer, ACCORDION, ACCORDION_GROUP};
use crate::document::{RenderedDocument, Tag};
use crate::model::{Declaration, Kind, Signature, Type};
use crate::slug::{contains_markdown_link, escape_mdx, markdown_link};
use crate::typefmt::format_type;

/// Placeholder for an empty table cell.
pub const EMPTY_CELL: &str = "—";

impl DeclarationRenderer<'_> {
    pub(super) fn class(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);
        self.heritage(decl, doc);

        if let Some(ctor) = self.members(decl, &[Kind::Constructor]).first() {
            self.constructor(decl, ctor, doc);
        }

        let properties = self.members(decl, &[Kind::Property, Kind::Accessor]);
        self.properties_block(&properties, doc);

        let methods = self.members(decl, &[Kind::Method]);
        self.methods_block(&methods, doc);
    }

    pub(super) fn interface(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);
        self.heritage(decl, doc);

        let properties = self.members(decl, &[Kind::Property, Kind::Accessor]);
        self.properties_block(&properties, doc);

        let methods = self.members(decl, &[Kind::Method]);
        self.methods_block(&methods, doc);
    }

    pub(super) fn function(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);

        let overloaded = decl.signatures.len() > 1;
        for (i, sig) in decl.signatures.iter().enumerate() {
            if overloaded {
                doc.heading(2, format!("Overload {}", i + 1));
            } else {
                doc.heading(2, "Signature");
            }
            doc.fence("typescript", &call_signature("", &decl.name, sig, true));
            doc.blank();

            if overloaded {
                if let Some(summary) = signature_summary(sig) {
                    doc.push_markdown(summary, 2);
                    doc.blank();
                }
            }

            let has_params = !sig.parameters.is_empty();
            let has_return = sig.return_type.as_ref().is_some_and(|t| !t.is_void());
            if !has_params && !has_return {
                continue;
            }

            doc.open(Tag::new(ACCORDION_GROUP));
            if has_params {
                doc.open(Tag::new(ACCORDION).attr("title", "Parameters"));
                self.param_fields(sig, doc);
                doc.close(ACCORDION);
            }
            if has_return {
                doc.open(Tag::new(ACCORDION).attr("title", "Returns"));
                self.return_field(sig, doc);
                doc.close(ACCORDION);
            }
            doc.close(ACCORDION_GROUP);
            doc.blank();
        }
    }

    pub(super) fn enumeration(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);

        let members = self.members(decl, &[Kind::EnumMember]);
        if members.is_empty() {
            return;
        }

        doc.heading(2, "Members");
        doc.text("| Member | Value | Description |");
        doc.text("| --- | --- | --- |");
        for member in members {
            let value = match (&member.default_value, &member.type_expression) {
                (Some(v), _) => format!("`{}`", v),
                (None, Some(ty)) => format!("`{}`", format_type(Some(ty), None)),
                (None, None) => EMPTY_CELL.to_string(),
            };
            let description = member
                .summary()
                .map(table_cell)
                .unwrap_or_else(|| EMPTY_CELL.to_string());
            doc.text(format!("| `{}` | {} | {} |", member.name, value, description));
        }
        doc.blank();
    }

    pub(super) fn type_alias(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);

        let ty = decl.type_expression.as_ref();
        doc.text(format!("**Type:** {}", self.inline_type(ty)));
        doc.blank();

        if let Some(members) = ty.and_then(Type::object_members) {
            let members: Vec<&Declaration> = members.iter().collect();
            self.properties_block(&members, doc);
        }
    }

    pub(super) fn module(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        self.summary(decl, doc);

        let entries: Vec<String> = decl
            .children
            .iter()
            .filter(|c| c.kind.is_page_worthy() && self.is_visible(c))
            .filter_map(|c| {
                let href = self.refs.href(&c.name)?;
                Some(format!(
                    "- {} ({})",
                    markdown_link(&c.name, &href),
                    c.kind.display_name()
                ))
            })
            .collect();

        if entries.is_empty() {
            return;
        }
        doc.heading(2, "Contents");
        for entry in entries {
            doc.text(entry);
        }
        doc.blank();
    }

    /// Constructor block. Only the first signature is rendered.
    fn constructor(&self, class: &Declaration, ctor: &Declaration, doc: &mut RenderedDocument) {
        let Some(sig) = ctor.signatures.first() else {
            return;
        };
        doc.heading(2, "Constructor");
        doc.fence("typescript", &call_signature("new ", &class.name, sig, false));
        doc.blank();

        if let Some(summary) = signature_summary(sig).or_else(|| ctor.summary()) {
            doc.push_markdown(summary, 2);
            doc.blank();
        }

        self.param_fields(sig, doc);
        doc.blank();

        let hidden = ctor.signatures.len() - 1;
        if hidden > 0 {
            let noun = if hidden == 1 { "overload" } else { "overloads" };
            doc.text(format!("*{} additional constructor {} not shown.*", hidden, noun));
            doc.blank();
        }
    }

    /// `## Properties`: flat fields, or one accordion per property above the threshold.
    fn properties_block(&self, props: &[&Declaration], doc: &mut RenderedDocument) {
        if props.is_empty() {
            return;
        }
        doc.heading(2, "Properties");

        if props.len() > self.config.thresholds.properties {
            doc.open(Tag::new(ACCORDION_GROUP));
            for prop in props {
                doc.open(Tag::new(ACCORDION).attr("title", &prop.name));
                self.property_field(prop, doc);
                doc.close(ACCORDION);
            }
            doc.close(ACCORDION_GROUP);
        } else {
            for prop in props {
                self.property_field(prop, doc);
                doc.blank();
            }
        }
        doc.blank();
    }

    /// `## Methods`: a `###` section per method, or accordions above the threshold.
    fn methods_block(&self, methods: &[&Declaration], doc: &mut RenderedDocument) {
        if methods.is_empty() {
            return;
        }
        doc.heading(2, "Methods");

        if methods.len() > self.config.thresholds.methods {
            doc.open(Tag::new(ACCORDION_GROUP));
            for method in methods {
                doc.open(Tag::new(ACCORDION).attr("title", &method.name));
                self.method_body(method, doc);
                doc.close(ACCORDION);
            }
            doc.close(ACCORDION_GROUP);
        } else {
            for method in methods {
                doc.heading(3, method.name.as_str());
                self.method_body(method, doc);
            }
        }
        doc.blank();
    }

    fn method_body(&self, method: &Declaration, doc: &mut RenderedDocument) {
        self.deprecation(method.comment.as_ref(), doc);
        let prefix = if method.flags.is_static { "static " } else { "" };
        for (i, sig) in method.signatures.iter().enumerate() {
            doc.fence("typescript", &call_signature(prefix, &method.name, sig, true));
            doc.blank();

            let summary = signature_summary(sig).or(if i == 0 { method.summary() } else { None });
            if let Some(summary) = summary {
                doc.push_markdown(summary, 3);
                doc.blank();
            }

            self.param_fields(sig, doc);
            self.return_field(sig, doc);
            doc.blank();
        }
    }

    /// `**Extends:**` / `**Implements:**` lines.
    fn heritage(&self, decl: &Declaration, doc: &mut RenderedDocument) {
        for (label, types) in [
            ("Extends", &decl.extended_types),
            ("Implements", &decl.implemented_types),
        ] {
            if types.is_empty() {
                continue;
            }
            let rendered: Vec<String> = types.iter().map(|t| self.inline_type(Some(t))).collect();
            doc.text(format!("**{}:** {}", label, rendered.join(", ")));
            doc.blank();
        }
    }

    /// A type shown inline in prose.
    ///
    /// Linked types can't sit inside a code span, so they are shown bare with
    /// angle brackets escaped; unlinked types go in a code span.
    fn inline_type(&self, ty: Option<&Type>) -> String {
        let formatted = format_type(ty, Some(self.refs));
        if contains_markdown_link(&formatted) {
            escape_mdx(&formatted)
        } else {
            format!("`{}`", formatted)
        }
    }

    fn members<'d>(&self, decl: &'d Declaration, kinds: &[Kind]) -> Vec<&'d Declaration> {
        decl.children
            .iter()
            .filter(|c| kinds.contains(&c.kind) && self.is_visible(c))
            .collect()
    }

    fn is_visible(&self, decl: &Declaration) -> bool {
        !decl.flags.private || self.config.include_private
    }
}

/// One-line call signature: `prefix name(a: A, b?: B): R`.
fn call_signature(prefix: &str, name: &str, sig: &Signature, with_return: bool) -> String {
    let params = sig
        .parameters
        .iter()
        .map(|p| {
            format!(
                "{}{}: {}",
                p.name,
                if p.optional { "?" } else { "" },
                format_type(p.ty.as_ref(), None)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    match (&sig.return_type, with_return) {
        (Some(ret), true) => format!(
            "{}{}({}): {}",
            prefix,
            name,
            params,
            format_type(Some(ret), None)
        ),
        _ => format!("{}{}({})", prefix, name, params),
    }
}

fn signature_summary(sig: &Signature) -> Option<&str> {
    sig.comment
        .as_ref()
        .and_then(|c| c.summary.as_deref())
        .filter(|s| !s.trim().is_empty())
}

/// Single-line table cell text: pipes escaped, newlines flattened.
fn table_cell(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    ensure_period(&flat.replace('|', "\\|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{Comment, Parameter};
    use crate::refs::{Location, ReferenceMap};

    fn render_with(decl: &Declaration, refs: &ReferenceMap) -> String {
        let config = Config::default();
        DeclarationRenderer::new(refs, &config).render(decl).to_markdown()
    }

    fn render(decl: &Declaration) -> String {
        render_with(decl, &ReferenceMap::new("/"))
    }

    fn class_with_properties(n: usize) -> Declaration {
        (0..n).fold(Declaration::new("Bag", Kind::Class), |class, i| {
            class.with_child(
                Declaration::new(format!("p{}", i), Kind::Property)
                    .with_type(Type::intrinsic("string")),
            )
        })
    }

    #[test]
    fn six_properties_collapse() {
        let out = render(&class_with_properties(6));
        assert_eq!(out.matches("<AccordionGroup>").count(), 1);
        assert_eq!(out.matches("<Accordion title=").count(), 6);
        assert_eq!(out.matches("<ResponseField").count(), 6);
    }

    #[test]
    fn four_properties_stay_flat() {
        let out = render(&class_with_properties(4));
        assert!(!out.contains("Accordion"));
        assert_eq!(out.matches("<ResponseField").count(), 4);
    }

    #[test]
    fn class_constructor_uses_first_signature() {
        let ctor = Declaration::new("constructor", Kind::Constructor)
            .with_signature(Signature::new(
                vec![Parameter::new("name", Type::intrinsic("string"))],
                Some(Type::reference("Client")),
            ))
            .with_signature(Signature::new(vec![], Some(Type::reference("Client"))));
        let class = Declaration::new("Client", Kind::Class).with_child(ctor);
        let out = render(&class);
        assert!(out.contains("## Constructor\n\n```typescript\nnew Client(name: string)\n```\n"));
        assert_eq!(out.matches("new Client(").count(), 1);
        assert!(out.contains("*1 additional constructor overload not shown.*"));
        assert!(!out.contains("name=\"returns\""));
    }

    #[test]
    fn methods_flat_and_collapsed() {
        let method = |name: &str| {
            Declaration::new(name, Kind::Method).with_signature(Signature::new(
                vec![],
                Some(Type::intrinsic("number")),
            ))
        };
        let few = Declaration::new("A", Kind::Class)
            .with_child(method("one"))
            .with_child(method("two"));
        let out = render(&few);
        assert!(out.contains("### one\n\n```typescript\none(): number\n```\n"));
        assert!(out.contains("<ResponseField name=\"returns\" type=\"number\">"));

        let many = (0..4).fold(Declaration::new("B", Kind::Class), |c, i| {
            c.with_child(method(&format!("m{}", i)))
        });
        let out = render(&many);
        assert_eq!(out.matches("<Accordion title=\"m").count(), 4);
        assert!(!out.contains("### m0"));
    }

    #[test]
    fn deprecated_method_warns_before_signature() {
        let mut old = Declaration::new("fetch", Kind::Method)
            .with_signature(Signature::new(vec![], Some(Type::intrinsic("number"))));
        old.comment = Some(Comment {
            deprecated: Some("Use load instead".into()),
            ..Default::default()
        });
        let class = Declaration::new("Store", Kind::Class).with_child(old);
        let out = render(&class);
        assert!(out.contains(
            "### fetch\n\n<Warning>\n**Deprecated.** Use load instead\n</Warning>\n\n```typescript\nfetch(): number\n```\n"
        ));
    }

    #[test]
    fn interface_properties_required_unless_optional() {
        let iface = Declaration::new("Opts", Kind::Interface)
            .with_child(Declaration::new("a", Kind::Property).with_type(Type::intrinsic("string")))
            .with_child(
                Declaration::new("b", Kind::Property)
                    .with_type(Type::intrinsic("number"))
                    .optional(),
            );
        let out = render(&iface);
        assert!(out.contains("<ResponseField name=\"a\" type=\"string\" required>"));
        assert!(out.contains("<ResponseField name=\"b\" type=\"number\">"));
    }

    #[test]
    fn function_uses_labelled_disclosures() {
        let func = Declaration::new("greet", Kind::Function).with_signature(Signature::new(
            vec![Parameter::new("name", Type::intrinsic("string"))],
            Some(Type::intrinsic("string")),
        ));
        let out = render(&func);
        assert!(out.contains("```typescript\ngreet(name: string): string\n```"));
        assert!(out.contains("<Accordion title=\"Parameters\">"));
        assert!(out.contains("<Accordion title=\"Returns\">"));
        assert!(out.contains("<ParamField path=\"name\" type=\"string\" required>\nThe name string.\n</ParamField>"));
    }

    #[test]
    fn function_overloads_get_headings() {
        let mut first = Signature::new(vec![], Some(Type::intrinsic("void")));
        first.comment = Some(Comment {
            summary: Some("No-arg form".into()),
            ..Default::default()
        });
        let func = Declaration::new("run", Kind::Function)
            .with_signature(first)
            .with_signature(Signature::new(
                vec![Parameter::new("n", Type::intrinsic("number"))],
                None,
            ));
        let out = render(&func);
        assert!(out.contains("## Overload 1"));
        assert!(out.contains("## Overload 2"));
        assert!(out.contains("No-arg form"));
        assert_eq!(out.matches("<AccordionGroup>").count(), 1);
    }

    #[test]
    fn enum_table() {
        let e = Declaration::new("Letter", Kind::Enum)
            .with_child({
                let mut m = Declaration::new("A", Kind::EnumMember);
                m.default_value = Some("\"A\"".into());
                m
            })
            .with_child(
                Declaration::new("B", Kind::EnumMember)
                    .with_type(Type::literal_str("B"))
                    .with_summary("The | letter b"),
            );
        let out = render(&e);
        assert!(out.contains("| Member | Value | Description |\n| --- | --- | --- |\n"));
        assert!(out.contains("| `A` | `\"A\"` | — |"));
        assert!(out.contains("| `B` | `\"B\"` | The \\| letter b. |"));
        assert!(!out.contains("Accordion"));
    }

    #[test]
    fn type_alias_literal_span_unless_linked() {
        let plain = Declaration::new("Id", Kind::TypeAlias).with_type(Type::Union {
            members: vec![Type::intrinsic("string"), Type::intrinsic("number")],
        });
        assert!(render(&plain).contains("**Type:** `string | number`"));

        let mut refs = ReferenceMap::new("/");
        refs.insert("User", Location::new("classes/user"));
        let linked = Declaration::new("Users", Kind::TypeAlias)
            .with_type(Type::generic("Promise", vec![Type::reference("User")]));
        assert!(render_with(&linked, &refs).contains("**Type:** Promise\\<[User](/classes/user)\\>"));
    }

    #[test]
    fn module_lists_children() {
        let mut refs = ReferenceMap::new("/");
        refs.insert("Client", Location::new("classes/client"));
        let module = Declaration::new("net", Kind::Module)
            .with_child(Declaration::new("Client", Kind::Class))
            .with_child(Declaration::new("helper", Kind::Variable));
        let out = render_with(&module, &refs);
        assert!(out.contains("## Contents\n\n- [Client](/classes/client) (Class)\n"));
        assert!(!out.contains("helper"));
    }

    #[test]
    fn private_members_hidden() {
        let mut secret = Declaration::new("secret", Kind::Property).with_type(Type::intrinsic("string"));
        secret.flags.private = true;
        let class = Declaration::new("S", Kind::Class).with_child(secret);
        assert!(!render(&class).contains("secret"));
    }

    #[test]
    fn extends_links_base() {
        let mut refs = ReferenceMap::new("/");
        refs.insert("Base", Location::new("classes/base"));
        let mut class = Declaration::new("Derived", Kind::Class);
        class.extended_types.push(Type::reference("Base"));
        class.implemented_types.push(Type::reference("Serializable"));
        let out = render_with(&class, &refs);
        assert!(out.contains("**Extends:** [Base](/classes/base)"));
        assert!(out.contains("**Implements:** `Serializable`"));
    }
}
