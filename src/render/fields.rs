//! Field wrappers: `<ParamField>` for inputs, `<ResponseField>` for outputs.

use super::params::{classify, ensure_period, synthesize_description, synthesize_return};
use super::DeclarationRenderer;
use crate::document::{RenderedDocument, Tag};
use crate::model::{Declaration, Kind, Parameter, Signature, Type};
use crate::typefmt::format_type;

pub const PARAM_FIELD: &str = "ParamField";
pub const RESPONSE_FIELD: &str = "ResponseField";
pub const EXPANDABLE: &str = "Expandable";

impl DeclarationRenderer<'_> {
    /// One `<ParamField>` per parameter of `sig`.
    pub(super) fn param_fields(&self, sig: &Signature, doc: &mut RenderedDocument) {
        for param in &sig.parameters {
            self.param_field(param, doc);
        }
    }

    fn param_field(&self, param: &Parameter, doc: &mut RenderedDocument) {
        let display = format_type(param.ty.as_ref(), None);
        let mut tag = Tag::new(PARAM_FIELD)
            .attr(classify(&param.name).attr(), &param.name)
            .attr("type", &display);
        if !param.optional {
            tag = tag.flag("required");
        }

        let description = match param.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(text) => ensure_period(text),
            None => synthesize_description(&param.name, &display),
        };

        doc.open(tag);
        doc.push_markdown(&description, 0);
        if let Some(members) = param.ty.as_ref().and_then(Type::object_members) {
            self.expandable(members, doc);
        }
        doc.close(PARAM_FIELD);
    }

    /// `<ResponseField name="returns">` for a non-void return type.
    pub(super) fn return_field(&self, sig: &Signature, doc: &mut RenderedDocument) -> bool {
        let Some(ty) = sig.return_type.as_ref().filter(|t| !t.is_void()) else {
            return false;
        };
        let description = sig
            .comment
            .as_ref()
            .and_then(|c| c.returns.as_deref())
            .filter(|r| !r.trim().is_empty())
            .map(ensure_period)
            .unwrap_or_else(|| synthesize_return(ty));

        doc.open(
            Tag::new(RESPONSE_FIELD)
                .attr("name", "returns")
                .attr("type", &format_type(Some(ty), None)),
        );
        doc.push_markdown(&description, 0);
        doc.close(RESPONSE_FIELD);
        true
    }

    /// `<ResponseField>` for a property, required unless flagged optional.
    pub(super) fn property_field(&self, prop: &Declaration, doc: &mut RenderedDocument) {
        let ty = property_type(prop);
        let display = format_type(ty, None);
        let mut tag = Tag::new(RESPONSE_FIELD)
            .attr("name", &prop.name)
            .attr("type", &display);
        if !prop.flags.optional {
            tag = tag.flag("required");
        }

        let description = match prop.summary() {
            Some(summary) => ensure_period(summary),
            None => synthesize_description(&prop.name, &display),
        };

        doc.open(tag);
        self.deprecation(prop.comment.as_ref(), doc);
        if prop.flags.readonly {
            doc.text("*Read-only.*");
        }
        doc.push_markdown(&description, 0);
        if let Some(members) = ty.and_then(Type::object_members) {
            self.expandable(members, doc);
        }
        doc.close(RESPONSE_FIELD);
    }

    /// Members of an object-shaped type, nested under `<Expandable>`.
    fn expandable(&self, members: &[Declaration], doc: &mut RenderedDocument) {
        doc.open(Tag::new(EXPANDABLE).attr("title", "properties"));
        for member in members {
            self.property_field(member, doc);
        }
        doc.close(EXPANDABLE);
    }
}

/// Display type of a property-like member.
///
/// Accessors and method-valued members carry their type on a signature.
pub fn property_type(prop: &Declaration) -> Option<&Type> {
    match (&prop.type_expression, prop.kind) {
        (Some(ty), _) => Some(ty),
        (None, Kind::Accessor) => prop.signatures.first().and_then(|s| s.return_type.as_ref()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::Comment;
    use crate::refs::ReferenceMap;

    fn render_with<F: FnOnce(&DeclarationRenderer, &mut RenderedDocument)>(f: F) -> String {
        let refs = ReferenceMap::new("/");
        let config = Config::default();
        let renderer = DeclarationRenderer::new(&refs, &config);
        let mut doc = RenderedDocument::new();
        f(&renderer, &mut doc);
        doc.to_markdown()
    }

    #[test]
    fn param_field_with_location_and_required() {
        let sig = Signature::new(
            vec![Parameter::new("limit", Type::intrinsic("number"))],
            None,
        );
        let out = render_with(|r, doc| r.param_fields(&sig, doc));
        assert_eq!(
            out,
            "<ParamField query=\"limit\" type=\"number\" required>\nThe maximum number of items to return.\n</ParamField>\n"
        );
    }

    #[test]
    fn optional_param_with_comment() {
        let mut param = Parameter::new("name", Type::intrinsic("string"));
        param.optional = true;
        param.comment = Some("Display name..".to_string());
        let sig = Signature::new(vec![param], None);
        let out = render_with(|r, doc| r.param_fields(&sig, doc));
        assert!(out.starts_with("<ParamField path=\"name\" type=\"string\">\n"));
        assert!(out.contains("\nDisplay name.\n"));
    }

    #[test]
    fn void_return_is_skipped() {
        let sig = Signature::new(vec![], Some(Type::intrinsic("void")));
        let out = render_with(|r, doc| {
            assert!(!r.return_field(&sig, doc));
        });
        assert!(out.is_empty());
    }

    #[test]
    fn deprecated_property_warns_inside_field() {
        let mut prop = Declaration::new("old", Kind::Property).with_type(Type::intrinsic("string"));
        prop.comment = Some(Comment {
            deprecated: Some("Use `new` instead".into()),
            ..Default::default()
        });
        let out = render_with(|r, doc| r.property_field(&prop, doc));
        assert!(out.starts_with(
            "<ResponseField name=\"old\" type=\"string\" required>\n<Warning>\n**Deprecated.** Use `new` instead\n</Warning>\n"
        ));
    }

    #[test]
    fn object_parameter_expands() {
        let shape = Type::Reflection {
            signature: None,
            members: Some(vec![Declaration::new("retries", Kind::Property)
                .with_type(Type::intrinsic("number"))
                .optional()]),
        };
        let sig = Signature::new(vec![Parameter::new("options", shape)], None);
        let out = render_with(|r, doc| r.param_fields(&sig, doc));
        assert!(out.contains("<Expandable title=\"properties\">"));
        assert!(out.contains("<ResponseField name=\"retries\" type=\"number\">"));
        assert!(out.contains("type=\"{ retries?: number }\""));
    }
}
