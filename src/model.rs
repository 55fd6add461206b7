//! Declaration graph handed over by the upstream extractor. Read-only input.
//!
//! The tree is owned top-down: every declaration owns its `children`, and the
//! parent relation is recovered by traversal rather than stored as a pointer.

use serde::{Deserialize, Serialize};

/// One documentable entity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Declaration {
    pub name: String,
    pub kind: Kind,
    pub comment: Option<Comment>,
    /// Call signatures (functions, methods, constructors)
    pub signatures: Vec<Signature>,
    pub children: Vec<Declaration>,
    /// Property and type-alias type
    #[serde(rename = "type")]
    pub type_expression: Option<Type>,
    pub flags: Flags,
    /// Literal value of an enum member
    pub default_value: Option<String>,
    pub extended_types: Vec<Type>,
    pub implemented_types: Vec<Type>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.comment.get_or_insert_with(Comment::default).summary = Some(summary.into());
        self
    }

    pub fn with_child(mut self, child: Declaration) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn with_type(mut self, ty: Type) -> Self {
        self.type_expression = Some(ty);
        self
    }

    pub fn optional(mut self) -> Self {
        self.flags.optional = true;
        self
    }

    /// Summary text, if any non-blank summary was supplied.
    pub fn summary(&self) -> Option<&str> {
        self.comment
            .as_ref()
            .and_then(|c| c.summary.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Declaration kind. Unrecognized kinds deserialize to [`Kind::Unknown`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Kind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    Accessor,
    TypeAlias,
    TypeParameter,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Kind {
    /// Kinds that receive their own output page.
    pub fn is_page_worthy(self) -> bool {
        matches!(
            self,
            Kind::Class | Kind::Interface | Kind::Function | Kind::Enum | Kind::TypeAlias | Kind::Module
        )
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Kind::Project => "Project",
            Kind::Module => "Module",
            Kind::Namespace => "Namespace",
            Kind::Enum => "Enumeration",
            Kind::EnumMember => "Enumeration member",
            Kind::Variable => "Variable",
            Kind::Function => "Function",
            Kind::Class => "Class",
            Kind::Interface => "Interface",
            Kind::Constructor => "Constructor",
            Kind::Property => "Property",
            Kind::Method => "Method",
            Kind::Accessor => "Accessor",
            Kind::TypeAlias => "Type alias",
            Kind::TypeParameter => "Type parameter",
            Kind::Unknown => "Unknown",
        }
    }
}

/// Rich-text documentation attached to a declaration or signature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub summary: Option<String>,
    pub remarks: Option<String>,
    pub examples: Vec<String>,
    pub returns: Option<String>,
    pub deprecated: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flags {
    pub optional: bool,
    pub readonly: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub private: bool,
    pub protected: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

/// One callable shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub comment: Option<Comment>,
}

impl Signature {
    pub fn new(parameters: Vec<Parameter>, return_type: Option<Type>) -> Self {
        Self {
            parameters,
            return_type,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<Type>,
    pub optional: bool,
    pub comment: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional: false,
            comment: None,
        }
    }
}

/// Type-expression language. Closed tagged union, recursively composed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Type {
    Intrinsic {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    Reference {
        name: String,
        #[serde(default)]
        type_arguments: Vec<Type>,
    },
    Array {
        element: Box<Type>,
    },
    Union {
        members: Vec<Type>,
    },
    Intersection {
        members: Vec<Type>,
    },
    Literal {
        value: serde_json::Value,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<Type>,
    },
    Reflection {
        #[serde(default)]
        signature: Option<Box<Signature>>,
        #[serde(default)]
        members: Option<Vec<Declaration>>,
    },
    #[serde(rename_all = "camelCase")]
    Conditional {
        check: Box<Type>,
        extends: Box<Type>,
        true_branch: Box<Type>,
        false_branch: Box<Type>,
    },
    IndexedAccess {
        object: Box<Type>,
        index: Box<Type>,
    },
    Query {
        name: String,
    },
    Predicate {
        subject: String,
        #[serde(rename = "targetType")]
        target: Option<Box<Type>>,
    },
    #[serde(other)]
    Unknown,
}

impl Type {
    pub fn intrinsic(name: &str) -> Self {
        Type::Intrinsic {
            name: name.to_string(),
        }
    }

    pub fn reference(name: &str) -> Self {
        Type::Reference {
            name: name.to_string(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: &str, type_arguments: Vec<Type>) -> Self {
        Type::Reference {
            name: name.to_string(),
            type_arguments,
        }
    }

    pub fn literal_str(value: &str) -> Self {
        Type::Literal {
            value: serde_json::Value::String(value.to_string()),
        }
    }

    /// True when the type is the `void` intrinsic.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Intrinsic { name } if name == "void")
    }

    /// Members of an anonymous object shape, when this is one.
    pub fn object_members(&self) -> Option<&[Declaration]> {
        match self {
            Type::Reflection {
                signature: None,
                members: Some(members),
            } if !members.is_empty() => Some(members),
            _ => None,
        }
    }
}
