//! Type descriptors
//!
//! A closed sum over the type shapes the reflector emits. Anything the
//! renderer does not know how to name lands in [`TypeDescriptor::Unknown`]
//! and falls back to `any` at render time.

use crate::node::DeclarationNode;
use serde::{Deserialize, Serialize};

/// Type attached to a declaration (`"type"` in the reflector output)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeDescriptor {
    /// Primitive type, optionally an array of it
    #[serde(alias = "instrinct")]
    Intrinsic {
        #[serde(default)]
        name: String,
        #[serde(rename = "isArray", default)]
        is_array: bool,
    },

    /// `A | B | ...` in declaration order
    Union {
        #[serde(default)]
        types: Vec<TypeDescriptor>,
    },

    /// Named reference to another symbol
    Reference {
        #[serde(default)]
        name: String,
        #[serde(
            rename = "typeArguments",
            default,
            skip_serializing_if = "Vec::is_empty"
        )]
        type_arguments: Vec<TypeDescriptor>,
    },

    /// String literal type
    StringLiteral {
        #[serde(default)]
        value: String,
    },

    /// Inline anonymous shape
    Reflection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        declaration: Option<Box<DeclarationNode>>,
    },

    /// Any tag the renderer cannot name
    #[serde(other)]
    Unknown,
}

impl TypeDescriptor {
    /// Create an intrinsic type
    pub fn intrinsic(name: impl Into<String>) -> Self {
        TypeDescriptor::Intrinsic {
            name: name.into(),
            is_array: false,
        }
    }

    /// Create an intrinsic array type
    pub fn intrinsic_array(name: impl Into<String>) -> Self {
        TypeDescriptor::Intrinsic {
            name: name.into(),
            is_array: true,
        }
    }

    /// Create a union type
    pub fn union(types: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Union { types }
    }

    /// Create a reference without type arguments
    pub fn reference(name: impl Into<String>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            type_arguments: vec![],
        }
    }

    /// Create a generic reference
    pub fn generic(name: impl Into<String>, type_arguments: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Reference {
            name: name.into(),
            type_arguments,
        }
    }

    /// Create a string literal type
    pub fn string_literal(value: impl Into<String>) -> Self {
        TypeDescriptor::StringLiteral {
            value: value.into(),
        }
    }

    /// Create an inline shape
    pub fn reflection(declaration: DeclarationNode) -> Self {
        TypeDescriptor::Reflection {
            declaration: Some(Box::new(declaration)),
        }
    }

    /// Inline declaration, for reflection types that carry one
    pub fn declaration(&self) -> Option<&DeclarationNode> {
        match self {
            TypeDescriptor::Reflection {
                declaration: Some(declaration),
            } => Some(&**declaration),
            _ => None,
        }
    }

    /// Generic arguments of a reference
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        match self {
            TypeDescriptor::Reference { type_arguments, .. } => type_arguments,
            _ => &[],
        }
    }

    /// Whether this is a reflection type
    pub fn is_reflection(&self) -> bool {
        matches!(self, TypeDescriptor::Reflection { .. })
    }

    /// Tag name, for diagnostics
    pub fn tag(&self) -> &'static str {
        match self {
            TypeDescriptor::Intrinsic { .. } => "intrinsic",
            TypeDescriptor::Union { .. } => "union",
            TypeDescriptor::Reference { .. } => "reference",
            TypeDescriptor::StringLiteral { .. } => "stringLiteral",
            TypeDescriptor::Reflection { .. } => "reflection",
            TypeDescriptor::Unknown => "unknown",
        }
    }
}
