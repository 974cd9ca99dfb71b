//! Declaration tree nodes
//!
//! This module provides `DeclarationNode`, the uniform reflection shape
//! the declaration reflector emits for every symbol, member, call
//! signature, parameter and index signature. Field names follow the
//! reflector's JSON output; every field is optional there.

use crate::diagnostics::{ApiBoxError, ApiBoxResult};
use crate::types::TypeDescriptor;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Prefix the reflector gives compiler-generated names (`__type`, `__0`)
pub const SYNTHETIC_NAME_PREFIX: &str = "__";

/// Whether `name` was made up by the reflector rather than written by a
/// human. Synthetic names are never shown in rendered signatures.
pub fn is_synthetic_name(name: &str) -> bool {
    name.starts_with(SYNTHETIC_NAME_PREFIX)
}

/// Inverse of [`is_synthetic_name`]
pub fn is_readable_name(name: &str) -> bool {
    !is_synthetic_name(name)
}

/// Kind of declaration (`kindString` in the reflector output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeclarationKind {
    /// Class constructor
    Constructor,
    /// Class or interface method
    Method,
    /// Class or interface property
    Property,
    /// Interface
    Interface,
    /// Type alias
    #[serde(rename = "Type alias", alias = "TypeAlias")]
    TypeAlias,
    /// Call signature of a function-like declaration
    #[serde(rename = "Call signature", alias = "CallSignature")]
    CallSignature,
    /// Any other kind the renderer has no special handling for
    #[default]
    #[serde(other)]
    Other,
}

impl DeclarationKind {
    /// Members are indexed under `Parent.member`
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Constructor | DeclarationKind::Method | DeclarationKind::Property
        )
    }

    /// Get display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            DeclarationKind::Constructor => "Constructor",
            DeclarationKind::Method => "Method",
            DeclarationKind::Property => "Property",
            DeclarationKind::Interface => "Interface",
            DeclarationKind::TypeAlias => "Type alias",
            DeclarationKind::CallSignature => "Call signature",
            DeclarationKind::Other => "Other",
        }
    }
}

/// Doc comment attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// First paragraph
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub short_text: Option<String>,

    /// Remaining text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

impl Comment {
    /// Create a comment with only a short text
    pub fn short(text: impl Into<String>) -> Self {
        Self {
            short_text: Some(text.into()),
            text: None,
        }
    }

    /// Long text if present, else the short text
    pub fn description(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.short_text.as_deref())
    }
}

/// Where a declaration was defined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    /// Source filename
    #[serde(default)]
    pub file_name: String,
    /// 1-indexed line number
    #[serde(default)]
    pub line: usize,
}

impl SourceReference {
    /// Create a new source reference
    pub fn new(file_name: impl Into<String>, line: usize) -> Self {
        Self {
            file_name: file_name.into(),
            line,
        }
    }
}

/// A node in the declaration tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationNode {
    /// Raw identifier, possibly synthetic
    #[serde(default)]
    pub name: String,

    /// Declaration kind
    #[serde(rename = "kindString", default)]
    pub kind: DeclarationKind,

    /// Members, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DeclarationNode>,

    /// Own type (property type, alias target, or signature return type)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeDescriptor>,

    /// Call signatures; the first one is canonical
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<DeclarationNode>,

    /// Parameters of a call signature
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<DeclarationNode>,

    /// Index signatures of an object shape
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub index_signature: Vec<DeclarationNode>,

    /// Doc comment
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<Comment>,

    /// Definition sites
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceReference>,

    /// Name as written in source, for destructured parameters
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub original_name: Option<String>,

    /// Parameter default value, as source text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

/// Older reflector versions emit a single index signature object
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<DeclarationNode>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<DeclarationNode>),
        One(Box<DeclarationNode>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(nodes) => nodes,
        OneOrMany::One(node) => vec![*node],
    })
}

impl DeclarationNode {
    /// Create a new node
    pub fn new(name: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Parse a tree from reflector JSON
    pub fn from_json(json: &str) -> ApiBoxResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a tree from a reflector JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ApiBoxResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ApiBoxError::FileNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the type
    pub fn with_type(mut self, ty: TypeDescriptor) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Add a child
    pub fn with_child(mut self, child: DeclarationNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<DeclarationNode>) -> Self {
        self.children = children;
        self
    }

    /// Add a call signature
    pub fn with_signature(mut self, signature: DeclarationNode) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Add a parameter
    pub fn with_parameter(mut self, parameter: DeclarationNode) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add an index signature
    pub fn with_index_signature(mut self, signature: DeclarationNode) -> Self {
        self.index_signature.push(signature);
        self
    }

    /// Set a short comment
    pub fn with_comment(mut self, short_text: impl Into<String>) -> Self {
        self.comment = Some(Comment::short(short_text));
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the original name
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(name.into());
        self
    }

    /// Add a source reference
    pub fn with_source(mut self, file_name: impl Into<String>, line: usize) -> Self {
        self.sources.push(SourceReference::new(file_name, line));
        self
    }

    /// Canonical call signature
    pub fn first_signature(&self) -> Option<&DeclarationNode> {
        self.signatures.first()
    }

    /// Inline declaration of a reflection-typed node
    pub fn reflected_declaration(&self) -> Option<&DeclarationNode> {
        self.ty.as_ref().and_then(TypeDescriptor::declaration)
    }

    /// A property whose value is an inline shape (typically a function)
    pub fn is_reflected_property(&self) -> bool {
        self.kind == DeclarationKind::Property
            && self.ty.as_ref().is_some_and(TypeDescriptor::is_reflection)
    }

    /// Inline object shape of this node's type, when it has members.
    /// Such a type cannot be shown on one line.
    pub fn object_shape(&self) -> Option<&DeclarationNode> {
        self.reflected_declaration()
            .filter(|decl| !decl.children.is_empty())
    }

    /// Short text of this node's own comment
    pub fn short_text(&self) -> Option<&str> {
        self.comment.as_ref()?.short_text.as_deref()
    }

    /// First definition site that names a file
    pub fn source(&self) -> Option<&SourceReference> {
        self.sources.first().filter(|s| !s.file_name.is_empty())
    }
}
