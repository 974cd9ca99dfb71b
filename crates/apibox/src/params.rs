//! Parameter and property listings
//!
//! This module provides `Member`, one row in a rendered group: a
//! positional argument, a field of an options object, or a property of
//! an interface or object-shaped alias.

use crate::node::{is_readable_name, DeclarationNode};
use serde::{Deserialize, Serialize};

/// Name given to a parameter the reflector left without a readable name.
/// A parameter with this name is documented field by field.
pub const OPTIONS_PARAMETER_NAME: &str = "options";

/// A documented parameter or property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Display name
    pub name: String,

    /// Rendered type
    #[serde(rename = "type")]
    pub ty: String,

    /// Documentation text
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    /// Whether this is the trailing options object
    #[serde(default)]
    pub is_options: bool,

    /// Whether the parameter has a default value
    #[serde(default)]
    pub optional: bool,

    /// Fields of an object-typed parameter
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,
}

impl Member {
    /// Create a member with a name and rendered type
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            description: None,
            is_options: false,
            optional: false,
            properties: vec![],
        }
    }

    /// Set documentation
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `name: type`
    pub fn to_typescript(&self) -> String {
        format!("{}: {}", self.name, self.ty)
    }
}

/// Display name for a signature parameter.
///
/// Prefers the reflected name, then the name written in source, and
/// otherwise assumes a destructured options object.
pub fn parameter_name(param: &DeclarationNode) -> String {
    if is_readable_name(&param.name) {
        return param.name.clone();
    }
    match param.original_name.as_deref() {
        Some(original) if is_readable_name(original) => original.to_string(),
        _ => OPTIONS_PARAMETER_NAME.to_string(),
    }
}

/// Join `names` between `left` and `right` delimiters
pub fn delimited<S: AsRef<str>>(names: &[S], left: &str, right: &str) -> String {
    let joined: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    format!("{}{}{}", left, joined.join(", "), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DeclarationKind;

    fn param(name: &str) -> DeclarationNode {
        DeclarationNode::new(name, DeclarationKind::Other)
    }

    #[test]
    fn test_readable_name_wins() {
        assert_eq!(parameter_name(&param("query")), "query");
        assert_eq!(
            parameter_name(&param("query").with_original_name("q")),
            "query"
        );
    }

    #[test]
    fn test_original_name_fallback() {
        assert_eq!(
            parameter_name(&param("__0").with_original_name("config")),
            "config"
        );
    }

    #[test]
    fn test_options_fallback() {
        assert_eq!(parameter_name(&param("__0")), OPTIONS_PARAMETER_NAME);
        assert_eq!(
            parameter_name(&param("__0").with_original_name("__1")),
            OPTIONS_PARAMETER_NAME
        );
    }

    #[test]
    fn test_delimited() {
        assert_eq!(delimited(&["a", "b"], "(", ")"), "(a, b)");
        assert_eq!(delimited::<&str>(&[], "(", ")"), "()");
        assert_eq!(delimited(&["key:string".to_string()], "[", "]"), "[key:string]");
    }

    #[test]
    fn test_member_to_typescript() {
        let member = Member::new("url", "string").with_description("Endpoint.");
        assert_eq!(member.to_typescript(), "url: string");
        assert_eq!(member.description.as_deref(), Some("Endpoint."));
    }
}
