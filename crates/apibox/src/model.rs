//! Render model
//!
//! The plain data handed to the template step: one `RenderModel` per
//! documented symbol, merged with the caller's template options.

use crate::diagnostics::ApiBoxResult;
use crate::params::Member;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Caller-supplied template overrides, passed through untouched
pub type TemplateOptions = IndexMap<String, Value>;

/// Heading of a member group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Positional parameters
    Arguments,
    /// Fields of the options parameter
    Options,
    /// Properties of an interface or object-shaped alias
    Properties,
}

impl GroupKind {
    /// Heading text
    pub fn title(&self) -> &'static str {
        match self {
            GroupKind::Arguments => "Arguments",
            GroupKind::Options => "Options",
            GroupKind::Properties => "Properties",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A titled list of members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Heading
    pub name: GroupKind,
    /// Rows
    pub members: Vec<Member>,
}

impl Group {
    /// Create a group
    pub fn new(name: GroupKind, members: Vec<Member>) -> Self {
        Self { name, members }
    }
}

/// Everything a template needs to draw one API box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    /// Anchor id (fully-qualified name)
    pub id: String,
    /// Local name
    pub name: String,
    /// Flat type, only for plain type aliases
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub ty: Option<String>,
    /// One-line signature
    pub signature: String,
    /// Short summary
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    /// Member groups, in display order
    pub groups: Vec<Group>,
    /// Repository slug for "defined at" links
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub repo: Option<String>,
    /// Defining file
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_file: Option<String>,
    /// Defining line
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_line: Option<usize>,
}

impl RenderModel {
    /// Find a group by heading
    pub fn group(&self, kind: GroupKind) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == kind)
    }

    /// Every member across all groups
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.groups.iter().flat_map(|g| g.members.iter())
    }

    /// Template context: this model with `options` laid over it.
    /// Options win on key collision.
    pub fn into_context(self, options: &TemplateOptions) -> ApiBoxResult<Map<String, Value>> {
        let mut context = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in options {
            context.insert(key.clone(), value.clone());
        }
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn model() -> RenderModel {
        RenderModel {
            id: "Client.fetch".into(),
            name: "fetch".into(),
            ty: None,
            signature: "fetch(options)".into(),
            summary: Some("Fetches.".into()),
            groups: vec![Group::new(
                GroupKind::Options,
                vec![Member::new("url", "string")],
            )],
            repo: None,
            source_file: Some("src/client.ts".into()),
            source_line: Some(12),
        }
    }

    #[test]
    fn test_context_shape() {
        let context = model().into_context(&TemplateOptions::new()).unwrap();
        assert_eq!(
            Value::Object(context),
            json!({
                "id": "Client.fetch",
                "name": "fetch",
                "signature": "fetch(options)",
                "summary": "Fetches.",
                "groups": [{
                    "name": "Options",
                    "members": [{"name": "url", "type": "string", "isOptions": false, "optional": false}]
                }],
                "sourceFile": "src/client.ts",
                "sourceLine": 12
            })
        );
    }

    #[test]
    fn test_options_override_model() {
        let mut options = TemplateOptions::new();
        options.insert("name".into(), json!("client.fetch"));
        options.insert("nested".into(), json!(true));

        let context = model().into_context(&options).unwrap();
        assert_eq!(context["name"], json!("client.fetch"));
        assert_eq!(context["nested"], json!(true));
        assert_eq!(context["id"], json!("Client.fetch"));
    }

    #[test]
    fn test_group_lookup() {
        let model = model();
        assert!(model.group(GroupKind::Options).is_some());
        assert!(model.group(GroupKind::Arguments).is_none());
        assert_eq!(model.members().count(), 1);
        assert_eq!(GroupKind::Properties.to_string(), "Properties");
    }
}
