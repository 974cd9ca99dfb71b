//! Symbol index
//!
//! Walks the declaration tree once and maps every fully-qualified name to
//! its node. Members (constructors, methods, properties) are keyed as
//! `Parent.member`; everything else is keyed by its bare name.

use crate::node::DeclarationNode;
use indexmap::IndexMap;

/// An indexed declaration plus the naming context computed while indexing
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry<'a> {
    /// The declaration
    pub node: &'a DeclarationNode,
    /// Computed name of the enclosing declaration (members only)
    pub parent_name: Option<String>,
    /// `parent_name.name` (members only)
    pub full_name: Option<String>,
}

impl IndexEntry<'_> {
    /// Anchor id: the full name for members, else the bare name
    pub fn id(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.node.name)
    }
}

/// Immutable map from fully-qualified name to declaration
///
/// Built once per tree. Keys are unique; when two declarations compute the
/// same name the one visited later wins.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex<'a> {
    entries: IndexMap<String, IndexEntry<'a>>,
}

impl<'a> SymbolIndex<'a> {
    /// Index every declaration reachable from `root`
    pub fn build(root: &'a DeclarationNode) -> Self {
        let mut index = Self::default();
        index.traverse(root, None);
        tracing::debug!(symbols = index.len(), root = %root.name, "Built symbol index");
        index
    }

    fn traverse(&mut self, node: &'a DeclarationNode, parent_name: Option<&str>) {
        let (key, entry) = match parent_name {
            Some(parent) if node.kind.is_member() => {
                let full_name = format!("{}.{}", parent, node.name);
                let entry = IndexEntry {
                    node,
                    parent_name: Some(parent.to_string()),
                    full_name: Some(full_name.clone()),
                };
                (full_name, entry)
            }
            _ => (
                node.name.clone(),
                IndexEntry {
                    node,
                    parent_name: None,
                    full_name: None,
                },
            ),
        };

        if self.entries.contains_key(&key) {
            tracing::debug!(name = %key, "Duplicate symbol name, keeping the later declaration");
        }
        self.entries.insert(key.clone(), entry);

        for child in &node.children {
            self.traverse(child, Some(key.as_str()));
        }
    }

    /// Look up an entry by fully-qualified name
    pub fn get(&self, name: &str) -> Option<&IndexEntry<'a>> {
        self.entries.get(name)
    }

    /// Look up a declaration by fully-qualified name
    pub fn node(&self, name: &str) -> Option<&'a DeclarationNode> {
        self.entries.get(name).map(|entry| entry.node)
    }

    /// Whether `name` is indexed
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed names, in first-visit order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries, in first-visit order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry<'a>)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::DeclarationKind;
    use crate::test::client_library;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_member_names_are_qualified() {
        let tree = client_library();
        let index = SymbolIndex::build(&tree);

        let fetch = index.get("Client.fetch").unwrap();
        assert_eq!(fetch.node.kind, DeclarationKind::Method);
        assert_eq!(fetch.parent_name.as_deref(), Some("Client"));
        assert_eq!(fetch.id(), "Client.fetch");

        assert!(index.contains("Client.constructor"));
        assert!(index.contains("Client.cache"));
        assert!(!index.contains("fetch"));
    }

    #[test]
    fn test_non_members_use_bare_names() {
        let tree = client_library();
        let index = SymbolIndex::build(&tree);

        let options = index.get("RequestOptions").unwrap();
        assert_eq!(options.node.kind, DeclarationKind::Interface);
        assert_eq!(options.full_name, None);
        assert_eq!(options.id(), "RequestOptions");

        // interface members are qualified under the interface
        assert!(index.contains("RequestOptions.url"));
    }

    #[test]
    fn test_every_member_key_is_parent_dot_name() {
        let tree = client_library();
        let index = SymbolIndex::build(&tree);

        for (key, entry) in index.iter() {
            match (&entry.parent_name, entry.node.kind.is_member()) {
                (Some(parent), true) => {
                    assert_eq!(key, format!("{}.{}", parent, entry.node.name));
                    assert!(index.contains(parent));
                }
                _ => assert_eq!(key, entry.node.name),
            }
        }
    }

    #[test]
    fn test_nested_members_chain_names() {
        let tree = DeclarationNode::new("lib", DeclarationKind::Other).with_child(
            DeclarationNode::new("Outer", DeclarationKind::Other).with_child(
                DeclarationNode::new("inner", DeclarationKind::Property).with_child(
                    DeclarationNode::new("leaf", DeclarationKind::Property),
                ),
            ),
        );
        let index = SymbolIndex::build(&tree);
        assert!(index.contains("Outer.inner"));
        assert!(index.contains("Outer.inner.leaf"));
    }

    #[test]
    fn test_root_member_has_no_parent() {
        let tree = DeclarationNode::new("method", DeclarationKind::Method);
        let index = SymbolIndex::build(&tree);
        let entry = index.get("method").unwrap();
        assert_eq!(entry.parent_name, None);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let tree = DeclarationNode::new("lib", DeclarationKind::Other)
            .with_child(DeclarationNode::new("Link", DeclarationKind::Interface))
            .with_child(DeclarationNode::new("Link", DeclarationKind::TypeAlias));
        let index = SymbolIndex::build(&tree);
        assert_eq!(index.len(), 2);
        assert_eq!(index.node("Link").unwrap().kind, DeclarationKind::TypeAlias);
    }

    #[test]
    fn test_build_is_idempotent() {
        let tree = client_library();
        let first = SymbolIndex::build(&tree);
        let second = SymbolIndex::build(&tree);

        let first_names: Vec<_> = first.names().collect();
        let second_names: Vec<_> = second.names().collect();
        assert_eq!(first_names, second_names);
        for (name, entry) in first.iter() {
            assert_eq!(second.get(name), Some(entry));
        }
    }
}
