//! Grouping references by identity and assigning placeholders.

use std::collections::HashMap;

use cssurl_core::NodeId;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::extract::UrlReference;

/// Prefix of every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "___CSS_LOADER_URL_IMPORT_";

/// Placeholder for the group with the given index.
pub fn placeholder_name(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{index}___")
}

/// Identity of a node across all trees of a run: the declaration the tree
/// belongs to and the node's slot in that tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub declaration: usize,
    pub node: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    url: String,
    hash: String,
    needs_quotes: bool,
}

/// All occurrences of one `(url, hash, needs_quotes)` identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlGroup {
    pub index: usize,
    pub url: String,
    pub hash: String,
    pub needs_quotes: bool,
    pub placeholder: String,
    pub nodes: SmallVec<[NodeRef; 4]>,
}

/// Groups in first-seen order plus the node to group lookup.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: Vec<UrlGroup>,
    by_node: HashMap<NodeRef, usize>,
}

impl Groups {
    pub fn as_slice(&self) -> &[UrlGroup] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UrlGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group a node was assigned to.
    pub fn group_of(&self, node: NodeRef) -> Option<&UrlGroup> {
        self.by_node.get(&node).map(|&index| &self.groups[index])
    }

    /// Placeholder a node is replaced with.
    pub fn placeholder_for(&self, node: NodeRef) -> Option<&str> {
        self.group_of(node).map(|group| group.placeholder.as_str())
    }
}

/// Group references given as `(declaration index, reference)` in document order.
///
/// Group indices follow first occurrence. A node listed twice stays in the
/// group it was first assigned to.
pub fn collect_groups<'a, I>(references: I) -> Groups
where
    I: IntoIterator<Item = (usize, &'a UrlReference)>,
{
    let mut by_key: IndexMap<GroupKey, UrlGroup> = IndexMap::new();
    let mut by_node = HashMap::new();

    for (declaration, reference) in references {
        let node = NodeRef {
            declaration,
            node: reference.node,
        };
        if by_node.contains_key(&node) {
            continue;
        }

        let key = GroupKey {
            url: reference.url.clone(),
            hash: reference.hash.clone(),
            needs_quotes: reference.needs_quotes,
        };
        let next_index = by_key.len();
        let group = by_key.entry(key).or_insert_with(|| {
            tracing::trace!(index = next_index, url = %reference.url, "new url group");
            UrlGroup {
                index: next_index,
                url: reference.url.clone(),
                hash: reference.hash.clone(),
                needs_quotes: reference.needs_quotes,
                placeholder: placeholder_name(next_index),
                nodes: SmallVec::new(),
            }
        });
        group.nodes.push(node);
        by_node.insert(node, group.index);
    }

    Groups {
        groups: by_key.into_values().collect(),
        by_node,
    }
}
