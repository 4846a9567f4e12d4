//! Parsed representation of a single CSS property value.
//!
//! Nodes live in an arena owned by [`ValueTree`]. A [`NodeId`] is a stable
//! slot index, so it doubles as node identity: two ids are the same node
//! exactly when they are equal, regardless of node contents.

use std::fmt;
use std::ops::Index;

/// Slot index of a node inside its owning [`ValueTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// A node of a value tree.
///
/// Every variant keeps enough raw text for exact re-serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueNode {
    /// Unquoted literal text, e.g. `no-repeat`, `10px` or an unquoted url body.
    Word { value: String },
    /// Quoted literal. `value` is the raw text between the quotes, escapes included.
    String {
        value: String,
        quote: char,
        unclosed: bool,
    },
    /// `name(...)`. `before`/`after` hold whitespace just inside the parentheses.
    Function {
        name: String,
        before: String,
        after: String,
        children: Vec<NodeId>,
        unclosed: bool,
    },
    /// A run of whitespace between other nodes.
    Space { value: String },
    /// `,`, `/` or `:` together with the whitespace around it.
    Div {
        value: char,
        before: String,
        after: String,
    },
    /// `/* ... */`
    Comment { value: String, unclosed: bool },
}

/// Tag of a [`ValueNode`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Word,
    String,
    Function,
    Space,
    Div,
    Comment,
}

impl ValueNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            ValueNode::Word { .. } => NodeKind::Word,
            ValueNode::String { .. } => NodeKind::String,
            ValueNode::Function { .. } => NodeKind::Function,
            ValueNode::Space { .. } => NodeKind::Space,
            ValueNode::Div { .. } => NodeKind::Div,
            ValueNode::Comment { .. } => NodeKind::Comment,
        }
    }

    /// Function name, if this is a function node.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            ValueNode::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Children of a function node; empty for every other kind.
    pub fn children(&self) -> &[NodeId] {
        match self {
            ValueNode::Function { children, .. } => children,
            _ => &[],
        }
    }
}

/// Traversal control returned by the [`ValueTree::walk`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    /// Do not descend into this node's children.
    Skip,
}

/// The parsed form of one declaration value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueTree {
    nodes: Vec<ValueNode>,
    roots: Vec<NodeId>,
}

impl ValueTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the arena. The node is not attached anywhere yet.
    pub fn alloc(&mut self, node: ValueNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn set_roots(&mut self, roots: Vec<NodeId>) {
        self.roots = roots;
    }

    /// Top-level nodes in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&ValueNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order traversal.
    ///
    /// Returning [`Walk::Skip`] for a function node leaves its subtree unvisited.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &ValueNode) -> Walk,
    {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if visit(id, node) == Walk::Skip {
                continue;
            }
            stack.extend(node.children().iter().rev().copied());
        }
    }

    /// Turn a node into a bare word carrying `value`.
    ///
    /// Quoting, escapes and any children of the old node are dropped from
    /// the serialized output. Returns `false` if `id` is not in this tree.
    pub fn replace_with_word(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                *node = ValueNode::Word { value: value.into() };
                true
            }
            None => false,
        }
    }

    /// Serialize a sequence of nodes back to text.
    pub fn stringify(&self, ids: &[NodeId]) -> String {
        let mut out = String::new();
        for &id in ids {
            self.write_node(id, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };

        match node {
            ValueNode::Word { value } | ValueNode::Space { value } => out.push_str(value),
            ValueNode::String { value, quote, unclosed } => {
                out.push(*quote);
                out.push_str(value);
                if !unclosed {
                    out.push(*quote);
                }
            }
            ValueNode::Function {
                name,
                before,
                after,
                children,
                unclosed,
            } => {
                out.push_str(name);
                out.push('(');
                out.push_str(before);
                for &child in children {
                    self.write_node(child, out);
                }
                out.push_str(after);
                if !unclosed {
                    out.push(')');
                }
            }
            ValueNode::Div { value, before, after } => {
                out.push_str(before);
                out.push(*value);
                out.push_str(after);
            }
            ValueNode::Comment { value, unclosed } => {
                out.push_str("/*");
                out.push_str(value);
                if !unclosed {
                    out.push_str("*/");
                }
            }
        }
    }
}

impl Index<NodeId> for ValueTree {
    type Output = ValueNode;

    fn index(&self, id: NodeId) -> &ValueNode {
        &self.nodes[id.0]
    }
}

impl fmt::Display for ValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify(&self.roots))
    }
}
