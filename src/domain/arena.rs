use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::hierarchy::HierarchyProvider;

/// Data payload for tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Stable identifier, used as option value
    pub id: String,
    /// Display label
    pub label: String,
    /// False for records that have not been saved yet
    pub persisted: bool,
}

impl NodeData {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            persisted: true,
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.id)
    }
}

/// Shape summary of a forest, printed below the `tree` view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyStats {
    pub nodes: usize,
    pub roots: usize,
    /// Levels of the deepest tree
    pub depth: usize,
    pub leaves: usize,
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} roots, depth {}, {} leaves",
            self.nodes, self.roots, self.depth, self.leaves
        )
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Record data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in document order
    pub children: Vec<Index>,
}

/// Arena-based forest for read-side hierarchy traversal.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// A stale `Index` never resolves to a different node, which makes
/// identity-based exclusion sets safe.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root nodes in document order
    roots: Vec<Index>,
    /// Lookup from node id to arena index
    ids: HashMap<String, Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            ids: HashMap::new(),
        }
    }

    /// Appends a node below `parent`, or as a new root when `parent` is None.
    ///
    /// Uniqueness of ids is the caller's responsibility, see `TreeBuilder`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let id = data.id.clone();
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }
        self.ids.insert(id, node_idx);

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn find_by_id(&self, id: &str) -> Option<Index> {
        self.ids.get(id).copied()
    }

    pub fn root_nodes(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of parent links between `idx` and its root.
    #[instrument(level = "trace", skip(self))]
    pub fn node_level(&self, idx: Index) -> usize {
        let mut level = 0;
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(parent_idx) = current {
            level += 1;
            current = self.get_node(parent_idx).and_then(|n| n.parent);
        }
        level
    }

    /// Whether `node` lies strictly below `ancestor`.
    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant_of(&self, node: Index, ancestor: Index) -> bool {
        let mut current = self.get_node(node).and_then(|n| n.parent);
        while let Some(parent_idx) = current {
            if parent_idx == ancestor {
                return true;
            }
            current = self.get_node(parent_idx).and_then(|n| n.parent);
        }
        false
    }

    /// Pre-order iterator over the whole forest in document order.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of levels of the deepest tree, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the ids of all leaf nodes (nodes with no children) in document order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.id.clone())
            .collect()
    }
}

impl TreeArena {
    #[instrument(level = "debug", skip(self))]
    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            nodes: self.len(),
            roots: self.roots.len(),
            depth: self.depth(),
            leaves: self.leaf_nodes().len(),
        }
    }
}

impl HierarchyProvider for TreeArena {
    type Node = Index;

    fn roots(&self) -> Vec<Index> {
        self.roots.clone()
    }

    fn children(&self, node: Index) -> Vec<Index> {
        self.get_node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn level(&self, node: Index) -> usize {
        self.node_level(node)
    }

    fn label(&self, node: Index) -> String {
        self.get_node(node)
            .map(|n| n.data.label.clone())
            .unwrap_or_default()
    }

    fn id(&self, node: Index) -> String {
        self.get_node(node)
            .map(|n| n.data.id.clone())
            .unwrap_or_default()
    }

    /// A node may move anywhere except onto itself or into its own subtree.
    fn is_legal_target(&self, mover: Index, target: Index) -> bool {
        self.contains(mover)
            && self.contains(target)
            && mover != target
            && !self.is_descendant_of(target, mover)
    }

    fn is_new_entity(&self, node: Index) -> bool {
        self.get_node(node).is_some_and(|n| !n.data.persisted)
    }

    fn contains(&self, node: Index) -> bool {
        self.arena.contains(node)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
