//! Read-only traversal capability consumed by the option builders.

use std::hash::Hash;

/// Read-only view of a forest of nodes.
///
/// Implementors own the storage; the option builders only walk it.
/// Node handles are compared by identity, so two distinct nodes sharing a
/// label are still different members of an exclusion set.
pub trait HierarchyProvider {
    /// Opaque handle into the hierarchy.
    type Node: Copy + Eq + Hash;

    /// Root nodes in document order.
    fn roots(&self) -> Vec<Self::Node>;

    /// Direct children of `node` in document order.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Depth of `node`, roots are level 0.
    fn level(&self, node: Self::Node) -> usize;

    /// Display string of `node`.
    fn label(&self, node: Self::Node) -> String;

    /// Stable identifier of `node`, unique within this provider.
    fn id(&self, node: Self::Node) -> String;

    /// Whether `mover` could legally be moved to `target`.
    ///
    /// Self-moves and moves into the mover's own subtree are the provider's
    /// call; the builders never special-case them.
    fn is_legal_target(&self, mover: Self::Node, target: Self::Node) -> bool;

    /// Whether `node` has not been persisted yet. New entities may move anywhere.
    fn is_new_entity(&self, node: Self::Node) -> bool;

    /// Whether `node` resolves to a live node of this provider.
    fn contains(&self, node: Self::Node) -> bool;

    /// Whether `node` has no children. Implementors with a cheaper check may override.
    fn is_leaf(&self, node: Self::Node) -> bool {
        self.children(node).is_empty()
    }
}

/// Where an association list starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<N> {
    /// All roots of the provider.
    Forest,
    /// The children of a single node.
    Subtree(N),
}
