/*
Rendering of a hierarchy as a termtree, used by the `tree` command.
A forest has no single root, so the roots hang below a "." node.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty hierarchy".to_string());
        }

        fn build_tree(arena: &TreeArena, node_idx: Index) -> Option<Tree<String>> {
            let node = arena.get_node(node_idx)?;
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|&child| build_tree(arena, child))
                .collect();
            Some(Tree::new(node.data.to_string()).with_leaves(leaves))
        }

        let leaves: Vec<_> = self
            .root_nodes()
            .iter()
            .filter_map(|&root| build_tree(self, root))
            .collect();
        Tree::new(".".to_string()).with_leaves(leaves)
    }
}
