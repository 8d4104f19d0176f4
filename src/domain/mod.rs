//! Domain layer: hierarchy model and option list construction
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod hierarchy;
pub mod options;
pub mod tree_traits;

pub use arena::{HierarchyStats, NodeData, TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{DomainError, TreeResult};
pub use hierarchy::{HierarchyProvider, Scope};
pub use options::{
    build_association_options, build_association_options_with, build_move_options,
    indented_label, try_build_move_options, AssociationOptions, OptionEntry, DEFAULT_INDENT,
};
pub use tree_traits::TreeNodeConvert;
