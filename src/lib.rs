//! nestopt: selectable option lists from nested-set hierarchies.
//!
//! The core lives in [`domain::options`]: [`domain::build_move_options`] lists
//! legal destinations for a node being moved, [`domain::build_association_options`]
//! lists selectable leaves with structural parents shown as disabled headings.
//! Both read a hierarchy through the [`domain::HierarchyProvider`] trait;
//! [`domain::TreeArena`] is the in-memory implementation used by the CLI.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
