//! Option list construction for selection widgets.
//!
//! Two independent builders flatten a hierarchy into `(display, value)` pairs:
//! - [`build_move_options`] lists every legal destination for a node being moved.
//! - [`build_association_options`] lists selectable leaves under a prompt,
//!   keeping internal nodes as disabled headings while they still lead to
//!   at least one selectable leaf.

use std::collections::{BTreeSet, HashSet};
use std::convert::Infallible;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::hierarchy::{HierarchyProvider, Scope};

/// Indentation unit used when no renderer is supplied.
pub const DEFAULT_INDENT: &str = "-";

/// A single `(display, value)` pair of a selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    /// Text shown to the user, including indentation
    pub display: String,
    /// Node id, empty for the prompt placeholder
    pub value: String,
}

impl OptionEntry {
    pub fn new(display: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value: value.into(),
        }
    }

    /// Placeholder entry heading an association list.
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self::new(prompt, "")
    }

    pub fn is_prompt(&self) -> bool {
        self.value.is_empty()
    }
}

/// Result of [`build_association_options`].
///
/// The disabled values are kept beside the entries, not inside them, so a
/// renderer can mark the matching options non-interactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssociationOptions {
    /// Prompt followed by the flattened tree
    pub entries: Vec<OptionEntry>,
    /// Values of internal nodes shown for context only
    pub disabled: BTreeSet<String>,
}

impl AssociationOptions {
    pub fn is_disabled(&self, value: &str) -> bool {
        self.disabled.contains(value)
    }

    /// Entries a user can actually pick: no prompt, no disabled headings.
    pub fn selectable(&self) -> impl Iterator<Item = &OptionEntry> {
        self.entries
            .iter()
            .filter(|e| !e.is_prompt() && !self.is_disabled(&e.value))
    }

    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }
}

/// Standard label renderer: `indent` repeated once per level, a space, the label.
///
/// Roots render with a bare leading space (`" Root"`), children as `"- Child"`.
pub fn indented_label<P>(provider: &P, node: P::Node, indent: &str) -> String
where
    P: HierarchyProvider + ?Sized,
{
    format!(
        "{} {}",
        indent.repeat(provider.level(node)),
        provider.label(node)
    )
}

/// Lists every node of the given roots that is a legal destination for `mover`.
///
/// Each root is walked pre-order (self, then descendants). A node is kept when
/// there is no mover, when the mover is a new entity, or when the provider
/// reports the move as legal.
#[instrument(level = "debug", skip(provider, roots, mover, render_label), fields(roots = roots.len()))]
pub fn build_move_options<P, F>(
    provider: &P,
    roots: &[P::Node],
    mover: Option<P::Node>,
    mut render_label: F,
) -> Vec<OptionEntry>
where
    P: HierarchyProvider + ?Sized,
    F: FnMut(P::Node) -> String,
{
    match try_build_move_options(provider, roots, mover, |node| {
        Ok::<_, Infallible>(render_label(node))
    }) {
        Ok(entries) => entries,
        Err(never) => match never {},
    }
}

/// Like [`build_move_options`], with a renderer that may fail.
///
/// The first renderer error is returned as is; no partial list is produced.
#[instrument(level = "debug", skip(provider, roots, mover, render_label), fields(roots = roots.len()))]
pub fn try_build_move_options<P, F, E>(
    provider: &P,
    roots: &[P::Node],
    mover: Option<P::Node>,
    mut render_label: F,
) -> Result<Vec<OptionEntry>, E>
where
    P: HierarchyProvider + ?Sized,
    F: FnMut(P::Node) -> Result<String, E>,
{
    let unrestricted = match mover {
        None => true,
        Some(m) => provider.is_new_entity(m),
    };

    let mut entries = Vec::new();
    for &root in roots {
        for node in self_and_descendants(provider, root) {
            let legal = match mover {
                Some(m) if !unrestricted => provider.is_legal_target(m, node),
                _ => true,
            };
            if legal {
                entries.push(OptionEntry::new(render_label(node)?, provider.id(node)));
            } else {
                trace!(target_id = %provider.id(node), "illegal move target skipped");
            }
        }
    }

    debug!(entries = entries.len(), unrestricted, "move options built");
    Ok(entries)
}

/// Builds a prompt-headed option list of selectable leaves.
///
/// Labels use [`indented_label`] with [`DEFAULT_INDENT`].
pub fn build_association_options<P>(
    provider: &P,
    scope: Scope<P::Node>,
    excluded: &HashSet<P::Node>,
    prompt: &str,
) -> TreeResult<AssociationOptions>
where
    P: HierarchyProvider + ?Sized,
{
    build_association_options_with(provider, scope, excluded, prompt, |node| {
        indented_label(provider, node, DEFAULT_INDENT)
    })
}

/// Builds a prompt-headed option list with a caller-supplied label renderer.
///
/// - leaves are listed unless they are in `excluded`
/// - internal nodes are listed, and disabled, only while at least one
///   descendant survives; otherwise the whole subtree is dropped
/// - `excluded` never filters an internal node directly
///
/// # Errors
/// `DomainError::InvalidArgument` if a subtree scope names a node the
/// provider cannot resolve. Checked before any traversal.
#[instrument(level = "debug", skip(provider, scope, excluded, render_label), fields(excluded = excluded.len()))]
pub fn build_association_options_with<P, F>(
    provider: &P,
    scope: Scope<P::Node>,
    excluded: &HashSet<P::Node>,
    prompt: &str,
    render_label: F,
) -> TreeResult<AssociationOptions>
where
    P: HierarchyProvider + ?Sized,
    F: Fn(P::Node) -> String,
{
    let start = match scope {
        Scope::Forest => provider.roots(),
        Scope::Subtree(node) => {
            if !provider.contains(node) {
                return Err(DomainError::InvalidArgument(
                    "subtree node does not belong to the hierarchy".to_string(),
                ));
            }
            provider.children(node)
        }
    };

    let (tree_entries, disabled) = collect(provider, start, excluded, &render_label);

    let mut entries = Vec::with_capacity(tree_entries.len() + 1);
    entries.push(OptionEntry::prompt(prompt));
    entries.extend(tree_entries);

    debug!(
        entries = entries.len(),
        disabled = disabled.len(),
        "association options built"
    );
    Ok(AssociationOptions {
        entries,
        disabled: disabled.into_iter().collect(),
    })
}

/// Depth-first filter over `nodes`, returning entries and disabled ids.
fn collect<P, F>(
    provider: &P,
    nodes: Vec<P::Node>,
    excluded: &HashSet<P::Node>,
    render_label: &F,
) -> (Vec<OptionEntry>, Vec<String>)
where
    P: HierarchyProvider + ?Sized,
    F: Fn(P::Node) -> String,
{
    let mut entries = Vec::new();
    let mut disabled = Vec::new();

    for node in nodes {
        if provider.is_leaf(node) {
            if !excluded.contains(&node) {
                entries.push(OptionEntry::new(render_label(node), provider.id(node)));
            }
            continue;
        }

        let children = provider.children(node);
        let (sub_entries, sub_disabled) = collect(provider, children, excluded, render_label);
        if sub_entries.is_empty() {
            trace!(id = %provider.id(node), "subtree fully excluded");
            continue;
        }
        let id = provider.id(node);
        entries.push(OptionEntry::new(render_label(node), id.clone()));
        disabled.push(id);
        entries.extend(sub_entries);
        disabled.extend(sub_disabled);
    }

    (entries, disabled)
}

fn self_and_descendants<P>(provider: &P, root: P::Node) -> Vec<P::Node>
where
    P: HierarchyProvider + ?Sized,
{
    let mut visited = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visited.push(node);
        // Push children in reverse order for left-to-right traversal
        stack.extend(provider.children(node).into_iter().rev());
    }
    visited
}
