//! Option list service
//!
//! Loads hierarchy documents, resolves node ids and runs the option builders.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use generational_arena::Index;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    build_association_options_with, build_move_options, expand_env_vars, indented_label,
    AssociationOptions, DomainError, HierarchyDocument, HierarchyProvider, OptionEntry, Scope,
    TreeArena, TreeBuilder,
};
use crate::infrastructure::traits::{FileSystem, SelectionItem, Selector};

/// Renderer-facing view of an option list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionsReport {
    // Plain values must precede arrays of tables in TOML output
    pub disabled: BTreeSet<String>,
    pub options: Vec<OptionEntry>,
}

impl OptionsReport {
    pub fn is_disabled(&self, value: &str) -> bool {
        self.disabled.contains(value)
    }

    /// Serialize as TOML (`options = [...]`, `disabled = [...]`).
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize options".to_string(),
            source: Box::new(e),
        })
    }
}

impl From<Vec<OptionEntry>> for OptionsReport {
    fn from(options: Vec<OptionEntry>) -> Self {
        Self {
            disabled: BTreeSet::new(),
            options,
        }
    }
}

impl From<AssociationOptions> for OptionsReport {
    fn from(options: AssociationOptions) -> Self {
        Self {
            disabled: options.disabled,
            options: options.entries,
        }
    }
}

/// Service building option lists from hierarchy documents.
pub struct OptionsService {
    fs: Arc<dyn FileSystem>,
}

impl OptionsService {
    /// Create a new options service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load a hierarchy document into a read-only forest.
    ///
    /// `~` and `$VAR` in the path are expanded.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeArena> {
        let path = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
        if !self.fs.exists(&path) {
            return Err(ApplicationError::HierarchyNotFound(path));
        }

        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read hierarchy", &path)?;
        let document = HierarchyDocument::parse(&content)?;
        let tree = TreeBuilder::new().build_from_document(&document)?;

        debug!("load: {} nodes from {}", tree.len(), path.display());
        Ok(tree)
    }

    /// Resolve a node id to its handle.
    pub fn resolve(&self, tree: &TreeArena, id: &str) -> ApplicationResult<Index> {
        tree.find_by_id(id)
            .ok_or_else(|| DomainError::UnknownNode(id.to_string()).into())
    }

    /// Resolve ids into an identity set, reporting every unknown id at once.
    fn resolve_all(&self, tree: &TreeArena, ids: &[String]) -> ApplicationResult<HashSet<Index>> {
        let unknown = ids
            .iter()
            .filter(|id| tree.find_by_id(id).is_none())
            .collect_vec();
        if !unknown.is_empty() {
            return Err(DomainError::UnknownNode(unknown.iter().join(", ")).into());
        }
        Ok(ids.iter().filter_map(|id| tree.find_by_id(id)).collect())
    }

    /// Legal destinations for `mover`, or every node when no mover is given.
    ///
    /// `root` restricts the listing to a single tree of the forest.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn move_options(
        &self,
        tree: &TreeArena,
        mover: Option<&str>,
        root: Option<&str>,
        indent: &str,
    ) -> ApplicationResult<Vec<OptionEntry>> {
        let mover = mover.map(|id| self.resolve(tree, id)).transpose()?;
        let roots = match root {
            Some(id) => vec![self.resolve(tree, id)?],
            None => tree.roots(),
        };

        Ok(build_move_options(tree, &roots, mover, |node| {
            indented_label(tree, node, indent)
        }))
    }

    /// Selectable leaves below `node` (or the whole forest), minus `excluded`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn association_options(
        &self,
        tree: &TreeArena,
        node: Option<&str>,
        excluded: &[String],
        prompt: &str,
        indent: &str,
    ) -> ApplicationResult<AssociationOptions> {
        let scope = match node {
            Some(id) => Scope::Subtree(self.resolve(tree, id)?),
            None => Scope::Forest,
        };
        let excluded = self.resolve_all(tree, excluded)?;

        let options = build_association_options_with(tree, scope, &excluded, prompt, |n| {
            indented_label(tree, n, indent)
        })?;
        Ok(options)
    }

    /// Let the user pick one selectable entry.
    ///
    /// Returns None when nothing is selectable or the user cancels.
    #[instrument(level = "debug", skip(self, selector, options))]
    pub fn pick(
        &self,
        selector: &dyn Selector,
        options: &AssociationOptions,
        prompt: &str,
    ) -> ApplicationResult<Option<OptionEntry>> {
        let items = options
            .selectable()
            .map(|e| SelectionItem {
                display: format!("{}  ({})", e.display, e.value),
                value: e.value.clone(),
            })
            .collect_vec();
        debug!("pick: {} selectable items", items.len());

        let selected = selector
            .select_one(&items, prompt)
            .map_err(ApplicationError::Selection)?;

        Ok(selected.and_then(|item| {
            options
                .entries
                .iter()
                .find(|e| e.value == item.value)
                .cloned()
        }))
    }
}
