//! Tree builder turning flat parent-link records into an arena forest.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::{HierarchyDocument, NodeRecord};
use crate::domain::error::{DomainError, TreeResult};

/// Constructs a read-only `TreeArena` from hierarchy records.
///
/// Siblings keep document order. A parent may be declared after its children.
pub struct TreeBuilder {
    relationship_cache: HashMap<String, Vec<usize>>,
    visited_ids: HashSet<String>,
    root_records: Vec<usize>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            relationship_cache: HashMap::new(),
            visited_ids: HashSet::new(),
            root_records: Vec::new(),
        }
    }

    /// Build a forest from a parsed document.
    pub fn build_from_document(&mut self, document: &HierarchyDocument) -> TreeResult<TreeArena> {
        self.build(&document.nodes)
    }

    /// Build a forest from records.
    ///
    /// # Errors
    /// - `DuplicateId` when two records share an id
    /// - `UnknownParent` when a parent id is never declared
    /// - `CycleDetected` when records cannot be reached from any root
    /// - `InvalidDocument` when an id is empty
    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&mut self, records: &[NodeRecord]) -> TreeResult<TreeArena> {
        // Reset state for fresh build
        self.relationship_cache.clear();
        self.visited_ids.clear();
        self.root_records.clear();

        self.scan_records(records)?;
        let tree = self.build_forest(records)?;

        if tree.len() < records.len() {
            let stranded = records
                .iter()
                .find(|r| !self.visited_ids.contains(&r.id))
                .map(|r| r.id.clone())
                .unwrap_or_default();
            return Err(DomainError::CycleDetected(stranded));
        }

        debug!(nodes = tree.len(), roots = self.root_records.len(), "forest built");
        Ok(tree)
    }

    fn scan_records(&mut self, records: &[NodeRecord]) -> TreeResult<()> {
        let mut declared = HashSet::new();
        for record in records {
            // An empty value is reserved for the prompt entry
            if record.id.trim().is_empty() {
                return Err(DomainError::InvalidDocument {
                    message: format!("node '{}' has an empty id", record.label),
                });
            }
            if !declared.insert(record.id.as_str()) {
                return Err(DomainError::DuplicateId(record.id.clone()));
            }
        }

        for (pos, record) in records.iter().enumerate() {
            match &record.parent {
                None => self.root_records.push(pos),
                Some(parent) if declared.contains(parent.as_str()) => {
                    self.relationship_cache
                        .entry(parent.clone())
                        .or_default()
                        .push(pos);
                }
                Some(parent) => {
                    return Err(DomainError::UnknownParent {
                        id: record.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn build_forest(&mut self, records: &[NodeRecord]) -> TreeResult<TreeArena> {
        let mut tree = TreeArena::new();

        for &root in &self.root_records {
            let mut stack = vec![(root, None)];

            while let Some((pos, parent_idx)) = stack.pop() {
                let record = &records[pos];
                // Cycle detection
                if !self.visited_ids.insert(record.id.clone()) {
                    return Err(DomainError::CycleDetected(record.id.clone()));
                }

                let data = NodeData {
                    id: record.id.clone(),
                    label: record.label.clone(),
                    persisted: !record.is_new,
                };
                let current_idx = tree.insert_node(data, parent_idx);

                // Reverse so siblings are inserted in document order
                if let Some(children) = self.relationship_cache.get(&record.id) {
                    for &child in children.iter().rev() {
                        stack.push((child, Some(current_idx)));
                    }
                }
            }
        }

        Ok(tree)
    }
}
