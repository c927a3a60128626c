//! Commit graph arena
//!
//! The log entries are kept in log order (newest first) and referenced by
//! their position. Each position has its resolved parent positions (in the
//! order the entry declares them, so a merge keeps "first parent first") and
//! the positions of its children.
//!
//! Parents are looked up among the entries printed *after* an entry only, which
//! is where a newest-first log puts them. A parent that cannot be found there
//! is dropped: the walk simply ends at that entry, the same as at the root of a
//! shallow clone.

use crate::artifacts::log::changeset_id::ChangesetId;
use crate::artifacts::log::log_item::LogItem;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    items: Vec<LogItem>,
    parents: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
}

impl CommitGraph {
    pub fn build(items: Vec<LogItem>) -> Self {
        let mut positions = HashMap::<ChangesetId, usize>::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            positions
                .entry(item.changeset().clone())
                .or_insert(position);
        }

        let mut parents = vec![Vec::new(); items.len()];
        let mut children = vec![Vec::new(); items.len()];

        for (position, item) in items.iter().enumerate() {
            for parent_id in item.parents() {
                match positions.get(parent_id) {
                    Some(&parent) if parent > position => {
                        parents[position].push(parent);
                        children[parent].push(position);
                    }
                    _ => {
                        tracing::trace!(
                            "parent {} of {} is outside of the log",
                            parent_id,
                            item.changeset()
                        );
                    }
                }
            }
        }

        CommitGraph {
            items,
            parents,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the newest entry, where every walk starts
    pub fn tip(&self) -> Option<usize> {
        if self.items.is_empty() { None } else { Some(0) }
    }

    pub fn item(&self, position: usize) -> &LogItem {
        &self.items[position]
    }

    pub fn items(&self) -> &[LogItem] {
        &self.items
    }

    pub fn parents(&self, position: usize) -> &[usize] {
        &self.parents[position]
    }

    pub fn children(&self, position: usize) -> &[usize] {
        &self.children[position]
    }

    /// Whether any entry of the log carries `tag`
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.items.iter().any(|item| item.tag() == Some(tag))
    }
}
