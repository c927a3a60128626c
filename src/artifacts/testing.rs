//! Hand-built commit graphs for unit tests

use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::log::changeset_id::ChangesetId;
use crate::artifacts::log::log_item::LogItem;
use chrono::{DateTime, FixedOffset};

/// 2018-03-01 00:00:00 UTC
const BASE_TIMESTAMP: i64 = 1_519_862_400;

pub fn changeset(rev: i32) -> ChangesetId {
    ChangesetId::new(rev, format!("{:012x}", rev + 0xa000))
}

/// One hour per revision, so newer revisions have newer dates
pub fn date(rev: i32) -> DateTime<FixedOffset> {
    DateTime::from_timestamp(BASE_TIMESTAMP + i64::from(rev) * 3600, 0)
        .unwrap()
        .fixed_offset()
}

pub fn entry(rev: i32, parents: &[i32]) -> LogItem {
    LogItem::new(changeset(rev), date(rev))
        .with_parents(parents.iter().copied().map(changeset).collect())
        .with_user("duke")
        .with_summary(format!("change {rev}"))
}

pub fn merge(rev: i32, first: i32, second: i32) -> LogItem {
    entry(rev, &[first, second]).with_summary("Merge")
}

/// A linear history `top, top - 1, ..., 0`, newest first
pub fn chain(top: i32) -> Vec<LogItem> {
    (0..=top)
        .rev()
        .map(|rev| if rev == 0 { entry(0, &[]) } else { entry(rev, &[rev - 1]) })
        .collect()
}

pub fn graph(items: Vec<LogItem>) -> CommitGraph {
    CommitGraph::build(items)
}
