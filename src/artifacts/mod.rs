//! Mercurial history data structures and algorithms
//!
//! This module contains the types and algorithms of the tracker:
//!
//! - `log`: `hg log` entries and their parser
//! - `graph`: Commit DAG arena built from a parsed log
//! - `search`: Bounded path search and fatal-merge detection
//! - `tags`: Version-aware tag ordering and tagged results
//! - `reconcile`: Secondary search for tags known from sibling repositories
//! - `join`: Row alignment of results across a forest

pub mod graph;
pub mod join;
pub mod log;
pub mod reconcile;
pub mod search;
pub mod tags;

#[cfg(test)]
pub(crate) mod testing;
