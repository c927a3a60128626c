//! Commit DAG built from a parsed log
//!
//! - `commit_graph`: arena of log entries with parent and child links

pub mod commit_graph;
