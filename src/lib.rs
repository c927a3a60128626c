//! Mercurial tag tracker
//!
//! Finds, for every line of history in a Mercurial repository (or a forest of
//! nested repositories), the tag it started from and how many changesets were
//! added since, and aligns the answers across the forest.
//!
//! - `areas`: repositories on disk and the log command
//! - `artifacts`: log parsing, commit graph, path search and tag handling
//! - `commands`: the `track` and tip-tag runs and their output
//! - `config`: run configuration and command-line switch handling
//! - `errors`: fatal conditions
//! - `logging`: log layers and the log file

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;
pub mod logging;
