//! Repositories on disk
//!
//! - `log_source`: running `hg log` in a repository directory
//! - `repository`: one repository with its parsed history
//! - `forest`: the main repository, its sub-repositories and the output writer

pub mod forest;
pub mod log_source;
pub mod repository;
