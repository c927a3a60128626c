//! Reconciliation of tags across sibling repositories
//!
//! - `repo_paths`: primary search of one repository, plus the secondary search
//!   for tags its siblings reached and it did not

pub mod repo_paths;
