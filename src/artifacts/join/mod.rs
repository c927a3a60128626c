//! Joining the results of all repositories of a forest
//!
//! - `commits_joiner`: minimal common occurrence of every tag, and the
//!   row-aligned checkpoints built from it

pub mod commits_joiner;
