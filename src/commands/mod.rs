//! Tracker commands
//!
//! Each command is an `impl Forest` block:
//!
//! - `track`: checkout points of every tag line, joined across the forest
//! - `tip_tag`: the single most recent tag of the forest tip
//! - `output`: printing checkpoints or writing them to `.changesets` files

pub mod output;
pub mod tip_tag;
pub mod track;
