//! Path search from the tip to tagged changesets
//!
//! - `path`: one walked path, tip first, tagged (or truncated) end last
//! - `path_search`: bounded depth-first search over the commit graph
//! - `tip_lines`: turns paths into checkout points by locating the merge that
//!   ended each line of history
//!
//! ## Algorithm
//!
//! The search starts at the tip and follows parent links. It stops on a
//! changeset carrying a wanted tag, or once the walked path grows longer than
//! the depth limit, and reports one path per way of reaching that changeset.
//! Shared ancestors are visited again for every fork leading to them, so the
//! cost is exponential in the number of forks within the depth limit.
//!
//! Walking each path back from its tagged end, the first merge entered through
//! its *second* parent is where that line was merged into another one: the
//! changeset just before it is the last point of the line.

pub mod path;
pub mod path_search;
pub mod tip_lines;

/// Depth used for searches of specific tags when no limit was configured
pub const DEFAULT_TARGETED_DEPTH: usize = 20;
