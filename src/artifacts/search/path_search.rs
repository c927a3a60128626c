use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::log::log_item::LogItem;
use crate::artifacts::search::path::PathInRepo;
use derive_new::new;
use std::collections::HashSet;

/// Trace of every step of the work-stack, compiled in with the `debug_search`
/// feature only
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_search")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

/// Bounded depth-first search from a changeset back to tagged changesets
///
/// The walk keeps its own stack of frames instead of recursing, so very long
/// histories searched without a depth limit cannot exhaust the call stack.
/// Results are reported in the order a recursive walk visiting parents first to
/// last would report them.
#[derive(Debug, Clone, Copy, new)]
pub struct PathSearch<'g> {
    graph: &'g CommitGraph,
    /// Prune every changeset outside the default branch
    default_branch_only: bool,
}

/// A changeset on the current path and the next of its parents to visit
#[derive(Debug)]
struct Frame {
    position: usize,
    next_parent: usize,
}

#[derive(Debug, Default)]
struct Walk {
    buffer: Vec<usize>,
    stack: Vec<Frame>,
    paths: Vec<PathInRepo>,
}

impl<'g> PathSearch<'g> {
    /// Paths from the tip to the nearest changesets carrying any tag but `tip`
    pub fn paths_to_any_tag(&self, max_depth: usize) -> Vec<PathInRepo> {
        match self.graph.tip() {
            Some(tip) => self.search(tip, None, max_depth),
            None => Vec::new(),
        }
    }

    /// Paths from the tip to the nearest changesets carrying one of `targets`
    pub fn paths_to_tags(&self, targets: &HashSet<String>, max_depth: usize) -> Vec<PathInRepo> {
        match self.graph.tip() {
            Some(tip) => self.search(tip, Some(targets), max_depth),
            None => Vec::new(),
        }
    }

    /// Walk parent links from `start`
    ///
    /// A path ends at a changeset with a wanted tag (any non-tip tag when
    /// `targets` is `None`), or as soon as it is longer than `max_depth`; the
    /// latter is flagged as overflow.
    pub fn search(
        &self,
        start: usize,
        targets: Option<&HashSet<String>>,
        max_depth: usize,
    ) -> Vec<PathInRepo> {
        let mut walk = Walk::default();
        self.enter(&mut walk, start, targets, max_depth);

        loop {
            let next = match walk.stack.last_mut() {
                None => break,
                Some(frame) => {
                    let next = self.graph.parents(frame.position).get(frame.next_parent);
                    frame.next_parent += 1;
                    next.copied()
                }
            };

            match next {
                Some(parent) => self.enter(&mut walk, parent, targets, max_depth),
                None => {
                    walk.stack.pop();
                    walk.buffer.pop();
                }
            }
        }

        walk.paths
    }

    fn enter(
        &self,
        walk: &mut Walk,
        position: usize,
        targets: Option<&HashSet<String>>,
        max_depth: usize,
    ) {
        let item = self.graph.item(position);
        if self.default_branch_only && !item.on_default_branch() {
            debug_log!("pruned {} on branch {}", item.changeset(), item.branch());
            return;
        }

        walk.buffer.push(position);
        let desired = is_desired(item, targets);
        if desired || walk.buffer.len() > max_depth {
            debug_log!(
                "path of {} ends at {} (overflow: {})",
                walk.buffer.len(),
                item.changeset(),
                !desired
            );
            walk.paths
                .push(PathInRepo::new(walk.buffer.clone(), !desired));
            walk.buffer.pop();
        } else {
            walk.stack.push(Frame {
                position,
                next_parent: 0,
            });
        }
    }
}

fn is_desired(item: &LogItem, targets: Option<&HashSet<String>>) -> bool {
    match targets {
        None => item.has_release_tag(),
        Some(targets) => item.tag().is_some_and(|tag| targets.contains(tag)),
    }
}
