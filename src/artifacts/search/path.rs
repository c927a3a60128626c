use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::log::log_item::LogItem;
use crate::artifacts::tags::tag_commit::TagCommitResult;

/// Positions walked from a start changeset (index 0) to the changeset the
/// search stopped at (last index)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInRepo {
    positions: Vec<usize>,
    /// Stopped by the depth limit instead of a wanted tag
    overflow: bool,
}

impl PathInRepo {
    pub fn new(positions: Vec<usize>, overflow: bool) -> Self {
        PathInRepo {
            positions,
            overflow,
        }
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_overflow(&self) -> bool {
        self.overflow
    }

    pub fn get(&self, index: usize) -> usize {
        self.positions[index]
    }

    /// The changeset the search stopped at
    pub fn terminal<'g>(&self, graph: &'g CommitGraph) -> &'g LogItem {
        graph.item(self.positions[self.positions.len() - 1])
    }

    /// Tag the path ended at; `None` for a path cut by the depth limit, even
    /// when the changeset it stopped at carries a tag such as `tip`
    pub fn terminal_tag<'g>(&self, graph: &'g CommitGraph) -> Option<&'g str> {
        if self.overflow {
            return None;
        }
        self.terminal(graph).tag()
    }

    /// Checkout point at `checkout_index`, dated by the merge (or tip) that
    /// ends the line
    pub fn to_result(
        &self,
        graph: &CommitGraph,
        checkout_index: usize,
        repo: &str,
        subrepo: &str,
        merge_or_tip: &LogItem,
    ) -> TagCommitResult {
        let checkout = graph.item(self.positions[checkout_index]);

        TagCommitResult::new(
            self.terminal_tag(graph).map(str::to_string),
            checkout.changeset().clone(),
            repo,
            subrepo,
            checkout.is_tip(),
            self.positions.len() - checkout_index - 1,
            merge_or_tip.date(),
        )
    }
}
