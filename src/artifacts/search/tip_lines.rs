use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::search::path::PathInRepo;
use crate::artifacts::tags::tag_commit::TagCommitResult;
use crate::errors::TrackerError;
use derive_new::new;

/// Checkout points found on a set of paths
#[derive(Debug, Clone, Default)]
pub struct LineTips {
    pub results: Vec<TagCommitResult>,
    /// Terminal positions of the paths that are still alive at the tip
    pub tip_lines: Vec<usize>,
}

/// Turns walked paths into [`TagCommitResult`]s for one repository
#[derive(Debug, Clone, Copy, new)]
pub struct LineResolver<'g> {
    graph: &'g CommitGraph,
    repo: &'g str,
    subrepo: &'g str,
}

impl LineResolver<'_> {
    /// Whether walking from `item` into `merge` leaves the line of `item`
    ///
    /// Entering a merge through its first parent continues the line; entering
    /// through the second parent means the line was merged into another one.
    pub fn is_merge_fatal(&self, merge: usize, item: usize) -> anyhow::Result<bool> {
        let merge = self.graph.item(merge);
        let item = self.graph.item(item);

        match merge.parents() {
            [] | [_] => Ok(false),
            [first, _] if first == item.changeset() => Ok(false),
            [_, second] if second == item.changeset() => Ok(true),
            [_, _] => Err(TrackerError::UnreachableMerge {
                merge: merge.changeset().to_string(),
                item: item.changeset().to_string(),
            }
            .into()),
            parents => Err(TrackerError::TooManyParents {
                changeset: merge.changeset().to_string(),
                count: parents.len(),
            }
            .into()),
        }
    }

    /// Resolve every path to the point where its line of history ends
    ///
    /// Walking from the tagged end toward the tip, the first fatal merge yields
    /// a result anchored just before it. A path without any fatal merge whose
    /// start is the tip yields a tip-line result instead.
    pub fn find_tips_of_lines(&self, paths: &[PathInRepo]) -> anyhow::Result<LineTips> {
        let mut tips = LineTips::default();

        for path in paths {
            tracing::debug!("-----------------");
            if path.is_overflow() {
                tracing::debug!("path truncated by the buffer limit, ignoring its end");
            }

            let mut line_killing_merge = false;
            for index in (1..path.len()).rev() {
                let item = path.get(index);
                let following = path.get(index - 1);
                let following_item = self.graph.item(following);

                if !line_killing_merge
                    && following_item.is_plain_merge()
                    && self.is_merge_fatal(following, item)?
                {
                    tracing::debug!(" * merged away at {}", following_item.changeset());
                    tips.results.push(path.to_result(
                        self.graph,
                        index,
                        self.repo,
                        self.subrepo,
                        following_item,
                    ));
                    line_killing_merge = true;
                }
                tracing::debug!("{}", self.graph.item(item).short_display());
            }

            let start = self.graph.item(path.get(0));
            if start.is_tip() && !line_killing_merge {
                tracing::debug!(" * main line");
                tips.results
                    .push(path.to_result(self.graph, 0, self.repo, self.subrepo, start));
                tips.tip_lines.push(path.get(path.len() - 1));
            }
            tracing::debug!("{}", start.short_display());
        }

        Ok(tips)
    }
}
