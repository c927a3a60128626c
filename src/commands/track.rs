use crate::areas::forest::Forest;
use crate::artifacts::join::commits_joiner::{Checkpoint, CommitsJoiner};
use crate::artifacts::reconcile::repo_paths::RepoPathsSearch;
use std::collections::HashSet;

impl Forest {
    /// Resolve the checkout points of the forest and report them
    pub fn track(&self) -> anyhow::Result<()> {
        if self.config().tip_tags_only() {
            return self.tip_tag();
        }

        let mut searches = Vec::new();
        for dir in self.repository_dirs() {
            let repository = self.open_repository(&dir)?;
            searches.push(RepoPathsSearch::find_paths(repository, self.config())?);
        }

        let reachable = searches
            .iter()
            .map(|search| search.reachable_tags().clone())
            .collect::<Vec<HashSet<String>>>();
        for search in &mut searches {
            for tags in &reachable {
                search.add_missing_tags(tags);
            }
        }
        for search in &mut searches {
            search.find_paths_to_missing_tags(self.config())?;
        }
        tracing::debug!("**************");

        let checkpoints: Vec<Checkpoint> = match searches.as_slice() {
            [search] => search
                .merged_paths()
                .into_iter()
                .filter_map(Checkpoint::single)
                .collect(),
            searches => self.join(searches)?,
        };

        self.report(&checkpoints)
    }

    fn join(&self, searches: &[RepoPathsSearch]) -> anyhow::Result<Vec<Checkpoint>> {
        let mut joiner = CommitsJoiner::new(self.name());
        for search in searches {
            let merged = search.merged_paths();
            tracing::debug!("{}: ({})", merged.len(), search.repository().subrepo());
            for result in &merged {
                tracing::debug!("{}", result);
            }
            joiner.add_repo_commits(merged)?;
        }

        tracing::debug!("------------");
        for (tag, count) in joiner.sorted_tags() {
            tracing::debug!("{}: {}", tag, count);
        }
        tracing::debug!("------------");

        joiner.checkpoints()
    }
}
