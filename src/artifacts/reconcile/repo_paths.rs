use crate::areas::repository::Repository;
use crate::artifacts::search::path_search::PathSearch;
use crate::artifacts::search::tip_lines::LineResolver;
use crate::artifacts::tags::tag_commit::TagCommitResult;
use crate::config::TrackerConfig;
use crate::errors::TrackerError;
use std::collections::HashSet;

/// Checkout points of one repository, before and after reconciliation
#[derive(Debug, Clone)]
pub struct RepoPathsSearch {
    repository: Repository,
    /// Tags ending the primary paths
    reachable_tags: HashSet<String>,
    /// Terminal positions of the paths still alive at the tip
    tip_lines: Vec<usize>,
    primary: Vec<TagCommitResult>,
    /// Tags reachable in a sibling repository but not here
    wanted: HashSet<String>,
    secondary: Vec<TagCommitResult>,
}

impl RepoPathsSearch {
    /// Search from the tip to the nearest tags and resolve the checkout points
    pub fn find_paths(repository: Repository, config: &TrackerConfig) -> anyhow::Result<Self> {
        let graph = repository.graph();
        let mut paths = PathSearch::new(graph, config.default_branch_only())
            .paths_to_any_tag(config.search_depth());

        if config.remove_incomplete_paths() {
            paths.retain(|path| !path.is_overflow());
        }
        if paths.is_empty() {
            tracing::warn!(
                "no path found in {}/{}",
                repository.repo(),
                repository.subrepo()
            );
            return Err(TrackerError::NoPathFound {
                repo: format!("{}/{}", repository.repo(), repository.subrepo()),
            }
            .into());
        }

        for path in &paths {
            tracing::debug!("reached {}", path.terminal(graph).short_display());
        }
        let reachable_tags = paths
            .iter()
            .filter_map(|path| path.terminal_tag(graph))
            .map(str::to_string)
            .collect::<HashSet<_>>();

        let resolver = LineResolver::new(graph, repository.repo(), repository.subrepo());
        let tips = resolver.find_tips_of_lines(&paths)?;
        let mut primary = tips.results;
        primary.sort_by(TagCommitResult::rank);

        tracing::debug!("-----------------");
        tracing::debug!("tip lines are (should be 1!):");
        for &position in &tips.tip_lines {
            tracing::debug!("  {}", graph.item(position).short_display());
        }
        for result in &primary {
            tracing::debug!("{}", result);
        }

        Ok(RepoPathsSearch {
            repository,
            reachable_tags,
            tip_lines: tips.tip_lines,
            primary,
            wanted: HashSet::new(),
            secondary: Vec::new(),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn tip_lines(&self) -> &[usize] {
        &self.tip_lines
    }

    pub fn primary(&self) -> &[TagCommitResult] {
        &self.primary
    }

    pub fn secondary(&self) -> &[TagCommitResult] {
        &self.secondary
    }

    pub fn wanted_tags(&self) -> &HashSet<String> {
        &self.wanted
    }

    /// Tags the primary search reached
    pub fn reachable_tags(&self) -> &HashSet<String> {
        &self.reachable_tags
    }

    /// Remember the tags a sibling reached and this repository did not
    pub fn add_missing_tags(&mut self, sibling_tags: &HashSet<String>) {
        self.wanted
            .extend(sibling_tags.difference(&self.reachable_tags).cloned());
    }

    /// Search for the wanted tags, within the targeted depth
    ///
    /// Tags missing from the whole log are reported and skipped. Only paths
    /// ending at a wanted tag count, and tip lines found this way are dropped:
    /// the primary search already reported the real one.
    pub fn find_paths_to_missing_tags(&mut self, config: &TrackerConfig) -> anyhow::Result<()> {
        let mut wanted = self.wanted.iter().collect::<Vec<_>>();
        wanted.sort();

        let mut present = HashSet::new();
        for tag in wanted {
            if self.repository.contains_tag(tag) {
                present.insert(tag.clone());
            } else {
                tracing::warn!(
                    "Warning! Searched tag {} not found in {}/{}",
                    tag,
                    self.repository.repo(),
                    self.repository.subrepo()
                );
            }
        }
        if present.is_empty() {
            return Ok(());
        }

        let graph = self.repository.graph();
        let paths = PathSearch::new(graph, config.default_branch_only())
            .paths_to_tags(&present, config.targeted_depth())
            .into_iter()
            .filter(|path| {
                path.terminal_tag(graph)
                    .is_some_and(|tag| self.wanted.contains(tag))
            })
            .collect::<Vec<_>>();

        let resolver = LineResolver::new(
            graph,
            self.repository.repo(),
            self.repository.subrepo(),
        );
        let mut secondary = resolver.find_tips_of_lines(&paths)?.results;
        secondary.retain(|result| !result.is_tip_line());
        secondary.sort_by(TagCommitResult::rank);
        secondary.iter_mut().for_each(TagCommitResult::mark_added);

        self.secondary = secondary;
        Ok(())
    }

    /// Primary and secondary results in rank order, without truncated paths
    pub fn merged_paths(&self) -> Vec<TagCommitResult> {
        let mut merged = self
            .primary
            .iter()
            .chain(&self.secondary)
            .cloned()
            .collect::<Vec<_>>();
        merged.sort_by(TagCommitResult::rank);
        merged.retain(|result| result.tag().is_some());
        merged
    }
}
