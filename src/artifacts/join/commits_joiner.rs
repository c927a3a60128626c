use crate::artifacts::tags::tag_commit::TagCommitResult;
use crate::artifacts::tags::tag_sort::tag_sort;
use crate::errors::TrackerError;
use std::collections::HashMap;

/// One row of the joined forest: the same tag checked out in every repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub tag: String,
    /// Sum of the changesets since the tag over all repositories
    pub changesets: usize,
    /// One result per repository, in the order they were added
    pub results: Vec<TagCommitResult>,
}

impl Checkpoint {
    pub fn single(result: TagCommitResult) -> Option<Self> {
        let tag = result.tag()?.to_string();

        Some(Checkpoint {
            tag,
            changesets: result.changesets_since_tag(),
            results: vec![result],
        })
    }
}

/// Aligns the results of all repositories of a forest by tag
///
/// Every tag is kept as many times as the repository with the fewest
/// occurrences has it, so the i-th occurrence of a tag exists everywhere.
#[derive(Debug, Clone)]
pub struct CommitsJoiner {
    top_repo_name: String,
    repos: Vec<Vec<TagCommitResult>>,
    tags_with_minimal_count: HashMap<String, usize>,
}

impl CommitsJoiner {
    pub fn new(top_repo_name: impl Into<String>) -> Self {
        CommitsJoiner {
            top_repo_name: top_repo_name.into(),
            repos: Vec::new(),
            tags_with_minimal_count: HashMap::new(),
        }
    }

    /// Add the ranked results of one repository of the forest
    pub fn add_repo_commits(&mut self, results: Vec<TagCommitResult>) -> anyhow::Result<()> {
        if results.is_empty() {
            return Err(TrackerError::EmptyRepository {
                forest: self.top_repo_name.clone(),
            }
            .into());
        }

        let mut counts = HashMap::<String, usize>::new();
        for result in &results {
            if result.repo() != self.top_repo_name {
                return Err(TrackerError::ForeignRepository {
                    repo: result.repo().to_string(),
                    forest: self.top_repo_name.clone(),
                }
                .into());
            }
            if let Some(tag) = result.tag() {
                *counts.entry(tag.to_string()).or_default() += 1;
            }
        }

        if self.repos.is_empty() {
            self.tags_with_minimal_count = counts;
        } else {
            for (tag, minimum) in self.tags_with_minimal_count.iter_mut() {
                *minimum = (*minimum).min(counts.get(tag).copied().unwrap_or(0));
            }
            for tag in counts.into_keys() {
                // missing from every repository added so far
                self.tags_with_minimal_count.entry(tag).or_insert(0);
            }
        }
        self.repos.push(results);

        Ok(())
    }

    /// Tags with their minimal occurrence, newest tag first
    pub fn sorted_tags(&self) -> Vec<(&str, usize)> {
        let mut tags = self
            .tags_with_minimal_count
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect::<Vec<_>>();
        tags.sort_by(|(left, _), (right, _)| tag_sort(Some(*left), Some(*right)));
        tags
    }

    /// Each repository's results cut down to the minimal occurrence of every
    /// tag, grouped by tag in sorted order
    pub fn reduce_repos(&self) -> Vec<Vec<TagCommitResult>> {
        let tags = self.sorted_tags();

        self.repos
            .iter()
            .map(|repo| {
                tags.iter()
                    .flat_map(move |&(tag, count)| {
                        repo.iter()
                            .filter(move |result| result.tag() == Some(tag))
                            .take(count)
                    })
                    .cloned()
                    .collect()
            })
            .collect()
    }

    /// Row-aligned checkpoints over all repositories
    pub fn checkpoints(&self) -> anyhow::Result<Vec<Checkpoint>> {
        let reduced = self.reduce_repos();
        let Some(rows) = reduced.first().map(Vec::len) else {
            return Ok(Vec::new());
        };
        if let Some(misaligned) = reduced.iter().find(|repo| repo.len() != rows) {
            return Err(TrackerError::MisalignedRepositories {
                expected: rows,
                actual: misaligned.len(),
            }
            .into());
        }

        let checkpoints = (0..rows)
            .map(|row| {
                let results = reduced
                    .iter()
                    .map(|repo| repo[row].clone())
                    .collect::<Vec<_>>();
                Checkpoint {
                    tag: results[0].tag().unwrap_or_default().to_string(),
                    changesets: results.iter().map(TagCommitResult::changesets_since_tag).sum(),
                    results,
                }
            })
            .collect();

        Ok(checkpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::testing::{changeset, date};
    use pretty_assertions::assert_eq;

    fn result(subrepo: &str, tag: &str, rev: i32, changesets: usize) -> TagCommitResult {
        TagCommitResult::new(
            Some(tag.to_string()),
            changeset(rev),
            "jdk8u",
            subrepo,
            false,
            changesets,
            date(rev),
        )
    }

    fn tags_of(repo: &[TagCommitResult]) -> Vec<&str> {
        repo.iter().filter_map(TagCommitResult::tag).collect()
    }

    #[test]
    fn occurrences_are_reduced_to_the_minimum() {
        let mut joiner = CommitsJoiner::new("jdk8u");
        joiner
            .add_repo_commits(vec![
                result("jdk8u", "v1", 3, 0),
                result("jdk8u", "v1", 2, 4),
                result("jdk8u", "v1", 1, 7),
            ])
            .unwrap();
        joiner
            .add_repo_commits(vec![result("hotspot", "v1", 5, 2)])
            .unwrap();

        let reduced = joiner.reduce_repos();

        assert_eq!(tags_of(&reduced[0]), vec!["v1"]);
        assert_eq!(tags_of(&reduced[1]), vec!["v1"]);
        assert_eq!(reduced[0][0].checkout(), &changeset(3));
    }

    #[test]
    fn tag_missing_from_one_repository_is_dropped() {
        let mut joiner = CommitsJoiner::new("jdk8u");
        joiner
            .add_repo_commits(vec![result("jdk8u", "v2", 3, 0), result("jdk8u", "v1", 1, 2)])
            .unwrap();
        joiner
            .add_repo_commits(vec![result("hotspot", "v1", 5, 1), result("hotspot", "v3", 6, 0)])
            .unwrap();

        assert_eq!(joiner.sorted_tags(), vec![("v3", 0), ("v2", 0), ("v1", 1)]);
        let reduced = joiner.reduce_repos();
        assert_eq!(tags_of(&reduced[0]), vec!["v1"]);
        assert_eq!(tags_of(&reduced[1]), vec!["v1"]);
    }

    #[test]
    fn checkpoints_sum_changesets_per_row() {
        let mut joiner = CommitsJoiner::new("jdk8u");
        joiner
            .add_repo_commits(vec![result("jdk8u", "v2", 4, 1), result("jdk8u", "v1", 2, 3)])
            .unwrap();
        joiner
            .add_repo_commits(vec![result("hotspot", "v2", 9, 2), result("hotspot", "v1", 8, 5)])
            .unwrap();

        let checkpoints = joiner.checkpoints().unwrap();

        let rows = checkpoints
            .iter()
            .map(|c| (c.tag.as_str(), c.changesets, c.results.len()))
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![("v2", 3, 2), ("v1", 8, 2)]);
        assert_eq!(checkpoints[1].results[1].subrepo(), "hotspot");
    }

    #[test]
    fn empty_repository_is_fatal() {
        let mut joiner = CommitsJoiner::new("jdk8u");

        let err = joiner.add_repo_commits(Vec::new()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::EmptyRepository { forest }) if forest == "jdk8u"
        ));
    }

    #[test]
    fn foreign_repository_is_rejected() {
        let mut joiner = CommitsJoiner::new("jdk8u");
        let foreign = TagCommitResult::new(
            Some("v1".to_string()),
            changeset(1),
            "jdk9",
            "jdk9",
            false,
            0,
            date(1),
        );

        let err = joiner.add_repo_commits(vec![foreign]).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrackerError>(),
            Some(TrackerError::ForeignRepository { repo, .. }) if repo == "jdk9"
        ));
    }

    #[test]
    fn single_result_makes_a_checkpoint() {
        let checkpoint = Checkpoint::single(result("jdk8u", "jdk8u172-b11", 3, 4)).unwrap();

        assert_eq!(checkpoint.tag, "jdk8u172-b11");
        assert_eq!(checkpoint.changesets, 4);
    }
}
