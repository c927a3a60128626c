use crate::areas::log_source::LogSource;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::log::log_item::LogItem;
use crate::artifacts::log::log_parser::LogParser;
use crate::artifacts::tags::tag_with_date::{TagWithDate, add_if_newer};
use crate::errors::TrackerError;
use chrono::{DateTime, Duration, FixedOffset};
use std::path::{Path, PathBuf};

/// Marker directory of a Mercurial working copy
pub const HG_MARKER: &str = ".hg";

/// Tags older than this are ignored by the tip-tag query
const TAG_MAX_AGE_DAYS: i64 = 365;

/// One Mercurial repository with its parsed history
#[derive(Debug, Clone)]
pub struct Repository {
    dir: PathBuf,
    /// Name of the forest the repository belongs to
    repo: String,
    /// Name of the repository itself; equal to `repo` for the forest root
    subrepo: String,
    graph: CommitGraph,
}

impl Repository {
    pub fn new(
        dir: impl Into<PathBuf>,
        repo: impl Into<String>,
        subrepo: impl Into<String>,
        graph: CommitGraph,
    ) -> Self {
        Repository {
            dir: dir.into(),
            repo: repo.into(),
            subrepo: subrepo.into(),
            graph,
        }
    }

    /// Run the log of `dir` and build its commit graph
    pub fn open(dir: &Path, source: &dyn LogSource) -> anyhow::Result<Self> {
        let (repo, subrepo) = Self::names(dir);
        let output = source.run_log(dir)?;
        if output.status != 0 {
            return Err(TrackerError::LogCommandFailed {
                program: source.program().to_string(),
                dir: dir.to_path_buf(),
                code: output.status,
            }
            .into());
        }

        let items = LogParser::new()?.parse(&output.stdout)?;
        tracing::debug!("{}/{}: {} changesets", repo, subrepo, items.len());

        Ok(Repository::new(dir, repo, subrepo, CommitGraph::build(items)))
    }

    /// `(repo, subrepo)` names of a repository directory
    ///
    /// A repository nested directly in another one is a sub-repository of
    /// that forest; any other repository is a forest of its own.
    pub fn names(dir: &Path) -> (String, String) {
        let own = dir_name(dir);
        match dir.parent() {
            Some(parent) if parent.join(HG_MARKER).exists() && dir.join(HG_MARKER).exists() => {
                (dir_name(parent), own)
            }
            _ => (own.clone(), own),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn subrepo(&self) -> &str {
        &self.subrepo
    }

    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    /// Newest date of every tag applied within a year before `now`
    ///
    /// The log is read newest first and the listing stops at the first tag
    /// older than that.
    pub fn just_list_tags(&self, now: DateTime<FixedOffset>) -> Vec<TagWithDate> {
        let oldest = now - Duration::days(TAG_MAX_AGE_DAYS);
        let mut tags = Vec::new();

        for item in self.graph.items() {
            let Some(tag) = TagWithDate::from_item(item) else {
                continue;
            };
            if tag.date() < oldest {
                break;
            }
            add_if_newer(&mut tags, tag);
        }

        tags
    }

    /// Release tag applied before the history forks
    ///
    /// Walks the log newest first and returns the first tag other than the tip
    /// marker. Reaching a merge first means there is no direct tag.
    pub fn find_direct_tag(&self) -> Option<TagWithDate> {
        self.graph
            .items()
            .iter()
            .find(|item| item.has_release_tag() || item.is_merge())
            .filter(|item| item.has_release_tag())
            .and_then(TagWithDate::from_item)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.graph.contains_tag(tag)
    }

    pub fn items(&self) -> &[LogItem] {
        self.graph.items()
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
