//! Fatal tracker errors
//!
//! Every condition that aborts a run is one variant of [`TrackerError`]. Functions
//! return `anyhow::Result` and wrap these variants, so callers (and tests) can
//! `downcast_ref::<TrackerError>()` to find out what went wrong.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("unknown log field '{label}' in line: {line}")]
    UnknownField { label: String, line: String },

    #[error("malformed log line: {0}")]
    MalformedLine(String),

    #[error("invalid changeset id '{0}', expected <rev>:<hash>")]
    InvalidChangesetId(String),

    #[error("log entry without a changeset line: {0}")]
    MissingChangeset(String),

    #[error("cannot parse date '{value}'")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("changeset {changeset} has {count} parents, at most two are supported")]
    TooManyParents { changeset: String, count: usize },

    #[error("unreachable merge: {item} is neither parent of merge {merge}")]
    UnreachableMerge { merge: String, item: String },

    #[error("{program} log returned nonzero - {code} in {}", dir.display())]
    LogCommandFailed {
        program: String,
        dir: PathBuf,
        code: i32,
    },

    #[error("no path to any tag found in {repo}; increase the buffer limit or include dead branches")]
    NoPathFound { repo: String },

    #[error(
        "there is a repository in {forest} with no path; some line was busier than the buffer limit allows"
    )]
    EmptyRepository { forest: String },

    #[error("adding foreign repository {repo} to {forest} is not allowed")]
    ForeignRepository { repo: String, forest: String },

    #[error("reduced repositories are not aligned: {expected} rows expected, {actual} found")]
    MisalignedRepositories { expected: usize, actual: usize },

    #[error("no common tag found")]
    NoCommonTag,

    #[error("{} does not exist", .0.display())]
    MissingOutputDir(PathBuf),

    #[error("{}'s directory does not exist", .0.display())]
    MissingLogDir(PathBuf),
}
