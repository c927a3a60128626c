//! One `hg log` entry
//!
//! A [`LogItem`] owns everything `hg log` printed about a changeset. Links to
//! the parent and child entries are not stored here: they live in the
//! [`CommitGraph`](crate::artifacts::graph::commit_graph::CommitGraph) arena,
//! which is built once the whole log is known.

use crate::artifacts::log::changeset_id::ChangesetId;
use crate::artifacts::log::{DEFAULT_BRANCH, HG_DATE_FORMAT, MERGE_SUMMARY, TIP_MARKER};
use chrono::{DateTime, FixedOffset};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogItem {
    changeset: ChangesetId,
    /// Zero, one or two parents; a second parent marks a merge
    parents: Vec<ChangesetId>,
    tag: Option<String>,
    user: String,
    date: DateTime<FixedOffset>,
    summary: String,
    branch: String,
}

impl LogItem {
    /// Create an untagged entry on the default branch without parents
    pub fn new(changeset: ChangesetId, date: DateTime<FixedOffset>) -> Self {
        LogItem {
            changeset,
            parents: Vec::with_capacity(1),
            tag: None,
            user: String::new(),
            date,
            summary: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }

    pub fn with_parents(mut self, parents: Vec<ChangesetId>) -> Self {
        self.parents = parents;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn changeset(&self) -> &ChangesetId {
        &self.changeset
    }

    pub fn parents(&self) -> &[ChangesetId] {
        &self.parents
    }

    pub(crate) fn parents_mut(&mut self) -> &mut Vec<ChangesetId> {
        &mut self.parents
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn is_tip(&self) -> bool {
        self.tag.as_deref() == Some(TIP_MARKER)
    }

    /// Tagged with anything but the tip marker
    pub fn has_release_tag(&self) -> bool {
        self.tag.is_some() && !self.is_tip()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Merge commits hg creates with its default message
    pub fn is_plain_merge(&self) -> bool {
        self.summary == MERGE_SUMMARY
    }

    pub fn on_default_branch(&self) -> bool {
        self.branch == DEFAULT_BRANCH
    }

    /// One-line description used in progress logs
    pub fn short_display(&self) -> String {
        format!(
            "{} {} {}",
            self.tag.as_deref().unwrap_or("null"),
            self.changeset,
            self.summary
        )
    }
}

impl std::fmt::Display for LogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "changeset:   {}", self.changeset)?;
        if self.branch != DEFAULT_BRANCH {
            writeln!(f, "branch:      {}", self.branch)?;
        }
        if let Some(tag) = &self.tag {
            writeln!(f, "tag:         {}", tag)?;
        }
        for parent in &self.parents {
            writeln!(f, "parent:      {}", parent)?;
        }
        writeln!(f, "user:        {}", self.user)?;
        writeln!(f, "date:        {}", self.date.format(HG_DATE_FORMAT))?;
        writeln!(f, "summary:     {}", self.summary)
    }
}
