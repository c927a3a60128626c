//! Tag resolved to a checkout point
//!
//! A [`TagCommitResult`] says: in `repo/subrepo`, checking out `checkout` gives
//! the line of history that starts at `tag`, `changesets_since_tag` commits
//! later. `date` is the date of the merge that ended the line (or of the tip
//! when the line is still alive).

use crate::artifacts::log::TIP_MARKER;
use crate::artifacts::log::changeset_id::ChangesetId;
use crate::artifacts::tags::tag_sort::tag_sort;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;

/// Layout of dates in reports and log file names
pub const ISO_OUTPUT_FORMAT: &str = "%Y-%m-%d_%H:%M:%S_%z";

#[derive(Debug, Clone)]
pub struct TagCommitResult {
    tag: Option<String>,
    checkout: ChangesetId,
    repo: String,
    subrepo: String,
    tip_line: bool,
    changesets_since_tag: usize,
    date: DateTime<FixedOffset>,
    was_added: bool,
}

impl TagCommitResult {
    pub fn new(
        tag: Option<String>,
        checkout: ChangesetId,
        repo: impl Into<String>,
        subrepo: impl Into<String>,
        tip_line: bool,
        changesets_since_tag: usize,
        date: DateTime<FixedOffset>,
    ) -> Self {
        TagCommitResult {
            tag,
            checkout,
            repo: repo.into(),
            subrepo: subrepo.into(),
            tip_line,
            changesets_since_tag,
            date,
            was_added: false,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn checkout(&self) -> &ChangesetId {
        &self.checkout
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn subrepo(&self) -> &str {
        &self.subrepo
    }

    pub fn is_tip_line(&self) -> bool {
        self.tip_line
    }

    pub fn changesets_since_tag(&self) -> usize {
        self.changesets_since_tag
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    /// Found by the secondary search for tags known from sibling repositories
    pub fn was_added(&self) -> bool {
        self.was_added
    }

    pub(crate) fn mark_added(&mut self) {
        self.was_added = true;
    }

    /// Newest tag first, then the longest line first
    pub fn rank(&self, other: &Self) -> Ordering {
        tag_sort(self.tag(), other.tag())
            .then_with(|| other.changesets_since_tag.cmp(&self.changesets_since_tag))
    }

    /// `<subrepo> <rev:hash>[ tip]`, the line handed to checkout scripts
    pub fn checkout_line(&self) -> String {
        if self.tip_line {
            format!("{} {} {}", self.subrepo, self.checkout, TIP_MARKER)
        } else {
            format!("{} {}", self.subrepo, self.checkout)
        }
    }
}

impl PartialEq for TagCommitResult {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.checkout == other.checkout
            && self.repo == other.repo
            && self.subrepo == other.subrepo
    }
}

impl Eq for TagCommitResult {}

impl std::fmt::Display for TagCommitResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<9} {} {} {} {} {} {}",
            if self.was_added { "secondary" } else { "" },
            self.repo,
            self.subrepo,
            self.tag.as_deref().unwrap_or("null"),
            self.changesets_since_tag,
            self.checkout,
            self.date.format(ISO_OUTPUT_FORMAT)
        )?;
        if self.tip_line {
            write!(f, " {}", TIP_MARKER)?;
        }
        Ok(())
    }
}
