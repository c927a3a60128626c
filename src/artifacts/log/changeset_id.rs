//! Mercurial changeset identifier
//!
//! `hg log` prints changesets as `<rev>:<hash>`, where `rev` is the local,
//! monotonically increasing revision number (`-1` for the null revision) and
//! `hash` the (short) node id.
//! Both parts take part in equality.

use crate::errors::TrackerError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangesetId {
    rev: i32,
    hash: String,
}

impl ChangesetId {
    pub fn new(rev: i32, hash: impl Into<String>) -> Self {
        ChangesetId {
            rev,
            hash: hash.into(),
        }
    }

    /// Parse a `<rev>:<hash>` pair
    pub fn try_parse(value: &str) -> anyhow::Result<Self> {
        let invalid = || TrackerError::InvalidChangesetId(value.to_string());

        let (rev, hash) = value.trim().split_once(':').ok_or_else(invalid)?;
        let rev = rev.parse::<i32>().map_err(|_| invalid())?;
        if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid().into());
        }

        Ok(Self::new(rev, hash))
    }

    pub fn rev(&self) -> i32 {
        self.rev
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The root revision, the last entry of a full `hg log`
    pub fn is_root(&self) -> bool {
        self.rev == 0
    }
}

impl std::fmt::Display for ChangesetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.rev, self.hash)
    }
}
