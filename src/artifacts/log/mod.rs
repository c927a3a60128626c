//! Parsing of `hg log` output
//!
//! - `changeset_id`: `<rev>:<hash>` changeset identifiers
//! - `log_item`: one parsed log entry
//! - `log_parser`: turns the raw log text into an ordered list of entries
//!
//! ## Format
//!
//! ```text
//! changeset:   3:5e1f2a3b4c5d
//! branch:      jdk8u
//! tag:         tip
//! parent:      1:0a1b2c3d4e5f
//! parent:      2:6f7e8d9c0b1a
//! user:        duke
//! date:        Tue Mar 06 16:08:15 2018 +0100
//! summary:     Merge
//! ```
//!
//! Entries are separated by blank lines and emitted newest first.

pub mod changeset_id;
pub mod log_item;
pub mod log_parser;

/// Tag Mercurial puts on the newest changeset of a repository
pub const TIP_MARKER: &str = "tip";

/// Branch of every changeset without an explicit `branch:` line
pub const DEFAULT_BRANCH: &str = "default";

/// Summary of the merge commits whose parents are inspected for fatal merges
pub const MERGE_SUMMARY: &str = "Merge";

/// Date layout used by `hg log`, e.g. `Tue Mar 06 16:08:15 2018 +0100`
pub const HG_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// A log entry line: a label, a colon, whitespace, then the value
pub const FIELD_LINE_REGEX: &str = r"^([^:\s]+):\s+(.*)$";

/// Labels `hg log` prints in its default template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Changeset,
    Parent,
    Tag,
    User,
    Date,
    Summary,
    Branch,
}

pub const LOG_FIELDS: phf::Map<&'static str, LogField> = phf::phf_map! {
    "changeset" => LogField::Changeset,
    "parent" => LogField::Parent,
    "tag" => LogField::Tag,
    "user" => LogField::User,
    "date" => LogField::Date,
    "summary" => LogField::Summary,
    "branch" => LogField::Branch,
};
