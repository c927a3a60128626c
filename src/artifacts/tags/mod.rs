//! Tags and the results attached to them
//!
//! - `tag_sort`: version-aware ordering of tag names
//! - `tag_commit`: a tag resolved to a checkout point in one repository
//! - `tag_with_date`: newest occurrence of a tag, for tip-tag queries

pub mod tag_commit;
pub mod tag_sort;
pub mod tag_with_date;
